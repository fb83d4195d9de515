//! Countdown and stopwatch timers plus time formatting helpers.

pub mod stopwatch;
pub mod timer;

pub use stopwatch::Stopwatch;
pub use timer::{
    format_clock, format_duration, format_duration_mmss, format_seconds_mmss, parse_duration,
    render_progress_bar, Countdown, CountdownState,
};
