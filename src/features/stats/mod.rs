//! Focus analytics and the month agenda.

pub mod agenda;
pub mod report;

pub use agenda::{month_bounds, parse_month, Agenda, AgendaDay, AgendaTask};
pub use report::{DailyFocus, PriorityCount, ReportPeriod, StatsReport, DAILY_WINDOW};
