//! Desktop notification and audio implementations.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use notify_rust::Notification;

use super::phase::SoundCue;
use super::ports::{AudioSink, Notifier};
use crate::error::FocusdeckError;

const APP_NAME: &str = "focusdeck";

/// Players tried in order until one spawns.
const PLAYERS: &[&str] = &["paplay", "aplay", "afplay"];

/// Desktop notifications via the platform notification service.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), FocusdeckError> {
        Notification::new()
            .summary(title)
            .body(body)
            .appname(APP_NAME)
            .icon("alarm-clock")
            .show()
            .map(drop)
            .map_err(|e| FocusdeckError::Notification(e.to_string()))
    }
}

/// Notifier that discards everything.
#[derive(Debug, Clone, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, title: &str, _body: &str) -> Result<(), FocusdeckError> {
        tracing::trace!(title, "notification suppressed");
        Ok(())
    }
}

/// Plays cues through a system audio player, falling back to the terminal bell.
#[derive(Debug, Clone, Default)]
pub struct SystemAudio;

impl SystemAudio {
    /// Candidate files for a cue, first existing one wins.
    fn candidates(cue: &SoundCue) -> Vec<PathBuf> {
        let names: &[&str] = match cue {
            SoundCue::Alarm => &[
                "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga",
                "/System/Library/Sounds/Glass.aiff",
            ],
            SoundCue::Chime => &[
                "/usr/share/sounds/freedesktop/stereo/complete.oga",
                "/System/Library/Sounds/Ping.aiff",
            ],
            SoundCue::Bell => &[
                "/usr/share/sounds/freedesktop/stereo/bell.oga",
                "/System/Library/Sounds/Tink.aiff",
            ],
            SoundCue::Custom(path) => return vec![path.clone()],
        };
        names.iter().map(PathBuf::from).collect()
    }

    fn ring_bell() -> Result<(), FocusdeckError> {
        let mut stdout = std::io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }

    fn spawn_player(file: &Path) -> Result<(), FocusdeckError> {
        for player in PLAYERS {
            let spawned = Command::new(player)
                .arg(file)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            if let Ok(mut child) = spawned {
                // Reap in the background so playback never blocks the caller
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
                return Ok(());
            }
        }

        Err(FocusdeckError::Audio(format!(
            "no audio player available for {}",
            file.display()
        )))
    }
}

impl AudioSink for SystemAudio {
    fn play(&self, cue: &SoundCue) -> Result<(), FocusdeckError> {
        let file = Self::candidates(cue).into_iter().find(|p| p.exists());

        match file {
            Some(file) => Self::spawn_player(&file).or_else(|e| {
                tracing::debug!(error = %e, "falling back to terminal bell");
                Self::ring_bell()
            }),
            None if matches!(cue, SoundCue::Custom(_)) => {
                Self::ring_bell()?;
                Err(FocusdeckError::Audio(format!("sound file not found: {cue}")))
            }
            None => Self::ring_bell(),
        }
    }
}

/// Audio sink that plays nothing.
#[derive(Debug, Clone, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&self, _cue: &SoundCue) -> Result<(), FocusdeckError> {
        Ok(())
    }
}
