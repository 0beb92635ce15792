// Desktop reference platform
//
// Rodio-backed looping playback with a stepped ring-volume model, plus a
// terminal notification shade (OSC escape sequences) and a terminal alert
// surface. A mobile host replaces this module wholesale with its own
// implementations of the collaborator traits.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::sync::Mutex;

use rodio::source::Source;
use rodio::{Decoder, OutputStream, Sink};
use tracing::debug;

use crate::alert::notification::{AlertAction, AlertNotification};
use crate::alert::protocol::SessionId;
use crate::config::Config;
use crate::platform::{
    AlertSurface, NotificationShade, PlatformError, RingVolume, Ringer, VolumeError,
};

/// Steps on the simulated ring stream (`0..=RING_VOLUME_STEPS`)
pub const RING_VOLUME_STEPS: u32 = 16;

/// Sink gain for a stepped ring level
fn step_gain(level: u32) -> f32 {
    level as f32 / RING_VOLUME_STEPS as f32
}

/// Desktop audio backend: one paused, endlessly looping sink holding the
/// resolved alert sound. Implements both the playback and ring-volume
/// collaborators; the "ring stream" is the sink gain, in stepped levels.
pub struct DesktopAudio {
    sink: Sink,
    level: Mutex<u32>,
}

/// Keeps the output stream alive; it is not `Send`, so it stays with the
/// thread that activated the plugin while `DesktopAudio` travels freely.
pub struct AudioOutput {
    _stream: OutputStream,
}

impl DesktopAudio {
    /// Bring up the audio backend. Failing to resolve or decode an alert
    /// sound here is fatal to plugin activation.
    pub fn new(config: &Config) -> Result<(Self, AudioOutput), PlatformError> {
        let sound = config.resolve_alert_sound().ok_or_else(|| {
            PlatformError::SoundUnavailable(
                "no alert sound configured and no system sound found".to_string(),
            )
        })?;

        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| PlatformError::AudioOutput(e.to_string()))?;

        let file = File::open(&sound).map_err(|e| PlatformError::Decode {
            path: sound.display().to_string(),
            reason: e.to_string(),
        })?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| PlatformError::Decode {
                path: sound.display().to_string(),
                reason: e.to_string(),
            })?
            .repeat_infinite();

        let sink =
            Sink::try_new(&handle).map_err(|e| PlatformError::AudioOutput(e.to_string()))?;
        sink.pause();
        sink.append(source);

        debug!(sound = %sound.display(), "alert sound resolved");

        Ok((
            Self {
                sink,
                level: Mutex::new(RING_VOLUME_STEPS),
            },
            AudioOutput { _stream: stream },
        ))
    }
}

impl Ringer for DesktopAudio {
    fn start(&self) {
        self.sink.play();
    }

    fn stop(&self) {
        self.sink.pause();
    }
}

impl RingVolume for DesktopAudio {
    fn current(&self) -> u32 {
        *self.level.lock().unwrap()
    }

    fn maximum(&self) -> u32 {
        RING_VOLUME_STEPS
    }

    fn set(&self, level: u32) -> Result<(), VolumeError> {
        if level > RING_VOLUME_STEPS {
            return Err(VolumeError(format!(
                "level {level} above maximum {RING_VOLUME_STEPS}"
            )));
        }
        self.sink.set_volume(step_gain(level));
        *self.level.lock().unwrap() = level;
        Ok(())
    }
}

/// Terminal notification shade.
///
/// Emits terminal escape notifications (BEL, OSC 9, OSC 777, OSC 99) for
/// various terminal emulators. Terminals cannot retract a posted
/// notification, so the shade keeps a registry of posted ids and cancel
/// clears the registry entry.
#[derive(Default)]
pub struct TerminalShade {
    posted: Mutex<HashSet<SessionId>>,
}

impl TerminalShade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a notification for this session id is still considered shown
    pub fn is_showing(&self, id: SessionId) -> bool {
        self.posted.lock().unwrap().contains(&id)
    }
}

impl NotificationShade for TerminalShade {
    fn post(&self, notification: AlertNotification) {
        let body = match &notification.action {
            AlertAction::Broadcast { device_id, .. } => {
                format!("Found it? Dismiss to stop the alert ({device_id})")
            }
            AlertAction::LaunchSurface { device_id } => {
                format!("Tap to open the locate alert ({device_id})")
            }
        };
        emit_terminal_notification("Device locate alert", &body);
        self.posted.lock().unwrap().insert(notification.id);
    }

    fn cancel(&self, id: SessionId) {
        self.posted.lock().unwrap().remove(&id);
    }
}

/// Emits terminal notification escape codes to stdout:
/// - BEL (`\x07`) - universal terminal bell
/// - OSC 9 (iTerm2) - desktop notification
/// - OSC 777 (Konsole/VTE) - desktop notification
/// - OSC 99 (kitty) - desktop notification
fn emit_terminal_notification(title: &str, message: &str) {
    let mut stdout = io::stdout();

    let _ = stdout.write_all(b"\x07");

    let osc9 = format!("\x1b]9;{}\x07", escape_osc(message));
    let _ = stdout.write_all(osc9.as_bytes());

    let osc777 = format!(
        "\x1b]777;notify;{};{}\x07",
        escape_osc(title),
        escape_osc(message)
    );
    let _ = stdout.write_all(osc777.as_bytes());

    let osc99 = format!(
        "\x1b]99;i=1:d=0:p=title;{}\x1b\\\x1b]99;i=1:d=0:p=body;{}\x1b\\",
        escape_osc(title),
        escape_osc(message)
    );
    let _ = stdout.write_all(osc99.as_bytes());

    let _ = stdout.flush();
}

/// OSC sequences are terminated by BEL or ST; strip those from payloads
fn escape_osc(s: &str) -> String {
    s.replace('\x07', "")
        .replace('\x1b', "")
        .replace('\n', " ")
        .replace('\r', "")
}

/// Terminal stand-in for the full-screen alert surface
pub struct TerminalSurface;

impl AlertSurface for TerminalSurface {
    fn launch(&self, device_id: &str) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = writeln!(
            stdout,
            "*** DEVICE LOCATE ALERT -- requested by {} ***",
            escape_osc(device_id)
        );
        let _ = stdout.flush();
    }
}
