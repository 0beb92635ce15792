// Platform collaborator seams
//
// The core never talks to the OS directly: ring volume, alert playback, the
// notification shade, and the full-screen surface are injected behind these
// traits so the dispatcher's decision table stays pure and testable.

use crate::alert::notification::AlertNotification;
use crate::alert::protocol::SessionId;

pub mod desktop;

/// Errors surfaced while bringing a platform up. An unresolvable alert sound
/// is fatal to plugin activation: the host must not hand out a dispatcher
/// built on a platform that failed here.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("default alert sound could not be resolved: {0}")]
    SoundUnavailable(String),

    #[error("no audio output available: {0}")]
    AudioOutput(String),

    #[error("audio decode failed for {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// The platform refused a volume change. Logged by the caller, never
/// escalated: discoverability takes priority over a perfectly restored volume.
#[derive(Debug, thiserror::Error)]
#[error("ring volume change refused: {0}")]
pub struct VolumeError(pub String);

/// Ring-stream volume control. Levels are opaque steps in `0..=maximum()`;
/// the ring stream is distinct from media and notification streams.
pub trait RingVolume: Send + Sync {
    /// Current ring-stream level
    fn current(&self) -> u32;
    /// Highest level the stream supports
    fn maximum(&self) -> u32;
    /// Set the ring-stream level
    fn set(&self, level: u32) -> Result<(), VolumeError>;
}

/// Looping playback of the resolved alert sound
pub trait Ringer: Send + Sync {
    /// Begin looping playback; restarting is harmless
    fn start(&self);
    /// Halt playback; harmless when not playing
    fn stop(&self);
}

/// OS notification shade: posts and cancels alert notifications by session id
pub trait NotificationShade: Send + Sync {
    fn post(&self, notification: AlertNotification);
    /// Cancel by id; no-op if the id was never posted or already cancelled
    fn cancel(&self, id: SessionId);
}

/// Full-screen alert surface, invoked with the device id as its sole argument
pub trait AlertSurface: Send + Sync {
    fn launch(&self, device_id: &str);
}
