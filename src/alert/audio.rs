// Audio-alert resource manager
//
// Owns loud-ringtone playback and the save/restore of the ring-stream
// volume. The resource holder is guarded so a teardown racing an in-flight
// start either waits for it or cleanly no-ops, and the captured volume is
// restored exactly once, from the value the matching start captured.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::platform::{RingVolume, Ringer};

/// Lifecycle of the audio resource. `Destroyed` stands in for the released
/// resource; start and stop check this state rather than a nullable handle.
#[derive(Debug)]
enum Holder {
    Active {
        /// Ring level captured on the not-playing -> playing transition,
        /// consumed exactly once on stop
        previous_volume: Option<u32>,
        playing: bool,
    },
    Destroyed,
}

pub struct AudioAlerter {
    holder: Mutex<Holder>,
    ringer: Arc<dyn Ringer>,
    volume: Arc<dyn RingVolume>,
}

impl AudioAlerter {
    pub fn new(ringer: Arc<dyn Ringer>, volume: Arc<dyn RingVolume>) -> Self {
        Self {
            holder: Mutex::new(Holder::Active {
                previous_volume: None,
                playing: false,
            }),
            ringer,
            volume,
        }
    }

    /// Whether audio output is currently active
    pub fn is_playing(&self) -> bool {
        matches!(
            *self.holder.lock().unwrap(),
            Holder::Active { playing: true, .. }
        )
    }

    /// Begin the loud alert. No-op if already playing or after teardown.
    ///
    /// Captures the current ring level once, raises the stream to maximum so
    /// the device is heard even when silenced, and starts looping playback.
    /// The captured level comes back on stop.
    pub fn start_playing(&self) {
        let mut holder = self.holder.lock().unwrap();
        match *holder {
            Holder::Destroyed => {
                debug!("alert start after teardown ignored");
            }
            Holder::Active { playing: true, .. } => {}
            Holder::Active {
                ref mut previous_volume,
                ref mut playing,
            } => {
                *previous_volume = Some(self.volume.current());
                if let Err(e) = self.volume.set(self.volume.maximum()) {
                    warn!(%e, "could not raise ring volume; alert continues");
                }
                self.ringer.start();
                *playing = true;
            }
        }
    }

    /// End the loud alert. Restores the captured ring level exactly once,
    /// then halts playback. Benign no-op when nothing is playing or once the
    /// resource has been released.
    pub fn stop_playing(&self) {
        let mut holder = self.holder.lock().unwrap();
        match *holder {
            Holder::Destroyed => {}
            Holder::Active {
                ref mut previous_volume,
                ref mut playing,
            } => {
                if let Some(level) = previous_volume.take() {
                    if let Err(e) = self.volume.set(level) {
                        warn!(%e, level, "could not restore ring volume");
                    }
                }
                if *playing {
                    self.ringer.stop();
                    *playing = false;
                }
            }
        }
    }

    /// Release the audio resource (plugin deactivation / device disconnect).
    /// Restores the volume and stops playback first if needed; all later
    /// start/stop calls are no-ops. Idempotent.
    pub fn destroy(&self) {
        let mut holder = self.holder.lock().unwrap();
        if let Holder::Active {
            ref mut previous_volume,
            playing,
        } = *holder
        {
            if let Some(level) = previous_volume.take() {
                if let Err(e) = self.volume.set(level) {
                    warn!(%e, level, "could not restore ring volume on teardown");
                }
            }
            if playing {
                self.ringer.stop();
            }
            *holder = Holder::Destroyed;
        }
    }
}

impl Drop for AudioAlerter {
    fn drop(&mut self) {
        self.destroy();
    }
}
