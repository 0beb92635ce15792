// Trigger routing and session lifecycle
//
// Turns one inbound locate trigger plus a device state snapshot into an
// outcome, owns the resulting alert session, and tears it down on the
// uniform session-end signal. No error crosses this boundary: every path
// returns a definite outcome.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info};

use crate::alert::audio::AudioAlerter;
use crate::alert::notification::NotificationPresenter;
use crate::alert::permissions::PermissionGate;
use crate::alert::protocol::{AlertSession, DeviceStateSnapshot, Outcome, SessionId};
use crate::platform::AlertSurface;

#[derive(Default)]
struct DispatcherState {
    /// Active session slot; `None` is the idle/ended state
    session: Option<AlertSession>,
    /// Last issued id, so timestamp-derived ids stay unique per session
    last_session_id: SessionId,
}

pub struct Dispatcher {
    audio: AudioAlerter,
    notifications: NotificationPresenter,
    gate: PermissionGate,
    surface: Arc<dyn AlertSurface>,
    state: Mutex<DispatcherState>,
}

impl Dispatcher {
    pub fn new(
        audio: AudioAlerter,
        notifications: NotificationPresenter,
        surface: Arc<dyn AlertSurface>,
    ) -> Self {
        Self {
            audio,
            notifications,
            gate: PermissionGate::new(),
            surface,
            state: Mutex::new(DispatcherState::default()),
        }
    }

    /// The gate, for the host's permission-request UI
    pub fn permission_gate(&self) -> &PermissionGate {
        &self.gate
    }

    /// Current session, if one is active
    pub fn active_session(&self) -> Option<AlertSession> {
        self.state.lock().unwrap().session.clone()
    }

    /// Route one trigger from the paired companion.
    ///
    /// Decision policy, in order: foreground-eligible devices get the alert
    /// surface immediately (that path needs no notification permission);
    /// otherwise missing permissions veto the trigger; otherwise the screen
    /// state picks loud audio plus a broadcast notification, or a
    /// direct-launch notification alone.
    pub fn handle_trigger(&self, device_id: &str, snapshot: &DeviceStateSnapshot) -> Outcome {
        if !snapshot.supports_background_launch || snapshot.app_in_foreground {
            let session = self.begin_session(device_id, Outcome::ForegroundLaunch);
            self.surface.launch(device_id);
            info!(device_id, session_id = session.id, "launched alert surface");
            return Outcome::ForegroundLaunch;
        }

        let check = self.gate.check(snapshot);
        if !check.granted {
            debug!(
                device_id,
                required = ?check.required,
                "trigger left unhandled: permissions missing"
            );
            return Outcome::Unhandled;
        }

        if snapshot.screen_interactive {
            let session = self.begin_session(device_id, Outcome::AudioAndNotification);
            self.audio.start_playing();
            self.notifications.show_broadcast(device_id, session.id);
            info!(device_id, session_id = session.id, "loud alert started");
            Outcome::AudioAndNotification
        } else {
            let session = self.begin_session(device_id, Outcome::NotificationOnly);
            self.notifications.show_direct_launch(device_id, session.id);
            info!(device_id, session_id = session.id, "direct-launch notification shown");
            Outcome::NotificationOnly
        }
    }

    /// Uniform session-end signal: the notification-action receiver ("found
    /// it"), plugin deactivation, and device disconnect all land here.
    /// Stops audio if playing, cancels the notification if shown. Idempotent.
    pub fn end_session(&self, session_id: SessionId) {
        let mut state = self.state.lock().unwrap();
        match state.session {
            Some(ref session) if session.id == session_id => {
                info!(session_id, "ending alert session");
                state.session = None;
                self.audio.stop_playing();
                self.notifications.hide(session_id);
            }
            _ => debug!(session_id, "session-end for an inactive session ignored"),
        }
    }

    /// End whatever session is active, if any (device-disconnect path)
    pub fn end_active_session(&self) {
        let active = self.state.lock().unwrap().session.as_ref().map(|s| s.id);
        if let Some(session_id) = active {
            self.end_session(session_id);
        }
    }

    /// Plugin deactivation: end the active session and release the audio
    /// resource. Later stop calls are benign no-ops.
    pub fn deactivate(&self) {
        self.end_active_session();
        self.audio.destroy();
    }

    /// Accept a new session, superseding any active one. Only one session's
    /// audio may be active at a time, so the older session is torn down
    /// before the new id is issued.
    fn begin_session(&self, device_id: &str, outcome: Outcome) -> AlertSession {
        let mut state = self.state.lock().unwrap();
        if let Some(previous) = state.session.take() {
            debug!(
                superseded = previous.id,
                "new trigger while a session is active; ending the old session"
            );
            self.audio.stop_playing();
            self.notifications.hide(previous.id);
        }

        let id = Utc::now()
            .timestamp_millis()
            .max(state.last_session_id + 1);
        state.last_session_id = id;

        let session = AlertSession::new(id, device_id, outcome);
        state.session = Some(session.clone());
        session
    }
}
