// Alert notification construction and cancellation
//
// Builds the high-urgency notification for one session and hands it to the
// injected shade. The presenter keeps no session identity of its own; the
// session id is the notification id.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::alert::protocol::SessionId;
use crate::platform::NotificationShade;

/// High-priority channel id, owned by the host's notification bootstrap
pub const CHANNEL_HIGH_PRIORITY: &str = "high_priority";

/// Group key shared by alerts from this subsystem so they stack together
pub const GROUP_BACKGROUND_SERVICE: &str = "background_service";

/// Action id consumed by the external receiver that forwards "found it"
/// back into session end
pub const ACTION_FOUND_IT: &str = "device.locate.found_it";

/// Message key for the notification title
pub const TITLE_KEY_FOUND: &str = "locate_alert_found";

/// Primary action attached to an alert notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertAction {
    /// Broadcast the found-it action with the device id as payload
    Broadcast { action: String, device_id: String },
    /// Open the alert surface for the device
    LaunchSurface { device_id: String },
}

/// A fully-specified alert notification, ready for the shade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertNotification {
    /// Notification id == session id, stable for the session lifetime
    pub id: SessionId,
    pub channel: String,
    /// Maximum visual urgency: high priority plus full-screen intent semantics
    pub high_priority: bool,
    pub full_screen: bool,
    /// Dismissed automatically when the user interacts with it
    pub auto_cancel: bool,
    pub group: String,
    pub title_key: String,
    pub action: AlertAction,
}

pub struct NotificationPresenter {
    shade: Arc<dyn NotificationShade>,
}

impl NotificationPresenter {
    pub fn new(shade: Arc<dyn NotificationShade>) -> Self {
        Self { shade }
    }

    fn base(id: SessionId, action: AlertAction) -> AlertNotification {
        AlertNotification {
            id,
            channel: CHANNEL_HIGH_PRIORITY.to_string(),
            high_priority: true,
            full_screen: true,
            auto_cancel: true,
            group: GROUP_BACKGROUND_SERVICE.to_string(),
            title_key: TITLE_KEY_FOUND.to_string(),
            action,
        }
    }

    /// Post the broadcast-style notification whose action reports the device
    /// as found (screen-on path, shown alongside the loud alert)
    pub fn show_broadcast(&self, device_id: &str, session_id: SessionId) {
        self.shade.post(Self::base(
            session_id,
            AlertAction::Broadcast {
                action: ACTION_FOUND_IT.to_string(),
                device_id: device_id.to_string(),
            },
        ));
    }

    /// Post the direct-launch notification that opens the alert surface on
    /// tap (screen-off path, no audio)
    pub fn show_direct_launch(&self, device_id: &str, session_id: SessionId) {
        self.shade.post(Self::base(
            session_id,
            AlertAction::LaunchSurface {
                device_id: device_id.to_string(),
            },
        ));
    }

    /// Cancel the session's notification; no-op if none is showing
    pub fn hide(&self, session_id: SessionId) {
        self.shade.cancel(session_id);
    }
}
