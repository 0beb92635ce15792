// Core types for the locate-alert plugin
// Shared between the dispatcher, the platform collaborators, and the host

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inbound trigger packet type delivered by the pairing/transport layer
pub const PACKET_TYPE_LOCATE_REQUEST: &str = "device.locate.request";

/// Packet types this plugin emits (none; the responder is inbound-only)
pub const OUTGOING_PACKET_TYPES: &[&str] = &[];

/// Unique session identifier, derived from the creation timestamp in
/// milliseconds. Doubles as the notification id for the session.
pub type SessionId = i64;

/// Identifier of the paired device that sent the trigger
pub type DeviceId = String;

/// Device form factors with distinct display names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Phone,
    Tablet,
    Tv,
}

/// Message key for the plugin display name, by device form factor
pub fn display_name_key(device_type: DeviceType) -> &'static str {
    match device_type {
        DeviceType::Tv => "locate_alert_title_tv",
        DeviceType::Tablet => "locate_alert_title_tablet",
        DeviceType::Phone => "locate_alert_title",
    }
}

/// Message key for the plugin description
pub fn description_key() -> &'static str {
    "locate_alert_description"
}

/// Immutable device state sampled by the host for one routing decision
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeviceStateSnapshot {
    /// Whether the OS allows launching the alert surface from the background
    pub supports_background_launch: bool,
    /// Whether the companion app currently holds the foreground
    pub app_in_foreground: bool,
    /// Whether the screen is on and accepting input
    pub screen_interactive: bool,
    /// Whether the OS capability level gates notifications behind a permission
    pub requires_notification_permission: bool,
    /// Live OS-reported grant state for posting notifications
    pub notifications_granted: bool,
}

/// Routing outcome of one trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The alert surface was launched directly (needs no notification permission)
    ForegroundLaunch,
    /// Required permissions are missing; the trigger was not acted upon
    Unhandled,
    /// Loud playback started and a broadcast-style notification shown
    AudioAndNotification,
    /// Direct-launch notification shown without audio (screen off)
    NotificationOnly,
}

impl Outcome {
    /// Whether the trigger was acted upon. Callers may skip acknowledging an
    /// unhandled trigger so the transport layer can retry it.
    pub fn handled(&self) -> bool {
        !matches!(self, Outcome::Unhandled)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::ForegroundLaunch => write!(f, "foreground launch"),
            Outcome::Unhandled => write!(f, "unhandled"),
            Outcome::AudioAndNotification => write!(f, "audio and notification"),
            Outcome::NotificationOnly => write!(f, "notification only"),
        }
    }
}

/// One locate-alert response, from trigger acceptance to explicit end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSession {
    /// Session id; the sole notification identifier for this session
    pub id: SessionId,
    /// Device that asked to be found
    pub device_id: DeviceId,
    /// Route taken for this trigger
    pub outcome: Outcome,
    /// When the trigger was accepted
    pub started_at: DateTime<Utc>,
}

impl AlertSession {
    pub fn new(id: SessionId, device_id: impl Into<DeviceId>, outcome: Outcome) -> Self {
        Self {
            id,
            device_id: device_id.into(),
            outcome,
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unhandled_is_the_only_unhandled_outcome() {
        assert!(!Outcome::Unhandled.handled());
        for outcome in [
            Outcome::ForegroundLaunch,
            Outcome::AudioAndNotification,
            Outcome::NotificationOnly,
        ] {
            assert!(outcome.handled(), "{outcome} should count as handled");
        }
    }

    #[test]
    fn display_name_varies_by_form_factor() {
        assert_eq!(display_name_key(DeviceType::Phone), "locate_alert_title");
        assert_eq!(display_name_key(DeviceType::Tablet), "locate_alert_title_tablet");
        assert_eq!(display_name_key(DeviceType::Tv), "locate_alert_title_tv");
    }

    #[test]
    fn session_keeps_the_id_it_was_created_with() {
        let session = AlertSession::new(1700000000123, "phone-a", Outcome::NotificationOnly);
        assert_eq!(session.id, 1700000000123);
        assert_eq!(session.device_id, "phone-a");
        assert_eq!(session.outcome, Outcome::NotificationOnly);
    }
}
