// Permission gating for the background notification path
//
// Below the OS capability threshold nothing is required and the check always
// passes; at or above it, posting notifications must be granted. Absence of a
// permission is a routing decision for the dispatcher, never a fault.

use serde::{Deserialize, Serialize};

use crate::alert::protocol::DeviceStateSnapshot;

/// Permissions the host may need to request on the plugin's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    /// Permission to post notifications, gated by newer OS capability levels
    PostNotifications,
}

/// Result of a permission evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCheck {
    pub granted: bool,
    pub required: Vec<PermissionKind>,
}

/// Evaluates the capability-gated permission set for the background path
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGate;

impl PermissionGate {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate against one device state snapshot
    pub fn check(&self, snapshot: &DeviceStateSnapshot) -> PermissionCheck {
        if !snapshot.requires_notification_permission {
            return PermissionCheck {
                granted: true,
                required: Vec::new(),
            };
        }
        PermissionCheck {
            granted: snapshot.notifications_granted,
            required: vec![PermissionKind::PostNotifications],
        }
    }

    /// Message key shown by the host's permission-request UI when prompting
    pub fn explanation_message_key(&self) -> &'static str {
        "locate_alert_notifications_explanation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(requires: bool, granted: bool) -> DeviceStateSnapshot {
        DeviceStateSnapshot {
            supports_background_launch: true,
            app_in_foreground: false,
            screen_interactive: true,
            requires_notification_permission: requires,
            notifications_granted: granted,
        }
    }

    #[test]
    fn below_threshold_nothing_is_required() {
        let check = PermissionGate::new().check(&snapshot(false, false));
        assert!(check.granted);
        assert!(check.required.is_empty());
    }

    #[test]
    fn at_threshold_grant_state_decides() {
        let gate = PermissionGate::new();

        let denied = gate.check(&snapshot(true, false));
        assert!(!denied.granted);
        assert_eq!(denied.required, vec![PermissionKind::PostNotifications]);

        let granted = gate.check(&snapshot(true, true));
        assert!(granted.granted);
        assert_eq!(granted.required, vec![PermissionKind::PostNotifications]);
    }

    #[test]
    fn explanation_key_is_stable() {
        assert_eq!(
            PermissionGate::new().explanation_message_key(),
            "locate_alert_notifications_explanation"
        );
    }
}
