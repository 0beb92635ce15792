//! Device-side responder for remote "locate my device" requests.
//!
//! A paired companion sends a trigger; the dispatcher routes it to a loud
//! looping alert, a high-urgency notification, the full-screen surface, or
//! declines it when permissions are missing. Transport, pairing, and
//! notification-channel bootstrap belong to the host.

// Plugin core (shared between the host integration and the demo binary)
pub mod alert;

// Desktop platform configuration
pub mod config;

// Collaborator traits + desktop reference platform
pub mod platform;

pub use alert::dispatcher::Dispatcher;
pub use alert::protocol::{AlertSession, DeviceStateSnapshot, Outcome, SessionId};
