// Demo host for the locate-alert plugin
//
// Wires the desktop platform into a dispatcher, fires one simulated trigger
// from a paired companion, and ends the session on Ctrl-C (standing in for
// the found-it action or a device disconnect).

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use locate_alert::alert::audio::AudioAlerter;
use locate_alert::alert::notification::NotificationPresenter;
use locate_alert::config::Config;
use locate_alert::platform::desktop::{DesktopAudio, TerminalShade, TerminalSurface};
use locate_alert::{DeviceStateSnapshot, Dispatcher};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let (audio, _output) = DesktopAudio::new(&config).context("plugin activation failed")?;
    let audio = Arc::new(audio);

    let dispatcher = Dispatcher::new(
        AudioAlerter::new(audio.clone(), audio.clone()),
        NotificationPresenter::new(Arc::new(TerminalShade::new())),
        Arc::new(TerminalSurface),
    );

    // Simulated trigger: background-eligible, screen on, notifications granted.
    let snapshot = DeviceStateSnapshot {
        supports_background_launch: true,
        app_in_foreground: false,
        screen_interactive: true,
        requires_notification_permission: true,
        notifications_granted: true,
    };

    let outcome = dispatcher.handle_trigger("demo-companion", &snapshot);
    println!("trigger routed: {outcome} -- press Ctrl-C when you've found the device");

    tokio::signal::ctrl_c()
        .await
        .context("failed to wait for Ctrl-C")?;

    dispatcher.end_active_session();
    dispatcher.deactivate();
    println!("alert session ended, ring volume restored");

    Ok(())
}
