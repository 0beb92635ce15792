// Environment configuration for the desktop platform
// Resolves which sound file backs the loud alert

use std::path::PathBuf;

use once_cell::sync::Lazy;

/// Environment variable overriding the alert sound file
pub const ALERT_SOUND_ENV: &str = "LOCATE_ALERT_SOUND";

/// Default alert-sound candidates, most preferred first. Stock system sounds
/// a desktop install is likely to have, behind a per-user override location.
static DEFAULT_SOUND_CANDIDATES: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".local/share/sounds/locate-alert.ogg"));
    }

    #[cfg(target_os = "macos")]
    {
        candidates.push(PathBuf::from("/System/Library/Sounds/Sosumi.aiff"));
        candidates.push(PathBuf::from("/System/Library/Sounds/Glass.aiff"));
    }

    #[cfg(target_os = "linux")]
    {
        candidates.push(PathBuf::from(
            "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga",
        ));
        candidates.push(PathBuf::from(
            "/usr/share/sounds/freedesktop/stereo/phone-incoming-call.oga",
        ));
        candidates.push(PathBuf::from(
            "/usr/share/sounds/freedesktop/stereo/complete.oga",
        ));
        candidates.push(PathBuf::from(
            "/usr/share/sounds/gnome/default/alerts/bark.ogg",
        ));
    }

    candidates
});

/// Configuration for the desktop platform
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Explicit alert sound file, checked before the default candidates
    pub alert_sound: Option<PathBuf>,
}

impl Config {
    /// Read configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let alert_sound = std::env::var(ALERT_SOUND_ENV)
            .ok()
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty());

        Self { alert_sound }
    }

    /// Resolve the sound file that backs the loud alert: the explicit
    /// override if it exists on disk, else the first existing candidate.
    /// `None` here is fatal to plugin activation.
    pub fn resolve_alert_sound(&self) -> Option<PathBuf> {
        if let Some(path) = &self.alert_sound {
            if path.exists() {
                return Some(path.clone());
            }
        }

        DEFAULT_SOUND_CANDIDATES.iter().find(|p| p.exists()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn existing_override_wins() {
        let temp_dir = TempDir::new().unwrap();
        let sound = temp_dir.path().join("chime.ogg");
        std::fs::write(&sound, b"not really audio").unwrap();

        let config = Config {
            alert_sound: Some(sound.clone()),
        };
        assert_eq!(config.resolve_alert_sound(), Some(sound));
    }

    #[test]
    fn missing_override_falls_through_to_candidates() {
        let missing = PathBuf::from("/nonexistent/locate-alert/chime.ogg");
        let config = Config {
            alert_sound: Some(missing.clone()),
        };

        // Whatever this machine has installed, the dead override never wins.
        assert_ne!(config.resolve_alert_sound(), Some(missing));
    }

    // One test owns the env variable; tests run in parallel.
    #[test]
    fn from_env_picks_up_the_override_and_ignores_empty_values() {
        let temp_dir = TempDir::new().unwrap();
        let sound = temp_dir.path().join("chime.ogg");
        std::fs::write(&sound, b"not really audio").unwrap();

        std::env::set_var(ALERT_SOUND_ENV, &sound);
        let config = Config::from_env();
        assert_eq!(config.alert_sound, Some(sound));

        std::env::set_var(ALERT_SOUND_ENV, "");
        let config = Config::from_env();
        assert_eq!(config.alert_sound, None);

        std::env::remove_var(ALERT_SOUND_ENV);
    }
}
