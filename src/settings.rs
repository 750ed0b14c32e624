use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::DEFAULT_PLAYBACK_SPEED;
use crate::layout::LayoutVariant;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no home directory to store settings in")]
    NoHome,
    #[error("failed to write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureSettings {
    /// Request/response headers and bodies were captured by the SDK
    #[serde(default = "enabled")]
    pub network_details: bool,
}

fn enabled() -> bool {
    true
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            network_details: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackSettings {
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_speed() -> f64 {
    DEFAULT_PLAYBACK_SPEED
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_PLAYBACK_SPEED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    /// Preferred replay layout
    #[serde(default)]
    pub layout: LayoutVariant,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub features: FeatureSettings,
    #[serde(default)]
    pub playback: PlaybackSettings,
}

impl Settings {
    /// Load settings from ~/.replayview/settings.json
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|contents| match serde_json::from_str(&contents) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unreadable settings file");
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Write settings back, creating ~/.replayview if needed.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoHome)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    fn settings_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".replayview").join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.layout, LayoutVariant::Topbar);
        assert!(settings.features.network_details);
        assert_eq!(settings.playback.speed, 1.0);
    }

    #[test]
    fn test_partial_settings() {
        let settings: Settings = serde_json::from_str(
            r#"{"layout": "no_video", "organization": "acme", "features": {}}"#,
        )
        .unwrap();
        assert_eq!(settings.layout, LayoutVariant::NoVideo);
        assert_eq!(settings.organization.as_deref(), Some("acme"));
        assert!(settings.features.network_details);
    }

    #[test]
    fn test_roundtrip_preserves_layout() {
        let settings = Settings {
            layout: LayoutVariant::SidebarLeft,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.layout, LayoutVariant::SidebarLeft);
    }
}
