//! Game settings and preferences
//!
//! Persisted separately from best records (LocalStorage on web, a JSON file
//! next to the records on native).

use serde::{Deserialize, Serialize};

use crate::audio::Mix;
use crate::error::PersistError;
use crate::renderer::RenderOptions;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Input ===
    /// Pause automatically when the window loses focus
    pub pause_on_blur: bool,
    /// Capture the pointer and use relative motion
    pub pointer_lock: bool,

    // === HUD ===
    pub show_wave_banner: bool,
    /// "+N" popups on scoring
    pub floating_scores: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.8,
            music_volume: 0.5,
            muted: false,

            pause_on_blur: true,
            pointer_lock: true,

            show_wave_banner: true,
            floating_scores: true,
        }
    }
}

impl Settings {
    /// Volume mix for audio sinks
    pub fn mix(&self) -> Mix {
        Mix {
            master: self.master_volume.clamp(0.0, 1.0),
            sfx: self.sfx_volume.clamp(0.0, 1.0),
            music: self.music_volume.clamp(0.0, 1.0),
            muted: self.muted,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            wave_banner: self.show_wave_banner,
            floating_scores: self.floating_scores,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Storage key / file stem
    const STORAGE_KEY: &'static str = "air_dodger_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::platform::storage::local_get(Self::STORAGE_KEY)
            .and_then(|json| json.map(|j| Self::from_json(&j)).transpose())
        {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Settings unreadable ({}), using defaults", err);
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let result = self
            .to_json()
            .and_then(|json| crate::platform::storage::local_set(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Settings not saved: {}", err),
        }
    }

    /// Load settings from the data directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(&Self::file_path())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let path = Self::file_path();
        match self.save_to(&path) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(err) => log::warn!("Settings not saved: {}", err),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn file_path() -> std::path::PathBuf {
        crate::platform::data_path(&format!("{}.json", Self::STORAGE_KEY))
    }

    /// Read a settings file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|err| {
                log::warn!("Settings unreadable ({}), using defaults", err);
                Self::default()
            }),
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write a settings file, creating its directory if needed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), PersistError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{ "muted": true }"#).unwrap();
        assert!(s.muted);
        assert!(s.pause_on_blur);
        assert_eq!(s.master_volume, 0.8);
    }

    #[test]
    fn test_mix_clamps_volumes() {
        let s = Settings {
            master_volume: 3.0,
            sfx_volume: -1.0,
            ..Settings::default()
        };
        let mix = s.mix();
        assert_eq!(mix.master, 1.0);
        assert_eq!(mix.sfx, 0.0);
    }

    #[test]
    fn test_render_options_follow_hud_flags() {
        let s = Settings {
            show_wave_banner: false,
            ..Settings::default()
        };
        let opts = s.render_options();
        assert!(!opts.wave_banner);
        assert!(opts.floating_scores);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_creates_missing_data_dir() {
        let dir = std::env::temp_dir()
            .join(format!("air-dodger-settings-{}", std::process::id()))
            .join("nested");
        let path = dir.join("settings.json");
        let _ = std::fs::remove_dir_all(&dir);

        let settings = Settings {
            muted: true,
            music_volume: 0.25,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("air-dodger-no-such-dir/settings.json");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
