//! Player settings and preferences
//!
//! Persisted as JSON, separately from the card balance config.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_FRAME_RATE;
use crate::error::ConfigError;
use crate::renderer::Rgba;

/// Adjustable settings, as shown on the settings menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingKey {
    MusicVolume,
    SoundEffects,
    FrameRate,
    Brightness,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::MusicVolume,
        SettingKey::SoundEffects,
        SettingKey::FrameRate,
        SettingKey::Brightness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::MusicVolume => "Music Volume",
            SettingKey::SoundEffects => "Sound Effects",
            SettingKey::FrameRate => "Frame Rate",
            SettingKey::Brightness => "Brightness",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "music_volume" | "music" => Some(SettingKey::MusicVolume),
            "sound_effects" | "sfx" => Some(SettingKey::SoundEffects),
            "frame_rate" | "fps" => Some(SettingKey::FrameRate),
            "brightness" => Some(SettingKey::Brightness),
            _ => None,
        }
    }

    /// Slider range
    pub fn range(&self) -> RangeInclusive<u32> {
        match self {
            SettingKey::FrameRate => 30..=120,
            _ => 0..=100,
        }
    }
}

/// Player settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Music volume (0 - 100)
    pub music_volume: u32,
    /// Sound effects volume (0 - 100)
    pub sound_effects: u32,

    // === Display ===
    /// Target frames per second (30 - 120)
    pub frame_rate: u32,
    /// Screen brightness (0 - 100)
    pub brightness: u32,

    /// Card balance file to load instead of the built-in tables
    pub card_config: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 50,
            sound_effects: 50,
            frame_rate: DEFAULT_FRAME_RATE,
            brightness: 100,
            card_config: None,
        }
    }
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> u32 {
        match key {
            SettingKey::MusicVolume => self.music_volume,
            SettingKey::SoundEffects => self.sound_effects,
            SettingKey::FrameRate => self.frame_rate,
            SettingKey::Brightness => self.brightness,
        }
    }

    /// Set a value, clamped to the key's range
    pub fn update(&mut self, key: SettingKey, value: u32) {
        let range = key.range();
        let value = value.clamp(*range.start(), *range.end());
        let slot = match key {
            SettingKey::MusicVolume => &mut self.music_volume,
            SettingKey::SoundEffects => &mut self.sound_effects,
            SettingKey::FrameRate => &mut self.frame_rate,
            SettingKey::Brightness => &mut self.brightness,
        };
        *slot = value;
        log::debug!("Updated {} to {}", key.as_str(), value);
    }

    /// Copy with every value pulled back into range
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        for key in SettingKey::ALL {
            out.update(key, self.get(key));
        }
        out
    }

    /// Seconds per frame at the configured frame rate
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// Black dye that darkens a frame to the configured brightness
    pub fn brightness_dye(&self) -> Rgba {
        let brightness = self.brightness.min(100);
        let strength = (100 - brightness) * 255 / 100;
        Rgba::BLACK.with_alpha(strength as u8)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|json| serde_json::from_str::<Settings>(&json).map_err(ConfigError::from));

        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cardforge-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.music_volume, 50);
        assert_eq!(settings.sound_effects, 50);
        assert_eq!(settings.frame_rate, 60);
        assert_eq!(settings.brightness, 100);
        assert_eq!(settings.brightness_dye().a, 0);
    }

    #[test]
    fn test_update_clamps_to_slider_range() {
        let mut settings = Settings::default();
        settings.update(SettingKey::FrameRate, 10);
        assert_eq!(settings.frame_rate, 30);
        settings.update(SettingKey::FrameRate, 500);
        assert_eq!(settings.frame_rate, 120);
        settings.update(SettingKey::MusicVolume, 101);
        assert_eq!(settings.get(SettingKey::MusicVolume), 100);
        settings.update(SettingKey::Brightness, 0);
        assert_eq!(settings.brightness_dye(), Rgba::BLACK.with_alpha(255));
    }

    #[test]
    fn test_frame_dt_follows_frame_rate() {
        let mut settings = Settings::default();
        assert!((settings.frame_dt() - 1.0 / 60.0).abs() < 1e-9);
        settings.update(SettingKey::FrameRate, 120);
        assert!((settings.frame_dt() - 1.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(SettingKey::from_str("Frame Rate"), Some(SettingKey::FrameRate));
        assert_eq!(SettingKey::from_str("sfx"), Some(SettingKey::SoundEffects));
        assert_eq!(SettingKey::from_str("volume"), None);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("settings.json");
        let mut settings = Settings::default();
        settings.update(SettingKey::Brightness, 40);
        settings.card_config = Some(PathBuf::from("cards.json"));
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        assert_eq!(Settings::load("/nonexistent/settings.json"), Settings::default());

        let path = temp_path("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_sanitizes_out_of_range_values() {
        let path = temp_path("range.json");
        fs::write(&path, r#"{"frame_rate": 1000, "music_volume": 20}"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.frame_rate, 120);
        assert_eq!(settings.music_volume, 20);
        assert_eq!(settings.sound_effects, 50);
        let _ = fs::remove_file(&path);
    }
}
