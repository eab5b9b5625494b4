//! Data-driven card balance
//!
//! Rarity weights, stat ranges, growth rules and feel constants can all be
//! loaded from JSON. Every field has a default, so partial files work.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::card::{Animator, GrowthTable, Motion, RarityTable, StatTable};
use crate::consts::*;
use crate::error::ConfigError;
use crate::factory::DEFAULT_SIZE;

/// Per-frame feel of a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardTuning {
    pub move_speed: f32,
    /// Unclamped; values above the frame rate overshoot
    pub rotation_speed: f32,
    pub settle_distance: f32,
    pub rotation_epsilon: f32,
    pub smooth_movement: bool,
    pub hover_speed: f32,
    pub hover_amplitude: f32,
    pub flip_duration: f32,
    /// Update ticks the level icon stays highlighted
    pub highlight_frames: u32,
    pub border_thickness: u32,
}

impl Default for CardTuning {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            rotation_speed: ROTATION_SPEED,
            settle_distance: SETTLE_DISTANCE,
            rotation_epsilon: ROTATION_EPSILON,
            smooth_movement: true,
            hover_speed: HOVER_SPEED,
            hover_amplitude: HOVER_AMPLITUDE,
            flip_duration: FLIP_DURATION,
            highlight_frames: HIGHLIGHT_FRAMES,
            border_thickness: BORDER_THICKNESS,
        }
    }
}

impl CardTuning {
    /// Speeds and the flip length must be positive, thresholds and hover
    /// shape non-negative, and the border must leave room for face art on a
    /// default-sized card.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("move_speed", self.move_speed),
            ("rotation_speed", self.rotation_speed),
            ("flip_duration", self.flip_duration),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("settle_distance", self.settle_distance),
            ("rotation_epsilon", self.rotation_epsilon),
            ("hover_speed", self.hover_speed),
            ("hover_amplitude", self.hover_amplitude),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.border_thickness.saturating_mul(2) >= DEFAULT_SIZE.min_element() {
            return Err(ConfigError::BorderTooThick {
                thickness: self.border_thickness,
                width: DEFAULT_SIZE.x,
                height: DEFAULT_SIZE.y,
            });
        }
        Ok(())
    }

    /// Motion controller at rest at `position`
    pub fn motion(&self, position: Vec2) -> Motion {
        Motion {
            move_speed: self.move_speed,
            rotation_speed: self.rotation_speed,
            settle_distance: self.settle_distance,
            rotation_epsilon: self.rotation_epsilon,
            smooth_movement: self.smooth_movement,
            ..Motion::new(position)
        }
    }

    pub fn animator(&self) -> Animator {
        Animator::new(self.hover_speed, self.hover_amplitude, self.flip_duration)
    }
}

/// Complete card balance configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub rarity: RarityTable,
    pub stats: StatTable,
    pub growth: GrowthTable,
    pub tuning: CardTuning,
}

impl CardConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded card config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rarity and stat tables validate on construction; this re-checks them
    /// along with the rest.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stats.validate()?;
        self.growth.validate()?;
        self.tuning.validate()?;
        Ok(())
    }
}
