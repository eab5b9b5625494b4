//! Cardforge - card entity model for a collectible card game
//!
//! Core modules:
//! - `card`: Rarity, stats, growth, progression, animation, motion and input
//! - `renderer`: Pixel surfaces, icon rendering seam and the redraw cache
//! - `assets`: Image loading with cached placeholder fallback
//! - `factory`: Card construction (owns RNG, config and shared image caches)
//! - `board`: Active card collection with frame ordering
//! - `tuning`: Data-driven card balance

pub mod assets;
pub mod board;
pub mod card;
pub mod error;
pub mod factory;
pub mod renderer;
pub mod settings;
pub mod tuning;

pub use board::Board;
pub use card::{Card, CardKind, CardStats, RarityTier};
pub use error::{AssetError, ConfigError};
pub use factory::{CardFactory, CardSpec};
pub use num_bigint::BigUint;
pub use settings::Settings;
pub use tuning::{CardConfig, CardTuning};

use glam::Vec2;

/// Card configuration constants
pub mod consts {
    /// Hard level cap
    pub const MAX_LEVEL: u32 = 999;
    /// XP needed to go from level 1 to level 2
    pub const BASE_XP_REQUIREMENT: u32 = 100;
    /// Per-level growth of the XP requirement, as a ratio (1.5)
    pub const XP_GROWTH_NUMERATOR: u32 = 3;
    pub const XP_GROWTH_DENOMINATOR: u32 = 2;

    /// Movement below this distance counts as settled
    pub const SETTLE_DISTANCE: f32 = 0.5;
    /// Rotation differences (degrees) below this count as settled
    pub const ROTATION_EPSILON: f32 = 0.1;
    /// Position easing rate (per second)
    pub const MOVE_SPEED: f32 = 10.0;
    /// Rotation easing rate (per second), unclamped
    pub const ROTATION_SPEED: f32 = 5.0;

    /// Hover bob phase advance per second
    pub const HOVER_SPEED: f32 = 4.0;
    /// Hover bob height in pixels
    pub const HOVER_AMPLITUDE: f32 = 5.0;
    /// Flip animation length in seconds
    pub const FLIP_DURATION: f32 = 1.0;

    /// Frames the level icon stays highlighted after a level-up
    pub const HIGHLIGHT_FRAMES: u32 = 10;
    /// Card border width in pixels
    pub const BORDER_THICKNESS: u32 = 8;

    /// Frame rate until the player picks one
    pub const DEFAULT_FRAME_RATE: u32 = 60;
}

/// Linear distance between two points, used for the settle check
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Exponential easing step: move `current` toward `target` by `factor`
#[inline]
pub fn ease_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}
