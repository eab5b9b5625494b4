//! Error types
//!
//! Only construction-time configuration and asset loading can fail. The
//! per-frame card API (`handle_event`, `update`, `draw`) is total.

use std::path::PathBuf;

use thiserror::Error;

use crate::card::RarityTier;

/// A card balance table that would produce degenerate cards
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("rarity weights sum to zero")]
    ZeroTotalWeight,

    #[error("rarity weight for {tier} must be finite and non-negative, got {weight}")]
    InvalidWeight { tier: RarityTier, weight: f64 },

    #[error("{stat} range for {tier} is inverted: {min} > {max}")]
    InvertedRange {
        tier: RarityTier,
        stat: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{stat} range for {tier} is weaker than the tier below it")]
    NonMonotonicRange { tier: RarityTier, stat: &'static str },

    #[error("{stat} growth range is inverted: {min} > {max}")]
    InvertedGrowth {
        stat: &'static str,
        min: u32,
        max: u32,
    },

    #[error("growth multiplier for {tier} must be positive, got {multiplier}")]
    InvalidMultiplier { tier: RarityTier, multiplier: f64 },

    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("border thickness {thickness} leaves no face area on a {width}x{height} card")]
    BorderTooThick {
        thickness: u32,
        width: u32,
        height: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to produce a card face image
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("image not found: {path}")]
    NotFound { path: PathBuf },

    #[error("could not decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}
