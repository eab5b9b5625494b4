//! Card construction
//!
//! The factory owns everything cards share: the balance config, the RNG and
//! the image caches. A card gets its rarity first; stats, growth and the
//! face dye all follow from it.

use std::path::PathBuf;

use glam::{UVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::assets::{ImageCache, ImageLoader};
use crate::card::entity::DYE_ALPHA;
use crate::card::{Card, CardKind, CardStats, RarityTier};
use crate::error::ConfigError;
use crate::tuning::CardConfig;

/// Name given to cards created without one
pub const DEFAULT_NAME: &str = "Unknown Card";
/// Card size when none is given
pub const DEFAULT_SIZE: UVec2 = UVec2::new(100, 125);
/// Rarity color is darkened by this before dyeing the face
const DYE_DARKEN: f32 = 0.6;

/// What to build
#[derive(Debug, Clone, PartialEq)]
pub struct CardSpec {
    pub position: Vec2,
    pub size: UVec2,
    pub kind: CardKind,
    pub face_image: Option<PathBuf>,
    /// Use these instead of rolling stats
    pub stats: Option<CardStats>,
    pub name: Option<String>,
}

impl Default for CardSpec {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: DEFAULT_SIZE,
            kind: CardKind::Standard,
            face_image: None,
            stats: None,
            name: None,
        }
    }
}

impl CardSpec {
    pub fn new(position: Vec2, size: UVec2) -> Self {
        Self {
            position,
            size,
            ..Default::default()
        }
    }

    pub fn kind(mut self, kind: CardKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn face_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.face_image = Some(path.into());
        self
    }

    pub fn stats(mut self, stats: CardStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Builds cards from specs
pub struct CardFactory {
    config: CardConfig,
    rng: Pcg32,
    images: ImageCache,
    loader: Box<dyn ImageLoader>,
    next_id: u32,
}

impl CardFactory {
    /// Factory with an OS-seeded RNG
    pub fn new(config: CardConfig, loader: impl ImageLoader + 'static) -> Result<Self, ConfigError> {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self::build(config, loader, rng)
    }

    /// Deterministic factory: same seed and specs give the same cards
    pub fn with_seed(
        config: CardConfig,
        loader: impl ImageLoader + 'static,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::build(config, loader, Pcg32::seed_from_u64(seed))
    }

    fn build(
        config: CardConfig,
        loader: impl ImageLoader + 'static,
        rng: Pcg32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "Card factory ready (legendary odds {:.4}%)",
            config.rarity.probability(RarityTier::Legendary) * 100.0
        );
        Ok(Self {
            config,
            rng,
            images: ImageCache::new(),
            loader: Box::new(loader),
            next_id: 1,
        })
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// Roll a card. Never fails: a missing face falls back to the placeholder.
    pub fn create(&mut self, spec: CardSpec) -> Card {
        let CardSpec {
            position,
            size,
            kind,
            face_image,
            stats,
            name,
        } = spec;

        let rarity = self.config.rarity.determine_rarity(&mut self.rng);
        let stats = match stats {
            Some(stats) => stats,
            None => self.config.stats.generate_stats(rarity, &mut self.rng),
        };
        let growth = self.config.growth.derive_growth(rarity, &mut self.rng);

        let thickness = self.config.tuning.border_thickness;
        let (key, face) =
            self.images
                .face(self.loader.as_ref(), face_image.as_deref(), size, thickness);
        let dye = rarity.color().darken(DYE_DARKEN).with_alpha(DYE_ALPHA);
        let face = self.images.tinted(&key, &face, dye);

        let id = self.next_id;
        self.next_id += 1;
        let name = name.unwrap_or_else(|| DEFAULT_NAME.to_string());

        log::info!(
            "Created card {} '{}' ({} {}) ATK {} HP {} DEF {}",
            id,
            name,
            rarity,
            kind,
            stats.attack,
            stats.health,
            stats.defense
        );

        Card::new(
            id,
            name,
            kind,
            position,
            size,
            rarity,
            stats,
            growth,
            face,
            &self.config.tuning,
        )
    }
}
