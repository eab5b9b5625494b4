//! Card entity model
//!
//! Everything that has state on a card lives here:
//! - Rarity, stats and growth are rolled once when the card is made
//! - Progression is the only thing that changes stats afterwards
//! - Animation, motion and interaction run every frame

pub mod animator;
pub mod entity;
pub mod growth;
pub mod interaction;
pub mod motion;
pub mod progression;
pub mod rarity;
pub mod stats;

pub use animator::{AnimationState, Animator};
pub use entity::{Card, CardKind};
pub use growth::{AbilityUnlock, GrowthPattern, GrowthTable, StatBonus};
pub use interaction::{Bounds, InputEvent, Interaction, PointerButton};
pub use motion::Motion;
pub use progression::{LevelUpSummary, gain_xp};
pub use rarity::{RarityTable, RarityTier, TierValues};
pub use stats::{CardStats, StatRange, StatTable, TierStatRanges, xp_requirement};
