//! Per-card stat growth and ability unlock schedule

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rarity::{RarityTier, TierValues};
use super::stats::StatRange;
use crate::error::ConfigError;

/// An ability granted on reaching `level`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityUnlock {
    pub level: u32,
    pub description: String,
}

/// Growth rules shared by every card (data-driven)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthTable {
    /// Scales the rolled base growth per tier
    pub multipliers: TierValues<f64>,
    /// Base growth rolls, before the tier multiplier
    pub attack: StatRange,
    pub health: StatRange,
    pub defense: StatRange,
    /// Lowest tier that unlocks abilities
    pub ability_min_tier: RarityTier,
    pub abilities: Vec<AbilityUnlock>,
}

impl Default for GrowthTable {
    fn default() -> Self {
        let unlock = |level, description: &str| AbilityUnlock {
            level,
            description: description.to_string(),
        };
        Self {
            multipliers: TierValues {
                common: 1.0,
                uncommon: 1.2,
                rare: 1.5,
                epic: 1.8,
                legendary: 2.2,
            },
            attack: StatRange::new(3, 8),
            health: StatRange::new(5, 12),
            defense: StatRange::new(2, 6),
            ability_min_tier: RarityTier::Rare,
            abilities: vec![
                unlock(5, "Minor Boost: +10% to all stats"),
                unlock(10, "Shield: Reduce incoming damage by 20%"),
                unlock(15, "Regeneration: Restore 5% health each turn"),
                unlock(20, "Critical Strike: 25% chance for double damage"),
            ],
        }
    }
}

impl GrowthTable {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (tier, &multiplier) in self.multipliers.iter() {
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(ConfigError::InvalidMultiplier { tier, multiplier });
            }
        }
        for (stat, range) in [
            ("attack", self.attack),
            ("health", self.health),
            ("defense", self.defense),
        ] {
            if range.min > range.max {
                return Err(ConfigError::InvertedGrowth {
                    stat,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// Roll the growth pattern for a new card of `tier`
    pub fn derive_growth<R: Rng + ?Sized>(&self, tier: RarityTier, rng: &mut R) -> GrowthPattern {
        let multiplier = *self.multipliers.get(tier);
        let attack_growth = self.attack.roll(rng) as f64 * multiplier;
        let health_growth = self.health.roll(rng) as f64 * multiplier;
        let defense_growth = self.defense.roll(rng) as f64 * multiplier;

        let unlocks = if tier >= self.ability_min_tier {
            self.abilities
                .iter()
                .map(|a| (a.level, a.description.clone()))
                .collect()
        } else {
            BTreeMap::new()
        };

        GrowthPattern {
            rarity: tier,
            attack_growth,
            health_growth,
            defense_growth,
            unlocks,
        }
    }
}

/// Stat increases applied by one level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatBonus {
    pub attack: u32,
    pub health: u32,
    pub defense: u32,
}

/// A card's fixed growth policy, derived once from its rarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPattern {
    rarity: RarityTier,
    attack_growth: f64,
    health_growth: f64,
    defense_growth: f64,
    unlocks: BTreeMap<u32, String>,
}

impl GrowthPattern {
    pub fn rarity(&self) -> RarityTier {
        self.rarity
    }

    /// Per-level growth (attack, health, defense) before level scaling
    pub fn growth(&self) -> (f64, f64, f64) {
        (self.attack_growth, self.health_growth, self.defense_growth)
    }

    /// Bonuses for reaching `level`: growth * (1 + 0.1 * level), truncated
    pub fn level_up_bonuses(&self, level: u32) -> StatBonus {
        let scale = 1.0 + level as f64 * 0.1;
        StatBonus {
            attack: (self.attack_growth * scale) as u32,
            health: (self.health_growth * scale) as u32,
            defense: (self.defense_growth * scale) as u32,
        }
    }

    pub fn has_ability_unlock(&self, level: u32) -> bool {
        self.unlocks.contains_key(&level)
    }

    pub fn ability_for_level(&self, level: u32) -> Option<&str> {
        self.unlocks.get(&level).map(String::as_str)
    }

    /// Unlock levels in ascending order
    pub fn unlock_levels(&self) -> impl Iterator<Item = u32> + '_ {
        self.unlocks.keys().copied()
    }
}
