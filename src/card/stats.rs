//! Card stats and rarity-keyed stat generation

use num_bigint::BigUint;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rarity::{RarityTier, TierValues};
use crate::consts::{BASE_XP_REQUIREMENT, MAX_LEVEL, XP_GROWTH_DENOMINATOR, XP_GROWTH_NUMERATOR};
use crate::error::ConfigError;

/// XP needed to leave `level`: `floor(100 * 1.5^(level - 1))`, exact.
///
/// Strictly increasing over the whole level range; the value at the cap has
/// 178 digits.
pub fn xp_requirement(level: u32) -> BigUint {
    let exponent = level.saturating_sub(1);
    let numerator = BigUint::from(BASE_XP_REQUIREMENT) * BigUint::from(XP_GROWTH_NUMERATOR).pow(exponent);
    numerator / BigUint::from(XP_GROWTH_DENOMINATOR).pow(exponent)
}

/// A card's combat stats and progression state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStats {
    pub attack: u32,
    pub health: u32,
    pub defense: u32,
    level: u32,
    pub xp: BigUint,
    max_xp: BigUint,
    pub special_ability: Option<String>,
}

impl Default for CardStats {
    fn default() -> Self {
        Self::new(100, 100, 50, 1)
    }
}

impl CardStats {
    /// Stats at `level` (clamped to 1..=999) with no XP
    pub fn new(attack: u32, health: u32, defense: u32, level: u32) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        Self {
            attack,
            health,
            defense,
            level,
            xp: BigUint::default(),
            max_xp: xp_requirement(level),
            special_ability: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_xp(&self) -> &BigUint {
        &self.max_xp
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_LEVEL
    }

    /// Set the level, keeping `max_xp` in sync
    pub fn set_level(&mut self, level: u32) {
        self.level = level.clamp(1, MAX_LEVEL);
        self.max_xp = xp_requirement(self.level);
    }
}

/// Inclusive integer range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: u32,
    pub max: u32,
}

impl StatRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.min..=self.max)
    }
}

/// Attack/health/defense ranges for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStatRanges {
    pub attack: StatRange,
    pub health: StatRange,
    pub defense: StatRange,
}

impl TierStatRanges {
    fn named(&self) -> [(&'static str, StatRange); 3] {
        [
            ("attack", self.attack),
            ("health", self.health),
            ("defense", self.defense),
        ]
    }
}

/// Stat ranges for every tier. Rarer tiers must be at least as strong in
/// both bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TierValues<TierStatRanges>", into = "TierValues<TierStatRanges>")]
pub struct StatTable {
    ranges: TierValues<TierStatRanges>,
}

impl StatTable {
    pub fn new(ranges: TierValues<TierStatRanges>) -> Result<Self, ConfigError> {
        let table = Self { ranges };
        table.validate()?;
        Ok(table)
    }

    /// Check ranges are not inverted and never weaken with rarity
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut previous: Option<&TierStatRanges> = None;
        for (tier, ranges) in self.ranges.iter() {
            for (stat, range) in ranges.named() {
                if range.min > range.max {
                    return Err(ConfigError::InvertedRange {
                        tier,
                        stat,
                        min: range.min,
                        max: range.max,
                    });
                }
            }
            if let Some(prev) = previous {
                for ((stat, range), (_, below)) in ranges.named().into_iter().zip(prev.named()) {
                    if range.min < below.min || range.max < below.max {
                        return Err(ConfigError::NonMonotonicRange { tier, stat });
                    }
                }
            }
            previous = Some(ranges);
        }
        Ok(())
    }

    pub fn ranges(&self, tier: RarityTier) -> &TierStatRanges {
        self.ranges.get(tier)
    }

    /// Roll level-1 stats for a fresh card of `tier`
    pub fn generate_stats<R: Rng + ?Sized>(&self, tier: RarityTier, rng: &mut R) -> CardStats {
        let ranges = self.ranges.get(tier);
        CardStats::new(
            ranges.attack.roll(rng),
            ranges.health.roll(rng),
            ranges.defense.roll(rng),
            1,
        )
    }
}

impl Default for StatTable {
    fn default() -> Self {
        let tier = |attack: (u32, u32), health: (u32, u32), defense: (u32, u32)| TierStatRanges {
            attack: StatRange::new(attack.0, attack.1),
            health: StatRange::new(health.0, health.1),
            defense: StatRange::new(defense.0, defense.1),
        };
        Self {
            ranges: TierValues {
                common: tier((5, 50), (30, 80), (5, 30)),
                uncommon: tier((30, 70), (60, 120), (20, 50)),
                rare: tier((60, 100), (100, 160), (30, 60)),
                epic: tier((90, 140), (140, 200), (50, 80)),
                legendary: tier((120, 250), (180, 300), (70, 100)),
            },
        }
    }
}

impl TryFrom<TierValues<TierStatRanges>> for StatTable {
    type Error = ConfigError;

    fn try_from(ranges: TierValues<TierStatRanges>) -> Result<Self, Self::Error> {
        Self::new(ranges)
    }
}

impl From<StatTable> for TierValues<TierStatRanges> {
    fn from(table: StatTable) -> Self {
        table.ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_xp_requirement_table() {
        let expected: [u32; 7] = [100, 150, 225, 337, 506, 759, 1139];
        for (i, &xp) in expected.iter().enumerate() {
            assert_eq!(xp_requirement(i as u32 + 1), BigUint::from(xp), "level {}", i + 1);
        }
    }

    #[test]
    fn test_xp_requirement_past_u64() {
        assert_eq!(xp_requirement(99), BigUint::from(18_069_385_668_231_788_328u64));
        assert_eq!(
            xp_requirement(100),
            "27104078502347682493".parse::<BigUint>().unwrap()
        );
        assert!(xp_requirement(101) > xp_requirement(100));
        assert_eq!(xp_requirement(MAX_LEVEL).to_string().len(), 178);
    }

    #[test]
    fn test_new_stats_derive_max_xp() {
        let stats = CardStats::new(10, 20, 30, 3);
        assert_eq!(stats.level(), 3);
        assert_eq!(stats.max_xp(), &BigUint::from(225u32));
        assert_eq!(stats.xp, BigUint::default());

        let clamped = CardStats::new(1, 1, 1, 5000);
        assert_eq!(clamped.level(), MAX_LEVEL);
        assert!(clamped.is_max_level());
        assert_eq!(CardStats::new(1, 1, 1, 0).level(), 1);

        let mut stats = CardStats::default();
        assert_eq!((stats.attack, stats.health, stats.defense), (100, 100, 50));
        stats.set_level(2);
        assert_eq!(stats.max_xp(), &BigUint::from(150u32));
    }

    #[test]
    fn test_default_table_is_valid() {
        assert!(StatTable::default().validate().is_ok());
    }

    #[test]
    fn test_generated_stats_within_ranges() {
        let table = StatTable::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for tier in RarityTier::ALL {
            let ranges = *table.ranges(tier);
            for _ in 0..200 {
                let stats = table.generate_stats(tier, &mut rng);
                assert_eq!(stats.level(), 1);
                assert_eq!(stats.max_xp(), &BigUint::from(100u32));
                assert!((ranges.attack.min..=ranges.attack.max).contains(&stats.attack));
                assert!((ranges.health.min..=ranges.health.max).contains(&stats.health));
                assert!((ranges.defense.min..=ranges.defense.max).contains(&stats.defense));
            }
        }
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut ranges: TierValues<TierStatRanges> = StatTable::default().into();
        ranges.rare.health = StatRange::new(160, 100);
        assert!(matches!(
            StatTable::new(ranges),
            Err(ConfigError::InvertedRange {
                tier: RarityTier::Rare,
                stat: "health",
                ..
            })
        ));
    }

    #[test]
    fn test_weaker_rare_tier_rejected() {
        let mut ranges: TierValues<TierStatRanges> = StatTable::default().into();
        ranges.epic.defense = StatRange::new(10, 80);
        assert!(matches!(
            StatTable::new(ranges),
            Err(ConfigError::NonMonotonicRange {
                tier: RarityTier::Epic,
                stat: "defense"
            })
        ));
    }

    proptest! {
        #[test]
        fn prop_xp_requirement_strictly_increasing(level in 1u32..MAX_LEVEL) {
            prop_assert!(xp_requirement(level + 1) > xp_requirement(level));
        }
    }
}
