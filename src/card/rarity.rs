//! Rarity tiers and weighted rarity selection
//!
//! Weights are configuration, not constants: several incompatible tables have
//! been used for this game, so any of them can be plugged in.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::renderer::Rgba;

/// Card quality class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl RarityTier {
    /// Canonical walk order for weighted selection
    pub const ALL: [RarityTier; 5] = [
        RarityTier::Common,
        RarityTier::Uncommon,
        RarityTier::Rare,
        RarityTier::Epic,
        RarityTier::Legendary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Uncommon => "Uncommon",
            RarityTier::Rare => "Rare",
            RarityTier::Epic => "Epic",
            RarityTier::Legendary => "Legendary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "common" => Some(RarityTier::Common),
            "uncommon" => Some(RarityTier::Uncommon),
            "rare" => Some(RarityTier::Rare),
            "epic" => Some(RarityTier::Epic),
            "legendary" => Some(RarityTier::Legendary),
            _ => None,
        }
    }

    /// Name of the border color
    pub fn color_name(&self) -> &'static str {
        match self {
            RarityTier::Common => "gray",
            RarityTier::Uncommon => "green",
            RarityTier::Rare => "blue",
            RarityTier::Epic => "purple",
            RarityTier::Legendary => "gold",
        }
    }

    /// Border color
    pub fn color(&self) -> Rgba {
        match self {
            RarityTier::Common => Rgba::rgb(128, 128, 128),
            RarityTier::Uncommon => Rgba::rgb(0, 128, 0),
            RarityTier::Rare => Rgba::rgb(0, 0, 255),
            RarityTier::Epic => Rgba::rgb(128, 0, 128),
            RarityTier::Legendary => Rgba::rgb(255, 215, 0),
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierValues<T> {
    pub common: T,
    pub uncommon: T,
    pub rare: T,
    pub epic: T,
    pub legendary: T,
}

impl<T> TierValues<T> {
    pub fn get(&self, tier: RarityTier) -> &T {
        match tier {
            RarityTier::Common => &self.common,
            RarityTier::Uncommon => &self.uncommon,
            RarityTier::Rare => &self.rare,
            RarityTier::Epic => &self.epic,
            RarityTier::Legendary => &self.legendary,
        }
    }

    /// Values in canonical tier order
    pub fn iter(&self) -> impl Iterator<Item = (RarityTier, &T)> {
        RarityTier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}

/// Selection weights per tier. Weights need not sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TierValues<f64>", into = "TierValues<f64>")]
pub struct RarityTable {
    weights: TierValues<f64>,
    total: f64,
}

impl RarityTable {
    /// Validate and build a table. Fails on negative, non-finite or
    /// all-zero weights.
    pub fn new(weights: TierValues<f64>) -> Result<Self, ConfigError> {
        for (tier, &weight) in weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight { tier, weight });
            }
        }
        let total: f64 = weights.iter().map(|(_, w)| *w).sum();
        if total <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight);
        }
        Ok(Self { weights, total })
    }

    /// Flat percentage table: 90.9 / 8.3 / 0.8 / 0.07 / 0.06
    pub fn classic() -> Self {
        let weights = TierValues {
            common: 0.909,
            uncommon: 0.083,
            rare: 0.008,
            epic: 0.0007,
            legendary: 0.0006,
        };
        let total = weights.iter().map(|(_, w)| *w).sum();
        Self { weights, total }
    }

    /// Each tier is `ratio` times rarer than the one below it
    pub fn power_law(ratio: f64) -> Result<Self, ConfigError> {
        Self::new(TierValues {
            common: ratio.powi(4),
            uncommon: ratio.powi(3),
            rare: ratio.powi(2),
            epic: ratio,
            legendary: 1.0,
        })
    }

    pub fn weight(&self, tier: RarityTier) -> f64 {
        *self.weights.get(tier)
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Normalized probability of drawing `tier`
    pub fn probability(&self, tier: RarityTier) -> f64 {
        self.weight(tier) / self.total
    }

    /// Resolve a uniform sample `unit` in [0, 1) to a tier.
    ///
    /// Walks tiers Common -> Legendary and returns the first whose cumulative
    /// weight exceeds `unit * total`. Falls back to Common when rounding puts
    /// the sample past the last boundary.
    pub fn pick(&self, unit: f64) -> RarityTier {
        let sample = unit * self.total;
        let mut cumulative = 0.0;
        for (tier, weight) in self.weights.iter() {
            cumulative += weight;
            if sample < cumulative {
                return tier;
            }
        }
        RarityTier::Common
    }

    /// Draw a tier from `rng`
    pub fn determine_rarity<R: Rng + ?Sized>(&self, rng: &mut R) -> RarityTier {
        self.pick(rng.random::<f64>())
    }
}

impl Default for RarityTable {
    fn default() -> Self {
        Self::classic()
    }
}

impl TryFrom<TierValues<f64>> for RarityTable {
    type Error = ConfigError;

    fn try_from(weights: TierValues<f64>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<RarityTable> for TierValues<f64> {
    fn from(table: RarityTable) -> Self {
        table.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_distribution(table: &RarityTable, seed: u64) {
        const SAMPLES: usize = 100_000;
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut counts = [0usize; 5];
        for _ in 0..SAMPLES {
            counts[table.determine_rarity(&mut rng) as usize] += 1;
        }
        for tier in RarityTier::ALL {
            let observed = counts[tier as usize] as f64 / SAMPLES as f64;
            let expected = table.probability(tier);
            assert!(
                (observed - expected).abs() < 0.01,
                "{tier}: observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_pick_uncommon_band() {
        let table = RarityTable::new(TierValues {
            common: 0.909,
            uncommon: 0.083,
            rare: 0.008,
            epic: 0.0007,
            legendary: 0.0006,
        })
        .unwrap();
        // Cumulative: 0.909 after Common, 0.992 after Uncommon
        assert_eq!(table.pick(0.95), RarityTier::Uncommon);
        assert_eq!(table.pick(0.0), RarityTier::Common);
        assert_eq!(table.pick(0.5), RarityTier::Common);
        assert_eq!(table.pick(0.99999), RarityTier::Legendary);
    }

    #[test]
    fn test_pick_falls_back_to_common() {
        let table = RarityTable::classic();
        assert_eq!(table.pick(1.0), RarityTier::Common);
    }

    #[test]
    fn test_zero_weight_tiers_never_picked() {
        let table = RarityTable::new(TierValues {
            common: 1.0,
            uncommon: 0.0,
            rare: 0.0,
            epic: 0.0,
            legendary: 1.0,
        })
        .unwrap();
        assert_eq!(table.pick(0.49), RarityTier::Common);
        assert_eq!(table.pick(0.5), RarityTier::Legendary);
        assert_eq!(table.probability(RarityTier::Rare), 0.0);
    }

    #[test]
    fn test_empirical_frequencies_classic() {
        assert_distribution(&RarityTable::classic(), 7);
    }

    #[test]
    fn test_empirical_frequencies_power_law() {
        let table = RarityTable::power_law(11.0).unwrap();
        assert!((table.probability(RarityTier::Common) - 14641.0 / 16105.0).abs() < 1e-12);
        assert_distribution(&table, 8);
    }

    #[test]
    fn test_empirical_frequencies_uniform() {
        let table = RarityTable::new(TierValues {
            common: 2.0,
            uncommon: 2.0,
            rare: 2.0,
            epic: 2.0,
            legendary: 2.0,
        })
        .unwrap();
        assert_distribution(&table, 9);
    }

    #[test]
    fn test_invalid_tables_rejected() {
        let zeros = TierValues {
            common: 0.0,
            uncommon: 0.0,
            rare: 0.0,
            epic: 0.0,
            legendary: 0.0,
        };
        assert!(matches!(RarityTable::new(zeros), Err(ConfigError::ZeroTotalWeight)));

        let negative = TierValues { rare: -1.0, ..zeros };
        assert!(matches!(
            RarityTable::new(negative),
            Err(ConfigError::InvalidWeight { tier: RarityTier::Rare, .. })
        ));

        let nan = TierValues { epic: f64::NAN, common: 1.0, ..zeros };
        assert!(RarityTable::new(nan).is_err());
    }

    #[test]
    fn test_table_from_json_is_validated() {
        let json = r#"{"common": 60, "uncommon": 25, "rare": 10, "epic": 4, "legendary": 1}"#;
        let table: RarityTable = serde_json::from_str(json).unwrap();
        assert!((table.probability(RarityTier::Epic) - 0.04).abs() < 1e-12);

        let bad = r#"{"common": 0, "uncommon": 0, "rare": 0, "epic": 0, "legendary": 0}"#;
        assert!(serde_json::from_str::<RarityTable>(bad).is_err());
    }

    #[test]
    fn test_tier_names_and_colors() {
        assert_eq!(RarityTier::from_str("EPIC"), Some(RarityTier::Epic));
        assert_eq!(RarityTier::from_str("mythic"), None);
        assert_eq!(RarityTier::Legendary.color(), Rgba::rgb(255, 215, 0));
        assert_eq!(RarityTier::Uncommon.color_name(), "green");
        assert!(RarityTier::Common < RarityTier::Legendary);
    }
}
