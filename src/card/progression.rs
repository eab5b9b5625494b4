//! Experience and level-up state machine
//!
//! One `gain_xp` call may resolve any number of level-ups. Excess XP always
//! carries into the next level; at the level cap XP keeps accumulating but
//! does nothing.

use num_bigint::BigUint;

use super::growth::GrowthPattern;
use super::stats::CardStats;
use crate::consts::MAX_LEVEL;

/// What a `gain_xp` call changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelUpSummary {
    pub from_level: u32,
    pub to_level: u32,
    /// Ability descriptions unlocked on the way, in level order
    pub abilities_unlocked: Vec<String>,
}

impl LevelUpSummary {
    pub fn levels_gained(&self) -> u32 {
        self.to_level - self.from_level
    }

    pub fn leveled_up(&self) -> bool {
        self.to_level > self.from_level
    }
}

/// Add `amount` XP and resolve all level-ups it pays for
pub fn gain_xp(
    stats: &mut CardStats,
    growth: &GrowthPattern,
    amount: impl Into<BigUint>,
) -> LevelUpSummary {
    stats.xp += amount.into();
    level_up(stats, growth)
}

/// Apply level-ups while the stored XP covers the current requirement
pub fn level_up(stats: &mut CardStats, growth: &GrowthPattern) -> LevelUpSummary {
    let mut summary = LevelUpSummary {
        from_level: stats.level(),
        to_level: stats.level(),
        abilities_unlocked: Vec::new(),
    };

    while stats.level() < MAX_LEVEL && stats.xp >= *stats.max_xp() {
        let spent = stats.max_xp().clone();
        stats.xp -= spent;
        let level = stats.level() + 1;
        stats.set_level(level);

        let bonus = growth.level_up_bonuses(level);
        stats.attack = stats.attack.saturating_add(bonus.attack);
        stats.health = stats.health.saturating_add(bonus.health);
        stats.defense = stats.defense.saturating_add(bonus.defense);

        if let Some(ability) = growth.ability_for_level(level) {
            stats.special_ability = Some(ability.to_string());
            summary.abilities_unlocked.push(ability.to_string());
        }
    }

    summary.to_level = stats.level();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::growth::GrowthTable;
    use crate::card::rarity::RarityTier;
    use crate::card::stats::xp_requirement;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn growth(tier: RarityTier) -> GrowthPattern {
        let mut rng = Pcg32::seed_from_u64(3);
        GrowthTable::default().derive_growth(tier, &mut rng)
    }

    fn xp(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn test_single_level_up() {
        let growth = growth(RarityTier::Common);
        let mut stats = CardStats::new(10, 10, 10, 1);
        let summary = gain_xp(&mut stats, &growth, 120u32);
        assert_eq!(summary.levels_gained(), 1);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.xp, xp(20));
        assert_eq!(stats.max_xp(), &xp(150));

        let bonus = growth.level_up_bonuses(2);
        assert_eq!(stats.attack, 10 + bonus.attack);
        assert_eq!(stats.health, 10 + bonus.health);
        assert_eq!(stats.defense, 10 + bonus.defense);
    }

    #[test]
    fn test_carry_over_across_levels() {
        let growth = growth(RarityTier::Common);
        let mut stats = CardStats::new(10, 10, 10, 1);
        // 100 for level 2, 150 for level 3
        let summary = gain_xp(&mut stats, &growth, 250u32);
        assert_eq!(summary.from_level, 1);
        assert_eq!(summary.to_level, 3);
        assert_eq!(stats.level(), 3);
        assert_eq!(stats.xp, xp(0));
        assert_eq!(stats.max_xp(), &xp(225));

        let summary = gain_xp(&mut stats, &growth, 224u32);
        assert!(!summary.leveled_up());
        assert_eq!(stats.xp, xp(224));
    }

    #[test]
    fn test_split_gains_match_single_gain() {
        let growth = growth(RarityTier::Rare);
        let mut once = CardStats::new(50, 50, 50, 1);
        let mut split = once.clone();
        gain_xp(&mut once, &growth, 5000u32);
        for _ in 0..50 {
            gain_xp(&mut split, &growth, 100u32);
        }
        assert_eq!(once, split);
    }

    #[test]
    fn test_ability_unlocked_on_reaching_level() {
        let growth = growth(RarityTier::Rare);
        let mut stats = CardStats::new(1, 1, 1, 4);
        let need = stats.max_xp().clone();
        let summary = gain_xp(&mut stats, &growth, need);
        assert_eq!(stats.level(), 5);
        assert_eq!(
            stats.special_ability.as_deref(),
            Some("Minor Boost: +10% to all stats")
        );
        assert_eq!(summary.abilities_unlocked.len(), 1);

        // Skipping past two unlocks in one call keeps the latest
        let mut stats = CardStats::new(1, 1, 1, 9);
        let needed: BigUint = (9..15).map(xp_requirement).sum();
        let summary = gain_xp(&mut stats, &growth, needed);
        assert_eq!(stats.level(), 15);
        assert_eq!(summary.abilities_unlocked.len(), 2);
        assert_eq!(
            stats.special_ability.as_deref(),
            Some("Regeneration: Restore 5% health each turn")
        );
    }

    #[test]
    fn test_common_cards_never_unlock() {
        let growth = growth(RarityTier::Common);
        let mut stats = CardStats::new(1, 1, 1, 1);
        gain_xp(&mut stats, &growth, 1_000_000u32);
        assert!(stats.level() > 20);
        assert_eq!(stats.special_ability, None);
    }

    #[test]
    fn test_requirement_past_u64_is_honored() {
        let growth = growth(RarityTier::Common);
        let mut stats = CardStats::new(1, 1, 1, 100);
        let summary = gain_xp(&mut stats, &growth, u64::MAX);
        assert!(!summary.leveled_up());
        assert_eq!(stats.level(), 100);
        assert_eq!(stats.xp, xp(u64::MAX));

        let rest = xp_requirement(100) - xp(u64::MAX);
        let summary = gain_xp(&mut stats, &growth, rest);
        assert_eq!(summary.to_level, 101);
        assert_eq!(stats.xp, xp(0));
    }

    #[test]
    fn test_level_cap_absorbs_xp() {
        let growth = growth(RarityTier::Legendary);
        let mut stats = CardStats::new(1, 1, 1, MAX_LEVEL - 1);
        let summary = gain_xp(&mut stats, &growth, xp_requirement(MAX_LEVEL - 1) + xp(5));
        assert_eq!(summary.to_level, MAX_LEVEL);
        assert_eq!(stats.level(), MAX_LEVEL);
        assert_eq!(stats.xp, xp(5));

        // XP past the cap requirement is stored and does nothing
        let attack = stats.attack;
        let flood = xp_requirement(MAX_LEVEL) * xp(10);
        let summary = gain_xp(&mut stats, &growth, flood.clone());
        assert!(!summary.leveled_up());
        assert_eq!(stats.level(), MAX_LEVEL);
        assert_eq!(stats.xp, flood + xp(5));
        assert_eq!(stats.attack, attack);
    }

    proptest! {
        #[test]
        fn prop_level_never_exceeds_cap(
            start in 1u32..=MAX_LEVEL,
            gains in proptest::collection::vec(any::<u64>(), 1..8),
        ) {
            let growth = growth(RarityTier::Epic);
            let mut stats = CardStats::new(1, 1, 1, start);
            for amount in gains {
                let before = stats.level();
                let summary = gain_xp(&mut stats, &growth, amount);
                prop_assert!(stats.level() <= MAX_LEVEL);
                prop_assert!(stats.level() >= before);
                prop_assert_eq!(summary.to_level, stats.level());
                // Either XP no longer covers the next level, or we are capped
                prop_assert!(stats.xp < *stats.max_xp() || stats.level() == MAX_LEVEL);
            }
        }

        #[test]
        fn prop_no_xp_lost(amount in 0u64..2_000_000) {
            let growth = growth(RarityTier::Common);
            let mut stats = CardStats::new(1, 1, 1, 1);
            gain_xp(&mut stats, &growth, amount);
            let spent: BigUint = (1..stats.level()).map(xp_requirement).sum();
            prop_assert_eq!(spent + &stats.xp, xp(amount));
        }
    }
}
