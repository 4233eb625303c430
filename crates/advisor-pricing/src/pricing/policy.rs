//! Pricing policy constants

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::suggestion::PriceTier;
use crate::SUGGESTION_CONFIDENCE;

/// Multipliers and thresholds used by the suggester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Base price per credit before any adjustment
    pub base_price: Decimal,
    /// Amounts strictly above this are bulk
    pub bulk_threshold: i64,
    /// Amounts strictly below this are small
    pub small_threshold: i64,
    /// Multiplier applied to bulk orders
    pub bulk_multiplier: Decimal,
    /// Multiplier applied to small orders
    pub small_multiplier: Decimal,
    /// Confidence reported with every suggestion
    pub confidence: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            base_price: dec!(5.0),
            bulk_threshold: 100,
            small_threshold: 10,
            bulk_multiplier: dec!(0.9),
            small_multiplier: dec!(1.1),
            confidence: SUGGESTION_CONFIDENCE,
        }
    }
}

impl PricingPolicy {
    /// Classify an amount. Both thresholds are strict.
    pub fn tier_for(&self, amount: i64) -> PriceTier {
        if amount > self.bulk_threshold {
            PriceTier::Bulk
        } else if amount < self.small_threshold {
            PriceTier::Small
        } else {
            PriceTier::Standard
        }
    }

    /// Multiplier for a tier
    pub fn tier_multiplier(&self, tier: PriceTier) -> Decimal {
        match tier {
            PriceTier::Bulk => self.bulk_multiplier,
            PriceTier::Standard => Decimal::ONE,
            PriceTier::Small => self.small_multiplier,
        }
    }

    /// Base price after tiering
    pub fn tiered_base(&self, tier: PriceTier) -> Decimal {
        self.base_price * self.tier_multiplier(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.tier_for(101), PriceTier::Bulk);
        assert_eq!(policy.tier_for(100), PriceTier::Standard);
        assert_eq!(policy.tier_for(10), PriceTier::Standard);
        assert_eq!(policy.tier_for(9), PriceTier::Small);
        assert_eq!(policy.tier_for(0), PriceTier::Small);
        assert_eq!(policy.tier_for(-50), PriceTier::Small);
    }

    #[test]
    fn test_tiered_base() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.tiered_base(PriceTier::Bulk), dec!(4.5));
        assert_eq!(policy.tiered_base(PriceTier::Standard), dec!(5.0));
        assert_eq!(policy.tiered_base(PriceTier::Small), dec!(5.5));
    }
}
