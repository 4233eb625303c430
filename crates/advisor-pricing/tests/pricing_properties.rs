//! Property tests for the price suggester

use advisor_pricing::{
    market_factor, HashedMarketFactor, MarketFactorSource, PriceSuggester, PriceTier,
    PricingPolicy, RegionTable,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

proptest! {
    #[test]
    fn tier_matches_strict_thresholds(amount in -1_000i64..1_000) {
        let s = PriceSuggester::default().suggest(amount, "global").unwrap();
        let (tier, base) = if amount > 100 {
            (PriceTier::Bulk, dec!(4.5))
        } else if amount < 10 {
            (PriceTier::Small, dec!(5.5))
        } else {
            (PriceTier::Standard, dec!(5.0))
        };
        prop_assert_eq!(s.tier, tier);
        prop_assert_eq!(s.base_price, base);
    }

    #[test]
    fn confidence_is_constant(amount in any::<i64>(), region in ".{0,24}") {
        let response = PriceSuggester::default().suggest(amount, &region).unwrap().to_response();
        prop_assert_eq!(response.confidence, 0.8);
    }

    #[test]
    fn repeated_calls_are_identical(amount in any::<i64>(), region in "[a-z0-9-]{0,16}") {
        let first = PriceSuggester::default().suggest(amount, &region).unwrap();
        let second = PriceSuggester::default().suggest(amount, &region).unwrap();
        prop_assert_eq!(first.to_response(), second.to_response());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn market_factor_in_range(region in ".{0,32}") {
        let factor = HashedMarketFactor::new().factor(&region);
        prop_assert!(factor >= dec!(0.90));
        prop_assert!(factor <= dec!(1.09));
        // Whole hundredths only
        prop_assert_eq!(factor.round_dp(2), factor);
    }

    #[test]
    fn total_tracks_unit_price(amount in -100_000i64..100_000, region in "[a-z]{1,8}") {
        let s = PriceSuggester::default().suggest(amount, &region).unwrap();
        prop_assert_eq!(s.total, s.unit_price * Decimal::from(amount));

        // Rounded total differs from rounded unit × amount by at most half a
        // cent per credit plus the final half cent.
        let drift = (s.rounded_total() - s.rounded_unit_price() * Decimal::from(amount)).abs();
        let bound = dec!(0.005) * Decimal::from(amount.unsigned_abs()) + dec!(0.005);
        prop_assert!(drift <= bound, "drift {} > {}", drift, bound);
    }

    #[test]
    fn overrides_only_touch_named_regions(bucket in 0u8..20, region in "[a-z]{1,8}") {
        let table = RegionTable::new().with_override("pinned", bucket).unwrap();
        prop_assert_eq!(table.factor("pinned"), market_factor(bucket));
        if region != "pinned" {
            prop_assert_eq!(table.bucket(&region), HashedMarketFactor::new().bucket(&region));
        }
    }
}

#[test]
fn custom_policy_changes_base() {
    let policy = PricingPolicy {
        base_price: dec!(10.0),
        ..PricingPolicy::default()
    };
    let table = RegionTable::new().with_override("flat", 10).unwrap();
    let s = PriceSuggester::new(policy, table).suggest(200, "flat").unwrap();
    assert_eq!(s.unit_price, dec!(9.0));
}
