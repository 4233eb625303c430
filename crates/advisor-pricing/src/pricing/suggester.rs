//! Price suggester
//!
//! Applies the volume tier, then the regional market factor, to the policy
//! base price. All arithmetic is exact decimal; rounding only happens when
//! the wire response is rendered.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::PricingError;
use crate::pricing::market::{market_factor, HashedMarketFactor, MarketFactorSource};
use crate::pricing::policy::PricingPolicy;
use crate::types::suggestion::{PriceSuggestion, PriceSuggestionRequest};

/// Stateless price suggestion engine
pub struct PriceSuggester {
    policy: PricingPolicy,
    market: Box<dyn MarketFactorSource>,
}

impl PriceSuggester {
    pub fn new(policy: PricingPolicy, market: impl MarketFactorSource + 'static) -> Self {
        Self {
            policy,
            market: Box::new(market),
        }
    }

    /// Suggest a price for `amount` credits in `region`
    #[instrument(skip(self))]
    pub fn suggest(&self, amount: i64, region: &str) -> Result<PriceSuggestion, PricingError> {
        let tier = self.policy.tier_for(amount);
        let base_price = self.policy.tiered_base(tier);

        let market_bucket = self.market.bucket(region);
        let factor = market_factor(market_bucket);

        let unit_price = base_price * factor;
        let total = unit_price
            .checked_mul(Decimal::from(amount))
            .ok_or(PricingError::Overflow { amount })?;

        debug!(%tier, %base_price, market_bucket, %factor, %unit_price, "computed suggestion");

        Ok(PriceSuggestion {
            amount,
            region: region.to_string(),
            tier,
            base_price,
            market_bucket,
            market_factor: factor,
            unit_price,
            total,
            confidence: self.policy.confidence,
        })
    }

    /// Suggest a price for a decoded request
    pub fn suggest_request(
        &self,
        request: &PriceSuggestionRequest,
    ) -> Result<PriceSuggestion, PricingError> {
        self.suggest(request.amount, &request.region)
    }
}

impl Default for PriceSuggester {
    fn default() -> Self {
        Self::new(PricingPolicy::default(), HashedMarketFactor::new())
    }
}

impl std::fmt::Debug for PriceSuggester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceSuggester")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
