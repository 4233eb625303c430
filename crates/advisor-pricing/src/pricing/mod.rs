//! Pricing module
//!
//! Provides the suggestion heuristic with:
//! - Volume tiering (bulk discount, small-order premium)
//! - Deterministic per-region market factor
//! - Optional explicit region overrides

pub mod market;
pub mod policy;
pub mod suggester;

pub use market::{market_factor, HashedMarketFactor, MarketFactorSource, RegionTable};
pub use policy::PricingPolicy;
pub use suggester::PriceSuggester;
