//! # Advisor Pricing
//!
//! Heuristic price suggestion for credit listings.
//!
//! ## Pricing Formula
//!
//! ```text
//! unit  = base × tier × market
//! total = unit × amount
//! ```
//!
//! Where:
//! - base: 5.0 per credit
//! - tier: 0.9 for bulk (> 100), 1.1 for small (< 10), 1.0 otherwise
//! - market: 1 + (bucket(region) - 10) / 100, one of 0.90 ..= 1.09
//!
//! Both outputs are rounded half-to-even to 2 decimal places. The total is
//! taken from the unrounded unit price.

pub mod error;
pub mod pricing;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{AdvisorError, PricingError, Result};
pub use pricing::{
    market::{market_factor, HashedMarketFactor, MarketFactorSource, RegionTable},
    policy::PricingPolicy,
    suggester::PriceSuggester,
};
pub use types::suggestion::{
    PriceSuggestion, PriceSuggestionRequest, PriceSuggestionResponse, PriceTier,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Region used when a request does not name one
pub const DEFAULT_REGION: &str = "global";

/// Number of discrete market buckets
pub const MARKET_BUCKETS: u8 = 20;

/// Version tag of the region hashing scheme
pub const MARKET_FACTOR_SCHEME: &str = "v1";

/// Placeholder confidence reported with every suggestion
pub const SUGGESTION_CONFIDENCE: f64 = 0.8;
