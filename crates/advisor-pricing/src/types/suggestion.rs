//! Suggestion Types - request, wire response, and full-precision result
//!
//! The wire response carries floats rounded to cents. [`PriceSuggestion`]
//! keeps the exact decimal intermediates so callers can inspect how a price
//! was reached.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_REGION;

/// Request for a price suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSuggestionRequest {
    /// Number of credits to price (zero and negative are not rejected)
    pub amount: i64,

    /// Opaque region key used for the market adjustment
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl PriceSuggestionRequest {
    pub fn new(amount: i64) -> Self {
        Self {
            amount,
            region: default_region(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

/// Response returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSuggestionResponse {
    /// Price per credit, rounded to 2 dp
    pub suggested_price_per_credit: f64,
    /// Unrounded unit price × amount, rounded to 2 dp
    pub estimated_total: f64,
    /// Static confidence value
    pub confidence: f64,
}

/// Volume tier derived from the requested amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    /// Above the bulk threshold, discounted
    Bulk,
    /// Between the thresholds (inclusive), unchanged
    Standard,
    /// Below the small threshold, premium
    Small,
}

impl PriceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Bulk => "bulk",
            PriceTier::Standard => "standard",
            PriceTier::Small => "small",
        }
    }
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full-precision suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSuggestion {
    /// Requested amount
    pub amount: i64,
    /// Region the factor was derived from
    pub region: String,
    /// Tier the amount fell into
    pub tier: PriceTier,
    /// Base price after the tier multiplier
    pub base_price: Decimal,
    /// Market bucket (0..20)
    pub market_bucket: u8,
    /// Market factor derived from the bucket
    pub market_factor: Decimal,
    /// Unrounded price per credit
    pub unit_price: Decimal,
    /// Unrounded total (unit_price × amount)
    pub total: Decimal,
    /// Confidence reported with the suggestion
    pub confidence: f64,
}

impl PriceSuggestion {
    /// Decimal places used on the wire
    pub const WIRE_DP: u32 = 2;

    /// Unit price rounded half-to-even to cents
    pub fn rounded_unit_price(&self) -> Decimal {
        round_cents(self.unit_price)
    }

    /// Total rounded half-to-even to cents
    pub fn rounded_total(&self) -> Decimal {
        round_cents(self.total)
    }

    /// Render the wire response
    pub fn to_response(&self) -> PriceSuggestionResponse {
        PriceSuggestionResponse {
            suggested_price_per_credit: self.rounded_unit_price().to_f64().unwrap_or_default(),
            estimated_total: self.rounded_total().to_f64().unwrap_or_default(),
            confidence: self.confidence,
        }
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PriceSuggestion::WIRE_DP, RoundingStrategy::MidpointNearestEven)
}
