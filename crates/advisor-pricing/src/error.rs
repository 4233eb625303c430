//! Error types for the credit advisor
//!
//! Provides a unified error type and the pricing-specific variants

use thiserror::Error;

/// Result type alias using AdvisorError
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Unified error type for advisor operations
#[derive(Debug, Error)]
pub enum AdvisorError {
    // Pricing errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Pricing calculation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Pricing calculation overflow for amount {amount}")]
    Overflow { amount: i64 },

    #[error("Market bucket {bucket} out of range for region {region:?} (must be < {max})")]
    BucketOutOfRange { region: String, bucket: u8, max: u8 },

    #[error("Invalid region override: {0}")]
    InvalidOverride(String),
}
