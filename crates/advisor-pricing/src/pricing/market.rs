//! Regional market factor
//!
//! Each region maps to one of [`MARKET_BUCKETS`] buckets, and the bucket
//! selects a factor between 0.90 and 1.09 in steps of 0.01. The default
//! source hashes the region with blake3 so the mapping is stable across
//! processes and platforms. [`RegionTable`] pins specific regions to fixed
//! buckets and hashes everything else.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::PricingError;
use crate::{MARKET_BUCKETS, MARKET_FACTOR_SCHEME};

/// Maps a region to a market bucket in `0..MARKET_BUCKETS`
pub trait MarketFactorSource: Send + Sync {
    fn bucket(&self, region: &str) -> u8;

    /// Market factor for a region
    fn factor(&self, region: &str) -> Decimal {
        market_factor(self.bucket(region))
    }
}

/// `1 + (bucket - 10) / 100`
pub fn market_factor(bucket: u8) -> Decimal {
    let offset = i64::from(bucket % MARKET_BUCKETS) - 10;
    Decimal::ONE + Decimal::new(offset, 2)
}

/// blake3-based bucket assignment
#[derive(Debug, Clone, Default)]
pub struct HashedMarketFactor;

impl HashedMarketFactor {
    pub fn new() -> Self {
        Self
    }

    fn hash_region(region: &str) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"market-factor/");
        hasher.update(MARKET_FACTOR_SCHEME.as_bytes());
        hasher.update(b":");
        hasher.update(region.as_bytes());
        let digest = hasher.finalize();

        let mut word = [0u8; 8];
        word.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(word)
    }
}

impl MarketFactorSource for HashedMarketFactor {
    fn bucket(&self, region: &str) -> u8 {
        (Self::hash_region(region) % u64::from(MARKET_BUCKETS)) as u8
    }
}

/// Explicit region overrides with hashed fallback
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    overrides: BTreeMap<String, u8>,
    fallback: HashedMarketFactor,
}

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a region to a bucket
    pub fn with_override(
        mut self,
        region: impl Into<String>,
        bucket: u8,
    ) -> Result<Self, PricingError> {
        let region = region.into();
        if bucket >= MARKET_BUCKETS {
            return Err(PricingError::BucketOutOfRange {
                region,
                bucket,
                max: MARKET_BUCKETS,
            });
        }
        self.overrides.insert(region, bucket);
        Ok(self)
    }

    /// Parse `region=bucket` pairs separated by commas, e.g. `eu=12,us=8`.
    /// Empty input yields an empty table.
    pub fn parse(input: &str) -> Result<Self, PricingError> {
        let mut table = Self::new();
        for pair in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (region, bucket) = pair
                .split_once('=')
                .ok_or_else(|| PricingError::InvalidOverride(format!("expected region=bucket, got {pair:?}")))?;

            let region = region.trim();
            if region.is_empty() {
                return Err(PricingError::InvalidOverride(format!("empty region in {pair:?}")));
            }

            let bucket: u8 = bucket.trim().parse().map_err(|e| {
                PricingError::InvalidOverride(format!("bad bucket in {pair:?}: {e}"))
            })?;

            table = table.with_override(region, bucket)?;
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn overrides(&self) -> impl Iterator<Item = (&str, u8)> {
        self.overrides.iter().map(|(r, b)| (r.as_str(), *b))
    }
}

impl MarketFactorSource for RegionTable {
    fn bucket(&self, region: &str) -> u8 {
        match self.overrides.get(region) {
            Some(bucket) => *bucket,
            None => self.fallback.bucket(region),
        }
    }
}
