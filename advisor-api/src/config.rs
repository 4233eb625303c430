//! Advisor API configuration

use std::net::{SocketAddr, ToSocketAddrs};

use advisor_pricing::{AdvisorError, PriceSuggester, PricingPolicy, RegionTable, Result};
use serde::{Deserialize, Serialize};

/// Advisor API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Service host
    pub host: String,
    /// Service port
    pub port: u16,
    /// Emit JSON log lines
    pub log_json: bool,
    /// Raw `region=bucket` override list
    pub region_overrides: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3009,
            log_json: true,
            region_overrides: String::new(),
        }
    }
}

impl AdvisorConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        // PORT is checked first, ADVISOR_PORT overrides it
        if let Some(port) = lookup("PORT") {
            cfg.port = parse_port("PORT", &port)?;
        }
        if let Some(port) = lookup("ADVISOR_PORT") {
            cfg.port = parse_port("ADVISOR_PORT", &port)?;
        }
        if let Some(host) = lookup("ADVISOR_HOST") {
            cfg.host = host;
        }
        if let Some(val) = lookup("ADVISOR_LOG_JSON") {
            cfg.log_json = parse_bool("ADVISOR_LOG_JSON", &val)?;
        }
        if let Some(val) = lookup("ADVISOR_REGION_OVERRIDES") {
            cfg.region_overrides = val;
        }

        // Reject bad overrides at startup rather than on first request
        cfg.region_table()?;

        Ok(cfg)
    }

    /// Socket addresses to bind. Accepts IP literals (IPv4 or bare IPv6)
    /// and host names.
    pub fn listen_addrs(&self) -> Result<Vec<SocketAddr>> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| {
                AdvisorError::Config(format!("invalid listen host {:?}: {}", self.host, e))
            })?
            .collect();
        if addrs.is_empty() {
            return Err(AdvisorError::Config(format!(
                "listen host {:?} resolved to no addresses",
                self.host
            )));
        }
        Ok(addrs)
    }

    /// Region overrides as a lookup table
    pub fn region_table(&self) -> Result<RegionTable> {
        RegionTable::parse(&self.region_overrides)
            .map_err(|e| AdvisorError::Config(format!("ADVISOR_REGION_OVERRIDES: {}", e)))
    }

    /// Build the suggester described by this configuration
    pub fn build_suggester(&self) -> Result<PriceSuggester> {
        Ok(PriceSuggester::new(
            PricingPolicy::default(),
            self.region_table()?,
        ))
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|e| AdvisorError::Config(format!("{}={:?}: {}", key, value, e)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AdvisorError::Config(format!(
            "{}={:?}: expected a boolean",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AdvisorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.port, 3009);
        assert_eq!(cfg.host, "0.0.0.0");
        assert!(cfg.log_json);
        assert!(cfg.region_table().unwrap().is_empty());
        assert_eq!(cfg.listen_addrs().unwrap()[0].port(), 3009);
    }

    #[test]
    fn test_port_precedence() {
        let cfg = AdvisorConfig::from_lookup(lookup(&[("PORT", "8080")])).unwrap();
        assert_eq!(cfg.port, 8080);

        let cfg =
            AdvisorConfig::from_lookup(lookup(&[("PORT", "8080"), ("ADVISOR_PORT", "9000")]))
                .unwrap();
        assert_eq!(cfg.port, 9000);
    }

    #[test]
    fn test_bad_port_rejected() {
        let err = AdvisorConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, AdvisorError::Config(_)));
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_log_format() {
        let cfg = AdvisorConfig::from_lookup(lookup(&[("ADVISOR_LOG_JSON", "off")])).unwrap();
        assert!(!cfg.log_json);
        assert!(AdvisorConfig::from_lookup(lookup(&[("ADVISOR_LOG_JSON", "maybe")])).is_err());
    }

    #[test]
    fn test_region_overrides() {
        let cfg =
            AdvisorConfig::from_lookup(lookup(&[("ADVISOR_REGION_OVERRIDES", "eu=12,us=8")]))
                .unwrap();
        let suggester = cfg.build_suggester().unwrap();
        assert_eq!(suggester.suggest(50, "eu").unwrap().market_bucket, 12);
        assert_eq!(suggester.suggest(50, "us").unwrap().market_bucket, 8);

        let err =
            AdvisorConfig::from_lookup(lookup(&[("ADVISOR_REGION_OVERRIDES", "eu=20")]))
                .unwrap_err();
        assert!(err.to_string().contains("ADVISOR_REGION_OVERRIDES"));
    }

    #[test]
    fn test_bad_host_rejected_at_bind() {
        let cfg = AdvisorConfig::from_lookup(lookup(&[("ADVISOR_HOST", "not a host")])).unwrap();
        assert!(cfg.listen_addrs().is_err());
    }

    #[test]
    fn test_ipv6_and_named_hosts() {
        let cfg = AdvisorConfig::from_lookup(lookup(&[("ADVISOR_HOST", "::"), ("PORT", "8081")]))
            .unwrap();
        let addrs = cfg.listen_addrs().unwrap();
        assert!(addrs[0].is_ipv6());
        assert_eq!(addrs[0].port(), 8081);

        let cfg = AdvisorConfig::from_lookup(lookup(&[("ADVISOR_HOST", "localhost")])).unwrap();
        let addrs = cfg.listen_addrs().unwrap();
        assert!(addrs.iter().all(|a| a.ip().is_loopback() && a.port() == 3009));
    }
}
