//! Pricing configuration loading.
//!
//! Rates and the free-hours policy are data, not code: they live in a
//! JSON file and are handed to the engine as a [`PricingConfig`].
//! This module loads and validates that file. Validation is strict
//! because a malformed rate card silently corrupts every downstream
//! number.

use std::path::Path;

use thiserror::Error;

use crate::models::{PricingConfig, UrgencyTier};

/// Failure loading or validating a pricing file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read pricing file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse pricing file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("rate for tier {tier} must be positive, got {rate}")]
    NonPositiveRate { tier: &'static str, rate: f64 },
    #[error("free_hours_per_month must not be negative, got {0}")]
    NegativeFreeHours(f64),
    #[error("default_hours must be positive, got {0}")]
    NonPositiveDefaultHours(f64),
    #[error("free_hours_start must be a zero-padded YYYY-MM key, got {0:?}")]
    BadStartMonth(String),
}

impl PricingConfig {
    /// Load a pricing configuration from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<PricingConfig, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: PricingConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration's internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tier in UrgencyTier::ALL {
            let rate = self.rate(tier);
            if !(rate > 0.0) {
                return Err(ConfigError::NonPositiveRate {
                    tier: tier.label(),
                    rate,
                });
            }
        }
        if self.free_hours_per_month < 0.0 {
            return Err(ConfigError::NegativeFreeHours(self.free_hours_per_month));
        }
        if !(self.default_hours > 0.0) {
            return Err(ConfigError::NonPositiveDefaultHours(self.default_hours));
        }
        if !is_month_key(&self.free_hours_start) {
            return Err(ConfigError::BadStartMonth(self.free_hours_start.clone()));
        }
        Ok(())
    }
}

/// True for zero-padded `YYYY-MM` strings with a plausible month.
fn is_month_key(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return false;
    }
    if !bytes[..4].iter().all(u8::is_ascii_digit) || !bytes[5..].iter().all(u8::is_ascii_digit) {
        return false;
    }
    s[5..].parse::<u8>().map_or(false, |month| (1..=12).contains(&month))
}
