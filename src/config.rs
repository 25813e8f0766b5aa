// ⚙️ Run Configuration
//
// Two layers:
// - GeneratorConfig: what the synthesizer needs (counts, rates, pools)
// - RunConfig: what one invocation needs (bucket, prefix, seed + generator)
//
// RunConfig is read from environment variables; all lookups go through a
// closure so tests never touch the real process environment.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

pub const ENV_BUCKET: &str = "RAW_BUCKET";
pub const ENV_PREFIX: &str = "RAW_PREFIX";
pub const ENV_N_HOUSEHOLDS: &str = "N_HOUSEHOLDS";
pub const ENV_BAD_ROW_RATE: &str = "BAD_ROW_RATE";
pub const ENV_SEED: &str = "RNG_SEED";

pub const DEFAULT_PREFIX: &str = "raw/";
pub const DEFAULT_N_HOUSEHOLDS: usize = 10;
pub const DEFAULT_BAD_ROW_RATE: f64 = 0.12;
pub const DEFAULT_MAX_MEMBERS: u32 = 7;
pub const DEFAULT_DISTRICT: &str = "Kavrepalanchok";

const DEFAULT_WARDS: [&str; 9] = ["01", "02", "03", "04", "05", "06", "07", "08", "09"];
const DEFAULT_MUNICIPALITIES: [&str; 4] = ["Dhulikhel", "Panauti", "Banepa", "Panchkhal"];

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {name}")]
    Missing { name: &'static str },

    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidInteger {
        name: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{name} must be a number, got {value:?}")]
    InvalidFloat {
        name: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("{name} must be within {expected}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid generator configuration: {0}")]
    InvalidGenerator(String),
}

// ============================================================================
// GENERATOR CONFIG
// ============================================================================

/// Immutable parameters for one synthesis run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub n_households: usize,

    /// Probability in [0, 1] that a submission gets a defect
    pub bad_row_rate: f64,

    /// Upper bound on enumerated members; must be at least 2
    pub max_members_per_household: u32,

    pub wards: Vec<String>,
    pub municipality_pool: Vec<String>,
    pub district: String,
}

impl GeneratorConfig {
    /// Defaults with the given count and rate
    pub fn new(n_households: usize, bad_row_rate: f64) -> Self {
        GeneratorConfig {
            n_households,
            bad_row_rate,
            ..Self::default()
        }
    }

    /// Check the invariants the synthesizer relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.bad_row_rate) {
            return Err(ConfigError::OutOfRange {
                name: ENV_BAD_ROW_RATE,
                value: self.bad_row_rate.to_string(),
                expected: "[0, 1]",
            });
        }
        if self.max_members_per_household < 2 {
            return Err(ConfigError::InvalidGenerator(format!(
                "max_members_per_household must be at least 2, got {}",
                self.max_members_per_household
            )));
        }
        if self.wards.is_empty() {
            return Err(ConfigError::InvalidGenerator("ward pool is empty".to_string()));
        }
        if self.municipality_pool.is_empty() {
            return Err(ConfigError::InvalidGenerator(
                "municipality pool is empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            n_households: DEFAULT_N_HOUSEHOLDS,
            bad_row_rate: DEFAULT_BAD_ROW_RATE,
            max_members_per_household: DEFAULT_MAX_MEMBERS,
            wards: DEFAULT_WARDS.iter().map(|w| w.to_string()).collect(),
            municipality_pool: DEFAULT_MUNICIPALITIES.iter().map(|m| m.to_string()).collect(),
            district: DEFAULT_DISTRICT.to_string(),
        }
    }
}

// ============================================================================
// RUN CONFIG
// ============================================================================

/// Everything one invocation needs
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub bucket: String,
    pub prefix: String,

    /// Non-blank seed string, if reproducible output was requested
    pub seed: Option<String>,

    pub generator: GeneratorConfig,
}

impl RunConfig {
    pub fn new(bucket: impl Into<String>, generator: GeneratorConfig) -> Self {
        RunConfig {
            bucket: bucket.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            seed: None,
            generator,
        }
    }

    /// Builder pattern: set key prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Builder pattern: set seed (blank seeds are ignored)
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        let seed = seed.into();
        self.seed = if seed.trim().is_empty() { None } else { Some(seed) };
        self
    }

    /// Read from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bucket = lookup(ENV_BUCKET).ok_or(ConfigError::Missing { name: ENV_BUCKET })?;
        let prefix = lookup(ENV_PREFIX).unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        let n_households = match lookup(ENV_N_HOUSEHOLDS) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|source| ConfigError::InvalidInteger {
                    name: ENV_N_HOUSEHOLDS,
                    value: raw.clone(),
                    source,
                })?,
            None => DEFAULT_N_HOUSEHOLDS,
        };

        let bad_row_rate = match lookup(ENV_BAD_ROW_RATE) {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|source| ConfigError::InvalidFloat {
                    name: ENV_BAD_ROW_RATE,
                    value: raw.clone(),
                    source,
                })?,
            None => DEFAULT_BAD_ROW_RATE,
        };

        let generator = GeneratorConfig::new(n_households, bad_row_rate);
        generator.validate()?;

        let mut config = RunConfig::new(bucket, generator).with_prefix(prefix);
        if let Some(seed) = lookup(ENV_SEED) {
            config = config.with_seed(seed);
        }

        Ok(config)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = RunConfig::from_lookup(lookup_from(&[("RAW_BUCKET", "wash-raw")])).unwrap();

        assert_eq!(config.bucket, "wash-raw");
        assert_eq!(config.prefix, "raw/");
        assert_eq!(config.seed, None);
        assert_eq!(config.generator.n_households, 10);
        assert_eq!(config.generator.bad_row_rate, 0.12);
        assert_eq!(config.generator.max_members_per_household, 7);
        assert_eq!(config.generator.wards.len(), 9);
        assert_eq!(config.generator.district, "Kavrepalanchok");
    }

    #[test]
    fn test_missing_bucket_is_fatal() {
        let err = RunConfig::from_lookup(lookup_from(&[("N_HOUSEHOLDS", "5")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { name: "RAW_BUCKET" }));
    }

    #[test]
    fn test_overrides_parsed() {
        let config = RunConfig::from_lookup(lookup_from(&[
            ("RAW_BUCKET", "b"),
            ("RAW_PREFIX", "landing/wash/"),
            ("N_HOUSEHOLDS", " 250 "),
            ("BAD_ROW_RATE", "0.5"),
            ("RNG_SEED", "42"),
        ]))
        .unwrap();

        assert_eq!(config.prefix, "landing/wash/");
        assert_eq!(config.generator.n_households, 250);
        assert_eq!(config.generator.bad_row_rate, 0.5);
        assert_eq!(config.seed.as_deref(), Some("42"));
    }

    #[test]
    fn test_non_numeric_count_rejected() {
        let err = RunConfig::from_lookup(lookup_from(&[
            ("RAW_BUCKET", "b"),
            ("N_HOUSEHOLDS", "ten"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInteger { .. }));
        assert!(err.to_string().contains("N_HOUSEHOLDS"));
    }

    #[test]
    fn test_non_numeric_rate_rejected() {
        let err = RunConfig::from_lookup(lookup_from(&[
            ("RAW_BUCKET", "b"),
            ("BAD_ROW_RATE", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFloat { .. }));
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let err = RunConfig::from_lookup(lookup_from(&[
            ("RAW_BUCKET", "b"),
            ("BAD_ROW_RATE", "1.5"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange { name: "BAD_ROW_RATE", .. }
        ));

        let err = RunConfig::from_lookup(lookup_from(&[
            ("RAW_BUCKET", "b"),
            ("BAD_ROW_RATE", "NaN"),
        ]))
        .unwrap_err();
        assert!(err.to_string().starts_with("BAD_ROW_RATE must be within [0, 1]"));
    }

    #[test]
    fn test_blank_seed_ignored() {
        let config = RunConfig::from_lookup(lookup_from(&[
            ("RAW_BUCKET", "b"),
            ("RNG_SEED", "   "),
        ]))
        .unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_generator_validation() {
        assert!(GeneratorConfig::default().validate().is_ok());

        let mut cfg = GeneratorConfig::default();
        cfg.max_members_per_household = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = GeneratorConfig::default();
        cfg.wards.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = GeneratorConfig::default();
        cfg.municipality_pool.clear();
        assert!(cfg.validate().is_err());

        let cfg = GeneratorConfig::new(3, -0.1);
        assert!(cfg.validate().is_err());
    }
}
