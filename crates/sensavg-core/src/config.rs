//! Configuration types for sensavg.
//!
//! [`Config::load`] layers `SENSAVG_*` environment variables on top of the
//! embedded defaults. [`Config::defaults`] returns the defaults alone
//! without looking at the environment (useful in tests). There is no
//! configuration file; command-line flags are applied on top by the binary.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::framer::FramingMode;
use crate::parser::NumericPolicy;
use crate::types::OutputFormat;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
interval_secs  = 5
framing        = "per_chunk"
numeric_policy = "sentinel"
output_format  = "csv"
"#;

/// Prefix of environment overrides, e.g. `SENSAVG_INTERVAL_SECS=10`.
pub const ENV_PREFIX: &str = "SENSAVG";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Pipeline and output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Minimum whole seconds between emissions (strictly exceeded).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u32,
    #[serde(default)]
    pub framing: FramingMode,
    #[serde(default)]
    pub numeric_policy: NumericPolicy,
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_interval_secs() -> u32 { 5 }

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the embedded defaults overridden by `SENSAVG_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Same as [`Config::load`] with an explicit environment source.
    pub fn load_from(env: config::Environment) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the environment.
    pub fn defaults() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            framing: FramingMode::default(),
            numeric_policy: NumericPolicy::default(),
            output_format: OutputFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
