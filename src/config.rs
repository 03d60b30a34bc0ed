//! Configuration types for person-roster

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Where the person records are fetched from unless overridden
pub const DEFAULT_SOURCE_URL: &str =
    "https://microsoftedge.github.io/Demos/json-dummy-data/64KB.json";

/// Top-level configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Source fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Record store settings
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Check settings that would otherwise fail late (bad URL, zero attempts)
    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.fetch.source_url).map_err(|e| Error::Config {
            message: format!("invalid source URL '{}': {}", self.fetch.source_url, e),
            key: Some("source_url".to_string()),
        })?;

        if self.fetch.retry.max_attempts == 0 {
            return Err(Error::Config {
                message: "max_attempts must be at least 1".to_string(),
                key: Some("max_attempts".to_string()),
            });
        }

        let multiplier = self.fetch.retry.backoff_multiplier;
        if multiplier.is_nan() || multiplier < 1.0 {
            return Err(Error::Config {
                message: format!(
                    "backoff_multiplier must be >= 1.0, got {}",
                    self.fetch.retry.backoff_multiplier
                ),
                key: Some("backoff_multiplier".to_string()),
            });
        }

        if let StoreLocation::Memory { name } = &self.store.location
            && name.is_empty()
        {
            return Err(Error::Config {
                message: "in-memory store name must not be empty".to_string(),
                key: Some("store.location".to_string()),
            });
        }

        Ok(())
    }
}

/// HTTP source configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// URL of the JSON array of person records
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Retry policy for transient fetch failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            request_timeout: default_request_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

/// Retry configuration for transient failures
///
/// The delay before retry `n` (1-based) is
/// `initial_delay * backoff_multiplier^(n-1)`, capped at `max_delay`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts, including the first (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry (default: 1 second)
    #[serde(default = "default_initial_delay", with = "duration_ms_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 30 seconds)
    #[serde(default = "default_max_delay", with = "duration_ms_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: false)
    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: false,
        }
    }
}

/// Record store configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Where the SQLite database lives
    #[serde(default)]
    pub location: StoreLocation,

    /// Comparison used when ordering by name
    #[serde(default)]
    pub collation: Collation,
}

/// SQLite database location
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreLocation {
    /// Private in-memory database, discarded when the store is closed
    ///
    /// Every open starts empty, even when an earlier store used the same name.
    Memory {
        /// Label shown in diagnostics
        name: String,
    },
    /// Database file on disk (created if missing)
    File(PathBuf),
}

impl Default for StoreLocation {
    fn default() -> Self {
        StoreLocation::Memory {
            name: default_store_name(),
        }
    }
}

/// Name ordering policy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collation {
    /// Case-insensitive, accent-folding comparison (default)
    #[default]
    Folded,
    /// Byte order (SQLite BINARY)
    Binary,
}

impl Collation {
    /// SQLite collation name used in `COLLATE` clauses
    pub fn sql_name(&self) -> &'static str {
        match self {
            Collation::Folded => crate::collation::FOLDED_COLLATION,
            Collation::Binary => "BINARY",
        }
    }
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(30)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_store_name() -> String {
    "persons".to_string()
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// Duration serialization helper (milliseconds)
mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
