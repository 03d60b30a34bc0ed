//! Test configuration helpers pointing the pipeline at a mock source

use person_roster::{Collation, Config, FetchConfig, RetryConfig, StoreConfig, StoreLocation};
use std::time::Duration;
use wiremock::MockServer;

/// Path the mock source serves person records on
pub const SOURCE_PATH: &str = "/Demos/json-dummy-data/64KB.json";

/// Fast retries so exhaustion tests finish quickly
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(40),
        backoff_multiplier: 2.0,
        jitter: false,
    }
}

/// Pipeline configuration for a mock server and a fresh in-memory store
pub fn test_config(server: &MockServer) -> Config {
    Config {
        fetch: FetchConfig {
            source_url: format!("{}{}", server.uri(), SOURCE_PATH),
            request_timeout: Duration::from_secs(5),
            retry: fast_retry(),
        },
        store: StoreConfig {
            location: StoreLocation::Memory {
                name: "pipeline-test".to_string(),
            },
            collation: Collation::Folded,
        },
    }
}
