//! HTTP source fetching
//!
//! Fetches the JSON array of person records with bounded retries. Network
//! errors, non-success statuses and malformed bodies are all retried against
//! the same URL.

use crate::config::FetchConfig;
use crate::retry::{RetryError, with_retry};
use crate::types::Person;
use crate::{Error, Result};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Fetches person records from the configured source
pub struct Fetcher {
    http_client: reqwest::Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Create a fetcher with its own HTTP client
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: FetchConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("person-roster/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// The URL every attempt requests
    pub fn source_url(&self) -> &str {
        &self.config.source_url
    }

    /// Fetch records, returning an empty list once every attempt has failed
    ///
    /// # Errors
    /// Only [`Error::Cancelled`] or a non-retryable failure surface as errors.
    pub async fn fetch(&self, cancel: &CancellationToken) -> Result<Vec<Person>> {
        match self.try_fetch(cancel).await {
            Err(Error::FetchExhausted { .. }) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Fetch records, reporting exhaustion as [`Error::FetchExhausted`]
    ///
    /// A body that parses as an empty array is a success and is not retried.
    pub async fn try_fetch(&self, cancel: &CancellationToken) -> Result<Vec<Person>> {
        debug!(url = %self.config.source_url, "Fetching person records");

        let result = with_retry(&self.config.retry, cancel, || self.fetch_once()).await;

        match result {
            Ok(people) => {
                info!(count = people.len(), "Fetched person records");
                Ok(people)
            }
            Err(RetryError::Exhausted { attempts, .. }) => Err(Error::FetchExhausted { attempts }),
            Err(RetryError::Cancelled) => Err(Error::Cancelled),
            Err(RetryError::Fatal(e)) => Err(e),
        }
    }

    /// One request plus parse
    async fn fetch_once(&self) -> Result<Vec<Person>> {
        let url = &self.config.source_url;
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.clone(),
            });
        }

        let body = response.text().await?;
        parse_people(&body)
    }
}

/// Parse a response body into person records
///
/// The body must be a JSON array whose elements are all objects. Fields of the
/// wrong type inside an object are treated as absent.
pub fn parse_people(body: &str) -> Result<Vec<Person>> {
    let value: Value = serde_json::from_str(body)?;

    let Value::Array(items) = value else {
        return Err(Error::MalformedBody(format!(
            "expected a JSON array, got {}",
            json_kind(&value)
        )));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(Person::from_json_object(object)),
            other => Err(Error::MalformedBody(format!(
                "element {} is {}, expected an object",
                index,
                json_kind(other)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
