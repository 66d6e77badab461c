use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::prices::RawResponse;
use crate::provider::Fetch;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Wait before the zero-based `attempt`. Nothing is waited before the
    /// first attempt, then the delay doubles: 1s, 2s, 4s, ...
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            Duration::ZERO
        } else {
            self.base_delay * 2u32.pow(attempt - 1)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Blocking client for the Zonneplan API
pub struct HttpClient {
    client: reqwest::blocking::Client,
    base_url: String,
    secret: String,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let secret = config.secret.clone().ok_or_else(|| {
            Error::configuration("ZONNEPLAN_API_SECRET environment variable is not set")
        })?;
        let client = reqwest::blocking::ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::configuration(format!("Unable to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            secret,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn attempt(&self, url: &str, query: &[(&str, String)]) -> Attempt {
        let response = match self.client.get(url).query(query).send() {
            Ok(response) => response,
            // Connect errors and timeouts
            Err(error) => return Attempt::Retry(error.without_url().to_string()),
        };

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Attempt::Retry(format!("HTTP {status}"));
        }
        if !status.is_success() {
            return Attempt::Done(Err(Error::fetch(format!("HTTP {status}"))));
        }

        Attempt::Done(response.json::<RawResponse>().map_err(|error| {
            Error::fetch(format!(
                "Unable to parse response: {}",
                error.without_url()
            ))
        }))
    }
}

enum Attempt {
    Done(Result<RawResponse>),
    Retry(String),
}

impl Fetch for HttpClient {
    fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, ?query, "Requesting upstream prices");

        let mut query = query.to_vec();
        query.push(("secret", self.secret.clone()));

        let mut last_error = String::from("no attempts made");
        for attempt in 0..self.retry.max_attempts {
            if attempt > 0 {
                let delay = self.retry.delay_before(attempt);
                warn!(%url, attempt, ?delay, error = %last_error, "Retrying upstream request");
                std::thread::sleep(delay);
            }

            match self.attempt(&url, &query) {
                Attempt::Done(result) => return result,
                Attempt::Retry(error) => last_error = error,
            }
        }

        Err(Error::fetch(format!(
            "giving up after {} attempts: {last_error}",
            self.retry.max_attempts
        )))
    }
}
