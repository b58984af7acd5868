//! Backend access for view adapters.
//!
//! [`MetricSource`] is the only suspending operation in the dashboard. The
//! shell never calls it while holding state: it hands out a ticket, the
//! fetch runs, and the result comes back as a completion event.
//!
//! [`HttpSource`] talks to the analytics API with the synchronous `ureq`
//! client. It is cheap to clone so each fetch can run on its own worker
//! thread.

use std::time::Duration;

use super::RawMetric;
use super::error::{AdapterError, FetchError, ParseError};
use crate::config::schema::ApiConfig;

/// Anything that can return the payload behind an endpoint path.
pub trait MetricSource {
    fn fetch(&self, endpoint: &str) -> Result<RawMetric, AdapterError>;
}

/// `ureq`-backed source rooted at the configured API base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        // On Windows, "localhost" may try IPv6 (::1) first; the analytics
        // API usually binds IPv4 only.
        let base_url = base_url
            .trim_end_matches('/')
            .replace("://localhost", "://127.0.0.1");
        Self { base_url, timeout }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.base_url, Duration::from_millis(config.timeout_ms))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Whether the API answers at all (any HTTP status counts).
    pub fn is_reachable(&self) -> bool {
        match ureq::get(&self.base_url).timeout(Duration::from_secs(3)).call() {
            Ok(_) | Err(ureq::Error::Status(..)) => true,
            Err(ureq::Error::Transport(_)) => false,
        }
    }
}

impl MetricSource for HttpSource {
    fn fetch(&self, endpoint: &str) -> Result<RawMetric, AdapterError> {
        let url = self.url_for(endpoint);

        let body = match ureq::get(&url).timeout(self.timeout).call() {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| FetchError::Body(e.to_string()))?,
            Err(ureq::Error::Status(code, resp)) => {
                let message = resp.into_string().ok().and_then(|b| error_message(&b));
                return Err(FetchError::Status { code, message }.into());
            }
            Err(ureq::Error::Transport(t)) => {
                return Err(FetchError::Transport(t.to_string()).into());
            }
        };

        serde_json::from_str(&body).map_err(|e| ParseError::InvalidJson(e.to_string()).into())
    }
}

/// Pull the `"error"` string out of a backend error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}
