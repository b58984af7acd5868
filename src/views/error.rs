//! Failure taxonomy for view adapters.
//!
//! Both kinds settle a mount in `Failed`; re-activating the view retries.

use thiserror::Error;

/// The backend could not be reached or refused the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("request failed: {0}")]
    Transport(String),
    /// Non-2xx response. `message` is the backend's `{"error": ...}` text.
    #[error("backend returned HTTP {code}{}", status_suffix(.message))]
    Status { code: u16, message: Option<String> },
    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// The payload did not match the shape the view expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("expected a JSON object, found {found}")]
    ExpectedObject { found: &'static str },
    #[error("expected {} array, found {found}", array_subject(.field))]
    ExpectedArray { field: Option<&'static str>, found: &'static str },
    #[error("{} is missing '{field}'", record_subject(.index))]
    MissingField { field: &'static str, index: Option<usize> },
    #[error("label {index} must be a string or number, found {found}")]
    InvalidLabel { index: usize, found: &'static str },
    #[error("value for '{label}' is not a finite number")]
    NotNumeric { label: String },
    #[error("{labels} labels but {values} values")]
    LengthMismatch { labels: usize, values: usize },
    #[error("payload has no numeric fields")]
    NoNumericFields,
}

/// Why a view mount ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl AdapterError {
    /// Short category for logs and the web API.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::Parse(_) => "parse",
        }
    }
}

fn status_suffix(message: &Option<String>) -> String {
    match message {
        Some(msg) => format!(": {msg}"),
        None => String::new(),
    }
}

fn array_subject(field: &Option<&'static str>) -> String {
    match field {
        Some(field) => format!("'{field}' to be an"),
        None => "a JSON".to_string(),
    }
}

fn record_subject(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("record {i}"),
        None => "payload".to_string(),
    }
}

/// JSON type name for error messages.
pub(crate) fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
