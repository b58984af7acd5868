//! Configuration schema and defaults for mydash.
//!
//! Sections: `[api]`, `[server]`, `[navigation]`, `[logging]`. Every field
//! has a built-in default; users only set what they want to change.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::menu::GroupId;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level mydash configuration.
///
/// Maps directly to `~/.mydash/config.toml` and `.mydash.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub navigation: NavigationConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Analytics backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; view endpoints (`/api/...`) are appended to it.
    pub base_url: String,
    /// Per-request timeout (milliseconds).
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

/// Embedded web dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for `mydash serve`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [navigation]
// ---------------------------------------------------------------------------

/// Initial sidebar state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Group shown on start (`sales`, `churn`, `upload`). First group if unset.
    pub default_group: Option<String>,
    pub sidebar_expanded: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            default_group: None,
            sidebar_expanded: true,
        }
    }
}

impl NavigationConfig {
    /// The configured default group, if set and known.
    pub fn default_group_id(&self) -> Option<GroupId> {
        self.default_group.as_deref()?.parse().ok()
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Diagnostics event log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether diagnostic events are written.
    pub enabled: bool,
    /// Path to the JSONL event log. `~` is expanded to the home directory.
    pub events_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            events_file: "~/.mydash/events.jsonl".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Resolved events file path, or `None` when logging is off or `~`
    /// cannot be expanded.
    pub fn events_path(&self) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        expand_home(&self.events_file)
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None if path == "~" => dirs::home_dir(),
        None => Some(PathBuf::from(path)),
    }
}

// ---------------------------------------------------------------------------
// Default file
// ---------------------------------------------------------------------------

impl DashConfig {
    /// Commented default config written by `mydash config init`.
    pub fn default_toml() -> String {
        r#"# mydash configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (MYDASH_*)
#   2. Project config (.mydash.toml in current directory)
#   3. User global config (~/.mydash/config.toml)
#   4. Built-in defaults

[api]
base_url = "http://127.0.0.1:5000"
timeout_ms = 10000

[server]
addr = "127.0.0.1:9747"
open_browser = true

[navigation]
# default_group = "sales"   # sales | churn | upload
sidebar_expanded = true

[logging]
enabled = true
events_file = "~/.mydash/events.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
