//! Diagnostic event log: one JSON line per navigation or view lifecycle event.
//!
//! Records rejected selections, fetch starts, settled views and stale
//! completions so a failed chart can be traced after the fact.
//!
//! Log file: `~/.mydash/events.jsonl` (see `[logging]` in the config).
//! Writes are best-effort; a log failure never reaches the caller.

use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Event entry
// ---------------------------------------------------------------------------

/// A single diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    pub timestamp: String,
    /// `navigation`, `navigation_rejected`, `fetch_started`, `view_ready`,
    /// `view_failed` or `stale_discarded`.
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub view: Option<String>,
    /// Mount token the event belongs to.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<String>,
}

impl DiagnosticEvent {
    pub fn new(event: &str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            event: event.to_string(),
            view: None,
            token: None,
            detail: None,
        }
    }

    pub fn view(mut self, view: impl ToString) -> Self {
        self.view = Some(view.to_string());
        self
    }

    pub fn token(mut self, token: u64) -> Self {
        self.token = Some(token);
        self
    }

    pub fn detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}

// ---------------------------------------------------------------------------
// Log handle
// ---------------------------------------------------------------------------

/// Where events go. `None` disables logging.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            path: config.events_path(),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an event. Failures are silently ignored.
    pub fn record(&self, event: DiagnosticEvent) {
        if let Some(path) = &self.path {
            let _ = append_event(path, &event);
        }
    }

    /// Read back every event in the log, skipping malformed lines.
    pub fn read_all(&self) -> Vec<DiagnosticEvent> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        read_events(path)
    }
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

fn append_event(path: &Path, event: &DiagnosticEvent) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(event)?;
    writeln!(file, "{json}")?;

    Ok(())
}

fn read_events(path: &Path) -> Vec<DiagnosticEvent> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<DiagnosticEvent>(&line).ok())
        .collect()
}
