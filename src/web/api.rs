//! JSON API handlers for the web dashboard.
//!
//! Navigation handlers answer with the new [`ShellSnapshot`] so the page can
//! redraw without a second request; the chart itself arrives on a later
//! `GET /api/state` once the fetch settles.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::Serialize;
use tiny_http::{Response, StatusCode};

use crate::config;
use crate::shell::{FetchTicket, Shell};
use crate::navigation::NavigationError;

use super::{Fetcher, content_type_json, json_error};

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

/// Health API response.
///
/// `api_reachable` is `null` until the first background check completes.
#[derive(Serialize)]
struct HealthResponse {
    api_base_url: String,
    api_reachable: Option<bool>,
    config_path: Option<String>,
    config_exists: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

/// Start the fetch (if any) and answer with the new state, or 400 on an
/// invalid selection.
fn selection_response(
    shell: &Shell,
    fetcher: &Fetcher,
    result: Result<Option<FetchTicket>, NavigationError>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    match result {
        Ok(ticket) => {
            fetcher.spawn(ticket);
            json_response(&shell.snapshot())
        }
        Err(e) => Ok(json_error(400, &e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/state`: navigation, menu and current view status.
pub fn get_state(shell: &Shell) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&shell.snapshot())
}

/// `POST /api/nav/group/{group}`: select a group and its first view.
pub fn post_group(shell: &mut Shell, fetcher: &Fetcher, key: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let result = shell.select_group_key(key);
    selection_response(shell, fetcher, result)
}

/// `POST /api/nav/item/{view}`: select any view.
pub fn post_item(shell: &mut Shell, fetcher: &Fetcher, key: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let result = shell.select_item_key(key);
    selection_response(shell, fetcher, result)
}

/// `POST /api/nav/toggle`: expand/collapse the sidebar.
pub fn post_toggle(shell: &mut Shell) -> Result<Response<Cursor<Vec<u8>>>> {
    shell.toggle_sidebar();
    json_response(&shell.snapshot())
}

/// `POST /api/view/reload`: re-mount the current view.
pub fn post_reload(shell: &mut Shell, fetcher: &Fetcher) -> Result<Response<Cursor<Vec<u8>>>> {
    let ticket = shell.reload();
    selection_response(shell, fetcher, Ok(ticket))
}

/// `GET /api/health`: last known backend reachability and config location.
pub fn get_health(fetcher: &Fetcher) -> Result<Response<Cursor<Vec<u8>>>> {
    let config_path = config::global_config_file();

    let resp = HealthResponse {
        api_base_url: fetcher.source().base_url().to_string(),
        api_reachable: fetcher.api_reachable(),
        config_exists: config_path.as_ref().is_some_and(|p| p.exists()),
        config_path: config_path.map(|p| p.display().to_string()),
    };

    json_response(&resp)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
