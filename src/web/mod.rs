//! Embedded web dashboard for mydash.
//!
//! A lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - A single-page dashboard with the sidebar and chart area
//! - JSON API endpoints for navigation and the current view
//!
//! The server loop owns the [`Shell`]. Backend fetches run on worker threads
//! and report back over a channel; the loop drains completions between
//! requests, so every state change happens on this thread.
//!
//! Launched via `mydash serve` (default: `http://127.0.0.1:9747`).

mod api;
mod frontend;

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::config::DashConfig;
use crate::diagnostics::EventLog;
use crate::menu::Menu;
use crate::navigation::Navigator;
use crate::shell::{FetchTicket, MountToken, Shell};
use crate::views::{AdapterError, HttpSource, MetricSource, RawMetric};

/// How long the loop waits for a request before checking completions.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Fetch workers
// ---------------------------------------------------------------------------

/// A finished fetch, delivered back to the server loop.
struct Completion {
    token: MountToken,
    result: Result<RawMetric, AdapterError>,
}

/// Last known backend reachability, refreshed off the loop thread.
#[derive(Debug, Default)]
struct Reachability {
    /// 0 = not checked yet, 1 = unreachable, 2 = reachable.
    state: AtomicU8,
    checking: AtomicBool,
}

impl Reachability {
    fn get(&self) -> Option<bool> {
        match self.state.load(Ordering::Acquire) {
            0 => None,
            n => Some(n == 2),
        }
    }

    fn set(&self, reachable: bool) {
        self.state
            .store(if reachable { 2 } else { 1 }, Ordering::Release);
    }
}

/// Spawns one worker thread per fetch ticket.
pub(crate) struct Fetcher {
    source: HttpSource,
    tx: Sender<Completion>,
    reachability: Arc<Reachability>,
}

impl Fetcher {
    fn new(source: HttpSource) -> (Self, Receiver<Completion>) {
        let (tx, rx) = mpsc::channel();
        let fetcher = Self {
            source,
            tx,
            reachability: Arc::default(),
        };
        (fetcher, rx)
    }

    pub(crate) fn source(&self) -> &HttpSource {
        &self.source
    }

    /// Start a ticket's fetch off the loop thread.
    pub(crate) fn spawn(&self, ticket: Option<FetchTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        let source = self.source.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = source.fetch(ticket.endpoint);
            // The loop may have shut down; nothing to report to then.
            let _ = tx.send(Completion {
                token: ticket.token,
                result,
            });
        });
    }

    /// Cached backend reachability (`None` until the first check finishes).
    ///
    /// Every call starts a background refresh unless one is already running,
    /// so the answer never waits on the backend.
    pub(crate) fn api_reachable(&self) -> Option<bool> {
        if !self.reachability.checking.swap(true, Ordering::AcqRel) {
            let source = self.source.clone();
            let reachability = Arc::clone(&self.reachability);
            thread::spawn(move || {
                reachability.set(source.is_reachable());
                reachability.checking.store(false, Ordering::Release);
            });
        }
        self.reachability.get()
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web dashboard server on the given address.
///
/// Blocks the current thread. Handler errors become JSON error responses;
/// a failed view never stops the server.
pub fn serve(config: &DashConfig, addr: &str, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    let navigator = Navigator::with_defaults(
        Menu::builtin(),
        config.navigation.default_group_id(),
        config.navigation.sidebar_expanded,
    );
    let mut shell = Shell::new(navigator, EventLog::from_config(&config.logging));
    let (fetcher, completions) = Fetcher::new(HttpSource::from_config(&config.api));

    println!("mydash dashboard running at http://{addr}");
    println!("Analytics API: {}", fetcher.source().base_url());
    println!("Press Ctrl+C to stop.\n");

    if open {
        let _ = open_browser(&format!("http://{addr}"));
    }

    fetcher.spawn(shell.activate_current());

    loop {
        while let Ok(done) = completions.try_recv() {
            shell.complete(done.token, done.result);
        }

        match server.recv_timeout(POLL_INTERVAL) {
            Ok(Some(request)) => handle(request, &mut shell, &fetcher),
            Ok(None) => {}
            Err(e) => return Err(e).context("failed to receive HTTP request"),
        }
    }
}

fn handle(request: Request, shell: &mut Shell, fetcher: &Fetcher) {
    let method = request.method().clone();
    let url = request.url().to_string();

    let resp = match dispatch(&method, &url, shell, fetcher) {
        Ok(resp) => resp,
        Err(e) => json_error(500, &e.to_string()),
    };
    let _ = request.respond(resp);

    // Brief access log
    println!(
        "{} {} {}",
        method,
        url,
        chrono::Local::now().format("%H:%M:%S")
    );
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(method: &Method, url: &str, shell: &mut Shell, fetcher: &Fetcher) -> Result<HttpResponse> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        // Frontend
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),

        // API: state
        (&Method::Get, "/api/state") => api::get_state(shell),
        (&Method::Get, "/api/health") => api::get_health(fetcher),

        // API: navigation
        (&Method::Post, "/api/nav/toggle") => api::post_toggle(shell),
        (&Method::Post, "/api/view/reload") => api::post_reload(shell, fetcher),
        (&Method::Post, p) if p.starts_with("/api/nav/group/") => {
            api::post_group(shell, fetcher, &p["/api/nav/group/".len()..])
        }
        (&Method::Post, p) if p.starts_with("/api/nav/item/") => {
            api::post_item(shell, fetcher, &p["/api/nav/item/".len()..])
        }

        // 404
        _ => Ok(json_error(404, "not found")),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page frontend.
fn serve_frontend() -> HttpResponse {
    let html = frontend::INDEX_HTML;
    Response::from_data(html.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

/// JSON `{"error": ...}` response with the given status.
pub(crate) fn json_error(status: u16, message: &str) -> HttpResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}
