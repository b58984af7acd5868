//! Host shell: one navigator, one mounted view.
//!
//! Every activation of a leaf view creates a fresh mount with a new
//! [`MountToken`] and hands back a [`FetchTicket`]. Whoever runs the fetch
//! returns the result with [`Shell::complete`]; the result is applied only if
//! its token still names the current mount. A slow fetch for a view the user
//! already left is discarded, never written over newer state.
//!
//! There is no cache: re-selecting a view always fetches again.

use serde::Serialize;

use crate::diagnostics::{DiagnosticEvent, EventLog};
use crate::menu::{GroupId, Menu, ViewId};
use crate::navigation::{NavigationError, NavigationState, Navigator};
use crate::views::{
    AdaptedView, AdapterError, AdapterState, MetricSource, RawMetric, ViewAdapter, spec_for,
};

// ---------------------------------------------------------------------------
// Mounts
// ---------------------------------------------------------------------------

/// Identifies one mount. Strictly increasing over the life of a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MountToken(u64);

impl MountToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A fetch the caller must run and then report via [`Shell::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: MountToken,
    pub view: ViewId,
    pub endpoint: &'static str,
}

/// Result of reporting a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    Stale,
}

#[derive(Debug, Clone)]
enum MountKind {
    /// Views with no chart, e.g. the upload form.
    Static,
    Chart(ViewAdapter),
}

#[derive(Debug, Clone)]
struct Mount {
    token: MountToken,
    view: ViewId,
    kind: MountKind,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// What the UI should render for the current mount.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewStatus {
    Idle,
    Loading,
    Ready(AdaptedView),
    Failed { kind: &'static str, reason: String },
    Static,
}

/// Serializable picture of the whole shell.
#[derive(Debug, Clone, Serialize)]
pub struct ShellSnapshot {
    pub navigation: NavigationState,
    pub menu: Menu,
    pub view: ViewId,
    pub token: MountToken,
    pub content: ViewStatus,
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Shell {
    navigator: Navigator,
    last_token: u64,
    mount: Mount,
    log: EventLog,
}

impl Shell {
    /// Wrap a navigator. The active view starts unmounted (`Idle`) until
    /// [`activate_current`](Self::activate_current) is called.
    pub fn new(navigator: Navigator, log: EventLog) -> Self {
        let view = navigator.active_item();
        let mount = Mount {
            token: MountToken(0),
            view,
            kind: mount_kind(view),
        };
        Self {
            navigator,
            last_token: 0,
            mount,
            log,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn current_token(&self) -> MountToken {
        self.mount.token
    }

    pub fn current_view(&self) -> ViewId {
        self.mount.view
    }

    /// Adapter state of the current mount; `None` for static views.
    pub fn adapter_state(&self) -> Option<&AdapterState> {
        match &self.mount.kind {
            MountKind::Chart(adapter) => Some(adapter.state()),
            MountKind::Static => None,
        }
    }

    /// Mount the navigator's active view afresh and start its fetch.
    pub fn activate_current(&mut self) -> Option<FetchTicket> {
        self.last_token += 1;
        let token = MountToken(self.last_token);
        let view = self.navigator.active_item();

        let mut kind = mount_kind(view);
        let ticket = match &mut kind {
            MountKind::Chart(adapter) => {
                adapter.start();
                Some(FetchTicket {
                    token,
                    view,
                    endpoint: adapter.spec().endpoint,
                })
            }
            MountKind::Static => None,
        };

        self.mount = Mount { token, view, kind };

        if let Some(ticket) = &ticket {
            self.log.record(
                DiagnosticEvent::new("fetch_started")
                    .view(view)
                    .token(token.value())
                    .detail(ticket.endpoint),
            );
        }
        ticket
    }

    pub fn select_group(&mut self, group: GroupId) -> Result<Option<FetchTicket>, NavigationError> {
        let result = self.navigator.select_group(group);
        self.after_selection(result)
    }

    pub fn select_item(&mut self, item: ViewId) -> Result<Option<FetchTicket>, NavigationError> {
        let result = self.navigator.select_item(item);
        self.after_selection(result)
    }

    pub fn select_group_key(&mut self, key: &str) -> Result<Option<FetchTicket>, NavigationError> {
        let result = self.navigator.select_group_key(key);
        self.after_selection(result)
    }

    pub fn select_item_key(&mut self, key: &str) -> Result<Option<FetchTicket>, NavigationError> {
        let result = self.navigator.select_item_key(key);
        self.after_selection(result)
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.navigator.toggle_sidebar()
    }

    /// Re-mount the current view, e.g. after a failure.
    pub fn reload(&mut self) -> Option<FetchTicket> {
        self.activate_current()
    }

    fn after_selection(
        &mut self,
        result: Result<crate::navigation::Transition, NavigationError>,
    ) -> Result<Option<FetchTicket>, NavigationError> {
        match result {
            Ok(transition) => {
                let detail = if transition.changed() {
                    format!("from {}", transition.previous)
                } else {
                    "reselected".to_string()
                };
                self.log.record(
                    DiagnosticEvent::new("navigation")
                        .view(transition.current)
                        .detail(detail),
                );
                Ok(self.activate_current())
            }
            Err(e) => {
                self.log
                    .record(DiagnosticEvent::new("navigation_rejected").detail(&e));
                Err(e)
            }
        }
    }

    /// Report a finished fetch. Applied only if `token` is the current mount.
    pub fn complete(&mut self, token: MountToken, result: Result<RawMetric, AdapterError>) -> Commit {
        if token != self.mount.token {
            self.log.record(
                DiagnosticEvent::new("stale_discarded")
                    .token(token.value())
                    .detail(format!("current token {}", self.mount.token.value())),
            );
            return Commit::Stale;
        }

        let MountKind::Chart(adapter) = &mut self.mount.kind else {
            return Commit::Stale;
        };
        if !adapter.settle(result) {
            return Commit::Stale;
        }

        let event = match adapter.state() {
            AdapterState::Failed(e) => DiagnosticEvent::new("view_failed").detail(e),
            _ => DiagnosticEvent::new("view_ready"),
        };
        self.log
            .record(event.view(self.mount.view).token(token.value()));
        Commit::Applied
    }

    /// Fetch a ticket synchronously and commit the result.
    pub fn run_ticket(&mut self, ticket: &FetchTicket, source: &dyn MetricSource) -> Commit {
        let result = source.fetch(ticket.endpoint);
        self.complete(ticket.token, result)
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        let content = match &self.mount.kind {
            MountKind::Static => ViewStatus::Static,
            MountKind::Chart(adapter) => match adapter.state() {
                AdapterState::Idle => ViewStatus::Idle,
                AdapterState::Loading => ViewStatus::Loading,
                AdapterState::Ready(view) => ViewStatus::Ready(view.clone()),
                AdapterState::Failed(e) => ViewStatus::Failed {
                    kind: e.kind(),
                    reason: e.to_string(),
                },
            },
        };

        ShellSnapshot {
            navigation: self.navigator.state(),
            menu: self.navigator.menu().clone(),
            view: self.mount.view,
            token: self.mount.token,
            content,
        }
    }
}

fn mount_kind(view: ViewId) -> MountKind {
    match spec_for(view) {
        Some(spec) => MountKind::Chart(ViewAdapter::new(spec)),
        None => MountKind::Static,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
