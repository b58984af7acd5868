//! Per-mount adapter lifecycle: `Idle → Loading → Ready | Failed`.
//!
//! A [`ViewAdapter`] lives for exactly one mount. Each transition happens at
//! most once; `Ready` and `Failed` are terminal. Re-activating a view builds
//! a new adapter instead of resetting this one, so a previous failure reason
//! can never leak into the next attempt.

use super::adapt::{AdaptedView, adapt};
use super::error::AdapterError;
use super::{RawMetric, ViewSpec};

/// Where a mount is in its fetch/adapt cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterState {
    Idle,
    Loading,
    Ready(AdaptedView),
    Failed(AdapterError),
}

#[derive(Debug, Clone)]
pub struct ViewAdapter {
    spec: ViewSpec,
    state: AdapterState,
}

impl ViewAdapter {
    pub fn new(spec: ViewSpec) -> Self {
        Self {
            spec,
            state: AdapterState::Idle,
        }
    }

    pub fn spec(&self) -> &ViewSpec {
        &self.spec
    }

    pub fn state(&self) -> &AdapterState {
        &self.state
    }

    /// `Idle → Loading`. Returns `false` if the fetch was already started.
    pub fn start(&mut self) -> bool {
        if !matches!(self.state, AdapterState::Idle) {
            return false;
        }
        self.state = AdapterState::Loading;
        true
    }

    /// `Loading → Ready | Failed`. Returns `false` unless currently loading.
    ///
    /// A successful fetch is adapted here; a payload that does not fit the
    /// view's shape settles as `Failed(Parse)`.
    pub fn settle(&mut self, result: Result<RawMetric, AdapterError>) -> bool {
        if !matches!(self.state, AdapterState::Loading) {
            return false;
        }

        self.state = match result.and_then(|raw| adapt(&self.spec, &raw).map_err(AdapterError::from)) {
            Ok(view) => AdapterState::Ready(view),
            Err(e) => AdapterState::Failed(e),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::menu::ViewId;
    use crate::views::error::{FetchError, ParseError};
    use crate::views::spec_for;

    fn segment_adapter() -> ViewAdapter {
        ViewAdapter::new(spec_for(ViewId::ChurnSegment).unwrap())
    }

    #[test]
    fn starts_idle_then_loading_once() {
        let mut adapter = segment_adapter();
        assert_eq!(adapter.state(), &AdapterState::Idle);
        assert!(adapter.start());
        assert_eq!(adapter.state(), &AdapterState::Loading);
        assert!(!adapter.start());
    }

    #[test]
    fn settle_before_start_is_ignored() {
        let mut adapter = segment_adapter();
        assert!(!adapter.settle(Ok(json!({"Low Risk": 1}))));
        assert_eq!(adapter.state(), &AdapterState::Idle);
    }

    #[test]
    fn successful_payload_becomes_ready() {
        let mut adapter = segment_adapter();
        adapter.start();
        assert!(adapter.settle(Ok(json!({"Low Risk": 1}))));
        let AdapterState::Ready(view) = adapter.state() else {
            panic!("expected ready, got {:?}", adapter.state());
        };
        assert_eq!(view.chart.labels(), ["Low Risk"]);
    }

    #[test]
    fn malformed_payload_fails_with_parse_error() {
        let mut adapter = segment_adapter();
        adapter.start();
        adapter.settle(Ok(json!(["not", "an", "object"])));
        assert_eq!(
            adapter.state(),
            &AdapterState::Failed(AdapterError::Parse(ParseError::ExpectedObject { found: "array" }))
        );
    }

    #[test]
    fn failed_is_terminal() {
        let mut adapter = segment_adapter();
        adapter.start();
        adapter.settle(Err(FetchError::Transport("refused".to_string()).into()));

        assert!(!adapter.settle(Ok(json!({"Low Risk": 1}))));
        assert!(!adapter.start());
        assert!(matches!(adapter.state(), AdapterState::Failed(AdapterError::Fetch(_))));
    }
}
