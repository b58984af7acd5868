/// Shell composition tests.
///
/// Drives the shell with an in-memory `MetricSource` that counts requests,
/// covering re-activation after failure, staleness and the event log.
use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::json;

use mydash::diagnostics::EventLog;
use mydash::menu::{GroupId, ViewId};
use mydash::navigation::Navigator;
use mydash::shell::{Commit, Shell, ViewStatus};
use mydash::views::{AdapterError, AdapterState, FetchError, MetricSource, RawMetric};

/// Serves queued responses per endpoint and records every request.
#[derive(Default)]
struct ScriptedSource {
    responses: RefCell<HashMap<&'static str, Vec<Result<RawMetric, AdapterError>>>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedSource {
    fn push(&self, endpoint: &'static str, result: Result<RawMetric, AdapterError>) {
        self.responses
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push(result);
    }

    fn count(&self, endpoint: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|e| e.as_str() == endpoint)
            .count()
    }
}

impl MetricSource for ScriptedSource {
    fn fetch(&self, endpoint: &str) -> Result<RawMetric, AdapterError> {
        self.requests.borrow_mut().push(endpoint.to_string());
        let mut responses = self.responses.borrow_mut();
        match responses.get_mut(endpoint) {
            Some(queue) if !queue.is_empty() => queue.remove(0),
            _ => Err(FetchError::Status {
                code: 404,
                message: None,
            }
            .into()),
        }
    }
}

fn shell() -> Shell {
    Shell::new(Navigator::default(), EventLog::disabled())
}

// ---------------------------------------------------------------------------
// Re-activation
// ---------------------------------------------------------------------------

#[test]
fn failed_demand_forecast_recovers_on_reactivation() {
    const ENDPOINT: &str = "/api/product_demand_forecast";
    let source = ScriptedSource::default();
    source.push(
        ENDPOINT,
        Err(FetchError::Status {
            code: 500,
            message: Some("forecast model missing".to_string()),
        }
        .into()),
    );
    source.push(
        ENDPOINT,
        Ok(json!([{"product_name": "Widget", "forecasted_demand_30_days": 41.5}])),
    );

    let mut shell = shell();
    let ticket = shell.select_item(ViewId::DemandForecast).unwrap().unwrap();
    assert_eq!(shell.run_ticket(&ticket, &source), Commit::Applied);
    assert!(matches!(shell.adapter_state(), Some(AdapterState::Failed(_))));
    assert_eq!(source.count(ENDPOINT), 1);

    // Leave and come back.
    shell.select_group(GroupId::Churn).unwrap();
    let again = shell.select_item(ViewId::DemandForecast).unwrap().unwrap();
    assert_eq!(shell.adapter_state(), Some(&AdapterState::Loading));
    assert_ne!(again.token, ticket.token);

    shell.run_ticket(&again, &source);
    assert_eq!(source.count(ENDPOINT), 2);

    let ViewStatus::Ready(view) = shell.snapshot().content else {
        panic!("expected the second fetch to succeed");
    };
    assert_eq!(view.chart.labels(), ["Widget"]);
    let json = serde_json::to_string(&shell.snapshot()).unwrap();
    assert!(!json.contains("forecast model missing"));
}

#[test]
fn reload_fetches_again_without_cache() {
    let source = ScriptedSource::default();
    source.push("/api/churn_segmentation", Ok(json!({"High Risk": 1})));
    source.push("/api/churn_segmentation", Ok(json!({"High Risk": 2})));

    let mut shell = shell();
    let first = shell.select_item(ViewId::ChurnSegment).unwrap().unwrap();
    shell.run_ticket(&first, &source);
    let second = shell.reload().unwrap();
    shell.run_ticket(&second, &source);

    assert_eq!(source.count("/api/churn_segmentation"), 2);
    let Some(AdapterState::Ready(view)) = shell.adapter_state() else {
        panic!("expected ready");
    };
    assert_eq!(view.chart.series(), [2.0]);
}

// ---------------------------------------------------------------------------
// Staleness
// ---------------------------------------------------------------------------

#[test]
fn out_of_order_completions_keep_latest_view() {
    let mut shell = shell();
    let segment = shell.select_item(ViewId::ChurnSegment).unwrap().unwrap();
    let trend = shell.select_item(ViewId::ChurnTrend).unwrap().unwrap();

    let trend_data = json!({"months": ["2024-01"], "churn_counts": [4]});
    assert_eq!(shell.complete(trend.token, Ok(trend_data)), Commit::Applied);
    assert_eq!(
        shell.complete(segment.token, Ok(json!({"High Risk": 9}))),
        Commit::Stale
    );

    assert_eq!(shell.current_view(), ViewId::ChurnTrend);
    let Some(AdapterState::Ready(view)) = shell.adapter_state() else {
        panic!("expected ready");
    };
    assert_eq!(view.view, ViewId::ChurnTrend);
}

#[test]
fn completion_for_static_mount_is_stale() {
    let mut shell = shell();
    let ticket = shell.select_item(ViewId::SalesKpis).unwrap().unwrap();
    assert!(shell.select_group(GroupId::Upload).unwrap().is_none());
    assert_eq!(
        shell.complete(ticket.token, Ok(json!({"total_revenue": 1}))),
        Commit::Stale
    );
    assert_eq!(shell.snapshot().content, ViewStatus::Static);
}

// ---------------------------------------------------------------------------
// Event log
// ---------------------------------------------------------------------------

#[test]
fn lifecycle_events_are_logged() {
    let dir = tempfile::tempdir().unwrap();
    let log = EventLog::at(dir.path().join("events.jsonl"));
    let mut shell = Shell::new(Navigator::default(), log.clone());

    let old = shell.select_item(ViewId::UserGeo).unwrap().unwrap();
    let new = shell.select_item(ViewId::ChurnSegment).unwrap().unwrap();
    let _ = shell.select_item_key("nope");
    shell.complete(old.token, Ok(json!([])));
    shell.complete(new.token, Ok(json!({"Low Risk": 5})));

    let names: Vec<_> = log.read_all().into_iter().map(|e| e.event).collect();
    assert_eq!(
        names,
        [
            "navigation",
            "fetch_started",
            "navigation",
            "fetch_started",
            "navigation_rejected",
            "stale_discarded",
            "view_ready",
        ]
    );
}

#[test]
fn navigation_events_tell_reselect_from_change() {
    let dir = tempfile::tempdir().unwrap();
    let log = EventLog::at(dir.path().join("events.jsonl"));
    let mut shell = Shell::new(Navigator::default(), log.clone());

    shell.select_item(ViewId::UserGeo).unwrap();
    shell.select_item(ViewId::UserGeo).unwrap();

    let details: Vec<_> = log
        .read_all()
        .into_iter()
        .filter(|e| e.event == "navigation")
        .map(|e| e.detail)
        .collect();
    assert_eq!(
        details,
        [Some("from sales-kpis".to_string()), Some("reselected".to_string())]
    );
}
