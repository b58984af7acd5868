/// View adapter tests.
///
/// Feeds representative backend payloads through `spec_for` + `adapt` and
/// checks the resulting chart data, legend and failure modes.
use serde_json::json;

use mydash::menu::ViewId;
use mydash::views::{AdapterError, AdapterState, ChartKind, FetchError, ParseError, ViewAdapter, adapt, spec_for};

fn spec(view: ViewId) -> mydash::views::ViewSpec {
    spec_for(view).expect("chart view")
}

// ---------------------------------------------------------------------------
// Keyed counts
// ---------------------------------------------------------------------------

#[test]
fn risk_segments_keep_order_and_colors() {
    let raw = json!({"High Risk": 120, "Medium Risk": 340, "Low Risk": 900});
    let view = adapt(&spec(ViewId::ChurnSegment), &raw).unwrap();

    assert_eq!(view.chart.kind(), ChartKind::Doughnut);
    assert_eq!(view.chart.labels(), ["High Risk", "Medium Risk", "Low Risk"]);
    assert_eq!(view.chart.series(), [120.0, 340.0, 900.0]);

    let colors: Vec<_> = view.chart.colors().iter().map(|c| c.name).collect();
    assert_eq!(colors, ["red", "amber", "green"]);
}

#[test]
fn risk_segments_carry_formatted_legend() {
    let raw = json!({"High Risk": 12345, "Low Risk": 7});
    let view = adapt(&spec(ViewId::ChurnSegment), &raw).unwrap();

    let legend = view.legend.expect("segmentation has a legend");
    assert_eq!(legend.len(), 2);
    assert_eq!(legend[0].label, "High Risk");
    assert_eq!(legend[0].formatted_value, "12,345");
    assert_eq!(legend[0].color.name, "red");
    assert_eq!(legend[1].formatted_value, "7");
}

#[test]
fn empty_segmentation_is_an_empty_chart() {
    let view = adapt(&spec(ViewId::ChurnSegment), &json!({})).unwrap();
    assert!(view.chart.is_empty());
    assert_eq!(view.legend.as_deref(), Some(&[][..]));
}

#[test]
fn adapting_twice_is_identical() {
    let raw = json!({"High Risk": 3, "Medium Risk": 2, "Low Risk": 1});
    let s = spec(ViewId::ChurnSegment);
    assert_eq!(adapt(&s, &raw).unwrap(), adapt(&s, &raw).unwrap());
}

// ---------------------------------------------------------------------------
// Other shapes
// ---------------------------------------------------------------------------

#[test]
fn kpis_keep_numeric_fields_only() {
    let raw = json!({
        "total_revenue": 1234.5,
        "total_orders": 42,
        "best_month": "2024-05"
    });
    let view = adapt(&spec(ViewId::SalesKpis), &raw).unwrap();
    assert_eq!(view.chart.labels(), ["Total Revenue", "Total Orders"]);
    assert_eq!(view.legend.unwrap()[0].formatted_value, "1,234.5");
}

#[test]
fn churn_trend_zips_parallel_arrays() {
    let raw = json!({"months": ["2024-01", "2024-02"], "churn_counts": [5, 8]});
    let view = adapt(&spec(ViewId::ChurnTrend), &raw).unwrap();
    assert_eq!(view.chart.kind(), ChartKind::Line);
    assert_eq!(view.chart.labels(), ["2024-01", "2024-02"]);
    assert_eq!(view.chart.series(), [5.0, 8.0]);
    assert!(view.legend.is_none());
}

#[test]
fn uneven_arrays_are_a_parse_error() {
    let raw = json!({"dates": ["a", "b", "c"], "predicted_sales": [1.0]});
    assert_eq!(
        adapt(&spec(ViewId::SalesForecast), &raw),
        Err(ParseError::LengthMismatch { labels: 3, values: 1 })
    );
}

#[test]
fn records_use_each_row() {
    let raw = json!([
        {"country": "Germany", "user_count": 30},
        {"country": "France", "user_count": 12}
    ]);
    let view = adapt(&spec(ViewId::UserGeo), &raw).unwrap();
    assert_eq!(view.chart.labels(), ["Germany", "France"]);
    assert_eq!(view.chart.series(), [30.0, 12.0]);
}

#[test]
fn records_with_missing_value_fail_whole_view() {
    let raw = json!([
        {"product_name": "Widget", "total_sales": 10},
        {"product_name": "Gadget"}
    ]);
    let err = adapt(&spec(ViewId::TopProducts), &raw).unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingField {
            field: "total_sales",
            index: Some(1)
        }
    );
}

#[test]
fn wrong_top_level_type_is_rejected() {
    assert!(matches!(
        adapt(&spec(ViewId::ChurnSegment), &json!([1, 2])),
        Err(ParseError::ExpectedObject { .. })
    ));
    assert!(matches!(
        adapt(&spec(ViewId::UserGeo), &json!({"country": "DE"})),
        Err(ParseError::ExpectedArray { .. })
    ));
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn adapter_moves_idle_loading_ready() {
    let mut adapter = ViewAdapter::new(spec(ViewId::ChurnSegment));
    assert_eq!(adapter.state(), &AdapterState::Idle);
    assert!(adapter.start());
    assert_eq!(adapter.state(), &AdapterState::Loading);
    assert!(adapter.settle(Ok(json!({"High Risk": 1}))));
    assert!(matches!(adapter.state(), AdapterState::Ready(_)));
}

#[test]
fn adapter_failure_is_terminal_for_the_mount() {
    let mut adapter = ViewAdapter::new(spec(ViewId::DemandForecast));
    adapter.start();
    let err: AdapterError = FetchError::Transport("connection refused".to_string()).into();
    assert!(adapter.settle(Err(err.clone())));
    assert_eq!(adapter.state(), &AdapterState::Failed(err));

    assert!(!adapter.start());
    assert!(!adapter.settle(Ok(json!([]))));
}

#[test]
fn bad_payload_settles_as_parse_failure() {
    let mut adapter = ViewAdapter::new(spec(ViewId::ChurnTrend));
    adapter.start();
    adapter.settle(Ok(json!({"months": ["a"]})));
    let AdapterState::Failed(e) = adapter.state() else {
        panic!("expected failure");
    };
    assert_eq!(e.kind(), "parse");
}
