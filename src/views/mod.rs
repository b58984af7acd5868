//! View data adapters.
//!
//! Every chart view is described by a [`ViewSpec`]: the backend endpoint it
//! reads, the JSON [`Shape`] it expects, the chart form and palette, and
//! whether it draws a custom legend. [`spec_for`] is the closed lookup from
//! [`ViewId`] to its spec; views without a chart (the upload form) have none.
//!
//! - [`adapt`]: pure payload → [`AdaptedView`] transformation
//! - [`lifecycle`]: per-mount `Idle → Loading → Ready | Failed` state
//! - [`fetch`]: the [`MetricSource`] seam and its HTTP implementation

pub mod adapt;
pub mod chart;
pub mod error;
pub mod fetch;
pub mod lifecycle;

pub use adapt::{AdaptedView, Shape, adapt};
pub use chart::{ChartKind, ChartSpec, ColorToken, LegendEntry, Palette};
pub use error::{AdapterError, FetchError, ParseError};
pub use fetch::{HttpSource, MetricSource};
pub use lifecycle::{AdapterState, ViewAdapter};

use crate::menu::ViewId;

/// A backend payload exactly as received.
pub type RawMetric = serde_json::Value;

/// Static adapter configuration for one chart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSpec {
    pub view: ViewId,
    pub title: &'static str,
    /// Path under the API base URL.
    pub endpoint: &'static str,
    pub shape: Shape,
    pub chart: ChartKind,
    pub palette: Palette,
    pub legend: bool,
}

/// Adapter configuration for a view, or `None` for non-chart views.
pub fn spec_for(view: ViewId) -> Option<ViewSpec> {
    let spec = match view {
        ViewId::SalesKpis => ViewSpec {
            view,
            title: "Sales KPIs",
            endpoint: "/api/main_kpis",
            shape: Shape::NumericFields,
            chart: ChartKind::Bar,
            palette: Palette::CATEGORICAL,
            legend: true,
        },
        ViewId::SalesForecast => ViewSpec {
            view,
            title: "Sales Forecast",
            endpoint: "/api/sales_forecast",
            shape: Shape::ParallelArrays {
                labels: "dates",
                values: "predicted_sales",
            },
            chart: ChartKind::Line,
            palette: Palette::SINGLE,
            legend: false,
        },
        ViewId::TopProducts => ViewSpec {
            view,
            title: "Top Products by Revenue",
            endpoint: "/api/top_products",
            shape: Shape::Records {
                label: "product_name",
                value: "total_sales",
            },
            chart: ChartKind::Bar,
            palette: Palette::CATEGORICAL,
            legend: false,
        },
        ViewId::DemandForecast => ViewSpec {
            view,
            title: "30-Day Product Demand Forecast",
            endpoint: "/api/product_demand_forecast",
            shape: Shape::Records {
                label: "product_name",
                value: "forecasted_demand_30_days",
            },
            chart: ChartKind::Bar,
            palette: Palette::CATEGORICAL,
            legend: false,
        },
        ViewId::ChurnPrediction => ViewSpec {
            view,
            title: "High-Risk Customers",
            endpoint: "/api/predict_churn",
            shape: Shape::Records {
                label: "customer_id",
                value: "churn_probability",
            },
            chart: ChartKind::Bar,
            palette: Palette::CATEGORICAL,
            legend: false,
        },
        ViewId::ChurnTrend => ViewSpec {
            view,
            title: "Predicted Churn by Month",
            endpoint: "/api/churn_trends",
            shape: Shape::ParallelArrays {
                labels: "months",
                values: "churn_counts",
            },
            chart: ChartKind::Line,
            palette: Palette::SINGLE,
            legend: false,
        },
        ViewId::ChurnSegment => ViewSpec {
            view,
            title: "Customer Segmentation by Churn Likelihood",
            endpoint: "/api/churn_segmentation",
            shape: Shape::KeyedCounts,
            chart: ChartKind::Doughnut,
            palette: Palette::RISK,
            legend: true,
        },
        ViewId::UserGeo => ViewSpec {
            view,
            title: "Users by Country",
            endpoint: "/api/user_distribution",
            shape: Shape::Records {
                label: "country",
                value: "user_count",
            },
            chart: ChartKind::Bar,
            palette: Palette::CATEGORICAL,
            legend: false,
        },
        ViewId::FileUpload => return None,
    };
    Some(spec)
}
