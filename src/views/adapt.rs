//! Payload shapes and the pure RawMetric → chart adaptation.
//!
//! Each backend endpoint returns one of a handful of JSON shapes. A [`Shape`]
//! turns the payload into ordered `(label, value)` pairs; [`adapt`] turns the
//! pairs into a [`ChartSpec`] and, when the view asks for one, a legend.
//! Nothing here performs I/O, and a failure never yields a partial chart.

use serde::Serialize;
use serde_json::{Map, Value};

use super::chart::{ChartSpec, LegendEntry};
use super::error::{ParseError, json_type};
use super::{RawMetric, ViewSpec};
use crate::menu::ViewId;
use crate::utils::format::humanize_key;

/// How a view's payload maps onto labels and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `{"High Risk": 120, ...}`: every key is a label, every value a count.
    /// Keys keep payload order.
    KeyedCounts,
    /// `{"total_revenue": 1.5, "best_month": "May"}`: numeric fields only,
    /// labels humanized from the keys.
    NumericFields,
    /// `{"months": [...], "churn_counts": [...]}`: two same-length arrays.
    ParallelArrays {
        labels: &'static str,
        values: &'static str,
    },
    /// `[{"country": "DE", "user_count": 3}, ...]`: one pair per record.
    Records {
        label: &'static str,
        value: &'static str,
    },
}

impl Shape {
    /// Extract ordered pairs from a payload.
    pub fn extract(&self, raw: &Value) -> Result<Vec<(String, f64)>, ParseError> {
        match *self {
            Self::KeyedCounts => keyed_counts(as_object(raw)?),
            Self::NumericFields => numeric_fields(as_object(raw)?),
            Self::ParallelArrays { labels, values } => parallel_arrays(as_object(raw)?, labels, values),
            Self::Records { label, value } => records(raw, label, value),
        }
    }
}

/// A chart ready to render, plus its optional custom legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdaptedView {
    pub view: ViewId,
    pub title: &'static str,
    pub chart: ChartSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Vec<LegendEntry>>,
}

/// Adapt a payload for a view. Deterministic in `raw`.
pub fn adapt(spec: &ViewSpec, raw: &RawMetric) -> Result<AdaptedView, ParseError> {
    let pairs = spec.shape.extract(raw)?;
    let chart = ChartSpec::from_pairs(spec.chart, pairs, spec.palette);
    let legend = spec.legend.then(|| chart.legend());

    Ok(AdaptedView {
        view: spec.view,
        title: spec.title,
        chart,
        legend,
    })
}

// ---------------------------------------------------------------------------
// Shape implementations
// ---------------------------------------------------------------------------

fn as_object(raw: &Value) -> Result<&Map<String, Value>, ParseError> {
    raw.as_object().ok_or(ParseError::ExpectedObject {
        found: json_type(raw),
    })
}

fn keyed_counts(obj: &Map<String, Value>) -> Result<Vec<(String, f64)>, ParseError> {
    obj.iter()
        .map(|(key, value)| Ok((key.clone(), number(value, key)?)))
        .collect()
}

fn numeric_fields(obj: &Map<String, Value>) -> Result<Vec<(String, f64)>, ParseError> {
    let mut pairs = Vec::new();
    for (key, value) in obj {
        if value.is_number() {
            pairs.push((humanize_key(key), number(value, key)?));
        }
    }

    if pairs.is_empty() {
        return Err(ParseError::NoNumericFields);
    }
    Ok(pairs)
}

fn parallel_arrays(
    obj: &Map<String, Value>,
    labels_field: &'static str,
    values_field: &'static str,
) -> Result<Vec<(String, f64)>, ParseError> {
    let labels = array_field(obj, labels_field)?;
    let values = array_field(obj, values_field)?;

    if labels.len() != values.len() {
        return Err(ParseError::LengthMismatch {
            labels: labels.len(),
            values: values.len(),
        });
    }

    labels
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (label, value))| {
            let label = label_text(label, index)?;
            let value = number(value, &label)?;
            Ok((label, value))
        })
        .collect()
}

fn records(
    raw: &Value,
    label_field: &'static str,
    value_field: &'static str,
) -> Result<Vec<(String, f64)>, ParseError> {
    let rows = raw.as_array().ok_or(ParseError::ExpectedArray {
        field: None,
        found: json_type(raw),
    })?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let row = row.as_object().ok_or(ParseError::ExpectedObject {
                found: json_type(row),
            })?;
            let label = row.get(label_field).ok_or(ParseError::MissingField {
                field: label_field,
                index: Some(index),
            })?;
            let label = label_text(label, index)?;
            let value = row.get(value_field).ok_or(ParseError::MissingField {
                field: value_field,
                index: Some(index),
            })?;
            let value = number(value, &label)?;
            Ok((label, value))
        })
        .collect()
}

fn array_field<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Vec<Value>, ParseError> {
    let value = obj
        .get(field)
        .ok_or(ParseError::MissingField { field, index: None })?;
    value.as_array().ok_or(ParseError::ExpectedArray {
        field: Some(field),
        found: json_type(value),
    })
}

fn label_text(value: &Value, index: usize) -> Result<String, ParseError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ParseError::InvalidLabel {
            index,
            found: json_type(other),
        }),
    }
}

fn number(value: &Value, label: &str) -> Result<f64, ParseError> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::NotNumeric {
            label: label.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
