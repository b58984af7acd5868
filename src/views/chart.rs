//! Renderable chart contract: labels, one numeric series, palette colors.

use serde::Serialize;

use crate::utils::format::format_number;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A named color usable by any chart renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorToken {
    pub name: &'static str,
    pub css: &'static str,
}

const fn color(name: &'static str, css: &'static str) -> ColorToken {
    ColorToken { name, css }
}

const RED: ColorToken = color("red", "rgba(239, 68, 68, 1)");
const AMBER: ColorToken = color("amber", "rgba(245, 158, 11, 1)");
const GREEN: ColorToken = color("green", "rgba(16, 185, 129, 1)");
const BLUE: ColorToken = color("blue", "rgba(59, 130, 246, 1)");
const TEAL: ColorToken = color("teal", "rgba(20, 184, 166, 1)");
const PURPLE: ColorToken = color("purple", "rgba(139, 92, 246, 1)");
const PINK: ColorToken = color("pink", "rgba(236, 72, 153, 1)");
const SLATE: ColorToken = color("slate", "rgba(100, 116, 139, 1)");

/// Fixed, ordered set of colors assigned cyclically by label index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub name: &'static str,
    colors: &'static [ColorToken],
}

impl Palette {
    /// Three-step risk scale for segmentation breakdowns.
    pub const RISK: Palette = Palette {
        name: "risk",
        colors: &[RED, AMBER, GREEN],
    };

    /// General-purpose categories (ranked records, KPI bars).
    pub const CATEGORICAL: Palette = Palette {
        name: "categorical",
        colors: &[BLUE, TEAL, AMBER, RED, PURPLE, GREEN, PINK, SLATE],
    };

    /// One color for every point, used by line charts.
    pub const SINGLE: Palette = Palette {
        name: "single",
        colors: &[BLUE],
    };

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for the label at `index`; wraps past the end of the palette.
    pub fn color_at(&self, index: usize) -> ColorToken {
        self.colors[index % self.colors.len()]
    }
}

// ---------------------------------------------------------------------------
// Chart spec
// ---------------------------------------------------------------------------

/// Visual form chosen per view. Not part of the data contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Line,
    Bar,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Doughnut => write!(f, "doughnut"),
            Self::Line => write!(f, "line"),
            Self::Bar => write!(f, "bar"),
        }
    }
}

/// Labels, values and colors in matching order.
///
/// Only built through [`ChartSpec::from_pairs`], which keeps the three
/// sequences the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    kind: ChartKind,
    labels: Vec<String>,
    series: Vec<f64>,
    colors: Vec<ColorToken>,
}

impl ChartSpec {
    pub fn from_pairs(kind: ChartKind, pairs: Vec<(String, f64)>, palette: Palette) -> Self {
        let mut labels = Vec::with_capacity(pairs.len());
        let mut series = Vec::with_capacity(pairs.len());
        let mut colors = Vec::with_capacity(pairs.len());

        for (index, (label, value)) in pairs.into_iter().enumerate() {
            labels.push(label);
            series.push(value);
            colors.push(palette.color_at(index));
        }

        Self {
            kind,
            labels,
            series,
            colors,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn series(&self) -> &[f64] {
        &self.series
    }

    /// `colors()[i]` is the color of `labels()[i]`.
    pub fn colors(&self) -> &[ColorToken] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Zip into legend rows with grouped number formatting.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.labels
            .iter()
            .zip(&self.series)
            .zip(&self.colors)
            .map(|((label, value), color)| LegendEntry {
                label: label.clone(),
                formatted_value: format_number(*value),
                color: *color,
            })
            .collect()
    }
}

/// One row of a custom legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub formatted_value: String,
    pub color: ColorToken,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
