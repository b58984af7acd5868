//! Static menu tree for the dashboard sidebar.
//!
//! The sidebar has two levels: top-level groups (sales, churn, upload) and
//! the leaf views inside each group. Both levels are closed enums so that
//! every id the UI can send is checked at compile time; the string keys only
//! matter at the edges (CLI arguments, web routes, JSON snapshots).

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::navigation::NavigationError;

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

/// Top-level sidebar group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupId {
    Sales,
    Churn,
    Upload,
}

impl GroupId {
    pub const ALL: [GroupId; 3] = [Self::Sales, Self::Churn, Self::Upload];

    /// Stable key used in URLs, config files and JSON.
    pub fn key(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Churn => "churn",
            Self::Upload => "upload",
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GroupId {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.key() == s.trim())
            .ok_or_else(|| NavigationError::UnknownGroup(s.to_string()))
    }
}

impl Serialize for GroupId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// A leaf view. Unique across the whole menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    SalesKpis,
    SalesForecast,
    TopProducts,
    DemandForecast,
    ChurnPrediction,
    ChurnTrend,
    ChurnSegment,
    UserGeo,
    FileUpload,
}

impl ViewId {
    pub const ALL: [ViewId; 9] = [
        Self::SalesKpis,
        Self::SalesForecast,
        Self::TopProducts,
        Self::DemandForecast,
        Self::ChurnPrediction,
        Self::ChurnTrend,
        Self::ChurnSegment,
        Self::UserGeo,
        Self::FileUpload,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::SalesKpis => "sales-kpis",
            Self::SalesForecast => "sales-forecast",
            Self::TopProducts => "top-products",
            Self::DemandForecast => "demand-forecast",
            Self::ChurnPrediction => "churn-prediction",
            Self::ChurnTrend => "churn-trend",
            Self::ChurnSegment => "churn-segment",
            Self::UserGeo => "user-geo",
            Self::FileUpload => "file-upload",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ViewId {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.key() == s.trim())
            .ok_or_else(|| NavigationError::UnknownItem(s.to_string()))
    }
}

impl Serialize for ViewId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// A leaf entry in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: ViewId,
    pub title: &'static str,
    /// Icon name understood by the frontend (no assets are bundled).
    pub icon: &'static str,
}

/// A top-level sidebar group. Owns its items; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuGroup {
    pub id: GroupId,
    pub title: &'static str,
    pub icon: &'static str,
    pub items: Vec<MenuItem>,
}

impl MenuGroup {
    /// The view shown when the group is clicked.
    pub fn first_item(&self) -> &MenuItem {
        // `Menu::new` rejects empty groups.
        &self.items[0]
    }
}

/// Reasons a menu tree is rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("menu has no groups")]
    NoGroups,
    #[error("menu group '{0}' has no items")]
    EmptyGroup(GroupId),
    #[error("menu group '{0}' appears twice")]
    DuplicateGroup(GroupId),
    #[error("menu item '{0}' appears more than once")]
    DuplicateItem(ViewId),
}

/// Ordered, immutable menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Menu {
    groups: Vec<MenuGroup>,
}

impl Menu {
    /// Build a menu from groups, validating non-empty groups and unique ids.
    pub fn new(groups: Vec<MenuGroup>) -> Result<Self, MenuError> {
        if groups.is_empty() {
            return Err(MenuError::NoGroups);
        }

        let mut seen_groups = Vec::new();
        let mut seen_items = Vec::new();
        for group in &groups {
            if group.items.is_empty() {
                return Err(MenuError::EmptyGroup(group.id));
            }
            if seen_groups.contains(&group.id) {
                return Err(MenuError::DuplicateGroup(group.id));
            }
            seen_groups.push(group.id);

            for item in &group.items {
                if seen_items.contains(&item.id) {
                    return Err(MenuError::DuplicateItem(item.id));
                }
                seen_items.push(item.id);
            }
        }

        Ok(Self { groups })
    }

    /// The dashboard's built-in sidebar.
    pub fn builtin() -> Self {
        Self {
            groups: vec![
                MenuGroup {
                    id: GroupId::Sales,
                    title: "Sales Dashboard",
                    icon: "dollar-sign",
                    items: vec![
                        item(ViewId::SalesKpis, "Sales KPIs", "bar-chart"),
                        item(ViewId::SalesForecast, "Sales Forecast", "trending-up"),
                        item(ViewId::TopProducts, "Top Products", "box"),
                        item(ViewId::DemandForecast, "Demand Forecast", "activity"),
                    ],
                },
                MenuGroup {
                    id: GroupId::Churn,
                    title: "Churn Dashboard",
                    icon: "chart-line",
                    items: vec![
                        item(ViewId::ChurnPrediction, "High-Risk Customers", "users"),
                        item(ViewId::ChurnTrend, "Churn Trends", "trending-up"),
                        item(ViewId::ChurnSegment, "Risk Segments", "pie-chart"),
                        item(ViewId::UserGeo, "User Distribution", "map-pin"),
                    ],
                },
                MenuGroup {
                    id: GroupId::Upload,
                    title: "Upload File",
                    icon: "upload",
                    items: vec![item(ViewId::FileUpload, "Upload Excel/CSV", "upload")],
                },
            ],
        }
    }

    pub fn groups(&self) -> &[MenuGroup] {
        &self.groups
    }

    /// The default group: first in sidebar order.
    pub fn first_group(&self) -> &MenuGroup {
        &self.groups[0]
    }

    pub fn group(&self, id: GroupId) -> Option<&MenuGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn item(&self, id: ViewId) -> Option<&MenuItem> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter())
            .find(|i| i.id == id)
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::builtin()
    }
}

fn item(id: ViewId, title: &'static str, icon: &'static str) -> MenuItem {
    MenuItem { id, title, icon }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
