//! Sidebar navigation state machine.
//!
//! [`Navigator`] is the single source of truth for what the dashboard shows.
//! State is only reachable through three transitions:
//!
//! - [`select_group`](Navigator::select_group): activate a group and reset
//!   to its first view, even when the group is already active.
//! - [`select_item`](Navigator::select_item): activate any view in the menu;
//!   the active group is left alone, so cross-group selection is possible.
//! - [`toggle_sidebar`](Navigator::toggle_sidebar): expand/collapse only.
//!
//! Unknown ids are rejected with [`NavigationError`] and the state is left
//! untouched.

use serde::Serialize;
use thiserror::Error;

use crate::menu::{GroupId, Menu, ViewId};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A selection referenced an id that is not in the menu.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("invalid selection: unknown group '{0}'")]
    UnknownGroup(String),
    #[error("invalid selection: unknown item '{0}'")]
    UnknownItem(String),
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Snapshot of the sidebar selection.
///
/// Fields are private; only [`Navigator`] mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    sidebar_expanded: bool,
    active_group: GroupId,
    active_item: ViewId,
}

impl NavigationState {
    pub fn sidebar_expanded(&self) -> bool {
        self.sidebar_expanded
    }

    pub fn active_group(&self) -> GroupId {
        self.active_group
    }

    pub fn active_item(&self) -> ViewId {
        self.active_item
    }
}

/// Outcome of a successful selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: ViewId,
    pub current: ViewId,
}

impl Transition {
    /// Whether a different view is now active.
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Owns the menu and the current [`NavigationState`].
#[derive(Debug, Clone)]
pub struct Navigator {
    menu: Menu,
    state: NavigationState,
}

impl Navigator {
    /// Start on the first view of the first group, sidebar expanded.
    pub fn new(menu: Menu) -> Self {
        let group = menu.first_group();
        let state = NavigationState {
            sidebar_expanded: true,
            active_group: group.id,
            active_item: group.first_item().id,
        };
        Self { menu, state }
    }

    /// Start on a configured group instead of the first one.
    ///
    /// Falls back to [`Navigator::new`] defaults if the group is not in the
    /// menu.
    pub fn with_defaults(menu: Menu, default_group: Option<GroupId>, sidebar_expanded: bool) -> Self {
        let mut nav = Self::new(menu);
        let start = default_group
            .and_then(|id| nav.menu.group(id))
            .map(|group| (group.id, group.first_item().id));
        if let Some((group, item)) = start {
            nav.state.active_group = group;
            nav.state.active_item = item;
        }
        nav.state.sidebar_expanded = sidebar_expanded;
        nav
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn active_item(&self) -> ViewId {
        self.state.active_item
    }

    /// Activate a group and its first view.
    pub fn select_group(&mut self, group: GroupId) -> Result<Transition, NavigationError> {
        let Some(entry) = self.menu.group(group) else {
            return Err(NavigationError::UnknownGroup(group.key().to_string()));
        };
        let first = entry.first_item().id;

        let previous = self.state.active_item;
        self.state.active_group = group;
        self.state.active_item = first;

        Ok(Transition {
            previous,
            current: first,
        })
    }

    /// Activate a view anywhere in the menu. The active group is unchanged.
    pub fn select_item(&mut self, item: ViewId) -> Result<Transition, NavigationError> {
        if self.menu.item(item).is_none() {
            return Err(NavigationError::UnknownItem(item.key().to_string()));
        }

        let previous = self.state.active_item;
        self.state.active_item = item;

        Ok(Transition {
            previous,
            current: item,
        })
    }

    /// Parse a group key and select it.
    pub fn select_group_key(&mut self, key: &str) -> Result<Transition, NavigationError> {
        let group = key.parse::<GroupId>()?;
        self.select_group(group)
    }

    /// Parse a view key and select it.
    pub fn select_item_key(&mut self, key: &str) -> Result<Transition, NavigationError> {
        let item = key.parse::<ViewId>()?;
        self.select_item(item)
    }

    /// Flip the sidebar between expanded and collapsed.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.state.sidebar_expanded = !self.state.sidebar_expanded;
        self.state.sidebar_expanded
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Menu::builtin())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{MenuGroup, MenuItem};

    fn sales_only_menu() -> Menu {
        Menu::new(vec![MenuGroup {
            id: GroupId::Sales,
            title: "Sales",
            icon: "x",
            items: vec![
                MenuItem {
                    id: ViewId::SalesKpis,
                    title: "KPIs",
                    icon: "x",
                },
                MenuItem {
                    id: ViewId::TopProducts,
                    title: "Top",
                    icon: "x",
                },
            ],
        }])
        .unwrap()
    }

    #[test]
    fn initial_state_is_first_group_first_item_expanded() {
        let nav = Navigator::default();
        let state = nav.state();
        assert_eq!(state.active_group(), GroupId::Sales);
        assert_eq!(state.active_item(), ViewId::SalesKpis);
        assert!(state.sidebar_expanded());
    }

    #[test]
    fn select_group_resets_to_first_item() {
        let mut nav = Navigator::default();
        let t = nav.select_group(GroupId::Churn).unwrap();
        assert_eq!(nav.state().active_group(), GroupId::Churn);
        assert_eq!(nav.state().active_item(), ViewId::ChurnPrediction);
        assert_eq!(t.previous, ViewId::SalesKpis);
        assert!(t.changed());
    }

    #[test]
    fn reselecting_active_group_still_resets_item() {
        let mut nav = Navigator::default();
        nav.select_item(ViewId::DemandForecast).unwrap();
        nav.select_group(GroupId::Sales).unwrap();
        assert_eq!(nav.state().active_item(), ViewId::SalesKpis);
    }

    #[test]
    fn select_item_across_groups_keeps_group() {
        let mut nav = Navigator::default();
        nav.select_item(ViewId::ChurnSegment).unwrap();
        assert_eq!(nav.state().active_item(), ViewId::ChurnSegment);
        assert_eq!(nav.state().active_group(), GroupId::Sales);
    }

    #[test]
    fn unknown_group_leaves_state_unchanged() {
        let mut nav = Navigator::new(sales_only_menu());
        nav.select_item(ViewId::TopProducts).unwrap();
        let before = nav.state();

        let err = nav.select_group(GroupId::Churn).unwrap_err();
        assert_eq!(err, NavigationError::UnknownGroup("churn".to_string()));
        assert_eq!(nav.state(), before);
    }

    #[test]
    fn unknown_item_leaves_state_unchanged() {
        let mut nav = Navigator::new(sales_only_menu());
        let before = nav.state();

        assert!(nav.select_item(ViewId::UserGeo).is_err());
        assert!(nav.select_item_key("not-a-view").is_err());
        assert_eq!(nav.state(), before);
    }

    #[test]
    fn key_variants_parse_then_select() {
        let mut nav = Navigator::default();
        nav.select_group_key("churn").unwrap();
        nav.select_item_key("user-geo").unwrap();
        assert_eq!(nav.state().active_group(), GroupId::Churn);
        assert_eq!(nav.state().active_item(), ViewId::UserGeo);
        assert_eq!(
            nav.select_group_key("billing").unwrap_err(),
            NavigationError::UnknownGroup("billing".to_string())
        );
    }

    #[test]
    fn toggle_sidebar_twice_restores_and_keeps_selection() {
        let mut nav = Navigator::default();
        nav.select_item(ViewId::TopProducts).unwrap();
        let before = nav.state();

        assert!(!nav.toggle_sidebar());
        assert_eq!(nav.state().active_item(), ViewId::TopProducts);
        assert_eq!(nav.state().active_group(), GroupId::Sales);
        assert!(nav.toggle_sidebar());
        assert_eq!(nav.state(), before);
    }

    #[test]
    fn with_defaults_applies_group_and_sidebar() {
        let nav = Navigator::with_defaults(Menu::builtin(), Some(GroupId::Churn), false);
        assert_eq!(nav.state().active_item(), ViewId::ChurnPrediction);
        assert!(!nav.state().sidebar_expanded());
    }

    #[test]
    fn with_defaults_ignores_missing_group() {
        let nav = Navigator::with_defaults(sales_only_menu(), Some(GroupId::Upload), false);
        assert_eq!(nav.state().active_group(), GroupId::Sales);
        assert_eq!(nav.state().active_item(), ViewId::SalesKpis);
        assert!(!nav.state().sidebar_expanded());
    }

    #[test]
    fn reselecting_same_item_is_not_a_change() {
        let mut nav = Navigator::default();
        let t = nav.select_item(ViewId::SalesKpis).unwrap();
        assert!(!t.changed());
    }
}
