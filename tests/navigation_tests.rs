/// Navigation state machine tests.
///
/// Exercises the public `Navigator` API against the built-in menu: group and
/// item selection, rejected ids and sidebar toggling.
use mydash::menu::{GroupId, Menu, ViewId};
use mydash::navigation::{NavigationError, Navigator};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn starts_on_first_group_and_item() {
    let nav = Navigator::new(Menu::builtin());
    assert_eq!(nav.state().active_group(), GroupId::Sales);
    assert_eq!(nav.state().active_item(), ViewId::SalesKpis);
    assert!(nav.state().sidebar_expanded());
}

#[test]
fn configured_default_group_opens_its_first_item() {
    let nav = Navigator::with_defaults(Menu::builtin(), Some(GroupId::Churn), false);
    assert_eq!(nav.state().active_group(), GroupId::Churn);
    assert_eq!(nav.state().active_item(), ViewId::ChurnPrediction);
    assert!(!nav.state().sidebar_expanded());
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[test]
fn select_group_always_lands_on_first_item() {
    let mut nav = Navigator::default();
    for group in GroupId::ALL {
        nav.select_item(ViewId::UserGeo).unwrap();
        nav.select_group(group).unwrap();

        let first = nav.menu().group(group).unwrap().first_item().id;
        assert_eq!(nav.state().active_group(), group);
        assert_eq!(nav.state().active_item(), first);
    }
}

#[test]
fn select_item_keeps_group() {
    let mut nav = Navigator::default();
    nav.select_group(GroupId::Sales).unwrap();

    let transition = nav.select_item(ViewId::ChurnTrend).unwrap();
    assert_eq!(transition.previous, ViewId::SalesKpis);
    assert_eq!(transition.current, ViewId::ChurnTrend);
    assert!(transition.changed());
    assert_eq!(nav.state().active_group(), GroupId::Sales);
}

#[test]
fn sales_then_churn_matches_sidebar_clicks() {
    let mut nav = Navigator::default();
    nav.select_group(GroupId::Churn).unwrap();
    assert_eq!(nav.state().active_item(), ViewId::ChurnPrediction);

    nav.select_item(ViewId::ChurnSegment).unwrap();
    nav.select_group(GroupId::Sales).unwrap();
    assert_eq!(nav.state().active_item(), ViewId::SalesKpis);
}

#[test]
fn unknown_keys_are_rejected_without_change() {
    let mut nav = Navigator::default();
    nav.select_item(ViewId::TopProducts).unwrap();
    let before = nav.state();

    assert_eq!(
        nav.select_group_key("billing"),
        Err(NavigationError::UnknownGroup("billing".to_string()))
    );
    assert_eq!(
        nav.select_item_key("revenue-map"),
        Err(NavigationError::UnknownItem("revenue-map".to_string()))
    );
    assert_eq!(nav.state(), before);
}

#[test]
fn keys_resolve_to_ids() {
    let mut nav = Navigator::default();
    nav.select_item_key("demand-forecast").unwrap();
    assert_eq!(nav.state().active_item(), ViewId::DemandForecast);
    nav.select_group_key("upload").unwrap();
    assert_eq!(nav.state().active_item(), ViewId::FileUpload);
}

// ---------------------------------------------------------------------------
// Sidebar
// ---------------------------------------------------------------------------

#[test]
fn toggle_twice_restores_and_keeps_selection() {
    let mut nav = Navigator::default();
    nav.select_item(ViewId::ChurnSegment).unwrap();
    let before = nav.state();

    assert!(!nav.toggle_sidebar());
    assert_eq!(nav.state().active_item(), ViewId::ChurnSegment);
    assert!(nav.toggle_sidebar());
    assert_eq!(nav.state(), before);
}
