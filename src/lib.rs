//! mydash: a sidebar-driven analytics dashboard over a metrics backend.
//!
//! [`navigation`] owns which group and view are active, [`views`] turns raw
//! backend JSON into chart-ready data, and [`shell`] ties the two together
//! with staleness-checked fetches. [`web`] and [`cli`] are the frontends.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod menu;
pub mod navigation;
pub mod shell;
pub mod utils;
pub mod views;
pub mod web;
