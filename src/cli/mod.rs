//! CLI command implementations for mydash.
//!
//! Provides subcommand handlers for:
//! - `mydash menu`: sidebar tree with the default selection marked
//! - `mydash show <view>`: fetch one view, adapt it and print the chart data
//! - `mydash health`: check the analytics API, config and event log
//! - `mydash events`: tail the diagnostic event log
//! - `mydash config show|init|path|set|reset`: configuration management

use anyhow::{Result, bail};
use colored::Colorize;

use crate::config::{self, DashConfig};
use crate::diagnostics::{DiagnosticEvent, EventLog};
use crate::menu::Menu;
use crate::navigation::Navigator;
use crate::shell::Shell;
use crate::utils::format::truncate;
use crate::views::{AdaptedView, AdapterState, HttpSource};

/// Output format for printing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

fn navigator_for(cfg: &DashConfig) -> Navigator {
    Navigator::with_defaults(
        Menu::builtin(),
        cfg.navigation.default_group_id(),
        cfg.navigation.sidebar_expanded,
    )
}

// ---------------------------------------------------------------------------
// mydash menu
// ---------------------------------------------------------------------------

/// Print the sidebar tree. `*` marks the selection the dashboard opens with.
pub fn run_menu(format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let nav = navigator_for(&cfg);

    match format {
        OutputFormat::Json | OutputFormat::Csv => {
            let value = serde_json::json!({
                "default": nav.state(),
                "groups": nav.menu(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => print_menu_table(&nav),
    }

    Ok(())
}

fn print_menu_table(nav: &Navigator) {
    let state = nav.state();

    println!("{}", "mydash Menu".bold().cyan());
    println!("{}", "=".repeat(50));

    for group in nav.menu().groups() {
        let marker = if group.id == state.active_group() { "*" } else { " " };
        println!(
            "{} {:<22} {}",
            marker.green().bold(),
            group.title.bold(),
            group.id.key().dimmed()
        );
        for item in &group.items {
            let marker = if item.id == state.active_item() { "*" } else { " " };
            println!(
                "    {} {:<24} {}",
                marker.green().bold(),
                item.title,
                item.id.key().dimmed()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// mydash show
// ---------------------------------------------------------------------------

/// Fetch and adapt a single view, the same way the dashboard mounts it.
pub fn run_show(view_key: &str, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let source = HttpSource::from_config(&cfg.api);
    let mut shell = Shell::new(navigator_for(&cfg), EventLog::from_config(&cfg.logging));

    let Some(ticket) = shell.select_item_key(view_key)? else {
        println!(
            "{}",
            format!("`{view_key}` has no chart; open it in the web dashboard.").yellow()
        );
        return Ok(());
    };

    shell.run_ticket(&ticket, &source);

    match shell.adapter_state() {
        Some(AdapterState::Ready(view)) => {
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
                OutputFormat::Csv => print_view_csv(view),
                OutputFormat::Table => print_view_table(view, source.url_for(ticket.endpoint)),
            }
            Ok(())
        }
        Some(AdapterState::Failed(e)) => {
            bail!("{view_key} is unavailable ({} error): {e}", e.kind())
        }
        _ => bail!("{view_key} did not settle"),
    }
}

fn print_view_table(view: &AdaptedView, url: String) {
    let chart = &view.chart;

    println!(
        "{} {}",
        view.title.bold().cyan(),
        format!("({} chart)", chart.kind()).dimmed()
    );
    println!("{}", "=".repeat(50));
    println!("  {} {}", "Source:".bold(), url.dimmed());
    println!();

    if chart.is_empty() {
        println!("  {}", "No data points.".yellow());
        return;
    }

    println!("  {:<28} {:>14} Color", "Label", "Value");
    println!("  {}", "-".repeat(52));
    for (i, entry) in chart.legend().iter().enumerate() {
        let line = format!(
            "  {:<28} {:>14} {}",
            truncate(&entry.label, 28),
            entry.formatted_value,
            entry.color.name,
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }

    if let Some(legend) = &view.legend {
        println!();
        println!("{}", "Detailed Counts".bold().cyan());
        for entry in legend {
            println!("  {} {}: {}", "●".bold(), entry.label, entry.formatted_value.bold());
        }
    }
}

fn print_view_csv(view: &AdaptedView) {
    println!("label,value,color");
    for ((label, value), color) in view
        .chart
        .labels()
        .iter()
        .zip(view.chart.series())
        .zip(view.chart.colors())
    {
        println!("{},{},{}", csv_field(label), value, color.name);
    }
}

/// Quote a CSV field when it contains a separator or quote.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// mydash health
// ---------------------------------------------------------------------------

/// Check the analytics API, config files and event log.
pub fn run_health() -> Result<()> {
    println!("{}", "mydash Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();

    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.mydash/config.toml found"
        } else {
            "not found (run `mydash config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".mydash.toml found"
        } else {
            "none (optional)"
        },
    );

    let source = HttpSource::from_config(&cfg.api);
    let reachable = source.is_reachable();
    print_health_item(
        "Analytics API",
        reachable,
        &if reachable {
            format!("reachable at {}", source.base_url())
        } else {
            format!("not reachable at {}; is the backend running?", source.base_url())
        },
    );

    let default_ok = cfg.navigation.default_group.is_none() || cfg.navigation.default_group_id().is_some();
    print_health_item(
        "Default group",
        default_ok,
        &match (&cfg.navigation.default_group, default_ok) {
            (None, _) => "first menu group".to_string(),
            (Some(key), true) => key.clone(),
            (Some(key), false) => format!("`{key}` is not a menu group; using the first"),
        },
    );

    let log = EventLog::from_config(&cfg.logging);
    match log.path() {
        Some(path) if path.exists() => print_health_item(
            "Event log",
            true,
            &format!("{} events", log.read_all().len()),
        ),
        Some(_) => print_health_item("Event log", true, "no log file yet"),
        None => print_health_item("Event log", false, "disabled ([logging] enabled = false)"),
    }

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<18} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// mydash events
// ---------------------------------------------------------------------------

/// Print the most recent diagnostic events, oldest first.
pub fn run_events(limit: usize, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let events = EventLog::from_config(&cfg.logging).read_all();

    if events.is_empty() {
        println!("{}", "No events recorded yet.".yellow());
        return Ok(());
    }

    let recent = &events[events.len().saturating_sub(limit)..];
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(recent)?),
        OutputFormat::Csv => {
            println!("timestamp,event,view,token,detail");
            for e in recent {
                println!(
                    "{},{},{},{},{}",
                    e.timestamp,
                    e.event,
                    e.view.as_deref().unwrap_or(""),
                    e.token.map(|t| t.to_string()).unwrap_or_default(),
                    csv_field(e.detail.as_deref().unwrap_or("")),
                );
            }
        }
        OutputFormat::Table => {
            for e in recent {
                print_event_line(e);
            }
        }
    }

    Ok(())
}

fn print_event_line(e: &DiagnosticEvent) {
    let name = match e.event.as_str() {
        "view_ready" => e.event.green(),
        "view_failed" | "navigation_rejected" => e.event.red(),
        "stale_discarded" => e.event.yellow(),
        _ => e.event.normal(),
    };
    let token = e.token.map(|t| format!("#{t}")).unwrap_or_default();
    println!(
        "  {} {:<20} {:<18} {:>5} {}",
        truncate(&e.timestamp, 19).dimmed(),
        name,
        e.view.as_deref().unwrap_or("-"),
        token,
        e.detail.as_deref().unwrap_or("").dimmed(),
    );
}

// ---------------------------------------------------------------------------
// mydash config show | init | path | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective mydash Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.mydash/config.toml", global_exists);
    print_source(".mydash.toml", project_exists);
    println!("  {} {}", "·".dimmed(), "MYDASH_* environment variables".dimmed());

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Print the global config file location.
pub fn run_config_path() -> Result<()> {
    match config::global_config_file() {
        Some(path) => println!("{}", path.display()),
        None => bail!("could not determine the home directory"),
    }
    Ok(())
}

/// Initialize a default config file at `~/.mydash/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} Config written to {}", "✓".green().bold(), path.display());
    println!("  {}", "Edit the file to point mydash at your analytics API.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
