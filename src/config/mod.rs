//! Configuration system for mydash.
//!
//! Layered configuration hierarchy:
//!
//! 1. **Built-in defaults**: [`schema::DashConfig::default()`]
//! 2. **User global config**: `~/.mydash/config.toml`
//! 3. **Project local config**: `.mydash.toml` in the current directory
//! 4. **Environment variables**: `MYDASH_*` overrides (highest precedence)
//!
//! File layers are merged key by key: a project file that only sets
//! `api.base_url` keeps every other value from the global file.

pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::DashConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
pub fn load() -> DashConfig {
    load_from(global_config_path().as_deref(), project_config_path().as_deref())
}

/// Load from explicit file locations, then apply environment overrides.
///
/// Missing or malformed files are skipped; the dashboard always starts.
pub fn load_from(global: Option<&Path>, project: Option<&Path>) -> DashConfig {
    let mut merged = toml::Table::new();
    for path in [global, project].into_iter().flatten() {
        if let Some(layer) = read_table(path) {
            merge_tables(&mut merged, layer);
        }
    }

    let mut config: DashConfig = toml::Value::Table(merged)
        .try_into()
        .unwrap_or_default();

    apply_env_overrides(&mut config);
    config
}

fn read_table(path: &Path) -> Option<toml::Table> {
    let content = fs::read_to_string(path).ok()?;
    content.parse::<toml::Table>().ok()
}

/// Recursively merge `overlay` into `base`; overlay wins on leaf keys.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_tbl)), toml::Value::Table(over_tbl)) => {
                merge_tables(base_tbl, over_tbl);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.mydash/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".mydash").join("config.toml"))
}

/// Path to the project local config: `.mydash.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".mydash.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Supported variables:
/// - `MYDASH_API_URL`: analytics backend base URL
/// - `MYDASH_API_TIMEOUT_MS`: request timeout
/// - `MYDASH_ADDR`: web dashboard listen address
/// - `MYDASH_LOGGING`: diagnostics log on/off (`1`/`true`/`yes`/`on`)
fn apply_env_overrides(config: &mut DashConfig) {
    if let Ok(val) = std::env::var("MYDASH_API_URL")
        && !val.is_empty()
    {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("MYDASH_API_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("MYDASH_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Ok(val) = std::env::var("MYDASH_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config file management
// ---------------------------------------------------------------------------

/// Write the commented default config to `~/.mydash/config.toml`.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    init_config_at(&path, force)?;
    Ok(path)
}

fn init_config_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, DashConfig::default_toml()).context("failed to write config file")?;
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Set a dotted key (e.g. `api.base_url`) in the global config file.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;
    set_config_value_at(&path, key, value)
}

fn set_config_value_at(path: &Path, key: &str, raw_value: &str) -> Result<()> {
    let mut table = match fs::read_to_string(path) {
        Ok(content) => content
            .parse::<toml::Table>()
            .context("failed to parse config as TOML")?,
        Err(_) => toml::Table::new(),
    };

    // The schema decides the value type, not the file.
    let defaults = toml::Value::try_from(DashConfig::default())
        .context("failed to serialize default config")?;
    let defaults = defaults
        .as_table()
        .context("default config is not a table")?;
    let new_value = typed_value(defaults, key, raw_value)?;
    insert_dotted(&mut table, key, new_value)?;

    // Reject anything the schema cannot load.
    toml::Value::Table(table.clone())
        .try_into::<DashConfig>()
        .with_context(|| format!("invalid value for '{key}'"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    let output = toml::to_string_pretty(&table).context("failed to serialize config")?;
    fs::write(path, output).context("failed to write config file")?;
    Ok(())
}

/// Parse `raw` according to the type of `key` in the default schema.
fn typed_value(defaults: &toml::Table, key: &str, raw: &str) -> Result<toml::Value> {
    let (section, leaf) = key
        .split_once('.')
        .with_context(|| format!("config key must be 'section.field', got '{key}'"))?;
    let section_tbl = defaults
        .get(section)
        .and_then(toml::Value::as_table)
        .with_context(|| format!("unknown config section '{section}'"))?;

    match section_tbl.get(leaf) {
        Some(toml::Value::Boolean(_)) => Ok(toml::Value::Boolean(is_truthy(raw))),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw}'"))?;
            Ok(toml::Value::Integer(n))
        }
        Some(_) => Ok(toml::Value::String(raw.to_string())),
        // Optional fields are absent from the serialized defaults.
        None if key == "navigation.default_group" => {
            raw.parse::<crate::menu::GroupId>()?;
            Ok(toml::Value::String(raw.to_string()))
        }
        None => anyhow::bail!("unknown config key '{key}'"),
    }
}

fn insert_dotted(table: &mut toml::Table, key: &str, value: toml::Value) -> Result<()> {
    let (section, leaf) = key
        .split_once('.')
        .with_context(|| format!("config key must be 'section.field', got '{key}'"))?;
    let entry = table
        .entry(section.to_string())
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let section_tbl = entry
        .as_table_mut()
        .with_context(|| format!("expected table at '{section}'"))?;
    section_tbl.insert(leaf.to_string(), value);
    Ok(())
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("On"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn merge_tables_is_key_level() {
        let mut base: toml::Table = "[api]\nbase_url = \"http://a\"\ntimeout_ms = 1\n"
            .parse()
            .unwrap();
        let overlay: toml::Table = "[api]\ntimeout_ms = 2\n".parse().unwrap();
        merge_tables(&mut base, overlay);
        assert_eq!(base["api"]["base_url"].as_str(), Some("http://a"));
        assert_eq!(base["api"]["timeout_ms"].as_integer(), Some(2));
    }

    #[test]
    fn project_layer_overrides_global_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        fs::write(&global, "[api]\ntimeout_ms = 1234\n[server]\naddr = \"0.0.0.0:1\"\n").unwrap();
        fs::write(&project, "[server]\nopen_browser = false\n").unwrap();

        let config = load_from(Some(&global), Some(&project));
        assert_eq!(config.api.timeout_ms, 1234);
        assert_eq!(config.server.addr, "0.0.0.0:1");
        assert!(!config.server.open_browser);
    }

    #[test]
    fn malformed_layer_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(&global, "this is = = not toml").unwrap();
        let config = load_from(Some(&global), None);
        assert_eq!(config.api, schema::ApiConfig::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        init_config_at(&path, false).unwrap();
        assert!(init_config_at(&path, false).is_err());
        init_config_at(&path, true).unwrap();
    }

    #[test]
    fn set_value_is_typed_by_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        set_config_value_at(&path, "api.timeout_ms", "250").unwrap();
        set_config_value_at(&path, "server.open_browser", "no").unwrap();
        set_config_value_at(&path, "navigation.default_group", "churn").unwrap();

        let config = load_from(Some(&path), None);
        assert_eq!(config.api.timeout_ms, 250);
        assert!(!config.server.open_browser);
        assert_eq!(config.navigation.default_group.as_deref(), Some("churn"));
    }

    #[test]
    fn set_value_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(set_config_value_at(&path, "api.timeout_ms", "soon").is_err());
        assert!(set_config_value_at(&path, "api.nope", "1").is_err());
        assert!(set_config_value_at(&path, "timeout_ms", "1").is_err());
        assert!(set_config_value_at(&path, "navigation.default_group", "billing").is_err());
        assert!(!path.exists());
    }
}
