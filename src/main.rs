use clap::{Parser, Subcommand};
use colored::Colorize;

use mydash::{cli, config, web};

#[derive(Debug, Parser)]
#[command(name = "mydash")]
#[command(about = "Sales and churn analytics dashboard")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the web dashboard
    Serve {
        /// Address to listen on (default from config: 127.0.0.1:9747)
        #[arg(long)]
        addr: Option<String>,
        /// Don't open a browser window
        #[arg(long)]
        no_browser: bool,
    },
    /// Show the sidebar menu and the default selection
    Menu {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Fetch one view from the analytics API and print its chart data
    Show {
        /// View id, e.g. churn-segment (see `mydash menu`)
        view: String,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Check system health: analytics API, config, event log
    Health,
    /// Show recent diagnostic events
    Events {
        /// Number of events to show
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective (merged) configuration
    Show,
    /// Write a default config file to ~/.mydash/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the global config file path
    Path,
    /// Set a dotted key, e.g. `api.base_url http://10.0.0.5:5000`
    Set { key: String, value: String },
    /// Rewrite the global config file with defaults
    Reset,
}

fn main() {
    let app = App::parse();

    if let Err(e) = run(app.command) {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve { addr, no_browser } => {
            let cfg = config::load();
            let addr = addr.unwrap_or_else(|| cfg.server.addr.clone());
            web::serve(&cfg, &addr, cfg.server.open_browser && !no_browser)
        }
        Commands::Menu { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_menu(fmt)
        }
        Commands::Show { view, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_show(&view, fmt)
        }
        Commands::Health => cli::run_health(),
        Commands::Events { limit, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_events(limit, fmt)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Path => cli::run_config_path(),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
