//! goalimpact CLI - search Goal Impact players, clubs, competitions and nations
//!
//! This is the main entry point for the goalimpact command-line tool, which provides:
//! - One-shot search against the analytics API (`search` subcommand)
//! - Detail route lookup for an entity (`route` subcommand)
//! - Interactive incremental search in the terminal (`tui` subcommand)
//! - Configuration management (`config` subcommand)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use goalimpact_search::GoalImpactConfig;

mod commands;
mod tracing_setup;
mod tui;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "goalimpact",
    author,
    version,
    about = "Search Goal Impact soccer analytics from the terminal",
    long_about = "Incremental, debounced search over Goal Impact players, clubs, competitions \
                  and nations, with navigation to each entity's detail page."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Override the analytics API base URL
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single search and print grouped results
    Search(commands::search::SearchArgs),
    /// Print the detail route (or URL) for an entity
    Route(commands::route::RouteArgs),
    /// Interactive incremental search (two boxes with --compare)
    Tui(tui::TuiArgs),
    /// Manage goalimpact configuration (path, show, init)
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = matches!(cli.command, Commands::Tui(_)).then(TracingConfig::default_log_file);
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        log_file,
    })?;

    let api_url = cli.api_url;
    match cli.command {
        // path/init must keep working when the file itself is broken
        Commands::Config(args) => commands::config::run(args, || load_config(api_url)),
        Commands::Search(args) => commands::search::run(args, &load_config(api_url)?).await,
        Commands::Route(args) => commands::route::run(args, &load_config(api_url)?),
        Commands::Tui(args) => tui::run(args, load_config(api_url)?).await,
    }
}

/// Effective configuration: file, `.env`, environment, then `--api-url`
fn load_config(api_url: Option<String>) -> Result<GoalImpactConfig> {
    let mut config = GoalImpactConfig::load().context("Failed to load configuration")?;
    if let Some(url) = api_url {
        config.api.base_url = url;
        config.validate().context("Invalid --api-url")?;
    }
    Ok(config)
}
