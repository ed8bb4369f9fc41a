use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use goalimpact_search::GoalImpactConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration (file + environment overrides)
    Show,
    /// Write a config file with default values
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

/// Only `show` loads the configuration; `path` and `init` never read the file.
pub fn run(
    args: ConfigArgs,
    load: impl FnOnce() -> Result<GoalImpactConfig>,
) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", GoalImpactConfig::config_path().display());
        }
        ConfigCommands::Show => {
            let config = load()?;
            let rendered =
                toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
            print!("{}", rendered);
        }
        ConfigCommands::Init(init) => {
            let path = GoalImpactConfig::config_path();
            if path.exists() && !init.force {
                anyhow::bail!(
                    "Config already exists at {}\n\nUse --force to overwrite",
                    path.display()
                );
            }
            let path = GoalImpactConfig::default()
                .save()
                .context("Failed to write config file")?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
