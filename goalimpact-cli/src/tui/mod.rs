//! Goal Impact search TUI
//!
//! Hosts one search widget, or two independent player-scoped widgets side by
//! side with `--compare`. Keystrokes go to the focused widget; every mouse
//! press is offered to every widget so each can close on outside clicks.

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use goalimpact_search::{
    EntityType, GoalImpactConfig, HttpSearchClient, SearchBackend, WidgetOptions,
};

pub use app::App;

#[derive(Args, Debug)]
pub struct TuiArgs {
    /// Restrict the search box to one entity kind
    #[arg(long = "type", short = 't', value_enum, conflicts_with = "compare")]
    pub kind: Option<EntityType>,

    /// Two player search boxes side by side
    #[arg(long)]
    pub compare: bool,
}

/// Widget definitions for the requested mode
pub fn pane_options(args: &TuiArgs, config: &GoalImpactConfig) -> Vec<(String, WidgetOptions)> {
    if args.compare {
        (1..=2)
            .map(|n| {
                let options = WidgetOptions::from_config(format!("player-{n}"), &config.search)
                    .scope(Some(EntityType::Player));
                (format!("Player {n}"), options)
            })
            .collect()
    } else {
        let options = WidgetOptions::from_config("search", &config.search)
            .scope(args.kind.or(config.search.scope));
        vec![("Search".to_string(), options)]
    }
}

/// Run the TUI until the user quits
pub async fn run(args: TuiArgs, config: GoalImpactConfig) -> Result<()> {
    let backend: Arc<dyn SearchBackend> = Arc::new(HttpSearchClient::from_config(&config.api)?);
    let site = config.site.url()?;
    let panes = pane_options(&args, &config);

    // the draw loop blocks on terminal polling; widgets still spawn onto this runtime
    tokio::task::spawn_blocking(move || {
        let app = App::new(panes, backend, site);
        terminal::run(app)
    })
    .await
    .context("TUI task panicked")?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_mode_has_two_player_widgets() {
        let args = TuiArgs {
            kind: None,
            compare: true,
        };
        let panes = pane_options(&args, &GoalImpactConfig::default());
        assert_eq!(panes.len(), 2);
        assert_eq!(panes[0].0, "Player 1");
        assert!(panes.iter().all(|(_, o)| o.scope == Some(EntityType::Player)));
        assert_ne!(panes[0].1.label, panes[1].1.label);
    }

    #[test]
    fn test_single_mode_uses_requested_kind() {
        let args = TuiArgs {
            kind: Some(EntityType::Nation),
            compare: false,
        };
        let panes = pane_options(&args, &GoalImpactConfig::default());
        assert_eq!(panes.len(), 1);
        assert_eq!(panes[0].1.scope, Some(EntityType::Nation));
    }
}
