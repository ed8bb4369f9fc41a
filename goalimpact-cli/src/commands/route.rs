use anyhow::Result;
use clap::Args;
use goalimpact_search::{EntityType, GoalImpactConfig, Route};

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Entity kind (player, club, competition/league, nation)
    #[arg(value_enum)]
    pub kind: EntityType,

    /// Entity id
    pub id: i64,

    /// Print the absolute URL on the configured site
    #[arg(long)]
    pub url: bool,
}

pub fn run(args: RouteArgs, config: &GoalImpactConfig) -> Result<()> {
    let route = Route::new(args.kind, args.id);
    if args.url {
        println!("{}", route.url(&config.site.url()?)?);
    } else {
        println!("{}", route);
    }
    Ok(())
}
