//! One-shot search through the same client the widgets use

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use goalimpact_search::{EntityType, GoalImpactConfig, HttpSearchClient, ResultSet, SearchBackend};
use serde::Serialize;
use tracing::instrument;
use url::Url;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Restrict results to one entity kind (defaults to search.scope from config)
    #[arg(long = "type", short = 't', value_enum)]
    pub kind: Option<EntityType>,

    /// Output format (text, json)
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Results grouped by kind with their URLs
    #[default]
    Text,
    /// JSON for machine consumption
    Json,
}

#[derive(Debug, Serialize)]
struct JsonResult<'a> {
    id: i64,
    name: &'a str,
    #[serde(rename = "type")]
    kind: EntityType,
    route: String,
    url: String,
}

#[instrument(skip_all, fields(kind = ?args.kind))]
pub async fn run(args: SearchArgs, config: &GoalImpactConfig) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        bail!("No query provided. Blank queries are never sent to the search endpoint.");
    }

    let client = HttpSearchClient::from_config(&config.api)?;
    let scope = args.kind.or(config.search.scope);
    let results = client
        .search(query, scope)
        .await
        .context("Search request failed")?;
    let results = ResultSet::new(results);
    let site = config.site.url()?;

    let output = match args.format {
        OutputFormat::Text => format_text(query, &results, &site)?,
        OutputFormat::Json => format_json(&results, &site)?,
    };
    println!("{}", output);
    Ok(())
}

/// Results grouped under kind headings, one `name  url` line each
pub fn format_text(query: &str, results: &ResultSet, site: &Url) -> Result<String> {
    if results.is_empty() {
        return Ok(format!("No results found for \"{}\"", query));
    }

    let mut output = String::new();
    for (kind, group) in results.groups() {
        output.push_str(&format!("## {} ({})\n", kind.group_label(), group.len()));
        for result in group {
            let url = result.route().url(site)?;
            output.push_str(&format!("  {:<32} {}\n", result.name, url));
        }
        output.push('\n');
    }
    Ok(output.trim_end().to_string())
}

pub fn format_json(results: &ResultSet, site: &Url) -> Result<String> {
    let mut rows = Vec::with_capacity(results.len());
    for result in results {
        let route = result.route();
        rows.push(JsonResult {
            id: result.id,
            name: &result.name,
            kind: result.kind,
            route: route.path(),
            url: route.url(site)?.to_string(),
        });
    }
    serde_json::to_string_pretty(&rows).context("Failed to serialize results to JSON")
}
