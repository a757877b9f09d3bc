use anyhow::Result;
use clap::Args;
use showscout_lib::types::ShowID;
use showscout_lib::ShowClient;

use crate::commands::print_page_summary;
use crate::output::{print_credits, print_providers, print_show_details, print_shows, OutputFormat};

#[derive(Args)]
pub struct ShowArgs {
    /// Show ID
    pub id: ShowID,
}

#[derive(Args)]
pub struct RelatedArgs {
    /// Show ID
    pub id: ShowID,

    /// Page number
    #[arg(long)]
    pub page: Option<i64>,
}

#[derive(Args)]
pub struct ProvidersArgs {
    /// Show ID
    pub id: ShowID,

    /// Two-letter region code (e.g. US, DE, GB)
    #[arg(long, default_value = "US")]
    pub region: String,
}

pub async fn run_details(args: &ShowArgs, client: &ShowClient, format: &OutputFormat) -> Result<()> {
    let show = client.show_details(args.id).await?;
    print_show_details(&show, format)
}

pub async fn run_credits(args: &ShowArgs, client: &ShowClient, format: &OutputFormat) -> Result<()> {
    let credits = client.show_credits(args.id).await?;
    print_credits(&credits, format)
}

pub async fn run_similar(
    args: &RelatedArgs,
    client: &ShowClient,
    format: &OutputFormat,
) -> Result<()> {
    let resp = client.similar_shows(args.id, args.page).await?;
    print_page_summary(&resp);
    print_shows(&resp.results, format)
}

pub async fn run_recommendations(
    args: &RelatedArgs,
    client: &ShowClient,
    format: &OutputFormat,
) -> Result<()> {
    let resp = client.show_recommendations(args.id, args.page).await?;
    print_page_summary(&resp);
    print_shows(&resp.results, format)
}

pub async fn run_providers(
    args: &ProvidersArgs,
    client: &ShowClient,
    format: &OutputFormat,
) -> Result<()> {
    let providers = client.watch_providers(args.id).await?;
    match providers.region(&args.region) {
        Some(region) => print_providers(region, format),
        None => {
            let available: Vec<_> = providers.results.keys().map(String::as_str).collect();
            eprintln!(
                "No providers listed for region {} (available: {})",
                args.region.to_uppercase(),
                if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                }
            );
            Ok(())
        }
    }
}
