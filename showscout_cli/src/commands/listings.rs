use anyhow::{bail, Result};
use clap::Args;
use showscout_lib::types::TimeWindow;
use showscout_lib::ShowClient;

use crate::commands::print_page_summary;
use crate::output::{print_shows, OutputFormat};

#[derive(Args)]
pub struct ListingArgs {
    /// Page number
    #[arg(long)]
    pub page: Option<i64>,
}

#[derive(Args)]
pub struct TrendingArgs {
    /// Time window: day or week
    #[arg(long, default_value = "week")]
    pub window: String,

    /// Page number
    #[arg(long)]
    pub page: Option<i64>,
}

#[derive(Clone, Copy, Debug)]
pub enum Listing {
    Popular,
    TopRated,
    OnTheAir,
}

pub async fn run_trending(
    args: &TrendingArgs,
    client: &ShowClient,
    format: &OutputFormat,
) -> Result<()> {
    let window = match args.window.parse::<TimeWindow>() {
        Ok(window) => window,
        Err(()) => bail!("invalid window '{}': expected day or week", args.window),
    };

    let resp = client.trending_shows(window, args.page).await?;
    print_page_summary(&resp);
    print_shows(&resp.results, format)
}

pub async fn run(
    listing: Listing,
    args: &ListingArgs,
    client: &ShowClient,
    format: &OutputFormat,
) -> Result<()> {
    let resp = match listing {
        Listing::Popular => client.popular_shows(args.page).await?,
        Listing::TopRated => client.top_rated_shows(args.page).await?,
        Listing::OnTheAir => client.on_the_air_shows(args.page).await?,
    };
    print_page_summary(&resp);
    print_shows(&resp.results, format)
}
