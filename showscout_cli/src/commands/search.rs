use anyhow::Result;
use clap::Args;
use showscout_lib::{Query, SearchQuery, ShowClient};

use crate::commands::print_page_summary;
use crate::output::{print_shows, OutputFormat};

#[derive(Args)]
pub struct SearchArgs {
    /// Show name to search for
    pub query: String,

    /// Only shows first aired in this year
    #[arg(long)]
    pub year: Option<i32>,

    /// Include adult titles
    #[arg(long)]
    pub include_adult: bool,

    /// Page number
    #[arg(long)]
    pub page: Option<i64>,
}

pub async fn run(args: &SearchArgs, client: &ShowClient, format: &OutputFormat) -> Result<()> {
    let mut query = SearchQuery::new(&args.query).with_include_adult(args.include_adult);
    if let Some(year) = args.year {
        query = query.with_first_air_date_year(year);
    }
    if let Some(page) = args.page {
        query = query.with_page(page);
    }

    let resp = client.search_shows(&query).await?;
    print_page_summary(&resp);
    print_shows(&resp.results, format)
}
