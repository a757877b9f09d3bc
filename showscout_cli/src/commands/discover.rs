use anyhow::{anyhow, bail, Result};
use clap::Args;
use showscout_lib::types::{GenreID, GenreList};
use showscout_lib::{DiscoverQuery, DiscoverSortBy, Query, ShowClient, SortDirection};

use crate::commands::print_page_summary;
use crate::output::{print_shows, OutputFormat};

#[derive(Args)]
pub struct DiscoverArgs {
    /// Genre names or IDs, comma-separated (e.g. "drama,crime" or "18,80")
    #[arg(long)]
    pub genre: Option<String>,

    /// Network IDs, comma-separated (e.g. 213 for Netflix)
    #[arg(long)]
    pub network: Option<String>,

    /// First air date year
    #[arg(long)]
    pub year: Option<i32>,

    /// Minimum average rating (0-10)
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Minimum number of votes
    #[arg(long)]
    pub min_votes: Option<i64>,

    /// Original language as ISO 639-1 (e.g. en, ko, ja)
    #[arg(long)]
    pub original_language: Option<String>,

    /// Watch provider IDs, comma-separated; requires --region
    #[arg(long, requires = "region")]
    pub provider: Option<String>,

    /// Watch region for --provider (e.g. US)
    #[arg(long)]
    pub region: Option<String>,

    /// Additional raw filter as key=value (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Sort field: popularity, rating, votes, date, name
    #[arg(long, default_value = "popularity")]
    pub sort_by: String,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    /// Page number
    #[arg(long)]
    pub page: Option<i64>,
}

pub async fn run(args: &DiscoverArgs, client: &ShowClient, format: &OutputFormat) -> Result<()> {
    let sort_by = args
        .sort_by
        .parse::<DiscoverSortBy>()
        .map_err(|()| anyhow!("invalid sort field '{}'", args.sort_by))?;

    let mut query = DiscoverQuery::default().with_sort_by(sort_by);

    if args.asc {
        query = query.with_sort_direction(SortDirection::Asc);
    }
    if let Some(page) = args.page {
        query = query.with_page(page);
    }

    if let Some(ref genre) = args.genre {
        let inputs = split_list(genre);
        // Names need the genre taxonomy, which is cached for a day.
        let genres = if inputs.iter().any(|s| s.parse::<GenreID>().is_err()) {
            client.genres().await?
        } else {
            GenreList { genres: Vec::new() }
        };
        query = query.with_genre_ids(&resolve_genre_ids(&inputs, &genres)?);
    }

    if let Some(ref network) = args.network {
        query = query.with_networks(&split_list(network).join(","));
    }
    if let Some(year) = args.year {
        query = query.with_first_air_date_year(year);
    }
    if let Some(rating) = args.min_rating {
        if !(0.0..=10.0).contains(&rating) {
            bail!("--min-rating must be between 0 and 10");
        }
        query = query.with_min_vote_average(rating);
    }
    if let Some(votes) = args.min_votes {
        query = query.with_min_vote_count(votes);
    }
    if let Some(ref language) = args.original_language {
        query = query.with_original_language(language);
    }
    if let (Some(provider), Some(region)) = (&args.provider, &args.region) {
        query = query.with_watch_providers(&split_list(provider).join("|"), region);
    }
    for filter in &args.filters {
        let (key, value) = parse_filter(filter)?;
        query = query.with_filter(key, value);
    }

    let resp = client.discover_shows(&query).await?;
    print_page_summary(&resp);
    print_shows(&resp.results, format)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Maps each entry to a genre ID, accepting numeric IDs as-is and names
/// case-insensitively against `genres`.
fn resolve_genre_ids(inputs: &[String], genres: &GenreList) -> Result<Vec<GenreID>> {
    inputs
        .iter()
        .map(|input| {
            if let Ok(id) = input.parse::<GenreID>() {
                return Ok(id);
            }
            genres
                .find_by_name(input)
                .map(|g| g.id)
                .ok_or_else(|| anyhow!("unknown genre '{}'", input))
        })
        .collect()
}

fn parse_filter(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => bail!("invalid filter '{}': expected key=value", raw),
    }
}
