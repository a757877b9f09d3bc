use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use showscout_lib::types::{
    Credits, GenreList, NetworkDetails, RegionProviders, Show, ShowDetails,
};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct ShowRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "First Aired")]
    #[serde(rename = "First Aired")]
    first_aired: String,
    #[tabled(rename = "Rating")]
    #[serde(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Votes")]
    #[serde(rename = "Votes")]
    votes: i64,
}

#[derive(Tabled, Serialize)]
struct PersonRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    #[serde(rename = "Role")]
    role: String,
    #[tabled(rename = "Credit")]
    #[serde(rename = "Credit")]
    credit: String,
}

#[derive(Tabled, Serialize)]
struct ProviderRow {
    #[tabled(rename = "Provider")]
    #[serde(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Availability")]
    #[serde(rename = "Availability")]
    availability: String,
}

#[derive(Tabled, Serialize)]
struct GenreRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
}

#[derive(Tabled, Serialize)]
struct FieldRow {
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

impl FieldRow {
    fn new(field: &str, value: impl Into<String>) -> Self {
        FieldRow {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

// -- Row builders --

fn build_show_rows(shows: &[Show]) -> Vec<ShowRow> {
    shows
        .iter()
        .map(|s| ShowRow {
            id: s.id,
            name: s.name.clone(),
            first_aired: format_date(s.first_air_date),
            rating: format_rating(s.vote_average),
            votes: s.vote_count,
        })
        .collect()
}

fn build_person_rows(credits: &Credits) -> Vec<PersonRow> {
    let mut cast: Vec<_> = credits.cast.iter().collect();
    cast.sort_by_key(|c| c.order);

    let cast_rows = cast.into_iter().map(|c| PersonRow {
        name: c.name.clone(),
        role: c.character.clone(),
        credit: "cast".to_string(),
    });
    let crew_rows = credits.crew.iter().map(|c| PersonRow {
        name: c.name.clone(),
        role: c.job.clone(),
        credit: c.department.to_lowercase(),
    });
    cast_rows.chain(crew_rows).collect()
}

fn build_provider_rows(providers: &RegionProviders) -> Vec<ProviderRow> {
    let groups = [
        ("stream", &providers.flatrate),
        ("free", &providers.free),
        ("ads", &providers.ads),
        ("rent", &providers.rent),
        ("buy", &providers.buy),
    ];
    groups
        .into_iter()
        .flat_map(|(kind, list)| {
            let mut list: Vec<_> = list.iter().collect();
            list.sort_by_key(|p| p.display_priority);
            list.into_iter().map(move |p| ProviderRow {
                provider: p.provider_name.clone(),
                availability: kind.to_string(),
            })
        })
        .collect()
}

fn build_genre_rows(genres: &GenreList) -> Vec<GenreRow> {
    genres
        .genres
        .iter()
        .map(|g| GenreRow {
            id: g.id,
            name: g.name.clone(),
        })
        .collect()
}

fn build_detail_rows(show: &ShowDetails) -> Vec<FieldRow> {
    let mut rows = vec![
        FieldRow::new("ID", show.id.to_string()),
        FieldRow::new("Name", show.name.clone()),
    ];
    if let Some(ref tagline) = show.tagline {
        rows.push(FieldRow::new("Tagline", tagline.clone()));
    }
    if let Some(ref status) = show.status {
        rows.push(FieldRow::new("Status", status.clone()));
    }
    rows.push(FieldRow::new("First Aired", format_date(show.first_air_date)));
    rows.push(FieldRow::new("Last Aired", format_date(show.last_air_date)));
    rows.push(FieldRow::new(
        "Seasons",
        format!(
            "{} ({} episodes)",
            show.number_of_seasons, show.number_of_episodes
        ),
    ));
    if let Some(minutes) = show.episode_run_time.first() {
        rows.push(FieldRow::new("Runtime", format!("{} min", minutes)));
    }
    rows.push(FieldRow::new(
        "Genres",
        join_names(show.genres.iter().map(|g| g.name.as_str())),
    ));
    rows.push(FieldRow::new(
        "Networks",
        join_names(show.networks.iter().map(|n| n.name.as_str())),
    ));
    rows.push(FieldRow::new(
        "Created By",
        join_names(show.created_by.iter().map(|c| c.name.as_str())),
    ));
    rows.push(FieldRow::new(
        "Rating",
        format!(
            "{} ({} votes)",
            format_rating(show.vote_average),
            show.vote_count
        ),
    ));
    if let Some(ref homepage) = show.homepage {
        rows.push(FieldRow::new("Homepage", homepage.clone()));
    }
    rows.push(FieldRow::new("Overview", show.overview.clone()));
    rows
}

fn build_network_rows(network: &NetworkDetails) -> Vec<FieldRow> {
    let optional = [
        ("Headquarters", &network.headquarters),
        ("Country", &network.origin_country),
        ("Homepage", &network.homepage),
    ];
    let mut rows = vec![
        FieldRow::new("ID", network.id.to_string()),
        FieldRow::new("Name", network.name.clone()),
    ];
    rows.extend(optional.into_iter().filter_map(|(field, value)| {
        value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(|v| FieldRow::new(field, v))
    }));
    rows
}

// -- Rendering --

fn render<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_shows(shows: &[Show], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&shows);
            Ok(())
        }
        _ => render(build_show_rows(shows), format),
    }
}

pub fn print_show_details(show: &ShowDetails, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(show);
            Ok(())
        }
        _ => render(build_detail_rows(show), format),
    }
}

pub fn print_credits(credits: &Credits, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(credits);
            Ok(())
        }
        _ => render(build_person_rows(credits), format),
    }
}

pub fn print_providers(providers: &RegionProviders, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(providers);
            Ok(())
        }
        _ => render(build_provider_rows(providers), format),
    }
}

pub fn print_genres(genres: &GenreList, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&genres.genres);
            Ok(())
        }
        _ => render(build_genre_rows(genres), format),
    }
}

pub fn print_network(network: &NetworkDetails, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(network);
            Ok(())
        }
        _ => render(build_network_rows(network), format),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

fn format_rating(vote_average: f64) -> String {
    if vote_average <= 0.0 {
        "-".to_string()
    } else {
        format!("{:.1}", vote_average)
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}
