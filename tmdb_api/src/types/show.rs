//! TV show types returned by the listing, search, and details endpoints.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Numeric identifier of a TV show.
pub type ShowID = u64;

/// Numeric identifier of a genre.
pub type GenreID = u32;

/// Numeric identifier of a broadcast or streaming network.
pub type NetworkID = u64;

/// Summary representation of a show, as returned by list and search endpoints.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Show {
    pub id: ShowID,

    pub name: String,

    #[serde(default)]
    pub original_name: Option<String>,

    #[serde(default)]
    pub overview: String,

    pub poster_path: Option<String>,

    pub backdrop_path: Option<String>,

    /// Date of the first episode. The API sends an empty string when unknown.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub first_air_date: Option<NaiveDate>,

    #[serde(default)]
    pub genre_ids: Vec<GenreID>,

    #[serde(default)]
    pub origin_country: Vec<String>,

    #[serde(default)]
    pub original_language: Option<String>,

    #[serde(default)]
    pub popularity: f64,

    #[serde(default)]
    pub vote_average: f64,

    #[serde(default)]
    pub vote_count: i64,
}

/// Full show record returned by `/tv/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ShowDetails {
    pub id: ShowID,

    pub name: String,

    #[serde(default)]
    pub original_name: Option<String>,

    #[serde(default)]
    pub overview: String,

    #[serde(default)]
    pub tagline: Option<String>,

    /// Production status, e.g. "Returning Series" or "Ended".
    #[serde(default)]
    pub status: Option<String>,

    pub poster_path: Option<String>,

    pub backdrop_path: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub first_air_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub last_air_date: Option<NaiveDate>,

    #[serde(default)]
    pub in_production: bool,

    #[serde(default)]
    pub number_of_seasons: i64,

    #[serde(default)]
    pub number_of_episodes: i64,

    #[serde(default)]
    pub episode_run_time: Vec<i64>,

    #[serde(default)]
    pub genres: Vec<Genre>,

    #[serde(default)]
    pub networks: Vec<Network>,

    #[serde(default)]
    pub created_by: Vec<Creator>,

    #[serde(default)]
    pub seasons: Vec<Season>,

    #[serde(default)]
    pub homepage: Option<String>,

    #[serde(default)]
    pub popularity: f64,

    #[serde(default)]
    pub vote_average: f64,

    #[serde(default)]
    pub vote_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Genre {
    pub id: GenreID,
    pub name: String,
}

/// Response of `/genre/tv/list`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

impl GenreList {
    /// Looks up a genre by case-insensitive name.
    pub fn find_by_name(&self, name: &str) -> Option<&Genre> {
        self.genres
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Network summary embedded in show details.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Network {
    pub id: NetworkID,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
}

/// Response of `/network/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NetworkDetails {
    pub id: NetworkID,
    pub name: String,
    #[serde(default)]
    pub headquarters: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Creator {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Season {
    pub id: u64,
    pub name: String,
    pub season_number: i64,
    #[serde(default)]
    pub episode_count: i64,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub air_date: Option<NaiveDate>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Window used by the trending endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TimeWindow::Day => "day",
                TimeWindow::Week => "week",
            }
        )
    }
}

impl FromStr for TimeWindow {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            _ => Err(()),
        }
    }
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_air_date_is_none() {
        let show: Show = serde_json::from_str(
            r#"{"id": 1, "name": "Pilot", "poster_path": null, "backdrop_path": null, "first_air_date": ""}"#,
        )
        .unwrap();
        assert!(show.first_air_date.is_none());
    }

    #[test]
    fn air_date_parses() {
        let show: Show = serde_json::from_str(
            r#"{"id": 1, "name": "Pilot", "poster_path": null, "backdrop_path": null, "first_air_date": "2008-01-20"}"#,
        )
        .unwrap();
        assert_eq!(
            show.first_air_date,
            NaiveDate::from_ymd_opt(2008, 1, 20)
        );
    }

    #[test]
    fn time_window_round_trips_through_str() {
        assert_eq!("day".parse::<TimeWindow>(), Ok(TimeWindow::Day));
        assert_eq!(TimeWindow::Week.to_string(), "week");
        assert!("month".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn genre_lookup_ignores_case() {
        let list = GenreList {
            genres: vec![
                Genre { id: 18, name: "Drama".into() },
                Genre { id: 35, name: "Comedy".into() },
            ],
        };
        assert_eq!(list.find_by_name(" comedy").map(|g| g.id), Some(35));
        assert!(list.find_by_name("Western").is_none());
    }
}
