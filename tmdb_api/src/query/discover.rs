use std::str::FromStr;

use url::Url;

use crate::types::GenreID;

use super::common::{append_non_empty, Query, QueryCommon, SortDirection};

/// Filtered listing for `/discover/tv`.
///
/// Every filter is optional; unset or blank filters are left out of the
/// query string entirely.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiscoverQuery {
    pub common: QueryCommon,
    pub sort_by: Option<DiscoverSortBy>,
    pub sort_direction: SortDirection,
    pub with_genres: Option<String>,
    pub with_networks: Option<String>,
    pub first_air_date_year: Option<i32>,
    pub vote_average_gte: Option<f64>,
    pub vote_count_gte: Option<i64>,
    pub with_original_language: Option<String>,
    pub with_watch_providers: Option<String>,
    pub watch_region: Option<String>,
    /// Raw `key=value` filters the typed fields do not cover.
    pub extra: Vec<(String, String)>,
}

impl Query for DiscoverQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(sort_by) = self.sort_by {
            url.query_pairs_mut().append_pair(
                "sort_by",
                format!("{}.{}", sort_by, self.sort_direction).as_str(),
            );
        }
        append_non_empty(&mut url, "with_genres", self.with_genres.as_deref());
        append_non_empty(&mut url, "with_networks", self.with_networks.as_deref());
        if let Some(year) = self.first_air_date_year {
            url.query_pairs_mut()
                .append_pair("first_air_date_year", &year.to_string());
        }
        if let Some(vote_average) = self.vote_average_gte.filter(|v| v.is_finite()) {
            url.query_pairs_mut()
                .append_pair("vote_average.gte", &vote_average.to_string());
        }
        if let Some(vote_count) = self.vote_count_gte {
            url.query_pairs_mut()
                .append_pair("vote_count.gte", &vote_count.to_string());
        }
        append_non_empty(
            &mut url,
            "with_original_language",
            self.with_original_language.as_deref(),
        );
        append_non_empty(
            &mut url,
            "with_watch_providers",
            self.with_watch_providers.as_deref(),
        );
        append_non_empty(&mut url, "watch_region", self.watch_region.as_deref());
        for (key, value) in self.extra.iter() {
            append_non_empty(&mut url, key, Some(value));
        }
        url
    }
}

impl DiscoverQuery {
    pub fn with_sort_by(mut self, sort_by: DiscoverSortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self {
        self.sort_direction = sort_direction;
        self
    }

    /// Sets the raw genre filter (comma for AND, pipe for OR).
    pub fn with_genres(mut self, genres: &str) -> Self {
        self.with_genres = Some(genres.to_string());
        self
    }

    /// Requires all of the given genres.
    pub fn with_genre_ids(mut self, genre_ids: &[GenreID]) -> Self {
        self.with_genres = Some(
            genre_ids
                .iter()
                .map(|g| g.to_string())
                .collect::<Vec<_>>()
                .join(","),
        );
        self
    }

    pub fn with_networks(mut self, networks: &str) -> Self {
        self.with_networks = Some(networks.to_string());
        self
    }

    pub fn with_first_air_date_year(mut self, year: i32) -> Self {
        self.first_air_date_year = Some(year);
        self
    }

    pub fn with_min_vote_average(mut self, vote_average: f64) -> Self {
        self.vote_average_gte = Some(vote_average);
        self
    }

    pub fn with_min_vote_count(mut self, vote_count: i64) -> Self {
        self.vote_count_gte = Some(vote_count);
        self
    }

    pub fn with_original_language(mut self, language: &str) -> Self {
        self.with_original_language = Some(language.to_string());
        self
    }

    pub fn with_watch_providers(mut self, providers: &str, region: &str) -> Self {
        self.with_watch_providers = Some(providers.to_string());
        self.watch_region = Some(region.to_string());
        self
    }

    /// Adds an arbitrary filter. Blank values are dropped when the URL is built.
    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.extra.push((key.to_string(), value.to_string()));
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscoverSortBy {
    Popularity,
    VoteAverage,
    VoteCount,
    FirstAirDate,
    Name,
    OriginalName,
}

impl std::fmt::Display for DiscoverSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DiscoverSortBy::Popularity => "popularity",
                DiscoverSortBy::VoteAverage => "vote_average",
                DiscoverSortBy::VoteCount => "vote_count",
                DiscoverSortBy::FirstAirDate => "first_air_date",
                DiscoverSortBy::Name => "name",
                DiscoverSortBy::OriginalName => "original_name",
            }
        )?;
        Ok(())
    }
}

impl FromStr for DiscoverSortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(DiscoverSortBy::Popularity),
            "vote_average" | "rating" => Ok(DiscoverSortBy::VoteAverage),
            "vote_count" | "votes" => Ok(DiscoverSortBy::VoteCount),
            "first_air_date" | "date" => Ok(DiscoverSortBy::FirstAirDate),
            "name" => Ok(DiscoverSortBy::Name),
            "original_name" => Ok(DiscoverSortBy::OriginalName),
            _ => Err(()),
        }
    }
}
