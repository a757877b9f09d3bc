use url::Url;

use super::common::{append_non_empty, Query, QueryCommon};

/// Free-text show search for `/search/tv`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchQuery {
    pub common: QueryCommon,
    pub query: String,
    pub first_air_date_year: Option<i32>,
    pub include_adult: bool,
}

impl Query for SearchQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        append_non_empty(&mut url, "query", Some(&self.query));
        let mut url = self.common.add_to_url(&url);
        if let Some(year) = self.first_air_date_year {
            url.query_pairs_mut()
                .append_pair("first_air_date_year", &year.to_string());
        }
        if self.include_adult {
            url.query_pairs_mut().append_pair("include_adult", "true");
        }
        url
    }
}

impl SearchQuery {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.trim().to_string(),
            ..Default::default()
        }
    }

    pub fn with_first_air_date_year(mut self, year: i32) -> Self {
        self.first_air_date_year = Some(year);
        self
    }

    pub fn with_include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }

    /// True when there is no search text to send.
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}
