//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`SortDirection`].

use std::str::FromStr;

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination and response language.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = Some(page);
        self
    }

    /// Sets the response language (e.g. `en-US`). Empty values are ignored.
    fn with_language(mut self, language: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().language = Some(language.to_string());
        self
    }
}

/// Sort order for API results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (oldest/smallest first).
    Asc,
    /// Descending order (newest/largest first). This is the default.
    #[default]
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            }
        )
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Fields shared by all query types.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryCommon {
    /// Page number (1-indexed). `None` uses the API default of 1.
    pub page: Option<i64>,
    /// Response language. `None` or empty uses the API default.
    pub language: Option<String>,
}

impl QueryCommon {
    /// Appends the common pagination and language parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(page) = self.page {
            url.query_pairs_mut().append_pair("page", &page.to_string());
        }
        append_non_empty(&mut url, "language", self.language.as_deref());
        url
    }
}

/// Appends `key=value` only when the value is present and not blank.
///
/// Absent filters must not reach the query string: `Some("")` and `None`
/// produce the same URL, which keeps cache keys identical.
pub(crate) fn append_non_empty(url: &mut Url, key: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        url.query_pairs_mut().append_pair(key, value);
    }
}

/// Query for plain paginated listings (popular, trending, similar, ...).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListQuery {
    pub common: QueryCommon,
}

impl Query for ListQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}
