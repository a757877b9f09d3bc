//! HTTP transport for the TMDB v3 API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{endpoint::Endpoint, options::RequestOptions, query::Query, Error};

/// Production base URL, including the API version segment.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Request timeout for API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the TMDB API.
///
/// Performs a single GET per call and classifies the outcome into
/// [`Error`] kinds. Holds no cache and never retries; that policy lives in
/// the layer above.
pub struct Client {
    http: reqwest::Client,
    /// Base URL without a trailing slash, e.g. [`DEFAULT_BASE_URL`].
    base_api_url: String,
}

impl Client {
    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    /// Builds the absolute URL for an endpoint, with the query's parameters appended.
    pub fn endpoint_url<Q: Query>(&self, endpoint: &Endpoint, query: Option<&Q>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, endpoint.path()).as_str())
            .map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::InvalidUrl(e.to_string())
            })?;
        let mut url = match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        };
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    /// Issues a GET and returns the decoded JSON body.
    pub async fn fetch_json(
        &self,
        url: &Url,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, Error> {
        let mut request = self.http.get(url.clone());
        for (name, value) in options.headers() {
            request = request.header(name, value);
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to get resource {}: {}", url.path(), e);
            Error::from(e)
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Rate limited on {}", url.path());
            return Err(Error::RateLimited);
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::from(e)
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Decode(e.to_string())
        })
    }

    /// Issues a GET and decodes the body into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        url: &Url,
        options: &RequestOptions,
    ) -> Result<T, Error> {
        let value = self.fetch_json(url, options).await?;
        serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
