//! Typed per-resource operations on top of the fetch gateway.

use std::time::Duration;

use regex::Regex;
use serde::de::DeserializeOwned;
use tmdb_api::types::{
    Credits, GenreList, NetworkDetails, NetworkID, PaginatedResponse, Show, ShowDetails, ShowID,
    TimeWindow, WatchProviders,
};
use tmdb_api::{Client, DiscoverQuery, Endpoint, ListQuery, Query, RequestOptions, SearchQuery};

use crate::cache::{CacheStats, ResponseCache};
use crate::config::{require_token, Config};
use crate::error::ShowError;
use crate::gateway::{FetchGateway, TrackerSummary};
use crate::policy::{RequestPolicy, Resource};

/// API client for TV show discovery.
///
/// Each operation checks that a token is configured before touching the
/// cache or the network, builds the endpoint URL, and fetches through the
/// gateway with the TTL for that resource.
pub struct ShowClient {
    gateway: FetchGateway,
    api_token: Option<String>,
    language: Option<String>,
}

impl ShowClient {
    /// Builds the transport, cache, and gateway described by `config`.
    pub fn new(config: &Config) -> Result<Self, ShowError> {
        let transport = Client::with_base_url(&config.base_url)?;
        let cache = ResponseCache::new(config.cache_max_size, config.cache_ttl);
        Ok(Self {
            gateway: FetchGateway::new(transport, cache),
            api_token: config.api_token.clone(),
            language: config.language.clone(),
        })
    }

    /// Wraps an existing gateway. Used for testing with a custom backoff.
    pub fn with_gateway(gateway: FetchGateway, api_token: Option<String>) -> Self {
        Self {
            gateway,
            api_token,
            language: None,
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn gateway(&self) -> &FetchGateway {
        &self.gateway
    }

    fn request_options(&self) -> Result<RequestOptions, ShowError> {
        let token = require_token(self.api_token.as_deref())?;
        Ok(RequestOptions::bearer(token))
    }

    fn apply_language<Q: Query>(&self, mut query: Q) -> Q {
        if let Some(language) = &self.language {
            let common = query.get_common();
            if common.language.is_none() {
                common.language = Some(language.clone());
            }
        }
        query
    }

    fn page_query(&self, page: Option<i64>) -> ListQuery {
        let mut query = ListQuery::default();
        query.common.page = page;
        self.apply_language(query)
    }

    async fn get<T, Q>(&self, endpoint: Endpoint, query: Option<&Q>) -> Result<T, ShowError>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let options = self.request_options()?;
        let url = self.gateway.transport().endpoint_url(&endpoint, query)?;
        let ttl: Duration = Resource::from(&endpoint).ttl();
        self.gateway
            .execute_as(&url, &options, RequestPolicy::with_ttl(ttl))
            .await
    }

    /// Shows trending over the given window.
    pub async fn trending_shows(
        &self,
        window: TimeWindow,
        page: Option<i64>,
    ) -> Result<PaginatedResponse<Show>, ShowError> {
        let query = self.page_query(page);
        self.get(Endpoint::Trending(window), Some(&query)).await
    }

    pub async fn popular_shows(
        &self,
        page: Option<i64>,
    ) -> Result<PaginatedResponse<Show>, ShowError> {
        let query = self.page_query(page);
        self.get(Endpoint::Popular, Some(&query)).await
    }

    pub async fn top_rated_shows(
        &self,
        page: Option<i64>,
    ) -> Result<PaginatedResponse<Show>, ShowError> {
        let query = self.page_query(page);
        self.get(Endpoint::TopRated, Some(&query)).await
    }

    /// Shows with an episode airing in the next seven days.
    pub async fn on_the_air_shows(
        &self,
        page: Option<i64>,
    ) -> Result<PaginatedResponse<Show>, ShowError> {
        let query = self.page_query(page);
        self.get(Endpoint::OnTheAir, Some(&query)).await
    }

    /// Searches shows by name. Blank search text is rejected without a request.
    pub async fn search_shows(
        &self,
        query: &SearchQuery,
    ) -> Result<PaginatedResponse<Show>, ShowError> {
        self.request_options()?;
        if query.is_blank() {
            return Err(ShowError::InvalidInput(
                "search text must not be empty".to_string(),
            ));
        }
        let query = self.apply_language(query.clone());
        self.get(Endpoint::Search, Some(&query)).await
    }

    pub async fn discover_shows(
        &self,
        query: &DiscoverQuery,
    ) -> Result<PaginatedResponse<Show>, ShowError> {
        let query = self.apply_language(query.clone());
        self.get(Endpoint::Discover, Some(&query)).await
    }

    pub async fn show_details(&self, id: ShowID) -> Result<ShowDetails, ShowError> {
        let query = self.page_query(None);
        self.get(Endpoint::Details(id), Some(&query)).await
    }

    pub async fn show_credits(&self, id: ShowID) -> Result<Credits, ShowError> {
        let query = self.page_query(None);
        self.get(Endpoint::Credits(id), Some(&query)).await
    }

    pub async fn show_recommendations(
        &self,
        id: ShowID,
        page: Option<i64>,
    ) -> Result<PaginatedResponse<Show>, ShowError> {
        let query = self.page_query(page);
        self.get(Endpoint::Recommendations(id), Some(&query)).await
    }

    pub async fn similar_shows(
        &self,
        id: ShowID,
        page: Option<i64>,
    ) -> Result<PaginatedResponse<Show>, ShowError> {
        let query = self.page_query(page);
        self.get(Endpoint::Similar(id), Some(&query)).await
    }

    /// Streaming, rental, and purchase availability per region.
    pub async fn watch_providers(&self, id: ShowID) -> Result<WatchProviders, ShowError> {
        self.get::<_, ListQuery>(Endpoint::WatchProviders(id), None)
            .await
    }

    pub async fn genres(&self) -> Result<GenreList, ShowError> {
        let query = self.page_query(None);
        self.get(Endpoint::Genres, Some(&query)).await
    }

    pub async fn network(&self, id: NetworkID) -> Result<NetworkDetails, ShowError> {
        self.get::<_, ListQuery>(Endpoint::Network(id), None).await
    }

    /// Drops cached responses whose key contains `pattern` (e.g. `"/trending/"`).
    pub fn invalidate(&self, pattern: &str) -> usize {
        self.gateway.cache().invalidate(pattern)
    }

    pub fn invalidate_matching(&self, pattern: &Regex) -> usize {
        self.gateway.cache().invalidate_matching(pattern)
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.gateway.cache().clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.gateway.cache().stats()
    }

    pub fn request_stats(&self) -> TrackerSummary {
        self.gateway.tracker().summary()
    }
}
