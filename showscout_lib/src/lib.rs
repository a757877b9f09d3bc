//! Library layer for showscout: cached TV metadata client.
//!
//! Wraps the `tmdb_api` transport with a bounded TTL/LRU response cache, a
//! gateway that retries rate-limited requests once, and typed per-resource
//! operations with a TTL chosen by how often each resource changes.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod policy;

pub use tmdb_api;
pub use tmdb_api::types;
pub use tmdb_api::{DiscoverQuery, DiscoverSortBy, Query, SearchQuery, SortDirection};

pub use cache::{CacheStats, ResponseCache};
pub use client::ShowClient;
pub use config::Config;
pub use error::ShowError;
pub use gateway::{cache_key, FetchGateway, RequestTracker, TrackerSummary, RATE_LIMIT_BACKOFF};
pub use policy::{RequestPolicy, Resource};
