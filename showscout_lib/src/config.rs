//! Runtime configuration read from the process environment.

use std::time::Duration;

use crate::error::ShowError;

pub const TOKEN_VAR: &str = "TMDB_API_TOKEN";
pub const BASE_URL_VAR: &str = "TMDB_BASE_URL";
pub const CACHE_MAX_SIZE_VAR: &str = "SHOWSCOUT_CACHE_MAX_SIZE";
pub const CACHE_TTL_VAR: &str = "SHOWSCOUT_CACHE_TTL_SECS";
pub const LANGUAGE_VAR: &str = "SHOWSCOUT_LANGUAGE";

const DEFAULT_CACHE_MAX_SIZE: usize = 100;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Bearer token for the API. Operations fail without it.
    pub api_token: Option<String>,
    pub base_url: String,
    pub cache_max_size: usize,
    pub cache_ttl: Duration,
    /// Default response language applied to every request.
    pub language: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: tmdb_api::DEFAULT_BASE_URL.to_string(),
            cache_max_size: DEFAULT_CACHE_MAX_SIZE,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            language: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    ///
    /// Blank values count as unset; unparseable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();
        Self {
            api_token: get(TOKEN_VAR),
            base_url: get(BASE_URL_VAR).unwrap_or(defaults.base_url),
            cache_max_size: get(CACHE_MAX_SIZE_VAR)
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(defaults.cache_max_size),
            cache_ttl: get(CACHE_TTL_VAR)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            language: get(LANGUAGE_VAR),
        }
    }

    pub fn with_api_token(mut self, token: &str) -> Self {
        self.api_token = Some(token.to_string());
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }
}

/// Returns the token, or a configuration error if it is missing or blank.
pub(crate) fn require_token(token: Option<&str>) -> Result<&str, ShowError> {
    match token.map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ShowError::Configuration(format!(
            "{} is not set; an API read access token is required",
            TOKEN_VAR
        ))),
    }
}
