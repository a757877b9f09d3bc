//! Per-request cache policy and the TTL assigned to each kind of resource.

use std::time::Duration;

use tmdb_api::Endpoint;

const MINUTE: u64 = 60;

/// How a single request interacts with the response cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestPolicy {
    /// Lifetime of the stored response. `None` uses the cache default.
    pub ttl: Option<Duration>,
    /// Fetch fresh: neither read from nor write to the cache.
    pub skip: bool,
}

impl RequestPolicy {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            skip: false,
        }
    }

    pub fn bypass() -> Self {
        Self {
            ttl: None,
            skip: true,
        }
    }

    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }
}

/// Resource classes, ordered from most to least volatile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Search,
    Discover,
    Popular,
    Trending,
    Details,
    Taxonomy,
}

impl Resource {
    pub const fn ttl(self) -> Duration {
        match self {
            Resource::Search => Duration::from_secs(5 * MINUTE),
            Resource::Discover => Duration::from_secs(10 * MINUTE),
            Resource::Popular => Duration::from_secs(15 * MINUTE),
            Resource::Trending => Duration::from_secs(30 * MINUTE),
            Resource::Details => Duration::from_secs(60 * MINUTE),
            Resource::Taxonomy => Duration::from_secs(24 * 60 * MINUTE),
        }
    }
}

impl From<&Endpoint> for Resource {
    fn from(endpoint: &Endpoint) -> Self {
        match endpoint {
            Endpoint::Search => Resource::Search,
            Endpoint::Discover => Resource::Discover,
            Endpoint::Popular | Endpoint::TopRated | Endpoint::OnTheAir => Resource::Popular,
            Endpoint::Trending(_) => Resource::Trending,
            Endpoint::Details(_)
            | Endpoint::Credits(_)
            | Endpoint::Recommendations(_)
            | Endpoint::Similar(_)
            | Endpoint::WatchProviders(_) => Resource::Details,
            Endpoint::Genres | Endpoint::Network(_) => Resource::Taxonomy,
        }
    }
}
