//! Resource paths exposed by the metadata API.

use crate::types::{NetworkID, ShowID, TimeWindow};

/// A GET-able resource on the API, relative to the versioned base URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Trending(TimeWindow),
    Popular,
    TopRated,
    OnTheAir,
    Search,
    Discover,
    Details(ShowID),
    Credits(ShowID),
    Recommendations(ShowID),
    Similar(ShowID),
    WatchProviders(ShowID),
    Genres,
    Network(NetworkID),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Trending(window) => format!("/trending/tv/{}", window),
            Endpoint::Popular => "/tv/popular".to_string(),
            Endpoint::TopRated => "/tv/top_rated".to_string(),
            Endpoint::OnTheAir => "/tv/on_the_air".to_string(),
            Endpoint::Search => "/search/tv".to_string(),
            Endpoint::Discover => "/discover/tv".to_string(),
            Endpoint::Details(id) => format!("/tv/{}", id),
            Endpoint::Credits(id) => format!("/tv/{}/credits", id),
            Endpoint::Recommendations(id) => format!("/tv/{}/recommendations", id),
            Endpoint::Similar(id) => format!("/tv/{}/similar", id),
            Endpoint::WatchProviders(id) => format!("/tv/{}/watch/providers", id),
            Endpoint::Genres => "/genre/tv/list".to_string(),
            Endpoint::Network(id) => format!("/network/{}", id),
        }
    }
}
