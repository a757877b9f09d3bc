//! Cast, crew, and watch-provider types attached to a single show.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ShowID;

/// Response of `/tv/{id}/credits`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credits {
    pub id: ShowID,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Response of `/tv/{id}/watch/providers`, keyed by ISO 3166-1 region code.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WatchProviders {
    pub id: ShowID,
    #[serde(default)]
    pub results: BTreeMap<String, RegionProviders>,
}

impl WatchProviders {
    pub fn region(&self, code: &str) -> Option<&RegionProviders> {
        self.results.get(&code.to_ascii_uppercase())
    }
}

/// Availability of a show within one region.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegionProviders {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<Provider>,
    #[serde(default)]
    pub rent: Vec<Provider>,
    #[serde(default)]
    pub buy: Vec<Provider>,
    #[serde(default)]
    pub free: Vec<Provider>,
    #[serde(default)]
    pub ads: Vec<Provider>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Provider {
    pub provider_id: u64,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub display_priority: i64,
}
