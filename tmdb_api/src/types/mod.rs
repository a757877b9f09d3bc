mod meta;
pub use self::meta::PaginatedResponse;

mod show;
pub use self::show::{
    Creator, Genre, GenreID, GenreList, Network, NetworkDetails, NetworkID, Season, Show,
    ShowDetails, ShowID, TimeWindow,
};

mod credits;
pub use self::credits::{CastMember, Credits, CrewMember, Provider, RegionProviders, WatchProviders};
