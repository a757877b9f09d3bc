mod client;
mod endpoint;
mod errors;
mod options;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::endpoint::Endpoint;
pub use self::errors::Error;
pub use self::options::RequestOptions;
pub use self::query::{
    DiscoverQuery, DiscoverSortBy, ListQuery, Query, QueryCommon, SearchQuery, SortDirection,
};
