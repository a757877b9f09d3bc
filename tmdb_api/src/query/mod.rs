mod common;
pub use self::common::{ListQuery, Query, QueryCommon, SortDirection};

mod discover;
pub use self::discover::{DiscoverQuery, DiscoverSortBy};

mod search;
pub use self::search::SearchQuery;
