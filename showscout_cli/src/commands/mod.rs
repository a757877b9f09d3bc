pub mod discover;
pub mod genres;
pub mod listings;
pub mod search;
pub mod show;

use showscout_lib::types::{PaginatedResponse, Show};

/// Paging summary goes to stderr so stdout stays machine-readable.
pub(crate) fn print_page_summary(resp: &PaginatedResponse<Show>) {
    eprintln!(
        "Page {}/{} ({} total shows)",
        resp.page, resp.total_pages, resp.total_results
    );
}
