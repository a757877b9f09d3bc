use serde::{Deserialize, Serialize};

/// Page-numbered listing envelope shared by every list endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PaginatedResponse<T> {
    pub page: i64,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub total_results: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages
    }
}
