//! Per-request transport options.

use std::collections::BTreeMap;

use serde::Serialize;

/// Headers sent with a request.
///
/// Names are lowercased and kept sorted, so two option sets built in a
/// different order serialize identically.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: BTreeMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying `Authorization: Bearer <token>` and a JSON accept header.
    pub fn bearer(token: &str) -> Self {
        Self::new()
            .with_header("accept", "application/json")
            .with_header("authorization", &format!("Bearer {}", token))
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.trim().to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
