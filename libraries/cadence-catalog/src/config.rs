//! Catalog client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public catalog API used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://saavn.dev/api";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Cap on trending and top-chart results.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Connection settings for a [`CatalogClient`](crate::CatalogClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL, e.g. `https://saavn.dev/api`
    pub base_url: String,

    /// Whole-request timeout
    pub timeout: Duration,

    /// Maximum entries returned by trending and top-chart lookups
    pub max_results: usize,
}

impl CatalogConfig {
    /// Config for `base_url` with default timeout and result cap.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}
