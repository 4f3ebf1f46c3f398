//! Runtime configuration
//!
//! There is no configuration file. The binary fills a `BrowserConfig` from
//! command line flags (each with an environment variable fallback); library
//! users construct one directly or start from `BrowserConfig::default()`.

use std::time::Duration;

/// Default endpoint of the public TVMaze API
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Image shown for shows the catalog has no artwork for
pub const PLACEHOLDER_IMAGE: &str = "https://tinyurl.com/tv-missing";

/// Default timeout applied to every catalog request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for talking to the catalog and rendering its results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Base URL of the catalog API, without trailing slash
    pub base_url: String,
    /// URL substituted when a show has no image
    pub placeholder_image: String,
    /// Timeout for a single catalog request
    pub timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BrowserConfig {
    /// Returns a copy of this configuration pointing at another base URL
    ///
    /// Trailing slashes are stripped so endpoint paths can be appended
    /// verbatim.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_tvmaze() {
        let config = BrowserConfig::default();
        assert_eq!(config.base_url, "https://api.tvmaze.com");
        assert_eq!(config.placeholder_image, "https://tinyurl.com/tv-missing");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_with_base_url_strips_trailing_slashes() {
        let config = BrowserConfig::default().with_base_url("http://localhost:8080//");
        assert_eq!(config.base_url, "http://localhost:8080");
    }
}
