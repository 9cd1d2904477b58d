use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_PAGE_SIZE: u32 = 30;
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 30, 50, 100];
pub const DEFAULT_DATES_LIMIT: u32 = 30;

/// Connection settings for the assets REST API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Build the configuration from `B3_API_URL`, captured when the bundle is compiled.
    pub fn from_env() -> Self {
        Self::with_base_url(option_env!("B3_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_URL
        } else {
            trimmed
        };

        Self {
            base_url: base_url.to_string(),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ApiConfig::with_base_url("https://api.example.com//");
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(
            config.url("/api/health"),
            "https://api.example.com/api/health"
        );
    }

    #[test]
    fn blank_base_url_falls_back_to_local_default() {
        let config = ApiConfig::with_base_url("   ");
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
