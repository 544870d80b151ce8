//! Client configuration.
//!
//! The API base URL is baked in at build time from `REEBLE_API_URL`. An empty
//! value means the API is served from the same origin as the app.

/// Build-time variable naming the backend base URL.
pub const ENV_API_URL: &str = "REEBLE_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientConfig {
    api_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("api base url must use http:// or https:// and include a host")]
    InvalidBaseUrl,
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url)?,
        })
    }

    /// Reads `REEBLE_API_URL` as captured at compile time, falling back to same-origin.
    pub fn from_build_env() -> Self {
        let raw = option_env!("REEBLE_API_URL").unwrap_or_default();
        match Self::new(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring {ENV_API_URL}={raw:?}: {err}");
                Self::default()
            }
        }
    }

    /// Absolute (or origin-relative) URL of an API path such as `/api/templates`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

/// Trims whitespace and trailing slashes. Empty input is accepted and means same-origin.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let Some((scheme, remainder)) = trimmed.split_once("://") else {
        return Err(ConfigError::InvalidBaseUrl);
    };
    if !matches!(scheme, "http" | "https") || remainder.is_empty() || remainder.starts_with('/') {
        return Err(ConfigError::InvalidBaseUrl);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_trailing_slashes() {
        let config = ClientConfig::new(" http://localhost:8000/ ").unwrap();
        assert_eq!(config.url("/api/token"), "http://localhost:8000/api/token");
    }

    #[test]
    fn empty_means_same_origin() {
        let config = ClientConfig::new("").unwrap();
        assert_eq!(config.url("/api/templates"), "/api/templates");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert_eq!(
            normalize_base_url("ftp://example.com"),
            Err(ConfigError::InvalidBaseUrl)
        );
        assert_eq!(normalize_base_url("localhost:8000"), Err(ConfigError::InvalidBaseUrl));
        assert_eq!(normalize_base_url("https:///api"), Err(ConfigError::InvalidBaseUrl));
    }
}
