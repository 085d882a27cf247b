//! Connection settings for the Siswa Manager API. Values come from CLI flags or
//! their `SISWA_*` environment variables; nothing here is secret.

use super::error::ApiError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl ApiConfig {
    /// Validates `base_url` and keeps it without a trailing slash.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the URL does not parse, is not http(s), or the
    /// timeout is zero.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let trimmed = base_url.trim();
        let url = Url::parse(trimmed)
            .map_err(|err| ApiError::Config(format!("invalid API base URL '{trimmed}': {err}")))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ApiError::Config(format!(
                    "unsupported API URL scheme '{scheme}', expected http or https"
                )))
            }
        }

        if url.host_str().is_none() {
            return Err(ApiError::Config(format!(
                "API base URL '{trimmed}' has no host"
            )));
        }

        if timeout.is_zero() {
            return Err(ApiError::Config("timeout must be greater than zero".to_string()));
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Joins the base URL and an endpoint path with exactly one slash.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
