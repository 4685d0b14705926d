//! API endpoint configuration.

/// Base URL of the hosted directory service.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in";

/// Where the remote directory API lives.
///
/// The base URL is overridable so tests (and self-hosted deployments) can
/// point the client at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Root of the REST API, e.g. `https://reqres.in/api`.
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
