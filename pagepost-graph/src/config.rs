//! Graph API client configuration.
//!
//! [`GraphConfig`] carries the page credentials plus the endpoint and request
//! settings. Use [`GraphConfig::new`] and the `with_*` builders in tests to
//! point the client at a mock server.

use crate::error::GraphError;

/// Production Graph API host.
pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";

/// Graph API version the client is written against.
pub const DEFAULT_API_VERSION: &str = "v21.0";

/// Configuration for a [`PageClient`](crate::PageClient).
#[derive(Clone)]
pub struct GraphConfig {
    /// Scheme + host of the Graph API, without a trailing version segment.
    pub base_url: String,
    /// Version path segment, e.g. `v21.0`.
    pub api_version: String,
    /// Numeric id of the page being posted to.
    pub page_id: String,
    /// Page access token with `pages_manage_posts`.
    pub access_token: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent header sent with each request.
    pub user_agent: String,
}

impl std::fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("page_id", &self.page_id)
            .field("access_token", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GraphConfig {
    /// Create a configuration for `page_id` with production defaults.
    pub fn new(page_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            page_id: page_id.into(),
            access_token: access_token.into(),
            timeout_seconds: 30,
            user_agent: concat!("pagepost-graph/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    /// Override the API host (used to target a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the API version segment.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `page_id` and `access_token` are non-empty
    /// - `base_url` parses as an absolute http(s) URL
    /// - `api_version` is non-empty
    /// - `timeout_seconds` is greater than 0
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.page_id.trim().is_empty() {
            return Err(GraphError::Config("page_id must not be empty".into()));
        }
        if self.access_token.trim().is_empty() {
            return Err(GraphError::Config("access_token must not be empty".into()));
        }
        if self.api_version.trim().is_empty() {
            return Err(GraphError::Config("api_version must not be empty".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(GraphError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| GraphError::Config(format!("invalid base_url: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GraphError::Config(format!(
                "base_url must be http or https, got {}",
                parsed.scheme()
            )));
        }
        Ok(())
    }

    /// Full URL of a page edge such as `feed` or `photos`.
    pub fn edge_url(&self, edge: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            self.page_id,
            edge
        )
    }
}
