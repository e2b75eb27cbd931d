//! HTTP client construction.

use crate::config::GraphConfig;
use crate::error::GraphError;
use std::time::Duration;

/// Build a [`reqwest::Client`] configured for Graph API calls.
///
/// The client has the configured timeout and User-Agent and follows at most
/// a handful of redirects.
///
/// # Errors
///
/// Returns [`GraphError::Http`] if the client cannot be constructed.
pub fn build_client(config: &GraphConfig) -> Result<reqwest::Client, GraphError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| GraphError::Http(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_default_config() {
        let config = GraphConfig::new("123", "token");
        assert!(build_client(&config).is_ok());
    }
}
