//! Error types for the pagepost-graph crate.
//!
//! Messages never include the page access token.

/// Errors that can occur while talking to the Graph API.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The Graph API answered with a non-success status.
    #[error("Graph API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the Graph error envelope, or the raw body.
        message: String,
    },

    /// A success response did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl GraphError {
    /// HTTP status of an API rejection, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience type alias for pagepost-graph results.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_api() {
        let err = GraphError::Api {
            status: 400,
            message: "Invalid OAuth access token.".into(),
        };
        assert_eq!(
            err.to_string(),
            "Graph API returned 400: Invalid OAuth access token."
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn display_config() {
        let err = GraphError::Config("page_id must not be empty".into());
        assert_eq!(err.to_string(), "config error: page_id must not be empty");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphError>();
    }
}
