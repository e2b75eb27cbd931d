//! Page publishing client.

use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::http::build_client;
use crate::types::{ErrorEnvelope, PostReceipt};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

/// Client for the two page edges the bot uses: `feed` and `photos`.
///
/// Each call is a single request with the configured timeout; nothing is
/// retried.
#[derive(Debug, Clone)]
pub struct PageClient {
    config: GraphConfig,
    client: reqwest::Client,
}

impl PageClient {
    /// Validate `config` and build the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Config`] for invalid settings and
    /// [`GraphError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    /// Publish a text status to the page feed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Api`] when the API rejects the post.
    pub async fn post_text(&self, message: &str) -> Result<PostReceipt> {
        let url = self.config.edge_url("feed");
        debug!(chars = message.chars().count(), "posting text to page feed");

        let response = self
            .client
            .post(&url)
            .form(&[
                ("message", message),
                ("access_token", self.config.access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| GraphError::Http(format!("feed request failed: {e}")))?;

        let receipt = read_receipt(response).await?;
        info!(id = %receipt.id, "text post published");
        Ok(receipt)
    }

    /// Upload a PNG with a caption to the page's photos edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Api`] when the API rejects the upload.
    pub async fn post_photo(
        &self,
        png: Vec<u8>,
        file_name: &str,
        caption: &str,
    ) -> Result<PostReceipt> {
        let url = self.config.edge_url("photos");
        debug!(bytes = png.len(), file_name, "uploading photo to page");

        let source = Part::bytes(png)
            .file_name(file_name.to_owned())
            .mime_str("image/png")
            .map_err(|e| GraphError::Http(format!("invalid upload part: {e}")))?;
        let form = Form::new()
            .text("caption", caption.to_owned())
            .text("access_token", self.config.access_token.clone())
            .part("source", source);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GraphError::Http(format!("photo request failed: {e}")))?;

        let receipt = read_receipt(response).await?;
        info!(id = %receipt.id, post_id = ?receipt.post_id, "photo post published");
        Ok(receipt)
    }
}

async fn read_receipt(response: reqwest::Response) -> Result<PostReceipt> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| GraphError::Http(format!("failed to read response body: {e}")))?;

    if !status.is_success() {
        let message = api_error_message(&body);
        warn!(status = status.as_u16(), %message, "Graph API rejected request");
        return Err(GraphError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let receipt: PostReceipt = serde_json::from_str(&body)
        .map_err(|e| GraphError::Parse(format!("unexpected response body: {e}")))?;
    if receipt.id.is_empty() {
        warn!("Graph API accepted the request but returned no id");
    }
    Ok(receipt)
}

/// Extract the message from a Graph error envelope, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.describe(),
        Err(_) if body.trim().is_empty() => "<empty body>".to_owned(),
        Err(_) => body.trim().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_uses_envelope() {
        let body = r#"{"error":{"message":"(#200) Permissions error","type":"OAuthException"}}"#;
        assert_eq!(
            api_error_message(body),
            "(#200) Permissions error (OAuthException)"
        );
    }

    #[test]
    fn api_error_message_falls_back_to_body() {
        assert_eq!(api_error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(api_error_message(""), "<empty body>");
    }

    #[test]
    fn new_rejects_invalid_config() {
        let result = PageClient::new(GraphConfig::new("", "token"));
        assert!(matches!(result, Err(GraphError::Config(_))));
    }
}
