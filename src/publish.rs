//! Publishing strategies.
//!
//! A [`Post`] is what the run wants on the page; a [`Publisher`] gets it
//! there. [`GraphPublisher`] talks to the Graph API, [`DryRunPublisher`]
//! only logs.

use crate::error::{BotError, Result};
use async_trait::async_trait;
use pagepost_graph::{GraphConfig, PageClient};
use std::path::PathBuf;
use tracing::info;

/// Content for one publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Post {
    /// Text status.
    Text {
        /// Status text.
        message: String,
    },
    /// Rendered card plus caption.
    Photo {
        /// PNG on disk.
        path: PathBuf,
        /// Caption text.
        caption: String,
    },
}

impl Post {
    /// Text that accompanies the post.
    pub fn text(&self) -> &str {
        match self {
            Self::Text { message } => message,
            Self::Photo { caption, .. } => caption,
        }
    }
}

/// Publisher contract. Implementations make at most one request per call
/// and do not retry.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Stable identifier (e.g. `graph`, `dry-run`).
    fn id(&self) -> &'static str;

    /// Publish `post`, returning the id of the created object.
    async fn publish(&self, post: &Post) -> Result<String>;
}

/// Publishes to a page through the Graph API.
#[derive(Debug, Clone)]
pub struct GraphPublisher {
    client: PageClient,
}

impl GraphPublisher {
    /// Build a publisher from validated Graph settings.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Publish`] when the configuration is rejected.
    pub fn new(config: GraphConfig) -> Result<Self> {
        Ok(Self {
            client: PageClient::new(config)?,
        })
    }
}

#[async_trait]
impl Publisher for GraphPublisher {
    fn id(&self) -> &'static str {
        "graph"
    }

    async fn publish(&self, post: &Post) -> Result<String> {
        let receipt = match post {
            Post::Text { message } => self.client.post_text(message).await?,
            Post::Photo { path, caption } => {
                let png = std::fs::read(path)?;
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("post.png");
                self.client.post_photo(png, file_name, caption).await?
            }
        };
        Ok(receipt.feed_id().to_owned())
    }
}

/// Logs what would be published and returns a placeholder id.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunPublisher;

#[async_trait]
impl Publisher for DryRunPublisher {
    fn id(&self) -> &'static str {
        "dry-run"
    }

    async fn publish(&self, post: &Post) -> Result<String> {
        match post {
            Post::Text { message } => info!(%message, "dry run: would post text"),
            Post::Photo { path, caption } => {
                if !path.is_file() {
                    return Err(BotError::Render(format!(
                        "card {} was not written",
                        path.display()
                    )));
                }
                info!(path = %path.display(), %caption, "dry run: would post photo");
            }
        }
        Ok("dry-run".to_owned())
    }
}
