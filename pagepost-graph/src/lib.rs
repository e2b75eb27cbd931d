//! # pagepost-graph
//!
//! Minimal client for publishing to a Facebook page through the Graph API.
//!
//! Only two edges are covered:
//!
//! - `POST /{version}/{page_id}/feed` with a text `message`
//! - `POST /{version}/{page_id}/photos` with a PNG `source` and a `caption`
//!
//! The access token travels in the request body, never in the URL, so it
//! does not show up in proxy or request logs.
//!
//! ## Examples
//!
//! ```no_run
//! # async fn example() -> pagepost_graph::Result<()> {
//! let config = pagepost_graph::GraphConfig::new("1234567890", "page-token");
//! let client = pagepost_graph::PageClient::new(config)?;
//! let receipt = client.post_text("New chapter tease today!").await?;
//! println!("posted {}", receipt.id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::PageClient;
pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use types::PostReceipt;
