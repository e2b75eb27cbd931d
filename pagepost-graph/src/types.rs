//! Wire types for the Graph API responses the client consumes.

use serde::{Deserialize, Serialize};

/// Result of a successful publish call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReceipt {
    /// Object id returned by the API (`{page}_{post}` for feed posts,
    /// the photo id for photo uploads). Empty when the API omits it.
    #[serde(default)]
    pub id: String,
    /// Feed story id, returned by photo uploads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
}

impl PostReceipt {
    /// Id of the feed story: `post_id` when present, otherwise `id`.
    pub fn feed_id(&self) -> &str {
        self.post_id.as_deref().unwrap_or(&self.id)
    }
}

/// Standard Graph API error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

impl ErrorBody {
    pub(crate) fn describe(&self) -> String {
        match (&self.kind, self.code) {
            (Some(kind), Some(code)) => format!("{} ({kind}, code {code})", self.message),
            (Some(kind), None) => format!("{} ({kind})", self.message),
            (None, Some(code)) => format!("{} (code {code})", self.message),
            (None, None) => self.message.clone(),
        }
    }
}
