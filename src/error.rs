//! Error types for the posting bot.

/// Top-level error type for a posting run.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// A required configuration value is absent. Runs that hit this are
    /// skipped rather than failed.
    #[error("missing configuration: {0}")]
    ConfigMissing(String),

    /// Configuration present but invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Message file absent or without usable lines.
    #[error("message source unavailable: {0}")]
    SourceMissingOrEmpty(String),

    /// Card rendering or image encoding error.
    #[error("render error: {0}")]
    Render(String),

    /// The publishing API rejected the post or could not be reached.
    #[error("publish failed: {0}")]
    Publish(#[from] pagepost_graph::GraphError),

    /// Completion e-mail could not be built or sent.
    #[error("notification error: {0}")]
    Notify(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Whether this error means "skip today's run" rather than "the run failed".
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::ConfigMissing(_) | Self::SourceMissingOrEmpty(_))
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, BotError>;
