//! Message source: one post per non-empty line of a UTF-8 file.

use crate::error::{BotError, Result};
use std::path::Path;
use tracing::debug;

/// Ordered, trimmed, non-empty messages. Index is the day offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageList {
    lines: Vec<String>,
}

impl MessageList {
    /// Build from raw text: lines are trimmed, blank lines dropped.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect();
        Self { lines }
    }

    /// Read and parse `path`.
    ///
    /// # Errors
    ///
    /// [`BotError::SourceMissingOrEmpty`] when the file does not exist or has
    /// no usable lines; [`BotError::Io`] for other read failures.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BotError::SourceMissingOrEmpty(format!(
                    "{} does not exist",
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        let list = Self::parse(&text);
        if list.is_empty() {
            return Err(BotError::SourceMissingOrEmpty(format!(
                "{} has no non-empty lines",
                path.display()
            )));
        }
        debug!("loaded {} messages from {}", list.len(), path.display());
        Ok(list)
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there are no messages.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Message at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// All messages in order.
    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn parse_trims_and_skips_blank_lines() {
        let list = MessageList::parse("  first  \n\n\t\nsecond\r\n third\n");
        assert_eq!(list.as_slice(), ["first", "second", "third"]);
        assert_eq!(list.get(1), Some("second"));
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.txt");
        std::fs::write(&path, "✨ Day one\nDay two 💌\n").unwrap();

        let list = MessageList::load(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some("✨ Day one"));
    }

    #[test]
    fn load_missing_file_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MessageList::load(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, BotError::SourceMissingOrEmpty(_)));
        assert!(err.is_skip());
    }

    #[test]
    fn load_blank_file_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.txt");
        std::fs::write(&path, "\n   \n\t\n").unwrap();
        match MessageList::load(&path) {
            Err(BotError::SourceMissingOrEmpty(msg)) => assert!(msg.contains("no non-empty")),
            other => panic!("expected SourceMissingOrEmpty, got {other:?}"),
        }
    }
}
