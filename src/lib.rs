//! Pagepost: a scheduled page posting bot.
//!
//! Each invocation performs one run:
//! Message file → Day Selector → Hashtags → (Card Renderer) → Publisher
//!
//! # Architecture
//!
//! - **Schedule**: maps "today" in a reference timezone to a zero-based day
//!   index and classifies it against the run window
//! - **Messages**: one post per non-empty line of a UTF-8 file
//! - **Tags**: appends required hashtags when none are present
//! - **Render**: wraps and centers text on a PNG card via `imageproc`
//! - **Publish**: Graph API text or photo posts through `pagepost-graph`
//! - **Notify**: a one-time completion e-mail via `lettre`
//!
//! "Now" is never read inside the library; callers pass the date in.

pub mod config;
pub mod error;
pub mod messages;
pub mod notify;
pub mod pipeline;
pub mod publish;
pub mod render;
pub mod schedule;
pub mod tags;

pub use config::{BotConfig, PublishMode, SelectionMode};
pub use error::{BotError, Result};
pub use messages::MessageList;
pub use notify::{CompletionNotice, Notifier, SmtpNotifier};
pub use pipeline::{PostingRun, RunOutcome, Selection, SkipReason};
pub use publish::{DryRunPublisher, GraphPublisher, Post, Publisher};
pub use schedule::RunState;
