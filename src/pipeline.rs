//! One posting run: select, tag, optionally render, publish, and notify on
//! completion.

use crate::config::{BotConfig, PublishMode, SelectionMode};
use crate::error::{BotError, Result};
use crate::messages::MessageList;
use crate::notify::{CompletionNotice, Notifier};
use crate::publish::{Post, Publisher};
use crate::render::{self, Typeface};
use crate::schedule::{self, RunState};
use crate::tags;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Why a run posted nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Before the start date.
    NotStarted {
        /// First posting day.
        starts_on: NaiveDate,
    },
    /// Inside the run, but the message list is too short.
    SourceExhausted {
        /// Zero-based day index.
        day_index: i64,
        /// Messages available.
        available: usize,
    },
    /// No message file, or one without usable lines.
    SourceMissing {
        /// What was wrong with the source.
        detail: String,
    },
    /// Past the completion day.
    AlreadyCompleted {
        /// Zero-based day index.
        day_index: i64,
    },
    /// A message was due but no publisher is available.
    NotConfigured {
        /// What is missing.
        detail: String,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted { starts_on } => write!(f, "run starts on {starts_on}"),
            Self::SourceExhausted {
                day_index,
                available,
            } => write!(
                f,
                "no message for day {} ({available} available)",
                day_index + 1
            ),
            Self::SourceMissing { detail } => write!(f, "message source unusable: {detail}"),
            Self::AlreadyCompleted { day_index } => {
                write!(f, "run already completed ({day_index} days since start)")
            }
            Self::NotConfigured { detail } => write!(f, "publishing not configured: {detail}"),
        }
    }
}

/// What today calls for, before anything is rendered or sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "selection", rename_all = "snake_case")]
pub enum Selection {
    /// A message should be posted.
    Due {
        /// Day index in sequential mode, list index in rotate mode.
        day_index: i64,
        /// Message as read from the source, without tags.
        message: String,
    },
    /// Completion day of a sequential run.
    Completed {
        /// Equals `max_days`.
        day_index: i64,
        /// Messages the source held.
        messages_available: usize,
    },
    /// Nothing to post.
    Skip(SkipReason),
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Due { day_index, .. } => write!(f, "message due, day {}", day_index + 1),
            Self::Completed { .. } => write!(f, "run just completed"),
            Self::Skip(reason) => write!(f, "skip: {reason}"),
        }
    }
}

/// Result of [`PostingRun::execute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// A post was published.
    Posted {
        /// Day index in sequential mode, list index in rotate mode.
        day_index: i64,
        /// Id returned by the publisher.
        post_id: String,
        /// Rendered card, in image mode.
        image: Option<PathBuf>,
    },
    /// Nothing to do today.
    Skipped(SkipReason),
    /// Completion day reached.
    Completed {
        /// Whether the completion e-mail went out.
        notified: bool,
    },
}

/// A single invocation of the bot.
pub struct PostingRun<'a> {
    config: &'a BotConfig,
    publisher: Option<&'a dyn Publisher>,
    notifier: Option<&'a dyn Notifier>,
}

impl<'a> PostingRun<'a> {
    /// Create a run over `config`. Without a publisher, due messages are
    /// skipped as [`SkipReason::NotConfigured`].
    pub fn new(config: &'a BotConfig) -> Self {
        Self {
            config,
            publisher: None,
            notifier: None,
        }
    }

    /// Publish due messages through `publisher`.
    pub fn with_publisher(mut self, publisher: &'a dyn Publisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Send a completion notice through `notifier`.
    pub fn with_notifier(mut self, notifier: &'a dyn Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Decide what `today` calls for, in either selection mode.
    ///
    /// # Errors
    ///
    /// Only unexpected I/O failures reading the message file. A missing or
    /// empty file is a [`Selection::Skip`], or the fallback message in
    /// rotate mode.
    pub fn select(&self, today: NaiveDate) -> Result<Selection> {
        let messages = match MessageList::load(&self.config.schedule.messages_path) {
            Ok(list) => Ok(list),
            Err(BotError::SourceMissingOrEmpty(detail)) => Err(detail),
            Err(e) => return Err(e),
        };

        let selection = match self.config.schedule.mode {
            SelectionMode::Sequential => self.select_sequential(today, messages),
            SelectionMode::Rotate => self.select_rotating(today, messages),
        };
        info!(%today, "{selection}");
        Ok(selection)
    }

    fn select_sequential(
        &self,
        today: NaiveDate,
        messages: std::result::Result<MessageList, String>,
    ) -> Selection {
        let schedule = &self.config.schedule;
        let list = match &messages {
            Ok(list) => list.clone(),
            Err(_) => MessageList::default(),
        };

        let state = schedule::classify(today, schedule.start_date, schedule.max_days, list.as_slice());
        debug!(state = state.label(), "{state}");
        match state {
            RunState::Active { day_index, message } => Selection::Due { day_index, message },
            RunState::JustCompleted { day_index } => Selection::Completed {
                day_index,
                messages_available: list.len(),
            },
            RunState::NotStarted { starts_on } => {
                Selection::Skip(SkipReason::NotStarted { starts_on })
            }
            RunState::AlreadyCompleted { day_index } => {
                Selection::Skip(SkipReason::AlreadyCompleted { day_index })
            }
            RunState::SourceExhausted {
                day_index,
                available,
            } => match messages {
                Err(detail) => Selection::Skip(SkipReason::SourceMissing { detail }),
                Ok(_) => Selection::Skip(SkipReason::SourceExhausted {
                    day_index,
                    available,
                }),
            },
        }
    }

    fn select_rotating(
        &self,
        today: NaiveDate,
        messages: std::result::Result<MessageList, String>,
    ) -> Selection {
        match messages {
            Ok(list) => match schedule::rotating_index(today, list.len()) {
                Some(index) => Selection::Due {
                    day_index: index as i64,
                    message: list.get(index).unwrap_or_default().to_owned(),
                },
                None => Selection::Skip(SkipReason::SourceMissing {
                    detail: "message list is empty".into(),
                }),
            },
            Err(detail) => match &self.config.schedule.fallback_message {
                Some(fallback) if !fallback.trim().is_empty() => {
                    warn!("{detail}; using fallback message");
                    Selection::Due {
                        day_index: 0,
                        message: fallback.trim().to_owned(),
                    }
                }
                _ => Selection::Skip(SkipReason::SourceMissing { detail }),
            },
        }
    }

    /// Run for `today`.
    ///
    /// # Errors
    ///
    /// Publish, render, and I/O failures propagate. Missing or empty message
    /// files and out-of-window days are reported as [`RunOutcome::Skipped`];
    /// notification failures are logged and reported as `notified: false`.
    pub async fn execute(&self, today: NaiveDate) -> Result<RunOutcome> {
        match self.select(today)? {
            Selection::Due { day_index, message } => self.post(today, day_index, &message).await,
            Selection::Completed {
                messages_available, ..
            } => {
                let schedule = &self.config.schedule;
                let notice = CompletionNotice {
                    page_id: self.config.page.page_id.clone(),
                    start_date: schedule.start_date,
                    max_days: schedule.max_days,
                    messages_available,
                    completed_on: today,
                };
                Ok(RunOutcome::Completed {
                    notified: self.notify(&notice).await,
                })
            }
            Selection::Skip(reason) => skip(reason),
        }
    }

    async fn post(&self, today: NaiveDate, day_index: i64, message: &str) -> Result<RunOutcome> {
        let Some(publisher) = self.publisher else {
            return skip(SkipReason::NotConfigured {
                detail: "no publisher (set FB_PAGE_ID and FB_PAGE_TOKEN)".into(),
            });
        };
        let text = tags::apply(message, &self.config.tags);

        let (post, image) = match self.config.page.publish_mode {
            PublishMode::Text => (Post::Text { message: text }, None),
            PublishMode::Image => {
                let path = render_card(self.config, today, day_index, message)?;
                (
                    Post::Photo {
                        path: path.clone(),
                        caption: text,
                    },
                    Some(path),
                )
            }
        };

        let post_id = match publisher.publish(&post).await {
            Ok(id) => id,
            Err(e) => {
                warn!(publisher = publisher.id(), "publish failed: {e}");
                return Err(e);
            }
        };
        info!(publisher = publisher.id(), %post_id, day = day_index + 1, "posted");

        Ok(RunOutcome::Posted {
            day_index,
            post_id,
            image,
        })
    }

    async fn notify(&self, notice: &CompletionNotice) -> bool {
        let Some(notifier) = self.notifier else {
            info!("completion notification skipped: no notifier configured");
            return false;
        };
        match notifier.notify(notice).await {
            Ok(()) => {
                info!(notifier = notifier.id(), "completion notice sent");
                true
            }
            Err(e) => {
                warn!(notifier = notifier.id(), "completion notice failed: {e}");
                false
            }
        }
    }
}

/// Render `message` as a card for `today` and write it to the configured
/// output directory under [`render::output_file_name`].
///
/// # Errors
///
/// Returns an error if the card cannot be encoded or written.
pub fn render_card(
    config: &BotConfig,
    today: NaiveDate,
    day_index: i64,
    message: &str,
) -> Result<PathBuf> {
    let settings = &config.render;
    let font = Typeface::load(settings.font_path.as_deref(), settings.font_size);
    let card = render::render_with_config(message, settings, &font);
    let path = render::save_png(&card, &settings.output_dir, today, day_index)?;
    info!(path = %path.display(), builtin_font = font.is_builtin(), "rendered card");
    Ok(path)
}

fn skip(reason: SkipReason) -> Result<RunOutcome> {
    info!("skipped: {reason}");
    Ok(RunOutcome::Skipped(reason))
}
