//! Completion notification.
//!
//! Sent once, on the day after the last scheduled post. Delivery goes through
//! [lettre](https://lettre.rs) over SMTP; an unconfigured transport means the
//! notice is skipped, never that the run fails.

use crate::config::{NotifyConfig, SmtpTls};
use crate::error::{BotError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::info;

/// Facts about a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionNotice {
    /// Page the run posted to, if known.
    pub page_id: Option<String>,
    /// First posting day.
    pub start_date: NaiveDate,
    /// Configured run length.
    pub max_days: u32,
    /// Messages that were available.
    pub messages_available: usize,
    /// Date the notice is sent.
    pub completed_on: NaiveDate,
}

impl CompletionNotice {
    /// Number of days that actually had a message.
    pub fn days_posted(&self) -> usize {
        self.messages_available.min(self.max_days as usize)
    }

    /// E-mail subject line.
    pub fn subject(&self) -> String {
        format!("Posting run complete: {} days", self.max_days)
    }

    /// Plain-text e-mail body.
    pub fn body(&self) -> String {
        let page = self.page_id.as_deref().unwrap_or("(unknown page)");
        let mut body = format!(
            "The scheduled posting run has finished.\n\n\
             Page: {page}\n\
             Started: {}\n\
             Run length: {} days\n\
             Days with a message: {}\n\
             Completed: {}\n",
            self.start_date,
            self.max_days,
            self.days_posted(),
            self.completed_on,
        );
        if self.messages_available < self.max_days as usize {
            body.push_str(&format!(
                "\nThe message file only had {} lines, so {} days were skipped.\n",
                self.messages_available,
                self.max_days as usize - self.messages_available
            ));
        }
        body
    }
}

/// Notification contract.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Stable identifier (e.g. `smtp`).
    fn id(&self) -> &'static str;

    /// Deliver `notice`.
    async fn notify(&self, notice: &CompletionNotice) -> Result<()>;
}

/// Sends the notice as a plain-text e-mail.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
}

impl SmtpNotifier {
    /// Build a notifier, or `None` when host, sender, or recipients are unset.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Notify`] for unparseable addresses or a relay
    /// that cannot be set up.
    pub fn from_config(config: &NotifyConfig) -> Result<Option<Self>> {
        if !config.is_configured() {
            return Ok(None);
        }
        let (Some(host), Some(sender)) = (config.smtp_host.as_deref(), config.sender()) else {
            return Ok(None);
        };

        let from = parse_mailbox(sender)?;
        let to = config
            .to
            .iter()
            .filter(|r| !r.trim().is_empty())
            .map(|r| parse_mailbox(r))
            .collect::<Result<Vec<_>>>()?;

        let builder = match config.tls {
            SmtpTls::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| BotError::Notify(format!("SMTP relay {host}: {e}")))?,
            SmtpTls::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| BotError::Notify(format!("SMTP relay {host}: {e}")))?,
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };
        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));
        if let (Some(user), Some(password)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(Some(Self {
            transport: builder.build(),
            from,
            to,
        }))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    fn id(&self) -> &'static str {
        "smtp"
    }

    async fn notify(&self, notice: &CompletionNotice) -> Result<()> {
        let email = compose(&self.from, &self.to, notice)?;
        self.transport
            .send(email)
            .await
            .map_err(|e| BotError::Notify(format!("SMTP send failed: {e}")))?;
        info!(recipients = self.to.len(), "completion e-mail sent");
        Ok(())
    }
}

/// Build the notice e-mail.
///
/// # Errors
///
/// Returns [`BotError::Notify`] when there are no recipients or the message
/// cannot be assembled.
pub fn compose(from: &Mailbox, to: &[Mailbox], notice: &CompletionNotice) -> Result<Message> {
    if to.is_empty() {
        return Err(BotError::Notify("no recipients".into()));
    }
    let mut builder = Message::builder()
        .from(from.clone())
        .subject(notice.subject())
        .header(ContentType::TEXT_PLAIN);
    for recipient in to {
        builder = builder.to(recipient.clone());
    }
    builder
        .body(notice.body())
        .map_err(|e| BotError::Notify(format!("failed to build message: {e}")))
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address
        .trim()
        .parse()
        .map_err(|e| BotError::Notify(format!("invalid address '{address}': {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn notice(available: usize) -> CompletionNotice {
        CompletionNotice {
            page_id: Some("1234".into()),
            start_date: NaiveDate::from_ymd_opt(2025, 11, 2).unwrap(),
            max_days: 20,
            messages_available: available,
            completed_on: NaiveDate::from_ymd_opt(2025, 11, 22).unwrap(),
        }
    }

    fn configured() -> NotifyConfig {
        NotifyConfig {
            smtp_host: Some("smtp.example.com".into()),
            smtp_user: Some("bot@example.com".into()),
            smtp_password: Some("secret".into()),
            to: vec!["author@example.com".into()],
            ..Default::default()
        }
    }

    #[test]
    fn body_describes_run() {
        let body = notice(25).body();
        assert!(body.contains("Page: 1234"));
        assert!(body.contains("Started: 2025-11-02"));
        assert!(body.contains("Days with a message: 20"));
        assert!(!body.contains("skipped"));
    }

    #[test]
    fn body_mentions_short_source() {
        let body = notice(5).body();
        assert!(body.contains("Days with a message: 5"));
        assert!(body.contains("only had 5 lines, so 15 days were skipped"));
    }

    #[test]
    fn compose_builds_plain_text_message() {
        let from: Mailbox = "Bot <bot@example.com>".parse().unwrap();
        let to: Vec<Mailbox> = vec![
            "author@example.com".parse().unwrap(),
            "editor@example.com".parse().unwrap(),
        ];
        let email = compose(&from, &to, &notice(25)).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();

        assert!(raw.contains("Subject: Posting run complete: 20 days"));
        assert!(raw.contains("author@example.com"));
        assert!(raw.contains("editor@example.com"));
        assert!(raw.contains("Content-Type: text/plain"));
    }

    #[test]
    fn compose_without_recipients_fails() {
        let from: Mailbox = "bot@example.com".parse().unwrap();
        assert!(compose(&from, &[], &notice(25)).is_err());
    }

    #[test]
    fn unconfigured_notifier_is_none() {
        assert!(SmtpNotifier::from_config(&NotifyConfig::default())
            .unwrap()
            .is_none());

        let no_recipients = NotifyConfig {
            to: Vec::new(),
            ..configured()
        };
        assert!(SmtpNotifier::from_config(&no_recipients).unwrap().is_none());
    }

    #[tokio::test]
    async fn configured_notifier_builds() {
        let notifier = SmtpNotifier::from_config(&configured()).unwrap().unwrap();
        assert_eq!(notifier.id(), "smtp");
        assert_eq!(notifier.to.len(), 1);
    }

    #[test]
    fn bad_address_is_rejected() {
        let config = NotifyConfig {
            to: vec!["not an address".into()],
            ..configured()
        };
        assert!(matches!(
            SmtpNotifier::from_config(&config),
            Err(BotError::Notify(_))
        ));
    }
}
