//! Configuration types for the posting bot.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment overrides (see [`BotConfig::apply_env`]). The result is
//! an immutable [`BotConfig`] passed explicitly to every component.

use crate::error::{BotError, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for a posting run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Target page and publishing settings.
    pub page: PageConfig,
    /// Day selection settings.
    pub schedule: ScheduleConfig,
    /// Hashtag normalisation.
    pub tags: TagConfig,
    /// Card rendering (image publish mode).
    pub render: RenderConfig,
    /// Completion e-mail.
    pub notify: NotifyConfig,
}

/// What gets published each day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishMode {
    /// Plain text status on the page feed.
    #[default]
    Text,
    /// Rendered card uploaded as a photo, with the message as caption.
    Image,
}

impl std::str::FromStr for PublishMode {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" | "photo" => Ok(Self::Image),
            other => Err(BotError::Config(format!("unknown publish mode '{other}'"))),
        }
    }
}

/// How the day's message is chosen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Day index since `start_date`, bounded by `max_days`; ends with a
    /// completion notice.
    #[default]
    Sequential,
    /// Date ordinal modulo the number of messages; never ends.
    Rotate,
}

impl std::str::FromStr for SelectionMode {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "rotate" => Ok(Self::Rotate),
            other => Err(BotError::Config(format!("unknown selection mode '{other}'"))),
        }
    }
}

/// Transport security for SMTP submission.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    /// Plain connection upgraded with STARTTLS (port 587).
    #[default]
    StartTls,
    /// Implicit TLS (port 465).
    Tls,
    /// No encryption. Only for local relays.
    None,
}

impl std::str::FromStr for SmtpTls {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starttls" => Ok(Self::StartTls),
            "tls" | "ssl" => Ok(Self::Tls),
            "none" => Ok(Self::None),
            other => Err(BotError::Config(format!("unknown SMTP TLS mode '{other}'"))),
        }
    }
}

/// Page credentials and Graph API settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Page id (`FB_PAGE_ID`).
    pub page_id: Option<String>,
    /// Page access token (`FB_PAGE_TOKEN`).
    pub access_token: Option<String>,
    /// Graph API host.
    pub base_url: String,
    /// Graph API version segment.
    pub api_version: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Text status or rendered card.
    pub publish_mode: PublishMode,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_id: None,
            access_token: None,
            base_url: pagepost_graph::config::DEFAULT_BASE_URL.to_owned(),
            api_version: pagepost_graph::config::DEFAULT_API_VERSION.to_owned(),
            timeout_secs: 30,
            publish_mode: PublishMode::Text,
        }
    }
}

impl std::fmt::Debug for PageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageConfig")
            .field("page_id", &self.page_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("publish_mode", &self.publish_mode)
            .finish()
    }
}

impl PageConfig {
    /// Build the Graph client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ConfigMissing`] when the page id or token is unset.
    pub fn graph_config(&self) -> Result<pagepost_graph::GraphConfig> {
        let page_id = non_empty(self.page_id.as_deref())
            .ok_or_else(|| BotError::ConfigMissing("FB_PAGE_ID".into()))?;
        let token = non_empty(self.access_token.as_deref())
            .ok_or_else(|| BotError::ConfigMissing("FB_PAGE_TOKEN".into()))?;
        Ok(pagepost_graph::GraphConfig::new(page_id, token)
            .with_base_url(self.base_url.clone())
            .with_api_version(self.api_version.clone())
            .with_timeout_seconds(self.timeout_secs))
    }
}

/// Day selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// First posting day (day index 0).
    pub start_date: NaiveDate,
    /// Length of the posting run in days.
    pub max_days: u32,
    /// IANA zone in which "today" is evaluated.
    pub timezone: String,
    /// Sequential run or endless rotation.
    pub mode: SelectionMode,
    /// One message per non-empty line.
    pub messages_path: PathBuf,
    /// Posted in rotate mode when the message file is missing or empty.
    pub fallback_message: Option<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2025, 11, 2).unwrap_or_default(),
            max_days: 20,
            timezone: "America/New_York".to_owned(),
            mode: SelectionMode::Sequential,
            messages_path: PathBuf::from("posts.txt"),
            fallback_message: None,
        }
    }
}

impl ScheduleConfig {
    /// Parse the configured reference timezone.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Config`] for names unknown to the tz database.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| BotError::Config(format!("invalid timezone '{}': {e}", self.timezone)))
    }
}

/// Hashtag normalisation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Whether to append default tags at all.
    pub enabled: bool,
    /// A message containing any of these (case-insensitive) is left alone.
    pub required: Vec<String>,
    /// How many of `required` to append when none is present.
    pub append_count: usize,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            required: vec![
                "#BlairsWhispers".to_owned(),
                "#Romance".to_owned(),
                "#BookLovers".to_owned(),
            ],
            append_count: 2,
        }
    }
}

/// Card rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Horizontal text budget is `width - 2 * margin`; also the minimum top offset.
    pub margin: u32,
    /// Extra pixels between wrapped lines.
    pub line_spacing: u32,
    /// Outline font size in pixels.
    pub font_size: f32,
    /// TrueType/OpenType font. `None` tries common system fonts, then the
    /// built-in bitmap font.
    pub font_path: Option<PathBuf>,
    /// Background color (`#RRGGBB`, `#RGB`, `rgb(..)` or a color name).
    pub background: String,
    /// Text color, same formats as `background`.
    pub text_color: String,
    /// Where rendered cards are written.
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
            margin: 80,
            line_spacing: 12,
            font_size: 48.0,
            font_path: None,
            background: "#1e1b2e".to_owned(),
            text_color: "#f5f0e6".to_owned(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Completion e-mail settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// SMTP relay host. Unset disables notifications.
    pub smtp_host: Option<String>,
    /// SMTP port.
    pub smtp_port: u16,
    /// SMTP username.
    pub smtp_user: Option<String>,
    /// SMTP password.
    pub smtp_password: Option<String>,
    /// Transport security.
    pub tls: SmtpTls,
    /// Sender address. Falls back to `smtp_user`.
    pub from: Option<String>,
    /// Recipients. Empty disables notifications.
    pub to: Vec<String>,
    /// SMTP command timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: 587,
            smtp_user: None,
            smtp_password: None,
            tls: SmtpTls::StartTls,
            from: None,
            to: Vec::new(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_password", &self.smtp_password.as_ref().map(|_| "<redacted>"))
            .field("tls", &self.tls)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl NotifyConfig {
    /// Sender address: `from`, else `smtp_user`.
    pub fn sender(&self) -> Option<&str> {
        non_empty(self.from.as_deref()).or_else(|| non_empty(self.smtp_user.as_deref()))
    }

    /// Whether enough is configured to attempt delivery.
    pub fn is_configured(&self) -> bool {
        non_empty(self.smtp_host.as_deref()).is_some()
            && self.sender().is_some()
            && self.to.iter().any(|r| !r.trim().is_empty())
    }
}

impl BotConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BotError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| BotError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config_dir>/pagepost/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("pagepost")
            .join("config.toml")
    }

    /// Load from `path`, or from the default path when it exists, or defaults.
    ///
    /// An explicit `path` must exist; the default path is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a file that should be read cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Self::default_config_path();
                if default.is_file() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Empty values count as unset. Recognised keys: `FB_PAGE_ID`,
    /// `FB_PAGE_TOKEN`, `GRAPH_API_VERSION`, `PUBLISH_MODE`, `START_DATE`,
    /// `MAX_DAYS`, `TIMEZONE`, `SELECTION_MODE`, `POSTS_FILE`,
    /// `FALLBACK_MESSAGE`, `FONT_PATH`, `FONT_SIZE`, `BG_COLOR`,
    /// `TEXT_COLOR`, `OUTPUT_DIR`, `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`,
    /// `SMTP_PASSWORD`, `SMTP_TLS`, `NOTIFY_FROM`, `NOTIFY_TO`
    /// (comma-separated).
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Config`] when a value cannot be parsed.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("FB_PAGE_ID") {
            self.page.page_id = Some(v.trim().to_owned());
        }
        if let Some(v) = get("FB_PAGE_TOKEN") {
            self.page.access_token = Some(v.trim().to_owned());
        }
        if let Some(v) = get("GRAPH_API_VERSION") {
            self.page.api_version = v.trim().to_owned();
        }
        if let Some(v) = get("PUBLISH_MODE") {
            self.page.publish_mode = v.parse()?;
        }

        if let Some(v) = get("START_DATE") {
            self.schedule.start_date = NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                .map_err(|e| BotError::Config(format!("START_DATE '{v}': {e}")))?;
        }
        if let Some(v) = get("MAX_DAYS") {
            self.schedule.max_days = parse_number("MAX_DAYS", &v)?;
        }
        if let Some(v) = get("TIMEZONE") {
            self.schedule.timezone = v.trim().to_owned();
        }
        if let Some(v) = get("SELECTION_MODE") {
            self.schedule.mode = v.parse()?;
        }
        if let Some(v) = get("POSTS_FILE") {
            self.schedule.messages_path = PathBuf::from(v.trim());
        }
        if let Some(v) = get("FALLBACK_MESSAGE") {
            self.schedule.fallback_message = Some(v.trim().to_owned());
        }

        if let Some(v) = get("FONT_PATH") {
            self.render.font_path = Some(PathBuf::from(v.trim()));
        }
        if let Some(v) = get("FONT_SIZE") {
            self.render.font_size = parse_number("FONT_SIZE", &v)?;
        }
        if let Some(v) = get("BG_COLOR") {
            self.render.background = v.trim().to_owned();
        }
        if let Some(v) = get("TEXT_COLOR") {
            self.render.text_color = v.trim().to_owned();
        }
        if let Some(v) = get("OUTPUT_DIR") {
            self.render.output_dir = PathBuf::from(v.trim());
        }

        if let Some(v) = get("SMTP_HOST") {
            self.notify.smtp_host = Some(v.trim().to_owned());
        }
        if let Some(v) = get("SMTP_PORT") {
            self.notify.smtp_port = parse_number("SMTP_PORT", &v)?;
        }
        if let Some(v) = get("SMTP_USER") {
            self.notify.smtp_user = Some(v.trim().to_owned());
        }
        if let Some(v) = get("SMTP_PASSWORD") {
            self.notify.smtp_password = Some(v);
        }
        if let Some(v) = get("SMTP_TLS") {
            self.notify.tls = v.parse()?;
        }
        if let Some(v) = get("NOTIFY_FROM") {
            self.notify.from = Some(v.trim().to_owned());
        }
        if let Some(v) = get("NOTIFY_TO") {
            self.notify.to = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
        }

        Ok(())
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`BotConfig::apply_env`].
    pub fn apply_process_env(&mut self) -> Result<()> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `max_days` is greater than 0
    /// - the timezone is known
    /// - the canvas is non-empty and wider than both margins
    /// - `font_size` is positive
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.schedule.max_days == 0 {
            return Err(BotError::Config("max_days must be greater than 0".into()));
        }
        self.schedule.tz()?;
        if self.render.width == 0 || self.render.height == 0 {
            return Err(BotError::Config("canvas width and height must be non-zero".into()));
        }
        if self.render.margin.saturating_mul(2) >= self.render.width {
            return Err(BotError::Config(format!(
                "margin {} leaves no room on a {}px wide canvas",
                self.render.margin, self.render.width
            )));
        }
        if !(self.render.font_size.is_finite() && self.render.font_size > 0.0) {
            return Err(BotError::Config("font_size must be positive".into()));
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| BotError::Config(format!("{key} '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = BotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.schedule.start_date,
            NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()
        );
        assert_eq!(config.schedule.max_days, 20);
        assert_eq!(config.schedule.mode, SelectionMode::Sequential);
        assert_eq!(config.page.publish_mode, PublishMode::Text);
        assert_eq!(config.tags.append_count, 2);
        assert!(!config.notify.is_configured());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = BotConfig::default();
        config.schedule.max_days = 30;
        config.page.publish_mode = PublishMode::Image;
        config.render.font_path = Some(PathBuf::from("/fonts/Serif.ttf"));
        config.save_to_file(&path).unwrap();

        let loaded = BotConfig::from_file(&path).unwrap();
        assert_eq!(loaded.schedule.max_days, 30);
        assert_eq!(loaded.page.publish_mode, PublishMode::Image);
        assert_eq!(
            loaded.render.font_path,
            Some(PathBuf::from("/fonts/Serif.ttf"))
        );
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = BotConfig::from_file(Path::new("/nonexistent/pagepost/config.toml"));
        assert!(matches!(result, Err(BotError::Io(_))));
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[schedule\nmax_days = ").unwrap();
        assert!(matches!(BotConfig::from_file(&path), Err(BotError::Config(_))));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml_str = r#"
[schedule]
start_date = "2026-01-05"

[render]
margin = 40
"#;
        let config: BotConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.schedule.start_date,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
        );
        assert_eq!(config.schedule.max_days, 20);
        assert_eq!(config.render.width, 1080);
        assert_eq!(config.render.margin, 40);
    }

    #[test]
    fn modes_deserialize_lowercase() {
        let toml_str = r#"
[page]
publish_mode = "image"

[schedule]
mode = "rotate"

[notify]
tls = "tls"
"#;
        let config: BotConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.page.publish_mode, PublishMode::Image);
        assert_eq!(config.schedule.mode, SelectionMode::Rotate);
        assert_eq!(config.notify.tls, SmtpTls::Tls);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = BotConfig::default();
        config
            .apply_env(env(&[
                ("FB_PAGE_ID", "12345"),
                ("FB_PAGE_TOKEN", " tok "),
                ("START_DATE", "2025-12-01"),
                ("MAX_DAYS", "7"),
                ("PUBLISH_MODE", "photo"),
                ("BG_COLOR", "navy"),
                ("SMTP_HOST", "smtp.example.com"),
                ("SMTP_PORT", "465"),
                ("SMTP_TLS", "ssl"),
                ("NOTIFY_TO", "a@example.com, b@example.com,"),
                ("NOTIFY_FROM", "bot@example.com"),
            ]))
            .unwrap();

        assert_eq!(config.page.page_id.as_deref(), Some("12345"));
        assert_eq!(config.page.access_token.as_deref(), Some("tok"));
        assert_eq!(
            config.schedule.start_date,
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
        );
        assert_eq!(config.schedule.max_days, 7);
        assert_eq!(config.page.publish_mode, PublishMode::Image);
        assert_eq!(config.render.background, "navy");
        assert_eq!(config.notify.smtp_port, 465);
        assert_eq!(config.notify.tls, SmtpTls::Tls);
        assert_eq!(config.notify.to, vec!["a@example.com", "b@example.com"]);
        assert!(config.notify.is_configured());
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = BotConfig::default();
        config
            .apply_env(env(&[("START_DATE", ""), ("FB_PAGE_ID", "   ")]))
            .unwrap();
        assert_eq!(config.schedule.start_date, ScheduleConfig::default().start_date);
        assert!(config.page.page_id.is_none());
    }

    #[test]
    fn bad_env_values_are_config_errors() {
        let mut config = BotConfig::default();
        let err = config.apply_env(env(&[("MAX_DAYS", "twenty")])).unwrap_err();
        assert!(err.to_string().contains("MAX_DAYS"));

        let err = config
            .apply_env(env(&[("START_DATE", "11/02/2025")]))
            .unwrap_err();
        assert!(err.to_string().contains("START_DATE"));

        let err = config
            .apply_env(env(&[("SELECTION_MODE", "random")]))
            .unwrap_err();
        assert!(err.to_string().contains("random"));
    }

    #[test]
    fn graph_config_requires_credentials() {
        let mut page = PageConfig::default();
        match page.graph_config() {
            Err(BotError::ConfigMissing(key)) => assert_eq!(key, "FB_PAGE_ID"),
            other => panic!("expected ConfigMissing, got {other:?}"),
        }

        page.page_id = Some("123".into());
        match page.graph_config() {
            Err(BotError::ConfigMissing(key)) => assert_eq!(key, "FB_PAGE_TOKEN"),
            other => panic!("expected ConfigMissing, got {other:?}"),
        }

        page.access_token = Some("tok".into());
        let graph = page.graph_config().unwrap();
        assert_eq!(graph.page_id, "123");
        assert_eq!(graph.api_version, "v21.0");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = BotConfig::default();
        config.schedule.max_days = 0;
        assert!(config.validate().is_err());

        let mut config = BotConfig::default();
        config.schedule.timezone = "Mars/Olympus_Mons".into();
        assert!(config.validate().is_err());

        let mut config = BotConfig::default();
        config.render.margin = 540;
        assert!(config.validate().is_err());

        let mut config = BotConfig::default();
        config.render.font_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut config = BotConfig::default();
        config.page.access_token = Some("page-secret".into());
        config.notify.smtp_password = Some("smtp-secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("page-secret"));
        assert!(!debug.contains("smtp-secret"));
    }

    #[test]
    fn sender_falls_back_to_smtp_user() {
        let notify = NotifyConfig {
            smtp_user: Some("user@example.com".into()),
            ..Default::default()
        };
        assert_eq!(notify.sender(), Some("user@example.com"));
    }
}
