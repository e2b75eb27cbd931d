//! CLI binary for pagepost.

use anyhow::{Context, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use pagepost::render::{self, Typeface};
use pagepost::schedule;
use pagepost::{
    BotConfig, DryRunPublisher, GraphPublisher, PostingRun, Publisher, RunOutcome, Selection,
    SmtpNotifier, pipeline,
};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Pagepost: scheduled page posting bot.
#[derive(Parser)]
#[command(name = "pagepost", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load environment overrides from this file instead of `./.env`.
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Subcommand to run (defaults to `run`).
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Post today's message.
    Run {
        /// Evaluate as if today were this date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Render and log, but do not publish or send e-mail.
        #[arg(long)]
        dry_run: bool,
    },

    /// Show where today falls in the run.
    Status {
        /// Evaluate as if today were this date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Render a card without posting it.
    Render {
        /// Date whose message to render (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Render this text instead of the scheduled message.
        #[arg(long)]
        text: Option<String>,

        /// Output PNG path (defaults to the configured output directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a default configuration file.
    InitConfig {
        /// Destination (defaults to the platform config directory).
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `status` output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pagepost=info,pagepost_graph=info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    let command = cli.command.unwrap_or(Command::Run {
        date: None,
        dry_run: false,
    });

    if let Command::InitConfig { path, force } = command {
        return init_config(path, force);
    }

    let config = load_config(cli.config.as_deref())?;

    match command {
        Command::Run { date, dry_run } => run(&config, date, dry_run).await,
        Command::Status { date, json } => status(&config, date, json),
        Command::Render { date, text, out } => render_card(&config, date, text, out),
        Command::InitConfig { .. } => Ok(()),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BotConfig> {
    let mut config = BotConfig::load(path)?;
    config.apply_process_env()?;
    config.validate()?;
    Ok(config)
}

fn resolve_date(config: &BotConfig, date: Option<NaiveDate>) -> anyhow::Result<NaiveDate> {
    match date {
        Some(date) => Ok(date),
        None => Ok(schedule::today_in(Utc::now(), &config.schedule.tz()?)),
    }
}

async fn run(config: &BotConfig, date: Option<NaiveDate>, dry_run: bool) -> anyhow::Result<()> {
    let today = resolve_date(config, date)?;

    // Credentials are only needed when a message is due; the completion
    // e-mail goes out without them.
    let publisher: Option<Box<dyn Publisher>> = if dry_run {
        Some(Box::new(DryRunPublisher))
    } else {
        match config.page.graph_config() {
            Ok(graph) => Some(Box::new(GraphPublisher::new(graph)?)),
            Err(e) if e.is_skip() => {
                warn!("{e}; posting disabled");
                None
            }
            Err(e) => return Err(e.into()),
        }
    };

    let notifier = if dry_run {
        None
    } else {
        match SmtpNotifier::from_config(&config.notify) {
            Ok(notifier) => notifier,
            Err(e) => {
                warn!("{e}; completion e-mail disabled");
                None
            }
        }
    };

    let mut posting = PostingRun::new(config);
    if let Some(publisher) = &publisher {
        posting = posting.with_publisher(publisher.as_ref());
    }
    if let Some(notifier) = &notifier {
        posting = posting.with_notifier(notifier);
    }

    match posting.execute(today).await? {
        RunOutcome::Posted {
            day_index,
            post_id,
            image,
        } => {
            println!("posted day {}: {post_id}", day_index + 1);
            if let Some(image) = image {
                println!("card: {}", image.display());
            }
        }
        RunOutcome::Skipped(reason) => println!("skipped: {reason}"),
        RunOutcome::Completed { notified } => {
            println!(
                "run complete ({})",
                if notified { "notified" } else { "no e-mail sent" }
            );
        }
    }
    Ok(())
}

fn status(config: &BotConfig, date: Option<NaiveDate>, json: bool) -> anyhow::Result<()> {
    let today = resolve_date(config, date)?;
    let selection = PostingRun::new(config).select(today)?;
    let schedule = &config.schedule;

    if json {
        let report = serde_json::json!({
            "date": today,
            "mode": schedule.mode,
            "run": selection,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("date:     {today} ({})", schedule.timezone);
    println!("start:    {} for {} days", schedule.start_date, schedule.max_days);
    println!("state:    {selection}");
    if let Selection::Due { message, .. } = &selection {
        println!("message:  {message}");
    }
    Ok(())
}

fn render_card(
    config: &BotConfig,
    date: Option<NaiveDate>,
    text: Option<String>,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let today = resolve_date(config, date)?;

    let (day_index, text) = match (PostingRun::new(config).select(today)?, text) {
        (Selection::Due { day_index, message }, None) => (day_index, message),
        (Selection::Due { day_index, .. }, Some(text)) => (day_index, text),
        (_, Some(text)) => (
            schedule::day_index(config.schedule.start_date, today).max(0),
            text,
        ),
        (other, None) => bail!("nothing to render for {today}: {other}"),
    };

    let path = match out {
        Some(path) => {
            let font = Typeface::load(config.render.font_path.as_deref(), config.render.font_size);
            let card = render::render_with_config(&text, &config.render, &font);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, render::encode_png(&card)?)?;
            path
        }
        None => pipeline::render_card(config, today, day_index, &text)?,
    };
    println!("{}", path.display());
    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(BotConfig::default_config_path);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    BotConfig::default().save_to_file(&path)?;
    println!("wrote {}", path.display());
    Ok(())
}
