//! Thirsty Widget
//!
//! The home-screen widget as its own process. It never touches the
//! application's records; everything goes through the shared region, and the
//! application folds widget changes in the next time it starts or resumes.
//!
//! # Configuration
//!
//! Environment variables:
//! - `THIRSTY_SHARED_DIR`: Directory holding the shared region
//!   (default: `$THIRSTY_DATA_DIR/shared`, else ~/.local/share/thirsty/shared)
//!
//! # Commands
//!
//! - `add`: "+" button, adds 250 ml
//! - `remove`: "−" button, removes 250 ml (never below zero)
//! - `show`: the current timeline entry

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thirsty_core::{FileStore, SharedRegion, SystemClock, TimelineEntry, WidgetIntent};

#[derive(Parser)]
#[command(name = "thirsty-widget")]
#[command(version)]
#[command(about = "Thirsty home-screen widget", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: WidgetCommand,
}

#[derive(Subcommand)]
enum WidgetCommand {
    /// Add 250 ml
    Add,

    /// Remove 250 ml
    Remove,

    /// Show what the widget displays
    Show {
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Directory of the shared region. Must match the application's `shared_dir`.
///
/// `THIRSTY_SHARED_DIR` wins; otherwise it follows `THIRSTY_DATA_DIR` the same
/// way the application's default does. A `data_dir` set only in the
/// application's YAML file is not visible here.
fn shared_dir() -> Result<PathBuf, String> {
    shared_dir_from(|key| std::env::var(key).ok())
}

fn shared_dir_from<F>(env: F) -> Result<PathBuf, String>
where
    F: Fn(&str) -> Option<String>,
{
    match env("THIRSTY_SHARED_DIR") {
        Some(dir) if dir.is_empty() => {
            Err("THIRSTY_SHARED_DIR is empty; widget sync is disabled".to_string())
        }
        Some(dir) => Ok(PathBuf::from(dir)),
        None => {
            let data_dir = match env("THIRSTY_DATA_DIR") {
                Some(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("thirsty"),
            };
            Ok(data_dir.join("shared"))
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let dir = shared_dir()?;
    tracing::debug!("Shared region: {}", dir.display());

    let region = SharedRegion::new(FileStore::new(dir));
    let clock = SystemClock;

    let intent = match cli.command {
        WidgetCommand::Add => WidgetIntent::AddWater,
        WidgetCommand::Remove => WidgetIntent::RemoveWater,
        WidgetCommand::Show { format } => {
            let entry = TimelineEntry::load(&region, &clock);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
                OutputFormat::Text => {
                    println!("{}", entry.data);
                    println!(
                        "Next refresh: {}",
                        entry
                            .next_refresh
                            .with_timezone(&chrono::Local)
                            .format("%H:%M")
                    );
                }
            }
            return Ok(());
        }
    };

    intent.perform(&region, &clock)?;
    println!("{}", TimelineEntry::load(&region, &clock).data);
    Ok(())
}
