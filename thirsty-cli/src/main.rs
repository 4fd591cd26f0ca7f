use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod commands;
mod config;

use commands::{
    AddCommand, ConfigCommand, GoalCommand, HistoryCommand, RemoveCommand, SettingsCommand,
    StatusCommand, WatchCommand,
};
use config::Config;
use thirsty_core::StoreEvent;

#[derive(Parser)]
#[command(name = "thirsty")]
#[command(version)]
#[command(about = "Track how much water you drink", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's progress
    Status(StatusCommand),

    /// Log a drink
    Add(AddCommand),

    /// Take back an amount
    Remove(RemoveCommand),

    /// Undo the last entry
    Undo,

    /// Start today over
    Reset,

    /// Show or set the daily goal
    Goal(GoalCommand),

    /// Manage reminders and appearance
    Settings(SettingsCommand),

    /// Show past days
    History(HistoryCommand),

    /// Stay open and pick up widget changes
    Watch(WatchCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Save config path for config commands
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;

    // Configuration commands don't touch the data directory
    if let Some(Commands::Config(cmd)) = &cli.command {
        return cmd.run(&config, cli_config_path);
    }

    let mut store = app::open_store(&config);
    store.subscribe(|event| {
        if let StoreEvent::WidgetReconciled { delta, consumed } = event {
            eprintln!("Synced from widget: {:+} ml (now {} ml)", delta, consumed);
        }
    });
    store.load_data();

    execute_command(&cli.command, &mut store)?;

    if store.show_goal_reached() {
        println!("\nDaily goal reached! Well done.");
        store.dismiss_goal_reached();
    }

    Ok(())
}

fn execute_command(
    command: &Option<Commands>,
    store: &mut app::AppStore,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Some(Commands::Status(cmd)) => cmd.run(store)?,
        Some(Commands::Add(cmd)) => cmd.run(store)?,
        Some(Commands::Remove(cmd)) => cmd.run(store)?,
        Some(Commands::Undo) => match store.remove_last_entry() {
            Some(entry) => {
                println!("Undid {:+} ml", entry.amount);
                println!("{}", store.today_record());
            }
            None => println!("Nothing to undo."),
        },
        Some(Commands::Reset) => {
            store.reset_today();
            println!("{}", store.today_record());
        }
        Some(Commands::Goal(cmd)) => cmd.run(store)?,
        Some(Commands::Settings(cmd)) => cmd.run(store)?,
        Some(Commands::History(cmd)) => cmd.run(store)?,
        Some(Commands::Watch(cmd)) => cmd.run(store)?,
        // Handled before the store is opened
        Some(Commands::Config(_)) => {}
        None => {
            StatusCommand {
                format: commands::OutputFormat::Text,
            }
            .run(store)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so command output stays clean. `RUST_LOG` wins unless
/// `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("thirsty=debug,thirsty_core=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
