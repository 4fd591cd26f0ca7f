mod config_cmd;
mod history;
mod settings;
mod watch;
mod water;

pub use config_cmd::ConfigCommand;
pub use history::HistoryCommand;
pub use settings::{GoalCommand, SettingsCommand};
pub use watch::WatchCommand;
pub use water::{AddCommand, RemoveCommand, StatusCommand};

use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
