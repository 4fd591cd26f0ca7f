use clap::{Args, Subcommand, ValueEnum};

use thirsty_core::models::{round_goal, INTERVAL_OPTIONS, MAX_DAILY_GOAL, MIN_DAILY_GOAL};
use thirsty_core::{GlassStyle, UserSettings};

use super::OutputFormat;
use crate::app::AppStore;

#[derive(Args)]
pub struct GoalCommand {
    /// Daily goal in ml (1000-4000, steps of 100)
    pub goal: Option<u32>,
}

impl GoalCommand {
    pub fn run(&self, store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
        let Some(requested) = self.goal else {
            println!("Daily goal: {} ml", store.settings().daily_goal);
            return Ok(());
        };

        let goal = round_goal(requested);
        if goal != requested {
            println!(
                "Goal adjusted to {} ml ({}-{} ml, steps of 100)",
                goal, MIN_DAILY_GOAL, MAX_DAILY_GOAL
            );
        }
        store.set_daily_goal(goal);
        println!("Daily goal set to {} ml", goal);
        Ok(())
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Args)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show current settings
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Turn reminders on or off
    Notifications {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Minutes between reminders (30, 60 or 120)
    Interval { minutes: u32 },

    /// Quiet hours as HH:MM, e.g. 22:00 07:00
    QuietHours { start: String, end: String },

    /// Glass style (classic, tumbler, bottle)
    Glass { style: String },
}

impl SettingsCommand {
    pub fn run(&self, store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            SettingsSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(store.settings())?);
                    }
                    OutputFormat::Text => print_settings(store.settings()),
                }
                Ok(())
            }

            SettingsSubcommand::Notifications { state } => {
                let enabled = matches!(state, Toggle::On);
                store.toggle_notifications(enabled);
                println!(
                    "Reminders {}",
                    if enabled { "enabled" } else { "disabled" }
                );
                Ok(())
            }

            SettingsSubcommand::Interval { minutes } => {
                if !INTERVAL_OPTIONS.contains(minutes) {
                    return Err(format!(
                        "Invalid interval {}. Valid options: {:?}",
                        minutes, INTERVAL_OPTIONS
                    )
                    .into());
                }
                store.set_notification_interval(*minutes);
                println!("Reminder interval set to {}", format_interval(*minutes));
                Ok(())
            }

            SettingsSubcommand::QuietHours { start, end } => {
                store.set_quiet_hours(start, end)?;
                let settings = store.settings();
                println!(
                    "Quiet hours set to {} - {}",
                    settings.quiet_hours_start, settings.quiet_hours_end
                );
                Ok(())
            }

            SettingsSubcommand::Glass { style } => {
                let style: GlassStyle = style.parse()?;
                store.set_glass_style(style);
                println!("Glass style set to {}", style);
                Ok(())
            }
        }
    }
}

fn print_settings(settings: &UserSettings) {
    println!("Settings");
    println!("========\n");
    println!("daily_goal: {} ml", settings.daily_goal);
    println!(
        "reminders: {}",
        if settings.notifications_enabled { "on" } else { "off" }
    );
    println!(
        "reminder_interval: {}",
        format_interval(settings.notification_interval)
    );
    println!(
        "quiet_hours: {} - {}",
        settings.quiet_hours_start, settings.quiet_hours_end
    );
    println!("glass_style: {}", settings.glass_style);
}

fn format_interval(minutes: u32) -> String {
    if minutes >= 60 && minutes % 60 == 0 {
        let hours = minutes / 60;
        format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
    } else {
        format!("{} min", minutes)
    }
}
