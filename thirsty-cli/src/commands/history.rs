use clap::Args;

use thirsty_core::{DailyRecord, WeeklySummary};

use super::OutputFormat;
use crate::app::AppStore;

#[derive(Args)]
pub struct HistoryCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show the last 7 days with totals instead of the full history
    #[arg(long, short)]
    pub week: bool,
}

impl HistoryCommand {
    pub fn run(&self, store: &AppStore) -> Result<(), Box<dyn std::error::Error>> {
        if self.week {
            let summary = store.weekly_summary();
            match self.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                OutputFormat::Text => print_summary(&summary),
            }
            return Ok(());
        }

        let history = store.history();
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(history)?),
            OutputFormat::Text => {
                if history.is_empty() {
                    println!("No history yet.");
                    return Ok(());
                }
                for record in history {
                    println!("{}", day_line(record));
                }
            }
        }
        Ok(())
    }
}

fn print_summary(summary: &WeeklySummary) {
    println!("This week");
    println!("=========\n");
    for record in &summary.records {
        println!("{}", day_line(record));
    }
    println!();
    println!("Total: {:.2} L", summary.total_consumed as f64 / 1000.0);
    println!("Average: {:.2} L/day", summary.average / 1000.0);
    println!(
        "Goal reached: {} of {} days",
        summary.days_reached,
        summary.records.len()
    );
}

fn day_line(record: &DailyRecord) -> String {
    let mark = if record.is_goal_reached() { " *" } else { "" };
    format!("{}{}", record, mark)
}
