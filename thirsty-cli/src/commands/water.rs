use clap::Args;

use thirsty_core::models::{AMOUNT_OPTIONS, DEFAULT_TAP_AMOUNT, MAX_CUSTOM_AMOUNT};
use thirsty_core::DailyRecord;

use super::OutputFormat;
use crate::app::AppStore;

#[derive(Args)]
pub struct AddCommand {
    /// Amount in ml (default: 250)
    pub amount: Option<u32>,
}

impl AddCommand {
    pub fn run(&self, store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
        let amount = validate_amount(self.amount)?;
        let record = store.add_water(amount);
        println!("Added {} ml", amount);
        print_record(record);
        Ok(())
    }
}

#[derive(Args)]
pub struct RemoveCommand {
    /// Amount in ml (default: 250)
    pub amount: Option<u32>,
}

impl RemoveCommand {
    pub fn run(&self, store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
        let amount = validate_amount(self.amount)?;
        let record = store.remove_water(amount);
        println!("Removed {} ml", amount);
        print_record(record);
        Ok(())
    }
}

#[derive(Args)]
pub struct StatusCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl StatusCommand {
    pub fn run(&self, store: &AppStore) -> Result<(), Box<dyn std::error::Error>> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(store.today_record())?);
            }
            OutputFormat::Text => print_record(store.today_record()),
        }
        Ok(())
    }
}

/// Amounts from the quick buttons or a custom entry.
fn validate_amount(amount: Option<u32>) -> Result<u32, String> {
    let amount = amount.unwrap_or(DEFAULT_TAP_AMOUNT);
    if amount == 0 || amount > MAX_CUSTOM_AMOUNT {
        return Err(format!(
            "Amount must be between 1 and {} ml, got {} (common: {:?})",
            MAX_CUSTOM_AMOUNT, amount, AMOUNT_OPTIONS
        ));
    }
    Ok(amount)
}

pub(crate) fn print_record(record: &DailyRecord) {
    println!("{}", record);
    for entry in &record.entries {
        println!("  {}", entry);
    }

    if record.is_goal_reached() {
        println!("Goal reached");
    } else {
        println!("{} ml to go", record.goal - record.consumed);
    }
}
