use clap::Args;
use std::time::Duration;

use thirsty_core::AppState;

use super::water::print_record;
use crate::app::AppStore;

/// Keeps the application in the foreground, picking up widget taps and day
/// changes as they happen.
#[derive(Args)]
pub struct WatchCommand {
    /// Seconds between resume checks
    #[arg(long, short, default_value_t = 30)]
    pub interval: u64,
}

impl WatchCommand {
    pub fn run(&self, store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
        // The store is single-threaded; a current-thread runtime keeps it that way.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.watch(store))
    }

    async fn watch(&self, store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
        let mut ticker = tokio::time::interval(Duration::from_secs(self.interval.max(1)));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        print_record(store.today_record());
        println!("\nWatching for changes (Ctrl-C to stop)");

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let before = store.today_record().clone();

                    store.handle_app_state_change(AppState::Background);
                    store.handle_app_state_change(AppState::Active);

                    if store.today_record() != &before {
                        println!();
                        print_record(store.today_record());
                    }
                }
                result = &mut ctrl_c => {
                    result?;
                    store.handle_app_state_change(AppState::Background);
                    break;
                }
            }
        }

        tracing::debug!("Watch stopped");
        Ok(())
    }
}
