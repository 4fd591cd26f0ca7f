use thirsty_core::{
    AppStorage, FileStore, NoopBridge, SharedRegion, SharedRegionBridge, SystemClock, WaterStore,
    WidgetBridge,
};

use crate::config::Config;

/// The store as wired up for the terminal front end.
pub type AppStore = WaterStore<FileStore, Box<dyn WidgetBridge>, SystemClock>;

/// Builds the store from configuration. Nothing is read until `load_data`.
pub fn open_store(config: &Config) -> AppStore {
    let storage = AppStorage::new(FileStore::new(&config.data_dir.value));

    let bridge: Box<dyn WidgetBridge> = match config.widget_dir() {
        Some(dir) => {
            tracing::debug!("Shared region: {}", dir.display());
            Box::new(SharedRegionBridge::new(
                SharedRegion::new(FileStore::new(dir)),
                SystemClock,
            ))
        }
        None => {
            tracing::debug!("Widget sync disabled");
            Box::new(NoopBridge)
        }
    };

    WaterStore::new(storage, bridge, SystemClock)
}
