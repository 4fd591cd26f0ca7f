//! Thirsty Core Library
//!
//! Hydration records, persistence and widget reconciliation shared by the
//! Thirsty application and its widget.

pub mod clock;
pub mod models;
pub mod storage;
pub mod store;
pub mod widget;

pub use clock::{Clock, FixedClock, SystemClock};
pub use models::{
    DailyRecord, GlassStyle, History, SettingsError, UserSettings, WaterEntry, WeeklySummary,
};
pub use storage::{AppStorage, FileStore, KeyValueStore, MemoryStore, StorageError, StorageKey};
pub use store::{AppState, StoreEvent, WaterStore};
pub use widget::{
    NoopBridge, SharedRegion, SharedRegionBridge, SharedWidgetState, TimelineEntry, WidgetBridge,
    WidgetChange, WidgetIntent, WidgetSnapshot, SHARED_REGION_KEY,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
