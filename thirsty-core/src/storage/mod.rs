//! On-device persistence.
//!
//! The application keeps three JSON records in a key-value store:
//! - `thirsty_today_record`: the active [`DailyRecord`](crate::DailyRecord)
//! - `thirsty_settings`: [`UserSettings`](crate::UserSettings)
//! - `thirsty_history`: archived records, most recent first
//!
//! With [`FileStore`] each key is a `<key>.json` file in the data directory.

mod app_storage;
mod key;
mod kv;

pub use app_storage::{AppStorage, TodayLoad};
pub use key::StorageKey;
pub use kv::{FileStore, KeyValueStore, MemoryStore, StorageError};
