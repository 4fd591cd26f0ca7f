//! Persistence for the application's three records.
//!
//! Every public method here swallows backend failures: the error is logged and
//! an in-memory default is returned (default settings, empty history, a zeroed
//! record). A failed write is skipped and happens again on the next save.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{KeyValueStore, StorageError, StorageKey};
use crate::models::{DailyRecord, History, UserSettings};

/// Result of loading today's record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayLoad {
    pub record: DailyRecord,
    /// Date of the stale record that was replaced, if the day changed
    pub rolled_over_from: Option<String>,
}

impl TodayLoad {
    pub fn rolled_over(&self) -> bool {
        self.rolled_over_from.is_some()
    }
}

/// Typed access to the on-device key-value store.
#[derive(Debug, Clone)]
pub struct AppStorage<S> {
    store: S,
}

impl<S: KeyValueStore> AppStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads settings, filling fields missing from the stored payload with
    /// defaults.
    pub fn load_settings(&self) -> UserSettings {
        match self.read::<UserSettings>(StorageKey::Settings) {
            Ok(Some(settings)) => settings,
            Ok(None) => UserSettings::default(),
            Err(e) => {
                tracing::error!("Error loading settings: {}", e);
                UserSettings::default()
            }
        }
    }

    pub fn save_settings(&self, settings: &UserSettings) {
        if let Err(e) = self.write(StorageKey::Settings, settings) {
            tracing::error!("Error saving settings: {}", e);
        }
    }

    pub fn load_history(&self) -> History {
        match self.read::<History>(StorageKey::History) {
            Ok(Some(history)) => history,
            Ok(None) => History::new(),
            Err(e) => {
                tracing::error!("Error loading history: {}", e);
                History::new()
            }
        }
    }

    /// Loads the stored record for `today`.
    ///
    /// A record from another date is archived into history (only if it has
    /// nonzero consumption) and a fresh record at `goal` is returned instead.
    pub fn load_today_record(&self, today: &str, goal: u32) -> TodayLoad {
        let stored = match self.read::<DailyRecord>(StorageKey::TodayRecord) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("Error loading today record: {}", e);
                None
            }
        };

        let mut rolled_over_from = None;
        if let Some(record) = stored {
            if record.date == today {
                return TodayLoad {
                    record,
                    rolled_over_from: None,
                };
            }

            tracing::info!("Day changed: {} -> {}", record.date, today);
            rolled_over_from = Some(record.date.clone());
            if record.consumed > 0 {
                self.archive_record(record);
            }
        }

        TodayLoad {
            record: DailyRecord::new(today, goal),
            rolled_over_from,
        }
    }

    pub fn save_today_record(&self, record: &DailyRecord) {
        if let Err(e) = self.write(StorageKey::TodayRecord, record) {
            tracing::error!("Error saving today record: {}", e);
        }
    }

    /// Upserts a record into the stored history.
    pub fn archive_record(&self, record: DailyRecord) {
        let mut history = self.load_history();
        let date = record.date.clone();
        history.archive(record);

        match self.write(StorageKey::History, &history) {
            Ok(()) => tracing::debug!("Archived {} ({} days in history)", date, history.len()),
            Err(e) => tracing::error!("Error archiving record: {}", e),
        }
    }

    /// Removes all three records.
    pub fn clear_all_data(&self) {
        for key in StorageKey::ALL {
            if let Err(e) = self.store.remove(key.as_str()) {
                tracing::error!("Error clearing {}: {}", key, e);
            }
        }
    }

    fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(key.as_str())? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Json {
                key: key.to_string(),
                source,
            })
    }

    fn write<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Json {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key.as_str(), &raw)
    }
}
