//! The shared region: a flat key-value record both the application and the
//! widget read and write.
//!
//! There is no locking. Each writer does a whole read-modify-write of the
//! record, and the last writer wins. Every write bumps `revision`.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::models::DEFAULT_DAILY_GOAL;
use crate::storage::{KeyValueStore, StorageError};

/// Key of the shared record in its store.
pub const SHARED_REGION_KEY: &str = "group.thirsty";

/// Contents of the shared region.
///
/// Missing keys read as zero values, the way an unset integer or bool reads
/// from a defaults database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedWidgetState {
    pub consumed: i64,
    pub goal: i64,
    /// YYYY-MM-DD of the last write, empty if never set
    pub date: String,
    /// consumed / goal, 0 when goal is not positive
    pub percentage: f64,
    /// Epoch seconds
    pub last_updated: f64,
    /// Set by the widget when it changes the total; cleared by the app on read
    pub widget_updated: bool,
    pub last_widget_amount: i64,
    pub revision: u64,
}

impl SharedWidgetState {
    pub fn recompute_percentage(&mut self) {
        self.percentage = percentage(self.consumed, self.goal);
    }

    /// True when the stored date is set and differs from `today`.
    pub fn is_stale(&self, today: &str) -> bool {
        !self.date.is_empty() && self.date != today
    }

    /// Resets the running total for a new day.
    pub fn roll_over(&mut self, today: &str) {
        self.consumed = 0;
        self.percentage = 0.0;
        self.date = today.to_string();
    }

    /// Goal to display, falling back to the default when unset.
    pub fn display_goal(&self) -> i64 {
        if self.goal > 0 {
            self.goal
        } else {
            i64::from(DEFAULT_DAILY_GOAL)
        }
    }
}

pub fn percentage(consumed: i64, goal: i64) -> f64 {
    if goal > 0 {
        consumed as f64 / goal as f64
    } else {
        0.0
    }
}

/// Typed access to the shared record.
#[derive(Debug, Clone)]
pub struct SharedRegion<S> {
    store: S,
}

impl<S: KeyValueStore> SharedRegion<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns `Ok(None)` if nothing has ever been written.
    pub fn load(&self) -> Result<Option<SharedWidgetState>, StorageError> {
        let Some(raw) = self.store.get(SHARED_REGION_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Json {
                key: SHARED_REGION_KEY.to_string(),
                source,
            })
    }

    /// Read-modify-write. An unwritten or unreadable region starts from zero
    /// values, so any writer can replace a corrupt one. `revision` is bumped
    /// after `f` runs.
    pub fn update<F>(&self, f: F) -> Result<SharedWidgetState, StorageError>
    where
        F: FnOnce(&mut SharedWidgetState),
    {
        let mut state = match self.load() {
            Ok(state) => state.unwrap_or_default(),
            Err(e @ StorageError::Json { .. }) => {
                tracing::warn!("Overwriting unreadable shared region: {}", e);
                SharedWidgetState::default()
            }
            Err(e) => return Err(e),
        };
        f(&mut state);
        state.revision = state.revision.wrapping_add(1);
        self.save(&state)?;
        Ok(state)
    }

    /// Writes the application's totals, stamping today's date.
    ///
    /// The dirty flag is left as it is.
    pub fn update_widget_data(
        &self,
        consumed: u32,
        goal: u32,
        clock: &impl Clock,
    ) -> Result<SharedWidgetState, StorageError> {
        let state = self.update(|state| {
            state.consumed = i64::from(consumed);
            state.goal = i64::from(goal);
            state.last_updated = clock.epoch_seconds();
            state.recompute_percentage();
            state.date = clock.today_string();
        })?;
        request_timeline_reload();
        Ok(state)
    }

    fn save(&self, state: &SharedWidgetState) -> Result<(), StorageError> {
        let raw = serde_json::to_string(state).map_err(|source| StorageError::Json {
            key: SHARED_REGION_KEY.to_string(),
            source,
        })?;
        self.store.set(SHARED_REGION_KEY, &raw)
    }
}

/// Asks the widget surface to redraw from the region.
///
/// The widget binary re-reads the region on every invocation, so nothing is
/// cached that needs invalidating; this only records the request.
pub(crate) fn request_timeline_reload() {
    tracing::debug!("Widget timeline reload requested");
}
