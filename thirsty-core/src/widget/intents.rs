//! Actions the widget performs on its own, without the application running.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;

use super::shared::{request_timeline_reload, SharedRegion, SharedWidgetState};
use crate::clock::Clock;
use crate::models::DEFAULT_TAP_AMOUNT;
use crate::storage::{KeyValueStore, StorageError};

/// Minutes between scheduled widget refreshes.
pub const TIMELINE_REFRESH_MINUTES: i64 = 15;

/// User-invocable widget intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetIntent {
    /// "+": add the default amount
    AddWater,
    /// "−": remove the default amount, flooring at zero
    RemoveWater,
}

impl WidgetIntent {
    pub fn amount(&self) -> u32 {
        DEFAULT_TAP_AMOUNT
    }

    /// Performs the intent as one read-modify-write of the region.
    pub fn perform<S: KeyValueStore>(
        &self,
        region: &SharedRegion<S>,
        clock: &impl Clock,
    ) -> Result<SharedWidgetState, StorageError> {
        let today = clock.today_string();
        let amount = i64::from(self.amount());

        let state = region.update(|state| {
            let stale = state.date != today;
            if stale {
                state.roll_over(&today);
            }

            match self {
                WidgetIntent::AddWater => {
                    state.consumed += amount;
                    state.last_widget_amount = amount;
                }
                // Nothing to remove on a new day; only the reset is written.
                WidgetIntent::RemoveWater if stale => return,
                WidgetIntent::RemoveWater => {
                    state.consumed = (state.consumed - amount).max(0);
                    state.last_widget_amount = -amount;
                }
            }

            state.last_updated = clock.epoch_seconds();
            state.recompute_percentage();
            state.widget_updated = true;
        })?;

        tracing::debug!(
            "Widget {}: consumed={} goal={}",
            self,
            state.consumed,
            state.goal
        );
        request_timeline_reload();
        Ok(state)
    }
}

impl fmt::Display for WidgetIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetIntent::AddWater => write!(f, "add water"),
            WidgetIntent::RemoveWater => write!(f, "remove water"),
        }
    }
}

/// What the widget draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    pub consumed: i64,
    pub goal: i64,
    pub percentage: f64,
    pub date: String,
}

impl WidgetSnapshot {
    /// Reads the region for display. A stale day shows as zero; the region
    /// itself is not modified.
    pub fn load<S: KeyValueStore>(region: &SharedRegion<S>, clock: &impl Clock) -> Self {
        let state = match region.load() {
            Ok(Some(state)) => state,
            Ok(None) => SharedWidgetState::default(),
            Err(e) => {
                tracing::warn!("Failed to read shared region: {}", e);
                SharedWidgetState::default()
            }
        };

        let today = clock.today_string();
        let goal = state.display_goal();
        if state.is_stale(&today) {
            return Self {
                consumed: 0,
                goal,
                percentage: 0.0,
                date: today,
            };
        }

        Self {
            consumed: state.consumed,
            goal,
            percentage: state.percentage,
            date: state.date,
        }
    }

    pub fn is_goal_reached(&self) -> bool {
        self.consumed >= self.goal
    }

    pub fn consumed_liters(&self) -> String {
        format!("{:.1}", self.consumed as f64 / 1000.0)
    }

    pub fn goal_liters(&self) -> String {
        format!("{:.1}", self.goal as f64 / 1000.0)
    }
}

impl fmt::Display for WidgetSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} L ({:.0}%)",
            self.consumed_liters(),
            self.goal_liters(),
            self.percentage * 100.0
        )?;
        if self.is_goal_reached() {
            write!(f, " - goal reached")?;
        }
        Ok(())
    }
}

/// A single timeline entry with its refresh policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub date: DateTime<Utc>,
    pub data: WidgetSnapshot,
    pub next_refresh: DateTime<Utc>,
}

impl TimelineEntry {
    pub fn load<S: KeyValueStore>(region: &SharedRegion<S>, clock: &impl Clock) -> Self {
        let now = clock.now();
        Self {
            date: now,
            data: WidgetSnapshot::load(region, clock),
            next_refresh: now + Duration::minutes(TIMELINE_REFRESH_MINUTES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn setup() -> (SharedRegion<MemoryStore>, FixedClock) {
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
        (SharedRegion::new(MemoryStore::new()), clock)
    }

    #[test]
    fn test_add_sets_dirty_flag() {
        let (region, clock) = setup();
        region.update_widget_data(500, 2000, &clock).unwrap();

        let state = WidgetIntent::AddWater.perform(&region, &clock).unwrap();

        assert_eq!(state.consumed, 750);
        assert!(state.widget_updated);
        assert_eq!(state.last_widget_amount, 250);
        assert!((state.percentage - 0.375).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_on_unwritten_region() {
        let (region, clock) = setup();

        let state = WidgetIntent::AddWater.perform(&region, &clock).unwrap();

        assert_eq!(state.consumed, 250);
        assert_eq!(state.date, "2026-02-03");
        // No goal pushed yet
        assert_eq!(state.percentage, 0.0);
    }

    #[test]
    fn test_add_on_stale_day_starts_from_zero() {
        let (region, clock) = setup();
        region.update_widget_data(1800, 2000, &clock).unwrap();
        clock.advance_days(1);

        let state = WidgetIntent::AddWater.perform(&region, &clock).unwrap();

        assert_eq!(state.consumed, 250);
        assert_eq!(state.date, "2026-02-04");
    }

    #[test]
    fn test_remove_floors_at_zero() {
        let (region, clock) = setup();
        region.update_widget_data(100, 2000, &clock).unwrap();

        let state = WidgetIntent::RemoveWater.perform(&region, &clock).unwrap();

        assert_eq!(state.consumed, 0);
        assert!(state.widget_updated);
        assert_eq!(state.last_widget_amount, -250);
    }

    #[test]
    fn test_remove_on_stale_day_only_resets() {
        let (region, clock) = setup();
        region.update_widget_data(1800, 2000, &clock).unwrap();
        clock.advance_days(1);

        let state = WidgetIntent::RemoveWater.perform(&region, &clock).unwrap();

        assert_eq!(state.consumed, 0);
        assert_eq!(state.percentage, 0.0);
        assert_eq!(state.date, "2026-02-04");
        assert!(!state.widget_updated);
    }

    #[test]
    fn test_snapshot_hides_stale_total() {
        let (region, clock) = setup();
        region.update_widget_data(1800, 2000, &clock).unwrap();
        clock.advance_days(1);

        let snapshot = WidgetSnapshot::load(&region, &clock);

        assert_eq!(snapshot.consumed, 0);
        assert_eq!(snapshot.date, "2026-02-04");
        // The region itself is untouched
        assert_eq!(region.load().unwrap().unwrap().consumed, 1800);
    }

    #[test]
    fn test_snapshot_of_unwritten_region() {
        let (region, clock) = setup();

        let snapshot = WidgetSnapshot::load(&region, &clock);

        assert_eq!(snapshot.consumed, 0);
        assert_eq!(snapshot.goal, 2000);
        assert_eq!(snapshot.date, "");
    }

    #[test]
    fn test_snapshot_display() {
        let (region, clock) = setup();
        region.update_widget_data(2000, 2000, &clock).unwrap();

        let snapshot = WidgetSnapshot::load(&region, &clock);

        assert_eq!(format!("{}", snapshot), "2.0 / 2.0 L (100%) - goal reached");
    }

    #[test]
    fn test_timeline_refresh_policy() {
        let (region, clock) = setup();

        let entry = TimelineEntry::load(&region, &clock);

        assert_eq!(entry.next_refresh - entry.date, Duration::minutes(15));
    }
}
