//! The application's state store.
//!
//! [`WaterStore`] is the single source of truth for today's record, settings
//! and history while the application runs. It is owned by the composition
//! root and borrowed mutably for every mutation, so mutations are applied in
//! call order.
//!
//! After each change to today's record the store, in order:
//! 1. persists the record
//! 2. fires the goal-reached event if the goal was reached for the first time
//! 3. pushes totals to the widget, unless the change came from the widget
//!
//! Settings changes are persisted and pushed as well, since the goal shown
//! by the widget may have changed.
//!
//! Subscribers registered with [`WaterStore::subscribe`] receive a
//! [`StoreEvent`] for every change.

mod events;

pub use events::{AppState, StoreEvent};

use crate::clock::{Clock, SystemClock};
use crate::models::{
    parse_clock_time, DailyRecord, GlassStyle, History, SettingsError, UserSettings, WaterEntry,
    WeeklySummary,
};
use crate::storage::{AppStorage, KeyValueStore};
use crate::widget::WidgetBridge;

type Listener = Box<dyn FnMut(&StoreEvent)>;

pub struct WaterStore<S, B, C = SystemClock> {
    storage: AppStorage<S>,
    bridge: B,
    clock: C,
    today_record: DailyRecord,
    settings: UserSettings,
    history: History,
    is_loading: bool,
    show_goal_reached: bool,
    /// One-shot: the celebration has fired (or was already due at load)
    has_shown_goal_reached: bool,
    /// One-shot: the next record change came from the widget, don't echo it
    skip_next_widget_sync: bool,
    app_state: AppState,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore, B: WidgetBridge, C: Clock> WaterStore<S, B, C> {
    /// Creates a store holding defaults. Call [`load_data`](Self::load_data)
    /// before use.
    pub fn new(storage: AppStorage<S>, bridge: B, clock: C) -> Self {
        let settings = UserSettings::default();
        let today_record = DailyRecord::new(clock.today_string(), settings.daily_goal);

        Self {
            storage,
            bridge,
            clock,
            today_record,
            settings,
            history: History::new(),
            is_loading: true,
            show_goal_reached: false,
            has_shown_goal_reached: false,
            skip_next_widget_sync: false,
            app_state: AppState::Active,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn today_record(&self) -> &DailyRecord {
        &self.today_record
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn show_goal_reached(&self) -> bool {
        self.show_goal_reached
    }

    pub fn app_state(&self) -> AppState {
        self.app_state
    }

    pub fn weekly_summary(&self) -> WeeklySummary {
        WeeklySummary::compute(&self.today_record, &self.history)
    }

    /// Loads settings, today's record (rolling over a stale day) and history,
    /// then reconciles with the widget.
    ///
    /// Safe to call repeatedly; with no widget change in between, a second
    /// call leaves the record and history as they were.
    pub fn load_data(&mut self) {
        self.is_loading = true;

        let today = self.clock.today_string();
        let settings = self.storage.load_settings();
        let load = self.storage.load_today_record(&today, settings.daily_goal);
        // Read after the rollover so an archived day is already included.
        let history = self.storage.load_history();

        let mut record = load.record;
        let reconciled = self.reconcile(&mut record);

        self.settings = settings;
        self.history = history;
        self.today_record = record;

        if let Some(from) = load.rolled_over_from {
            self.has_shown_goal_reached = false;
            self.show_goal_reached = false;
            self.emit(StoreEvent::DayRolledOver { from, to: today });
        }
        // Already reached before this session: don't celebrate again.
        if self.today_record.consumed >= self.settings.daily_goal {
            self.has_shown_goal_reached = true;
        }

        self.is_loading = false;
        if let Some(delta) = reconciled {
            self.emit(StoreEvent::WidgetReconciled {
                delta,
                consumed: self.today_record.consumed,
            });
        }
        self.commit_record();
        self.emit(StoreEvent::Loaded);
    }

    /// Folds a widget-side change into today's record. Returns the delta
    /// applied, if any.
    pub fn sync_from_widget(&mut self) -> Option<i64> {
        let mut record = self.today_record.clone();
        let delta = self.reconcile(&mut record)?;

        self.today_record = record;
        self.emit(StoreEvent::WidgetReconciled {
            delta,
            consumed: self.today_record.consumed,
        });
        self.commit_record();
        Some(delta)
    }

    /// Records a lifecycle transition. Returning to the foreground
    /// reconciles with the widget, or reloads everything if the day changed
    /// while the application was away. Returns true if that happened.
    pub fn handle_app_state_change(&mut self, next: AppState) -> bool {
        let previous = std::mem::replace(&mut self.app_state, next);
        if !AppState::is_resume(previous, next) {
            return false;
        }

        if self.today_record.date != self.clock.today_string() {
            self.load_data();
        } else {
            self.sync_from_widget();
        }
        true
    }

    /// Logs a drink of `amount` millilitres.
    pub fn add_water(&mut self, amount: u32) -> &DailyRecord {
        if amount > 0 {
            self.today_record.add(amount, self.clock.now());
            self.commit_record();
        }
        &self.today_record
    }

    /// Logs a removal. `consumed` floors at zero; the entry keeps the full
    /// amount.
    pub fn remove_water(&mut self, amount: u32) -> &DailyRecord {
        if amount > 0 {
            self.today_record.remove(amount, self.clock.now());
            self.commit_record();
        }
        &self.today_record
    }

    /// Undoes the most recent entry. No-op on an empty log.
    pub fn remove_last_entry(&mut self) -> Option<WaterEntry> {
        let removed = self.today_record.remove_last()?;
        self.commit_record();
        Some(removed)
    }

    /// Sets the goal in settings and on today's record together. Pushes
    /// totals once.
    pub fn set_daily_goal(&mut self, goal: u32) {
        self.settings.daily_goal = goal;
        self.today_record.goal = goal;
        self.storage.save_settings(&self.settings);
        self.emit(StoreEvent::SettingsChanged(self.settings.clone()));
        self.commit_record();
    }

    pub fn toggle_notifications(&mut self, enabled: bool) {
        self.settings.notifications_enabled = enabled;
        self.commit_settings();
    }

    pub fn set_notification_interval(&mut self, minutes: u32) {
        self.settings.notification_interval = minutes;
        self.commit_settings();
    }

    pub fn set_quiet_hours(&mut self, start: &str, end: &str) -> Result<(), SettingsError> {
        let start = parse_clock_time(start)?;
        let end = parse_clock_time(end)?;
        self.settings.quiet_hours_start = start;
        self.settings.quiet_hours_end = end;
        self.commit_settings();
        Ok(())
    }

    pub fn set_glass_style(&mut self, style: GlassStyle) {
        self.settings.glass_style = style;
        self.commit_settings();
    }

    /// Starts today over at the current goal and re-arms the celebration.
    pub fn reset_today(&mut self) {
        self.has_shown_goal_reached = false;
        self.today_record = DailyRecord::new(self.clock.today_string(), self.settings.daily_goal);
        self.commit_record();
    }

    pub fn dismiss_goal_reached(&mut self) {
        self.show_goal_reached = false;
    }

    /// Deletes every stored record and returns to a fresh-install state.
    pub fn clear_all_data(&mut self) {
        self.storage.clear_all_data();
        self.settings = UserSettings::default();
        self.history = History::new();
        self.has_shown_goal_reached = false;
        self.show_goal_reached = false;
        self.today_record = DailyRecord::new(self.clock.today_string(), self.settings.daily_goal);
        self.emit(StoreEvent::SettingsChanged(self.settings.clone()));
        self.commit_record();
    }

    fn reconcile(&mut self, record: &mut DailyRecord) -> Option<i64> {
        let change = self.bridge.pull_pending_change()?;
        if change.consumed == record.consumed {
            return None;
        }

        tracing::info!(
            "Widget sync: widget has {}, app has {}",
            change.consumed,
            record.consumed
        );
        let delta = record.adjust_to(change.consumed, self.clock.now())?;
        self.skip_next_widget_sync = true;
        Some(delta)
    }

    fn commit_record(&mut self) {
        self.storage.save_today_record(&self.today_record);

        if self.today_record.consumed >= self.settings.daily_goal && !self.has_shown_goal_reached
        {
            self.has_shown_goal_reached = true;
            self.show_goal_reached = true;
            tracing::info!("Daily goal reached: {} ml", self.today_record.consumed);
            self.emit(StoreEvent::GoalReached {
                consumed: self.today_record.consumed,
                goal: self.settings.daily_goal,
            });
        }

        if self.skip_next_widget_sync {
            self.skip_next_widget_sync = false;
            tracing::debug!("Skipping widget sync; value came from the widget");
        } else {
            self.bridge
                .push_totals(self.today_record.consumed, self.settings.daily_goal);
        }

        self.emit(StoreEvent::RecordChanged(self.today_record.clone()));
    }

    fn commit_settings(&mut self) {
        self.storage.save_settings(&self.settings);
        self.emit(StoreEvent::SettingsChanged(self.settings.clone()));
        self.bridge
            .push_totals(self.today_record.consumed, self.settings.daily_goal);
    }

    fn emit(&mut self, event: StoreEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::{FileStore, MemoryStore, StorageKey};
    use crate::widget::{
        NoopBridge, SharedRegion, SharedRegionBridge, WidgetChange, WidgetIntent,
    };
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Shared-region bridge that also records every push.
    struct RecordingBridge {
        inner: SharedRegionBridge<MemoryStore, FixedClock>,
        pushes: Rc<RefCell<Vec<(u32, u32)>>>,
    }

    impl WidgetBridge for RecordingBridge {
        fn push_totals(&mut self, consumed: u32, goal: u32) {
            self.pushes.borrow_mut().push((consumed, goal));
            self.inner.push_totals(consumed, goal);
        }

        fn pull_pending_change(&mut self) -> Option<WidgetChange> {
            self.inner.pull_pending_change()
        }
    }

    struct Harness {
        store: WaterStore<MemoryStore, RecordingBridge, FixedClock>,
        app_kv: MemoryStore,
        region: SharedRegion<MemoryStore>,
        clock: FixedClock,
        pushes: Rc<RefCell<Vec<(u32, u32)>>>,
    }

    fn harness() -> Harness {
        harness_with(MemoryStore::new(), MemoryStore::new())
    }

    fn harness_with(app_kv: MemoryStore, shared_kv: MemoryStore) -> Harness {
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
        let pushes = Rc::new(RefCell::new(Vec::new()));
        let bridge = RecordingBridge {
            inner: SharedRegionBridge::new(SharedRegion::new(shared_kv.clone()), clock.clone()),
            pushes: pushes.clone(),
        };
        let store = WaterStore::new(AppStorage::new(app_kv.clone()), bridge, clock.clone());
        Harness {
            store,
            app_kv,
            region: SharedRegion::new(shared_kv),
            clock,
            pushes,
        }
    }

    fn stored_record(kv: &MemoryStore, date: &str, consumed: u32) {
        let mut record = DailyRecord::new(date, 2000);
        if consumed > 0 {
            record.add(consumed, chrono::Utc::now());
        }
        AppStorage::new(kv).save_today_record(&record);
    }

    fn date_for(day: i64) -> String {
        let base = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        (base + chrono::Duration::days(day))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn test_fresh_install_scenario() {
        let mut h = harness();
        h.store.load_data();

        let record = h.store.today_record();
        assert_eq!(record.date, "2026-02-03");
        assert_eq!(record.consumed, 0);
        assert_eq!(record.goal, 2000);
        assert!(record.entries.is_empty());
        assert!(!h.store.is_loading());

        h.store.add_water(250);
        assert_eq!(h.store.today_record().consumed, 250);
        assert_eq!(h.store.today_record().entries.len(), 1);
        assert_eq!(h.store.today_record().entries[0].amount, 250);

        h.store.remove_water(250);
        assert_eq!(h.store.today_record().consumed, 0);
    }

    #[test]
    fn test_consumed_never_negative() {
        let mut h = harness();
        h.store.load_data();

        let ops: [(bool, u32); 8] = [
            (true, 100),
            (false, 300),
            (true, 50),
            (false, 50),
            (false, 1),
            (true, 700),
            (false, 2000),
            (true, 1),
        ];
        for (add, amount) in ops {
            if add {
                h.store.add_water(amount);
            } else {
                h.store.remove_water(amount);
            }
        }

        assert_eq!(h.store.today_record().consumed, 1);
        assert_eq!(h.store.today_record().entries.len(), 8);
    }

    #[test]
    fn test_remove_last_entry_reverses_add() {
        let mut h = harness();
        h.store.load_data();
        h.store.add_water(300);
        let before = h.store.today_record().clone();

        h.store.add_water(250);
        let removed = h.store.remove_last_entry().unwrap();

        assert_eq!(removed.amount, 250);
        assert_eq!(h.store.today_record(), &before);
    }

    #[test]
    fn test_remove_last_entry_empty_is_noop() {
        let mut h = harness();
        h.store.load_data();
        let pushes_before = h.pushes.borrow().len();

        assert!(h.store.remove_last_entry().is_none());
        assert_eq!(h.pushes.borrow().len(), pushes_before);
    }

    #[test]
    fn test_mutations_persist_and_push() {
        let mut h = harness();
        h.store.load_data();

        h.store.add_water(500);

        let saved = AppStorage::new(&h.app_kv).load_today_record("2026-02-03", 2000);
        assert_eq!(saved.record.consumed, 500);
        assert_eq!(h.pushes.borrow().last(), Some(&(500, 2000)));
        assert_eq!(h.region.load().unwrap().unwrap().consumed, 500);
    }

    #[test]
    fn test_day_rollover_on_load() {
        let app_kv = MemoryStore::new();
        stored_record(&app_kv, "2026-02-02", 1200);
        let mut h = harness_with(app_kv, MemoryStore::new());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        h.store.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        h.store.load_data();

        let archived = h.store.history().get("2026-02-02").unwrap();
        assert_eq!(archived.consumed, 1200);
        assert_eq!(h.store.today_record().date, "2026-02-03");
        assert_eq!(h.store.today_record().consumed, 0);
        assert!(h.store.today_record().entries.is_empty());
        assert!(events.borrow().contains(&StoreEvent::DayRolledOver {
            from: "2026-02-02".to_string(),
            to: "2026-02-03".to_string(),
        }));
    }

    #[test]
    fn test_history_cap_on_rollover() {
        let app_kv = MemoryStore::new();
        let storage = AppStorage::new(&app_kv);
        for day in 0..30 {
            let mut r = DailyRecord::new(date_for(day), 2000);
            r.consumed = 1000;
            storage.archive_record(r);
        }
        stored_record(&app_kv, &date_for(30), 800);
        let mut h = harness_with(app_kv, MemoryStore::new());

        h.store.load_data();

        let history = h.store.history();
        assert_eq!(history.len(), 30);
        assert_eq!(history.records()[0].date, date_for(30));
        assert!(history.get(&date_for(0)).is_none());
    }

    #[test]
    fn test_reconciliation_on_load() {
        let app_kv = MemoryStore::new();
        stored_record(&app_kv, "2026-02-03", 500);
        let mut h = harness_with(app_kv, MemoryStore::new());
        h.region
            .update(|s| {
                s.consumed = 750;
                s.goal = 2000;
                s.date = "2026-02-03".to_string();
                s.widget_updated = true;
                s.last_widget_amount = 250;
            })
            .unwrap();

        h.store.load_data();

        let record = h.store.today_record();
        assert_eq!(record.consumed, 750);
        assert_eq!(record.entries.len(), 2);
        assert_eq!(record.entries[1].amount, 250);
        // The pulled value is not echoed back to the widget
        assert!(h.pushes.borrow().is_empty());
        assert!(!h.region.load().unwrap().unwrap().widget_updated);
    }

    #[test]
    fn test_skip_next_sync_suppresses_exactly_one_push() {
        let mut h = harness();
        h.region.update_widget_data(250, 2000, &h.clock).unwrap();

        h.store.load_data();
        assert!(h.pushes.borrow().is_empty());

        h.store.add_water(100);
        assert_eq!(*h.pushes.borrow(), vec![(350, 2000)]);
    }

    #[test]
    fn test_reconciliation_lower_widget_value() {
        let app_kv = MemoryStore::new();
        stored_record(&app_kv, "2026-02-03", 1000);
        let mut h = harness_with(app_kv, MemoryStore::new());
        h.region.update_widget_data(1000, 2000, &h.clock).unwrap();
        WidgetIntent::RemoveWater.perform(&h.region, &h.clock).unwrap();

        h.store.load_data();

        assert_eq!(h.store.today_record().consumed, 750);
        assert_eq!(h.store.today_record().last_entry().unwrap().amount, -250);
    }

    #[test]
    fn test_load_data_is_idempotent() {
        let app_kv = MemoryStore::new();
        stored_record(&app_kv, "2026-02-02", 900);
        let mut h = harness_with(app_kv, MemoryStore::new());
        h.region.update_widget_data(400, 2000, &h.clock).unwrap();

        h.store.load_data();
        let record = h.store.today_record().clone();
        let history = h.store.history().clone();

        h.store.load_data();

        assert_eq!(h.store.today_record(), &record);
        assert_eq!(h.store.history(), &history);
    }

    #[test]
    fn test_stale_region_does_not_leak_into_today() {
        let mut h = harness();
        h.region.update_widget_data(1800, 2000, &h.clock).unwrap();
        h.clock.advance_days(1);

        h.store.load_data();

        assert_eq!(h.store.today_record().consumed, 0);
        assert!(h.store.today_record().entries.is_empty());
    }

    #[test]
    fn test_stale_region_keeps_todays_total() {
        let app_kv = MemoryStore::new();
        stored_record(&app_kv, "2026-02-03", 500);
        let mut h = harness_with(app_kv, MemoryStore::new());
        h.clock.advance_days(-1);
        h.region.update_widget_data(1800, 2000, &h.clock).unwrap();
        h.clock.advance_days(1);

        h.store.load_data();

        assert_eq!(h.store.today_record().consumed, 500);
        assert_eq!(h.store.today_record().entries.len(), 1);
        let state = h.region.load().unwrap().unwrap();
        assert_eq!(state.date, "2026-02-03");
        assert_eq!(state.consumed, 500);
    }

    #[test]
    fn test_settings_merge_on_load() {
        let app_kv = MemoryStore::new();
        app_kv
            .set(
                StorageKey::Settings.as_str(),
                r#"{"dailyGoal": 2500, "notificationsEnabled": false, "notificationInterval": 30}"#,
            )
            .unwrap();
        let mut h = harness_with(app_kv, MemoryStore::new());

        h.store.load_data();

        assert_eq!(h.store.settings().daily_goal, 2500);
        assert_eq!(h.store.settings().glass_style, GlassStyle::Classic);
        assert_eq!(h.store.settings().quiet_hours_start, "22:00");
        assert_eq!(h.store.today_record().goal, 2500);
    }

    #[test]
    fn test_goal_reached_fires_once() {
        let mut h = harness();
        h.store.load_data();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        h.store.subscribe(move |e| {
            if matches!(e, StoreEvent::GoalReached { .. }) {
                *sink.borrow_mut() += 1;
            }
        });

        h.store.add_water(1000);
        assert!(!h.store.show_goal_reached());
        h.store.add_water(1000);
        assert!(h.store.show_goal_reached());
        h.store.dismiss_goal_reached();
        h.store.add_water(250);
        h.store.remove_water(1000);
        h.store.add_water(1000);

        assert_eq!(*count.borrow(), 1);
        assert!(!h.store.show_goal_reached());

        h.store.reset_today();
        h.store.add_water(2000);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_goal_already_reached_at_load_does_not_fire() {
        let app_kv = MemoryStore::new();
        stored_record(&app_kv, "2026-02-03", 2200);
        let mut h = harness_with(app_kv, MemoryStore::new());

        h.store.load_data();
        h.store.add_water(100);

        assert!(!h.store.show_goal_reached());
    }

    #[test]
    fn test_settings_change_does_not_rearm_goal() {
        let mut h = harness();
        h.store.load_data();
        h.store.add_water(2000);
        h.store.dismiss_goal_reached();

        h.store.set_daily_goal(3000);
        h.store.add_water(1000);

        assert!(!h.store.show_goal_reached());
    }

    #[test]
    fn test_set_daily_goal_updates_record_and_settings() {
        let mut h = harness();
        h.store.load_data();
        h.store.add_water(500);

        h.store.set_daily_goal(2500);

        assert_eq!(h.store.settings().daily_goal, 2500);
        assert_eq!(h.store.today_record().goal, 2500);
        assert_eq!(AppStorage::new(&h.app_kv).load_settings().daily_goal, 2500);
        assert_eq!(h.pushes.borrow().last(), Some(&(500, 2500)));
    }

    #[test]
    fn test_reset_today() {
        let mut h = harness();
        h.store.load_data();
        h.store.set_daily_goal(1500);
        h.store.add_water(700);

        h.store.reset_today();

        assert_eq!(h.store.today_record(), &DailyRecord::new("2026-02-03", 1500));
        assert_eq!(h.pushes.borrow().last(), Some(&(0, 1500)));
    }

    #[test]
    fn test_settings_mutations_persist() {
        let mut h = harness();
        h.store.load_data();

        h.store.toggle_notifications(true);
        h.store.set_notification_interval(120);
        h.store.set_quiet_hours("23:30", "06:00").unwrap();
        h.store.set_glass_style(GlassStyle::Tumbler);

        let saved = AppStorage::new(&h.app_kv).load_settings();
        assert!(saved.notifications_enabled);
        assert_eq!(saved.notification_interval, 120);
        assert_eq!(saved.quiet_hours_start, "23:30");
        assert_eq!(saved.quiet_hours_end, "06:00");
        assert_eq!(saved.glass_style, GlassStyle::Tumbler);
    }

    #[test]
    fn test_settings_change_pushes_totals() {
        let mut h = harness();
        h.store.load_data();
        h.store.add_water(300);
        let pushes_before = h.pushes.borrow().len();

        h.store.set_glass_style(GlassStyle::Bottle);
        h.store.set_daily_goal(2200);

        assert_eq!(h.pushes.borrow().len(), pushes_before + 2);
        assert_eq!(h.pushes.borrow().last(), Some(&(300, 2200)));
    }

    #[test]
    fn test_invalid_quiet_hours_rejected() {
        let mut h = harness();
        h.store.load_data();

        let result = h.store.set_quiet_hours("late", "06:00");

        assert!(result.is_err());
        assert_eq!(h.store.settings().quiet_hours_start, "22:00");
    }

    #[test]
    fn test_resume_reconciles_widget_change() {
        let mut h = harness();
        h.store.load_data();
        h.store.add_water(500);

        assert!(!h.store.handle_app_state_change(AppState::Background));
        WidgetIntent::AddWater.perform(&h.region, &h.clock).unwrap();
        WidgetIntent::AddWater.perform(&h.region, &h.clock).unwrap();
        let pushes_before = h.pushes.borrow().len();

        assert!(h.store.handle_app_state_change(AppState::Active));

        let record = h.store.today_record();
        assert_eq!(record.consumed, 1000);
        // Two taps fold into a single synthetic entry
        assert_eq!(record.entries.len(), 2);
        assert_eq!(record.entries[1].amount, 500);
        assert_eq!(h.pushes.borrow().len(), pushes_before);
    }

    #[test]
    fn test_resume_without_change_is_quiet() {
        let mut h = harness();
        h.store.load_data();
        h.store.add_water(500);
        h.store.handle_app_state_change(AppState::Inactive);

        h.store.handle_app_state_change(AppState::Active);

        assert_eq!(h.store.today_record().entries.len(), 1);
        assert_eq!(h.store.sync_from_widget(), None);
    }

    #[test]
    fn test_resume_on_new_day_rolls_over() {
        let mut h = harness();
        h.store.load_data();
        h.store.add_water(1500);
        h.store.handle_app_state_change(AppState::Background);
        h.clock.advance_days(1);

        h.store.handle_app_state_change(AppState::Active);

        assert_eq!(h.store.today_record().date, "2026-02-04");
        assert_eq!(h.store.today_record().consumed, 0);
        assert_eq!(h.store.history().get("2026-02-03").unwrap().consumed, 1500);
    }

    #[test]
    fn test_subscribers_receive_changes() {
        let mut h = harness();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        h.store.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        h.store.load_data();
        h.store.add_water(250);
        h.store.set_glass_style(GlassStyle::Bottle);

        let events = events.borrow();
        assert!(events.contains(&StoreEvent::Loaded));
        assert!(events
            .iter()
            .any(|e| matches!(e, StoreEvent::RecordChanged(r) if r.consumed == 250)));
        assert!(events
            .iter()
            .any(|e| matches!(e, StoreEvent::SettingsChanged(s) if s.glass_style == GlassStyle::Bottle)));
    }

    #[test]
    fn test_weekly_summary_includes_today() {
        let app_kv = MemoryStore::new();
        stored_record(&app_kv, "2026-02-02", 2400);
        let mut h = harness_with(app_kv, MemoryStore::new());
        h.store.load_data();
        h.store.add_water(600);

        let summary = h.store.weekly_summary();

        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.total_consumed, 3000);
        assert_eq!(summary.days_reached, 1);
    }

    #[test]
    fn test_clear_all_data() {
        let mut h = harness();
        h.store.load_data();
        h.store.set_daily_goal(3000);
        h.store.add_water(500);

        h.store.clear_all_data();

        assert_eq!(h.store.settings(), &UserSettings::default());
        assert_eq!(h.store.today_record().consumed, 0);
        assert_eq!(AppStorage::new(&h.app_kv).load_settings().daily_goal, 2000);
    }

    #[test]
    fn test_works_without_widget() {
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
        let mut store = WaterStore::new(AppStorage::new(MemoryStore::new()), NoopBridge, clock);

        store.load_data();
        store.add_water(250);
        store.handle_app_state_change(AppState::Background);
        store.handle_app_state_change(AppState::Active);

        assert_eq!(store.today_record().consumed, 250);
    }

    #[test]
    fn test_two_processes_on_disk() {
        let app_dir = TempDir::new().unwrap();
        let shared_dir = TempDir::new().unwrap();
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());

        let open_app = || {
            let bridge = SharedRegionBridge::new(
                SharedRegion::new(FileStore::new(shared_dir.path())),
                clock.clone(),
            );
            let mut store = WaterStore::new(
                AppStorage::new(FileStore::new(app_dir.path())),
                bridge,
                clock.clone(),
            );
            store.load_data();
            store
        };

        let mut app = open_app();
        app.add_water(500);
        drop(app);

        // Widget process taps "+" while the app is closed
        let widget_region = SharedRegion::new(FileStore::new(shared_dir.path()));
        WidgetIntent::AddWater.perform(&widget_region, &clock).unwrap();

        let app = open_app();
        assert_eq!(app.today_record().consumed, 750);
        assert_eq!(app.today_record().entries.len(), 2);
        assert!(!widget_region.load().unwrap().unwrap().widget_updated);
    }
}
