mod daily_record;
mod history;
mod settings;
mod water_entry;

pub use daily_record::DailyRecord;
pub use history::{History, WeeklySummary, HISTORY_LIMIT, SUMMARY_DAYS};
pub use settings::{
    parse_clock_time, round_goal, GlassStyle, SettingsError, UserSettings, AMOUNT_OPTIONS,
    DEFAULT_DAILY_GOAL, DEFAULT_NOTIFICATION_INTERVAL, DEFAULT_QUIET_HOURS_END,
    DEFAULT_QUIET_HOURS_START, DEFAULT_TAP_AMOUNT, GOAL_STEP, INTERVAL_OPTIONS, MAX_CUSTOM_AMOUNT,
    MAX_DAILY_GOAL, MIN_DAILY_GOAL,
};
pub use water_entry::WaterEntry;
