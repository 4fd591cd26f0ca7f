use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default daily goal in millilitres.
pub const DEFAULT_DAILY_GOAL: u32 = 2000;
/// Amount logged by a single tap, and by each widget intent.
pub const DEFAULT_TAP_AMOUNT: u32 = 250;
/// Default reminder interval in minutes.
pub const DEFAULT_NOTIFICATION_INTERVAL: u32 = 60;
pub const DEFAULT_QUIET_HOURS_START: &str = "22:00";
pub const DEFAULT_QUIET_HOURS_END: &str = "07:00";
/// Preset amounts offered for a custom drink.
pub const AMOUNT_OPTIONS: [u32; 4] = [100, 200, 250, 500];
/// Largest custom amount accepted in one entry.
pub const MAX_CUSTOM_AMOUNT: u32 = 2000;
pub const MIN_DAILY_GOAL: u32 = 1000;
pub const MAX_DAILY_GOAL: u32 = 4000;
/// Goals are chosen in steps of this many millilitres.
pub const GOAL_STEP: u32 = 100;
/// Reminder intervals offered, in minutes.
pub const INTERVAL_OPTIONS: [u32; 3] = [30, 60, 120];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid time '{0}'. Use HH:MM (24h).")]
    InvalidTime(String),

    #[error("Invalid glass style '{0}'. Valid options: classic, tumbler, bottle")]
    InvalidGlassStyle(String),
}

/// How the glass is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlassStyle {
    #[default]
    Classic,
    Tumbler,
    Bottle,
}

impl fmt::Display for GlassStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlassStyle::Classic => write!(f, "classic"),
            GlassStyle::Tumbler => write!(f, "tumbler"),
            GlassStyle::Bottle => write!(f, "bottle"),
        }
    }
}

impl FromStr for GlassStyle {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(GlassStyle::Classic),
            "tumbler" => Ok(GlassStyle::Tumbler),
            "bottle" => Ok(GlassStyle::Bottle),
            _ => Err(SettingsError::InvalidGlassStyle(s.to_string())),
        }
    }
}

/// User preferences, persisted independently of daily records.
///
/// Deserialization fills any missing field from [`UserSettings::default`], so
/// payloads written by older versions load cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    /// Millilitres
    pub daily_goal: u32,
    pub notifications_enabled: bool,
    /// Minutes between reminders
    pub notification_interval: u32,
    /// "HH:MM"
    pub quiet_hours_start: String,
    /// "HH:MM"
    pub quiet_hours_end: String,
    pub glass_style: GlassStyle,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL,
            notifications_enabled: false,
            notification_interval: DEFAULT_NOTIFICATION_INTERVAL,
            quiet_hours_start: DEFAULT_QUIET_HOURS_START.to_string(),
            quiet_hours_end: DEFAULT_QUIET_HOURS_END.to_string(),
            glass_style: GlassStyle::default(),
        }
    }
}

/// Rounds a goal to the nearest step and clamps it to the selectable range.
pub fn round_goal(value: u32) -> u32 {
    let rounded = (value.saturating_add(GOAL_STEP / 2) / GOAL_STEP) * GOAL_STEP;
    rounded.clamp(MIN_DAILY_GOAL, MAX_DAILY_GOAL)
}

/// Validates an `HH:MM` string and returns it normalized to two-digit fields.
pub fn parse_clock_time(value: &str) -> Result<String, SettingsError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| SettingsError::InvalidTime(value.to_string()))
}
