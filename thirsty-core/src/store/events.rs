use std::fmt;
use std::str::FromStr;

use crate::models::{DailyRecord, UserSettings};

/// Lifecycle state of the application process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Active,
    Inactive,
    Background,
}

impl AppState {
    /// True for a transition that brings the application back to the
    /// foreground.
    pub fn is_resume(from: AppState, to: AppState) -> bool {
        matches!(from, AppState::Inactive | AppState::Background) && to == AppState::Active
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppState::Active => write!(f, "active"),
            AppState::Inactive => write!(f, "inactive"),
            AppState::Background => write!(f, "background"),
        }
    }
}

impl FromStr for AppState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AppState::Active),
            "inactive" => Ok(AppState::Inactive),
            "background" => Ok(AppState::Background),
            _ => Err(format!(
                "Invalid app state '{}'. Valid options: active, inactive, background",
                s
            )),
        }
    }
}

/// Change notifications emitted by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// `load_data` finished
    Loaded,
    /// The stored record belonged to an earlier day and was replaced
    DayRolledOver { from: String, to: String },
    /// A widget-side change was folded into today's record
    WidgetReconciled { delta: i64, consumed: u32 },
    RecordChanged(DailyRecord),
    SettingsChanged(UserSettings),
    /// Today's consumption reached the goal for the first time this session
    GoalReached { consumed: u32, goal: u32 },
}
