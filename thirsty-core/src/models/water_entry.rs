use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One logged addition or removal of water.
///
/// Amounts are in millilitres; a negative amount records a removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterEntry {
    pub id: String,
    pub amount: i64,
    /// ISO-8601 timestamp
    pub timestamp: String,
}

impl WaterEntry {
    pub fn new(amount: i64, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn is_removal(&self) -> bool {
        self.amount < 0
    }

    /// Parses the stored timestamp, if it is valid RFC 3339.
    pub fn logged_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl fmt::Display for WaterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self
            .logged_at()
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_else(|| self.timestamp.clone());
        write!(f, "{} {:+} ml", time, self.amount)
    }
}
