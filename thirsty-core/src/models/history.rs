//! Archived daily records.

use serde::{Deserialize, Serialize};

use super::DailyRecord;

/// Maximum number of archived days kept.
pub const HISTORY_LIMIT: usize = 30;

/// Days shown in the weekly summary, today included.
pub const SUMMARY_DAYS: usize = 7;

/// Archived records, most recent first, capped at [`HISTORY_LIMIT`].
///
/// The cap evicts by position: whatever sits at the end of the list after an
/// insert is dropped, regardless of its date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<DailyRecord>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts a record by date. A new date goes to the front; an existing
    /// date is replaced in place. The list is then truncated to the cap.
    pub fn archive(&mut self, record: DailyRecord) {
        match self.0.iter().position(|r| r.date == record.date) {
            Some(index) => self.0[index] = record,
            None => self.0.insert(0, record),
        }
        self.0.truncate(HISTORY_LIMIT);
    }

    pub fn get(&self, date: &str) -> Option<&DailyRecord> {
        self.0.iter().find(|r| r.date == date)
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a DailyRecord;
    type IntoIter = std::slice::Iter<'a, DailyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Stats over today plus the most recent archived days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    /// Today first, then history, at most [`SUMMARY_DAYS`] records
    pub records: Vec<DailyRecord>,
    pub total_consumed: u64,
    /// Average millilitres per listed day
    pub average: f64,
    pub days_reached: usize,
}

impl WeeklySummary {
    pub fn compute(today: &DailyRecord, history: &History) -> Self {
        let records: Vec<DailyRecord> = std::iter::once(today)
            .chain(history.iter())
            .take(SUMMARY_DAYS)
            .cloned()
            .collect();

        let total_consumed: u64 = records.iter().map(|r| u64::from(r.consumed)).sum();
        let average = if records.is_empty() {
            0.0
        } else {
            total_consumed as f64 / records.len() as f64
        };
        let days_reached = records.iter().filter(|r| r.is_goal_reached()).count();

        Self {
            records,
            total_consumed,
            average,
            days_reached,
        }
    }
}
