//! A single calendar day's water intake.
//!
//! `consumed` is tracked separately from the entry log. Removals clamp
//! `consumed` at zero while the log keeps the full negative amount, so after a
//! clamp the entries can sum to less than `consumed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::WaterEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    /// Millilitres consumed so far
    pub consumed: u32,
    /// Daily goal in millilitres
    pub goal: u32,
    pub entries: Vec<WaterEntry>,
}

impl DailyRecord {
    /// A fresh, zeroed record.
    pub fn new(date: impl Into<String>, goal: u32) -> Self {
        Self {
            date: date.into(),
            consumed: 0,
            goal,
            entries: Vec::new(),
        }
    }

    /// Logs a drink. `consumed` is not capped at the goal.
    pub fn add(&mut self, amount: u32, at: DateTime<Utc>) -> &WaterEntry {
        self.consumed = self.consumed.saturating_add(amount);
        self.push(WaterEntry::new(i64::from(amount), at))
    }

    /// Logs a removal, flooring `consumed` at zero.
    pub fn remove(&mut self, amount: u32, at: DateTime<Utc>) -> &WaterEntry {
        self.consumed = self.consumed.saturating_sub(amount);
        self.push(WaterEntry::new(-i64::from(amount), at))
    }

    /// Pops the most recent entry and reverses its effect on `consumed`.
    pub fn remove_last(&mut self) -> Option<WaterEntry> {
        let last = self.entries.pop()?;
        self.consumed = clamp_consumed(i64::from(self.consumed) - last.amount);
        Some(last)
    }

    /// Sets `consumed` to an externally observed total, logging the
    /// difference as one synthetic entry. Returns the difference, or `None`
    /// when the totals already agree.
    pub fn adjust_to(&mut self, consumed: u32, at: DateTime<Utc>) -> Option<i64> {
        let diff = i64::from(consumed) - i64::from(self.consumed);
        if diff == 0 {
            return None;
        }
        self.consumed = consumed;
        self.push(WaterEntry::new(diff, at));
        Some(diff)
    }

    /// Signed sum of every entry in the log.
    pub fn entries_total(&self) -> i64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Fraction of the goal reached; 0 when the goal is 0.
    pub fn progress(&self) -> f64 {
        if self.goal == 0 {
            0.0
        } else {
            f64::from(self.consumed) / f64::from(self.goal)
        }
    }

    pub fn is_goal_reached(&self) -> bool {
        self.consumed >= self.goal
    }

    pub fn last_entry(&self) -> Option<&WaterEntry> {
        self.entries.last()
    }

    fn push(&mut self, entry: WaterEntry) -> &WaterEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }
}

fn clamp_consumed(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

impl fmt::Display for DailyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2} L of {:.2} L ({:.0}%)",
            self.date,
            f64::from(self.consumed) / 1000.0,
            f64::from(self.goal) / 1000.0,
            self.progress() * 100.0
        )
    }
}
