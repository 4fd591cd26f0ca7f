//! The application's view of the widget.

use crate::clock::Clock;
use crate::storage::KeyValueStore;

use super::shared::SharedRegion;

/// Totals observed in the shared region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetChange {
    pub consumed: u32,
    pub goal: u32,
    /// The widget changed the total since the application last read it
    pub widget_updated: bool,
    pub last_widget_amount: i64,
    pub revision: u64,
}

/// Capability-checked access to the widget.
///
/// Failures never surface to the caller: a failed push or pull is skipped and
/// happens again on the next mutation or resume.
pub trait WidgetBridge {
    /// Publishes the application's totals and asks the widget to redraw.
    fn push_totals(&mut self, consumed: u32, goal: u32);

    /// Reads the region's totals, clearing the widget's dirty flag.
    ///
    /// Returns `None` when there is no widget, the region has never been
    /// written or could not be read, or it was last written on an earlier
    /// day (it is rolled over to today instead).
    fn pull_pending_change(&mut self) -> Option<WidgetChange>;
}

impl<B: WidgetBridge + ?Sized> WidgetBridge for Box<B> {
    fn push_totals(&mut self, consumed: u32, goal: u32) {
        (**self).push_totals(consumed, goal)
    }

    fn pull_pending_change(&mut self) -> Option<WidgetChange> {
        (**self).pull_pending_change()
    }
}

/// For platforms without a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBridge;

impl WidgetBridge for NoopBridge {
    fn push_totals(&mut self, _consumed: u32, _goal: u32) {}

    fn pull_pending_change(&mut self) -> Option<WidgetChange> {
        None
    }
}

/// Bridge backed by a [`SharedRegion`].
///
/// Remembers the revision it last observed so a change made without the
/// widget's dirty flag can be logged as a conflict. The reconciliation itself
/// does not depend on it.
///
/// The revision is kept in memory only. A bridge starts with none, so the
/// conflict warning can only fire from the second pull of a long-running
/// process (`thirsty watch`), never on a cold start.
#[derive(Debug)]
pub struct SharedRegionBridge<S, C> {
    region: SharedRegion<S>,
    clock: C,
    last_revision: Option<u64>,
}

impl<S: KeyValueStore, C: Clock> SharedRegionBridge<S, C> {
    pub fn new(region: SharedRegion<S>, clock: C) -> Self {
        Self {
            region,
            clock,
            last_revision: None,
        }
    }

    /// Revision seen by the last successful push or pull of this bridge.
    pub fn last_revision(&self) -> Option<u64> {
        self.last_revision
    }
}

impl<S: KeyValueStore, C: Clock> WidgetBridge for SharedRegionBridge<S, C> {
    fn push_totals(&mut self, consumed: u32, goal: u32) {
        match self.region.update_widget_data(consumed, goal, &self.clock) {
            Ok(state) => {
                tracing::debug!("Synced to widget: consumed={} goal={}", consumed, goal);
                self.last_revision = Some(state.revision);
            }
            Err(e) => tracing::warn!("Failed to sync to widget: {}", e),
        }
    }

    fn pull_pending_change(&mut self) -> Option<WidgetChange> {
        let state = match self.region.load() {
            Ok(Some(state)) => state,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to get widget data: {}", e);
                return None;
            }
        };

        if let Some(last) = self.last_revision {
            if state.revision != last && !state.widget_updated {
                tracing::warn!(
                    "Shared region changed without widget flag (revision {} -> {})",
                    last,
                    state.revision
                );
            }
        }

        let today = self.clock.today_string();
        let stale = state.is_stale(&today);
        let widget_updated = state.widget_updated;

        let state = if stale || state.widget_updated {
            let updated = self.region.update(|s| {
                if stale {
                    tracing::info!("Shared region rolled over: {} -> {}", s.date, today);
                    s.roll_over(&today);
                }
                s.widget_updated = false;
            });
            match updated {
                Ok(updated) => updated,
                Err(e) => {
                    tracing::warn!("Failed to clear widget flag: {}", e);
                    return None;
                }
            }
        } else {
            state
        };
        self.last_revision = Some(state.revision);

        // A region from an earlier day says nothing about today's total.
        if stale {
            return None;
        }

        Some(WidgetChange {
            consumed: state.consumed.clamp(0, i64::from(u32::MAX)) as u32,
            goal: state.goal.clamp(0, i64::from(u32::MAX)) as u32,
            widget_updated,
            last_widget_amount: state.last_widget_amount,
            revision: state.revision,
        })
    }
}
