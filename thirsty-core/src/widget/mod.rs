//! Widget extension support.
//!
//! The widget runs in its own process and shares nothing with the
//! application except the [`SharedRegion`]. The widget side performs
//! [`WidgetIntent`]s and reads [`WidgetSnapshot`]s; the application side talks
//! to the region through a [`WidgetBridge`].
//!
//! # Protocol
//!
//! 1. Every application mutation pushes `consumed`/`goal` to the region.
//! 2. Widget intents change `consumed` and set `widgetUpdated`.
//! 3. On cold start and resume the application pulls the region, clears
//!    `widgetUpdated`, and folds any difference into its own record as one
//!    synthetic entry.
//!
//! Each side resets a region whose `date` is not today before using it.

mod bridge;
mod intents;
mod shared;

pub use bridge::{NoopBridge, SharedRegionBridge, WidgetBridge, WidgetChange};
pub use intents::{TimelineEntry, WidgetIntent, WidgetSnapshot, TIMELINE_REFRESH_MINUTES};
pub use shared::{percentage, SharedRegion, SharedWidgetState, SHARED_REGION_KEY};
