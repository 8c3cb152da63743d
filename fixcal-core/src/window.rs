//! Listing window for reconciliation.

use chrono::{DateTime, Duration, Utc};

use crate::event::CalendarEvent;

/// Safety margin added on both sides of the desired events' span, so
/// near-boundary duplicates survive clock or timezone skew.
const PADDING_HOURS: i64 = 24;

/// The time range of existing events to list before diffing.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SyncWindow {
    /// Union of the desired events' time span, padded on both sides.
    /// Returns `None` when there are no desired events.
    pub fn around(events: &[CalendarEvent]) -> Option<Self> {
        let start = events.iter().map(|e| e.start.with_timezone(&Utc)).min()?;
        let end = events.iter().map(|e| e.end.with_timezone(&Utc)).max()?;

        Some(SyncWindow {
            start: start - Duration::hours(PADDING_HOURS),
            end: end + Duration::hours(PADDING_HOURS),
        })
    }
}
