//! Provider-neutral calendar types.
//!
//! Providers convert their API responses into these types; the resolver and
//! reconciler work exclusively with them.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Prefix of the deduplication key embedded in every synced event.
pub const EXTERNAL_KEY_PREFIX: &str = "fixture-";

/// The event representation written to the destination calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// Omitted entirely when the fixture has no venue, never an empty string.
    pub location: Option<String>,
    /// Deduplication key, a pure function of the fixture id.
    pub external_key: String,
}

/// One entry from the calendar service's calendar listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarInfo {
    pub id: String,
    pub name: String,
}

/// The resolved destination calendar.
#[derive(Debug, Clone)]
pub struct CalendarHandle {
    pub id: String,
    pub name: String,
    /// Whether this run created the calendar. Creation is rare and
    /// operator-visible, not a steady-state condition.
    pub created: bool,
}

/// An event already present on the destination calendar, reduced to what
/// reconciliation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingEvent {
    pub id: String,
    /// The deduplication key extracted from the event's structured metadata,
    /// if the event carries one. Events created outside fixcal have none.
    pub external_key: Option<String>,
}

/// Derive the deduplication key for a fixture id.
pub fn external_key(fixture_id: u64) -> String {
    format!("{EXTERNAL_KEY_PREFIX}{fixture_id}")
}

/// Recover the fixture id from a deduplication key.
pub fn parse_external_key(key: &str) -> Option<u64> {
    key.strip_prefix(EXTERNAL_KEY_PREFIX)?.parse().ok()
}
