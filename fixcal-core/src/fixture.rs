//! Provider-neutral fixture type.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A single scheduled match, as published by the fixture provider.
///
/// Fixtures are fetched fresh on every sync run and never persisted locally;
/// the destination calendar is the only durable state in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Provider-assigned stable identifier, unique per provider.
    pub id: u64,
    pub home_team: String,
    pub away_team: String,
    /// Absolute kickoff timestamp with offset.
    pub kickoff: DateTime<FixedOffset>,
    pub competition: Option<String>,
    pub matchday: Option<u32>,
    pub venue: Option<String>,
}
