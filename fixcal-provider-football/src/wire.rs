//! football-data.org v4 raw wire types.
//!
//! Serde shapes for deserializing provider responses. These map to the clean
//! domain types in client.rs; fields the sync never consumes are omitted.

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct MatchesResponse {
    pub matches: Option<Vec<WireMatch>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WireMatch {
    pub id: Option<u64>,
    /// Kickoff as ISO 8601, e.g. "2025-03-15T19:00:00Z"
    #[serde(rename = "utcDate")]
    pub utc_date: Option<String>,
    #[serde(rename = "homeTeam")]
    pub home_team: Option<WireTeam>,
    #[serde(rename = "awayTeam")]
    pub away_team: Option<WireTeam>,
    pub competition: Option<WireCompetition>,
    pub matchday: Option<u32>,
    pub venue: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WireTeam {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WireCompetition {
    pub name: Option<String>,
}
