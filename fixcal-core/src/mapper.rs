//! Fixture to calendar event mapping.
//!
//! The mapping is pure and deterministic: identical fixtures must always
//! yield identical events, or the reconciler's idempotence guarantee breaks.

use chrono::Duration;

use crate::event::{CalendarEvent, external_key};
use crate::fixture::Fixture;

/// Providers rarely publish match duration, so every event gets this fixed
/// length.
pub const MATCH_DURATION_HOURS: i64 = 2;

/// Summary label used when the provider omits the competition name.
const FALLBACK_COMPETITION: &str = "Football";

/// Map a fixture to the calendar event that represents it.
pub fn map_fixture(fixture: &Fixture) -> CalendarEvent {
    let competition = fixture
        .competition
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(FALLBACK_COMPETITION);

    let summary = format!(
        "{} vs {} ({})",
        fixture.home_team, fixture.away_team, competition
    );

    let mut description = format!("{} vs {}", fixture.home_team, fixture.away_team);
    if let Some(c) = fixture.competition.as_deref().filter(|c| !c.is_empty()) {
        description.push_str(&format!("\nCompetition: {c}"));
    }
    if let Some(matchday) = fixture.matchday {
        description.push_str(&format!("\nMatchday: {matchday}"));
    }

    CalendarEvent {
        summary,
        description,
        start: fixture.kickoff,
        end: fixture.kickoff + Duration::hours(MATCH_DURATION_HOURS),
        location: fixture
            .venue
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        external_key: external_key(fixture.id),
    }
}
