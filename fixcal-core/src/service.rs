//! Seams between the sync orchestration and the outside world.
//!
//! The orchestrator is handed implementations of these traits and never
//! learns how the underlying HTTP clients were built or how trust was
//! established. Credential acquisition stays entirely behind `CalendarApi`.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::FixcalResult;
use crate::event::{CalendarEvent, CalendarInfo, ExistingEvent};
use crate::fixture::Fixture;
use crate::window::SyncWindow;

/// Fetches a team's scheduled matches for a bounded future date window.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    /// Fetch fixtures for `team_id` with kickoff in `[from, to]`.
    /// The result is finite and order-irrelevant.
    async fn upcoming_fixtures(
        &self,
        team_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> FixcalResult<Vec<Fixture>>;
}

/// An authenticated handle to the destination calendar service.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// List the calendars visible to the caller's credentials.
    async fn list_calendars(&self) -> FixcalResult<Vec<CalendarInfo>>;

    /// Create a calendar. Not idempotent: calling this twice creates two
    /// calendars, so callers go through the resolver's zero-match branch.
    async fn create_calendar(
        &self,
        name: &str,
        timezone: &str,
        description: &str,
    ) -> FixcalResult<CalendarInfo>;

    /// List events on `calendar_id` within the window.
    async fn list_events(
        &self,
        calendar_id: &str,
        window: &SyncWindow,
    ) -> FixcalResult<Vec<ExistingEvent>>;

    /// Create one event, returning the service-assigned event id.
    async fn create_event(&self, calendar_id: &str, event: &CalendarEvent) -> FixcalResult<String>;

    /// Grant `email` write access to the calendar.
    async fn share_calendar(&self, calendar_id: &str, email: &str) -> FixcalResult<()>;
}
