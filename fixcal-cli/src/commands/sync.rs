//! The sync entry point the external scheduler invokes.

use anyhow::Result;
use chrono::{Duration, Utc};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use fixcal_core::error::FixcalResult;
use fixcal_core::mapper::map_fixture;
use fixcal_core::reconcile::reconcile;
use fixcal_core::report::SyncReport;
use fixcal_core::resolver::resolve_calendar;
use fixcal_core::service::{CalendarApi, FixtureSource};

use crate::config::FixcalConfig;
use crate::render;

/// Description attached to a calendar this tool creates.
const CALENDAR_DESCRIPTION: &str = "Football fixtures, synced automatically by fixcal";

pub async fn run(config: &FixcalConfig) -> Result<()> {
    let fixtures = super::fixture_client(config);
    let calendar = super::calendar_client(config)?;

    match run_sync(config, &fixtures, &calendar).await {
        Ok(report) => {
            println!("{}", render::render_report(&report));
            Ok(())
        }
        Err(e) if e.is_retryable() => {
            // Transient condition: end this run cleanly and let the next
            // scheduled invocation try again. No in-process retry loop.
            warn!(error = %e, "sync aborted, next scheduled run will retry");
            println!("{}", format!("Sync postponed: {e}").yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// One full sync pass: resolve the calendar, fetch fixtures, map them to
/// events and reconcile against what the calendar already holds.
pub async fn run_sync<S, A>(
    config: &FixcalConfig,
    fixtures: &S,
    calendar: &A,
) -> FixcalResult<SyncReport>
where
    S: FixtureSource + ?Sized,
    A: CalendarApi + ?Sized,
{
    let handle = resolve_calendar(
        calendar,
        &config.calendar_name,
        &config.timezone,
        CALENDAR_DESCRIPTION,
    )
    .await?;

    if handle.created {
        if let Some(email) = &config.share_with {
            // Best-effort: a failed share still leaves a usable calendar.
            if let Err(e) = calendar.share_calendar(&handle.id, email).await {
                warn!(error = %e, %email, "could not share the new calendar");
            }
        }
        warn!(
            calendar = %handle.name,
            id = %handle.id,
            "created a new calendar; if events are missing from your account, check its sharing"
        );
    }

    let today = Utc::now().date_naive();
    let until = today + Duration::days(config.window_days as i64);
    let fetched = fixtures
        .upcoming_fixtures(config.team_id, today, until)
        .await?;

    // The window starts today, so same-day fixtures that already kicked off
    // can still show up. They are not calendar material.
    let now = Utc::now().fixed_offset();
    let (upcoming, past): (Vec<_>, Vec<_>) =
        fetched.iter().cloned().partition(|f| f.kickoff >= now);

    let desired: Vec<_> = upcoming.iter().map(map_fixture).collect();
    info!(
        fetched = fetched.len(),
        past = past.len(),
        desired = desired.len(),
        calendar = %handle.name,
        "mapped fixtures to events"
    );

    let mut report = reconcile(calendar, &handle, desired).await?;
    report.fetched = fetched.len();
    report.past_skipped = past.len();

    Ok(report)
}
