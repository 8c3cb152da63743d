//! Idempotent fixture-to-event reconciliation.
//!
//! The destination service has no uniqueness constraint on event content, so
//! duplicates are only preventable here: list what already exists in the
//! relevant window, then create exactly the events whose external key is not
//! yet present.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{FixcalError, FixcalResult};
use crate::event::{CalendarEvent, CalendarHandle, ExistingEvent, parse_external_key};
use crate::report::SyncReport;
use crate::service::CalendarApi;
use crate::window::SyncWindow;

/// The create-or-skip partition for one run.
#[derive(Debug, Default)]
pub struct ReconcilePlan {
    pub to_create: Vec<CalendarEvent>,
    pub skipped: usize,
}

impl ReconcilePlan {
    /// Partition `desired` by membership of each external key in
    /// `existing_keys`. Pure; the side effects happen in [`reconcile`].
    pub fn build(desired: Vec<CalendarEvent>, existing_keys: &HashSet<String>) -> Self {
        let mut plan = ReconcilePlan::default();

        for event in desired {
            if existing_keys.contains(&event.external_key) {
                debug!(key = %event.external_key, "event already present, skipping");
                plan.skipped += 1;
            } else {
                plan.to_create.push(event);
            }
        }

        plan
    }
}

/// Collect the external keys present among existing events. Events without a
/// key (created by hand, or by other tools) are invisible to reconciliation.
pub fn existing_keys(events: &[ExistingEvent]) -> HashSet<String> {
    events.iter().filter_map(|e| e.external_key.clone()).collect()
}

/// List the calendar's events in the padded window and create the missing
/// desired events.
///
/// A single creation failure never aborts the batch: it is recorded in the
/// report and the remaining events are still attempted.
pub async fn reconcile<A: CalendarApi + ?Sized>(
    api: &A,
    calendar: &CalendarHandle,
    desired: Vec<CalendarEvent>,
) -> FixcalResult<SyncReport> {
    let mut report = SyncReport::default();

    let Some(window) = SyncWindow::around(&desired) else {
        debug!("no desired events, nothing to reconcile");
        return Ok(report);
    };

    let existing = api.list_events(&calendar.id, &window).await?;
    let keys = existing_keys(&existing);
    debug!(
        existing = existing.len(),
        keyed = keys.len(),
        "listed existing events in window"
    );

    let plan = ReconcilePlan::build(desired, &keys);
    report.skipped = plan.skipped;

    for event in &plan.to_create {
        let fixture_id = parse_external_key(&event.external_key).unwrap_or_default();

        match api.create_event(&calendar.id, event).await {
            Ok(id) => {
                debug!(event_id = %id, summary = %event.summary, "created event");
                report.added += 1;
            }
            Err(e) => {
                let (fixture_id, reason) = match e {
                    FixcalError::EventCreationFailed { fixture_id, reason } => {
                        (fixture_id, reason)
                    }
                    other => (fixture_id, other.to_string()),
                };
                warn!(
                    fixture_id,
                    summary = %event.summary,
                    %reason,
                    "event creation failed, continuing batch"
                );
                report.record_failure(fixture_id, reason);
            }
        }
    }

    Ok(report)
}
