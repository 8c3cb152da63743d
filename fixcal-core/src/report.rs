//! Sync run reporting.

use serde::{Deserialize, Serialize};

/// A single event creation that failed during reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFailure {
    pub fixture_id: u64,
    pub reason: String,
}

/// Aggregate outcome of one sync run.
///
/// Every run ends with one of these, including enough failure detail to
/// diagnose without re-running.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Fixtures returned by the provider for the requested window.
    pub fetched: usize,
    /// Fixtures dropped because kickoff had already passed at run time.
    pub past_skipped: usize,
    /// Events created on the destination calendar.
    pub added: usize,
    /// Desired events already present (matched by external key).
    pub skipped: usize,
    /// Events whose creation failed; the batch continued regardless.
    pub failed: usize,
    pub failures: Vec<EventFailure>,
}

impl SyncReport {
    pub fn record_failure(&mut self, fixture_id: u64, reason: impl Into<String>) {
        self.failed += 1;
        self.failures.push(EventFailure {
            fixture_id,
            reason: reason.into(),
        });
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
