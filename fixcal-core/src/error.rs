//! Error types for the fixcal ecosystem.

use thiserror::Error;

/// Errors that can occur during a sync run.
#[derive(Error, Debug)]
pub enum FixcalError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Rate limited by the fixture provider")]
    RateLimited { retry_after: Option<u64> },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Found {count} calendars named '{name}', refusing to guess which one to sync into")]
    AmbiguousCalendarName { name: String, count: usize },

    #[error("Failed to create calendar: {0}")]
    CalendarCreationFailed(String),

    #[error("Failed to create event for fixture {fixture_id}: {reason}")]
    EventCreationFailed { fixture_id: u64, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FixcalError {
    /// Transient conditions the next scheduled run recovers from on its own.
    /// Everything else needs operator action before a retry is useful.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FixcalError::ProviderUnavailable(_) | FixcalError::RateLimited { .. }
        )
    }
}

/// Result type alias for fixcal operations.
pub type FixcalResult<T> = Result<T, FixcalError>;
