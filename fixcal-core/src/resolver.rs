//! Destination calendar resolution by display name.

use tracing::{info, warn};

use crate::error::{FixcalError, FixcalResult};
use crate::event::{CalendarHandle, CalendarInfo};
use crate::service::CalendarApi;

/// Outcome of matching a configured name against the calendar listing.
#[derive(Debug, Clone, PartialEq)]
pub enum NameMatch {
    None,
    One(CalendarInfo),
    Many(usize),
}

/// Exact, case-sensitive match of `name` against the listing.
pub fn match_name(calendars: &[CalendarInfo], name: &str) -> NameMatch {
    let mut hits = calendars.iter().filter(|c| c.name == name);
    match (hits.next(), hits.next()) {
        (None, _) => NameMatch::None,
        (Some(one), None) => NameMatch::One(one.clone()),
        (Some(_), Some(_)) => NameMatch::Many(2 + hits.count()),
    }
}

/// Find the destination calendar, creating it when absent.
///
/// More than one calendar with the configured name is a configuration error:
/// guessing could write events into someone's wrong calendar, so nothing is
/// mutated and the run aborts.
pub async fn resolve_calendar<A: CalendarApi + ?Sized>(
    api: &A,
    name: &str,
    timezone: &str,
    description: &str,
) -> FixcalResult<CalendarHandle> {
    let calendars = api.list_calendars().await?;

    match match_name(&calendars, name) {
        NameMatch::One(info) => {
            info!(calendar = %name, id = %info.id, "found existing calendar");
            Ok(CalendarHandle {
                id: info.id,
                name: info.name,
                created: false,
            })
        }
        NameMatch::Many(count) => Err(FixcalError::AmbiguousCalendarName {
            name: name.to_string(),
            count,
        }),
        NameMatch::None => {
            warn!(calendar = %name, "calendar not found, creating it");
            let info = api
                .create_calendar(name, timezone, description)
                .await
                .map_err(|e| match e {
                    e @ (FixcalError::CalendarCreationFailed(_)
                    | FixcalError::AuthenticationFailed(_)) => e,
                    other => FixcalError::CalendarCreationFailed(other.to_string()),
                })?;
            Ok(CalendarHandle {
                id: info.id,
                name: info.name,
                created: true,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FixcalResult;
    use crate::event::{CalendarEvent, ExistingEvent};
    use crate::window::SyncWindow;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn cal(id: &str, name: &str) -> CalendarInfo {
        CalendarInfo {
            id: id.into(),
            name: name.into(),
        }
    }

    #[test]
    fn match_name_is_exact_and_case_sensitive() {
        let listing = vec![cal("a", "Barcelona FC Games"), cal("b", "barcelona fc games")];
        assert_eq!(
            match_name(&listing, "Barcelona FC Games"),
            NameMatch::One(cal("a", "Barcelona FC Games"))
        );
        assert_eq!(match_name(&listing, "Barcelona"), NameMatch::None);
    }

    #[test]
    fn match_name_counts_duplicates() {
        let listing = vec![cal("a", "X"), cal("b", "X"), cal("c", "X"), cal("d", "Y")];
        assert_eq!(match_name(&listing, "X"), NameMatch::Many(3));
    }

    /// Calendar service stub that records create calls.
    struct StubApi {
        listing: Vec<CalendarInfo>,
        created: Mutex<Vec<String>>,
    }

    impl StubApi {
        fn new(listing: Vec<CalendarInfo>) -> Self {
            StubApi {
                listing,
                created: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CalendarApi for StubApi {
        async fn list_calendars(&self) -> FixcalResult<Vec<CalendarInfo>> {
            Ok(self.listing.clone())
        }

        async fn create_calendar(
            &self,
            name: &str,
            _timezone: &str,
            _description: &str,
        ) -> FixcalResult<CalendarInfo> {
            self.created.lock().unwrap().push(name.to_string());
            Ok(cal("new-id", name))
        }

        async fn list_events(
            &self,
            _calendar_id: &str,
            _window: &SyncWindow,
        ) -> FixcalResult<Vec<ExistingEvent>> {
            Ok(Vec::new())
        }

        async fn create_event(
            &self,
            _calendar_id: &str,
            _event: &CalendarEvent,
        ) -> FixcalResult<String> {
            Ok("event-id".into())
        }

        async fn share_calendar(&self, _calendar_id: &str, _email: &str) -> FixcalResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn existing_calendar_is_returned_without_mutation() {
        let api = StubApi::new(vec![cal("id-1", "X")]);
        let handle = resolve_calendar(&api, "X", "UTC", "").await.unwrap();

        assert_eq!(handle.id, "id-1");
        assert!(!handle.created);
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_calendar_is_created_exactly_once() {
        let api = StubApi::new(Vec::new());
        let handle = resolve_calendar(&api, "X", "Europe/Madrid", "synced by fixcal")
            .await
            .unwrap();

        assert_eq!(handle.id, "new-id");
        assert!(handle.created);
        assert_eq!(*api.created.lock().unwrap(), vec!["X".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_names_abort_without_creating() {
        let api = StubApi::new(vec![cal("a", "X"), cal("b", "X")]);
        let err = resolve_calendar(&api, "X", "UTC", "").await.unwrap_err();

        match err {
            FixcalError::AmbiguousCalendarName { name, count } => {
                assert_eq!(name, "X");
                assert_eq!(count, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(api.created.lock().unwrap().is_empty());
    }
}
