//! HTTP client for the Google Calendar v3 API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;

use fixcal_core::error::{FixcalError, FixcalResult};
use fixcal_core::event::{CalendarEvent, CalendarInfo, ExistingEvent, parse_external_key};
use fixcal_core::service::CalendarApi;
use fixcal_core::window::SyncWindow;

use crate::session::TokenSource;
use crate::wire::{CalendarListResponse, CalendarResource, EventResource, EventsResponse};

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_SIZE: &str = "250";

/// Private extended property holding the deduplication key.
///
/// A structured field rather than description text: descriptions are
/// user-editable and an edit there must not resurrect duplicates.
pub const FIXTURE_KEY_PROP: &str = "fixtureId";

/// Calendar service client backed by the Google Calendar v3 REST API.
pub struct GoogleCalendarClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Box<dyn TokenSource>,
}

impl GoogleCalendarClient {
    pub fn new(tokens: Box<dyn TokenSource>) -> Self {
        Self::with_base_url(tokens, CALENDAR_API_BASE)
    }

    /// Override the API base URL (tests).
    pub fn with_base_url(tokens: Box<dyn TokenSource>, base_url: &str) -> Self {
        GoogleCalendarClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn status_error(status: StatusCode, body: String) -> FixcalError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FixcalError::AuthenticationFailed(
                format!("calendar service rejected credentials ({status})"),
            ),
            _ => FixcalError::ProviderUnavailable(format!("calendar service {status}: {body}")),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> FixcalResult<T> {
        let token = self.tokens.access_token().await?;

        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| FixcalError::ProviderUnavailable(format!("calendar service: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FixcalError::ProviderUnavailable(format!("invalid response: {e}")))
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> FixcalResult<T> {
        let token = self.tokens.access_token().await?;

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .timeout(REQUEST_TIMEOUT)
            .json(body)
            .send()
            .await
            .map_err(|e| FixcalError::ProviderUnavailable(format!("calendar service: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FixcalError::ProviderUnavailable(format!("invalid response: {e}")))
    }
}

fn existing_from_wire(event: EventResource) -> Option<ExistingEvent> {
    if event.status.as_deref() == Some("cancelled") {
        return None;
    }

    let id = event.id.filter(|id| !id.is_empty())?;
    let external_key = event
        .extended_properties
        .and_then(|p| p.private)
        .and_then(|mut p| p.remove(FIXTURE_KEY_PROP));

    Some(ExistingEvent { id, external_key })
}

fn event_body(event: &CalendarEvent) -> serde_json::Value {
    let mut body = json!({
        "summary": event.summary,
        "description": event.description,
        "start": { "dateTime": event.start.to_rfc3339() },
        "end": { "dateTime": event.end.to_rfc3339() },
        "extendedProperties": {
            "private": { FIXTURE_KEY_PROP: event.external_key }
        },
    });

    if let Some(location) = &event.location {
        body["location"] = json!(location);
    }

    body
}

#[async_trait]
impl CalendarApi for GoogleCalendarClient {
    async fn list_calendars(&self) -> FixcalResult<Vec<CalendarInfo>> {
        let url = format!("{}/users/me/calendarList", self.base_url);
        let mut calendars = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("maxResults", PAGE_SIZE.to_string())];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let page: CalendarListResponse = self.get_json(&url, &query).await?;

            for entry in page.items.unwrap_or_default() {
                let Some(id) = entry.id.filter(|id| !id.is_empty()) else {
                    continue;
                };
                let name = entry
                    .summary
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "(unnamed)".to_string());
                calendars.push(CalendarInfo { id, name });
            }

            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        debug!(count = calendars.len(), "listed calendars");
        Ok(calendars)
    }

    async fn create_calendar(
        &self,
        name: &str,
        timezone: &str,
        description: &str,
    ) -> FixcalResult<CalendarInfo> {
        let url = format!("{}/calendars", self.base_url);
        let body = json!({
            "summary": name,
            "timeZone": timezone,
            "description": description,
        });

        let created: CalendarResource =
            self.post_json(&url, &body).await.map_err(|e| match e {
                e @ FixcalError::AuthenticationFailed(_) => e,
                other => FixcalError::CalendarCreationFailed(other.to_string()),
            })?;

        Ok(CalendarInfo {
            id: created.id,
            name: created.summary.unwrap_or_else(|| name.to_string()),
        })
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        window: &SyncWindow,
    ) -> FixcalResult<Vec<ExistingEvent>> {
        let url = format!("{}/calendars/{}/events", self.base_url, calendar_id);
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("timeMin", window.start.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("timeMax", window.end.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("singleEvents", "true".to_string()),
                ("maxResults", PAGE_SIZE.to_string()),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let page: EventsResponse = self.get_json(&url, &query).await?;
            events.extend(page.items.unwrap_or_default().into_iter().filter_map(existing_from_wire));

            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        debug!(count = events.len(), calendar = calendar_id, "listed events in window");
        Ok(events)
    }

    async fn create_event(&self, calendar_id: &str, event: &CalendarEvent) -> FixcalResult<String> {
        let url = format!("{}/calendars/{}/events", self.base_url, calendar_id);

        let created: EventResource = self
            .post_json(&url, &event_body(event))
            .await
            .map_err(|e| FixcalError::EventCreationFailed {
                fixture_id: parse_external_key(&event.external_key).unwrap_or_default(),
                reason: e.to_string(),
            })?;

        Ok(created.id.unwrap_or_default())
    }

    async fn share_calendar(&self, calendar_id: &str, email: &str) -> FixcalResult<()> {
        let url = format!("{}/calendars/{}/acl", self.base_url, calendar_id);
        let body = json!({
            "role": "writer",
            "scope": { "type": "user", "value": email },
        });

        let _: serde_json::Value = self.post_json(&url, &body).await?;
        debug!(calendar = calendar_id, %email, "shared calendar");
        Ok(())
    }
}
