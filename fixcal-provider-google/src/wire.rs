//! Google Calendar v3 raw wire types.
//!
//! Only the response fields the sync consumes are modeled; request bodies
//! are built as JSON values in client.rs.

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct CalendarListResponse {
    pub items: Option<Vec<CalendarListEntry>>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CalendarListEntry {
    pub id: Option<String>,
    pub summary: Option<String>,
}

/// Response of a calendar insert.
#[derive(Debug, Deserialize)]
pub struct CalendarResource {
    pub id: String,
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct EventsResponse {
    pub items: Option<Vec<EventResource>>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct EventResource {
    pub id: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "extendedProperties")]
    pub extended_properties: Option<ExtendedProperties>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ExtendedProperties {
    pub private: Option<HashMap<String, String>>,
}
