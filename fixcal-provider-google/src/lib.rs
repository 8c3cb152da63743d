//! Google Calendar provider.
//!
//! Implements `fixcal_core::service::CalendarApi` against the Calendar v3
//! REST API with a bearer token. Where the token comes from is behind the
//! `TokenSource` trait: a stored OAuth session maintained on disk, or a
//! token minted externally for unattended runs.

pub mod client;
pub mod session;
pub mod wire;

pub use client::GoogleCalendarClient;
pub use session::{StaticToken, StoredSession, TokenSource};
