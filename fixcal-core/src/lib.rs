//! Core types and logic for the fixcal ecosystem.
//!
//! This crate provides the provider-neutral pieces shared by the fixture
//! adapter, the calendar provider and the CLI:
//! - `Fixture` and `CalendarEvent` domain types
//! - the pure fixture-to-event mapper
//! - calendar resolution by display name
//! - the idempotent reconciler and its `SyncReport`
//! - the `FixtureSource` / `CalendarApi` seams providers implement

pub mod error;
pub mod event;
pub mod fixture;
pub mod mapper;
pub mod reconcile;
pub mod report;
pub mod resolver;
pub mod service;
pub mod window;

pub use error::{FixcalError, FixcalResult};
pub use event::{CalendarEvent, CalendarHandle, CalendarInfo, ExistingEvent};
pub use fixture::Fixture;
pub use report::{EventFailure, SyncReport};
