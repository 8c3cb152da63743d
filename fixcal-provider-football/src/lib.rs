//! football-data.org fixture provider.
//!
//! Implements `fixcal_core::service::FixtureSource` against the v4 API.
//! Wire shapes live in `wire`; the client maps them into clean
//! `fixcal_core::Fixture` values.

pub mod client;
pub mod wire;

pub use client::FootballDataClient;
