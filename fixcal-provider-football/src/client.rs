//! HTTP client for the football-data.org v4 API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::StatusCode;
use tracing::{debug, warn};

use fixcal_core::error::{FixcalError, FixcalResult};
use fixcal_core::fixture::Fixture;
use fixcal_core::service::FixtureSource;

use crate::wire::{MatchesResponse, WireMatch};

const FOOTBALL_DATA_BASE: &str = "https://api.football-data.org/v4";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fixture provider backed by football-data.org.
///
/// The free tier allows 10 requests per minute; one sync run makes exactly
/// one request, so the limit is respected by construction.
#[derive(Debug, Clone)]
pub struct FootballDataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl FootballDataClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, FOOTBALL_DATA_BASE)
    }

    /// Override the API base URL (alternate deployments, tests).
    pub fn with_base_url(api_key: Option<String>, base_url: &str) -> Self {
        FootballDataClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    async fn fetch_matches(
        &self,
        team_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> FixcalResult<MatchesResponse> {
        let url = format!(
            "{}/teams/{}/matches?dateFrom={}&dateTo={}",
            self.base_url,
            team_id,
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d"),
        );
        debug!(%url, "fetching fixtures");

        let mut request = self.http.get(&url).timeout(REQUEST_TIMEOUT);
        if let Some(key) = &self.api_key {
            request = request.header("X-Auth-Token", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FixcalError::ProviderUnavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<MatchesResponse>()
                .await
                .map_err(|e| FixcalError::ProviderUnavailable(format!("invalid response: {e}"))),
            StatusCode::TOO_MANY_REQUESTS => Err(FixcalError::RateLimited {
                retry_after: response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                FixcalError::AuthenticationFailed(
                    "fixture provider rejected the API key".into(),
                ),
            ),
            StatusCode::NOT_FOUND => Err(FixcalError::Config(format!(
                "team {team_id} not found at the fixture provider"
            ))),
            status => Err(FixcalError::ProviderUnavailable(format!(
                "unexpected status {status}"
            ))),
        }
    }
}

/// Map a wire match into a domain fixture.
///
/// Entries without an id or a parsable kickoff are unusable for
/// deduplication and are dropped by the caller, not failed.
fn fixture_from_wire(wire: WireMatch) -> Option<Fixture> {
    let id = wire.id?;
    let kickoff = DateTime::parse_from_rfc3339(wire.utc_date.as_deref()?).ok()?;

    let team_name = |team: Option<crate::wire::WireTeam>| {
        team.and_then(|t| t.name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "TBD".to_string())
    };

    Some(Fixture {
        id,
        home_team: team_name(wire.home_team),
        away_team: team_name(wire.away_team),
        kickoff,
        competition: wire.competition.and_then(|c| c.name).filter(|n| !n.is_empty()),
        matchday: wire.matchday,
        venue: wire.venue.filter(|v| !v.is_empty()),
    })
}

#[async_trait]
impl FixtureSource for FootballDataClient {
    async fn upcoming_fixtures(
        &self,
        team_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> FixcalResult<Vec<Fixture>> {
        if from > to {
            return Err(FixcalError::Config(format!(
                "fixture window is inverted: {from} > {to}"
            )));
        }

        let response = self.fetch_matches(team_id, from, to).await?;
        let wire_matches = response.matches.unwrap_or_default();
        let total = wire_matches.len();

        let fixtures: Vec<Fixture> = wire_matches
            .into_iter()
            .filter_map(|m| {
                let id = m.id;
                match fixture_from_wire(m) {
                    Some(fixture) => Some(fixture),
                    None => {
                        warn!(?id, "dropping fixture with missing id or unparsable kickoff");
                        None
                    }
                }
            })
            .collect();

        debug!(fetched = total, usable = fixtures.len(), "fetched fixtures");
        Ok(fixtures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{WireCompetition, WireTeam};

    fn wire_match(id: Option<u64>, utc_date: Option<&str>) -> WireMatch {
        WireMatch {
            id,
            utc_date: utc_date.map(str::to_string),
            home_team: Some(WireTeam {
                name: Some("FC Barcelona".into()),
            }),
            away_team: Some(WireTeam {
                name: Some("Real Madrid CF".into()),
            }),
            competition: Some(WireCompetition {
                name: Some("Primera Division".into()),
            }),
            matchday: Some(28),
            venue: None,
        }
    }

    #[test]
    fn wire_mapping_keeps_consumed_fields() {
        let fixture =
            fixture_from_wire(wire_match(Some(497117), Some("2025-03-15T19:00:00Z"))).unwrap();

        assert_eq!(fixture.id, 497117);
        assert_eq!(fixture.home_team, "FC Barcelona");
        assert_eq!(fixture.away_team, "Real Madrid CF");
        assert_eq!(fixture.kickoff.to_rfc3339(), "2025-03-15T19:00:00+00:00");
        assert_eq!(fixture.competition.as_deref(), Some("Primera Division"));
        assert_eq!(fixture.matchday, Some(28));
        assert_eq!(fixture.venue, None);
    }

    #[test]
    fn wire_mapping_drops_unusable_entries() {
        assert!(fixture_from_wire(wire_match(None, Some("2025-03-15T19:00:00Z"))).is_none());
        assert!(fixture_from_wire(wire_match(Some(1), None)).is_none());
        assert!(fixture_from_wire(wire_match(Some(1), Some("not a date"))).is_none());
    }

    #[test]
    fn wire_mapping_defaults_unknown_teams() {
        let mut wire = wire_match(Some(1), Some("2025-03-15T19:00:00Z"));
        wire.home_team = None;
        wire.away_team = Some(WireTeam { name: None });

        let fixture = fixture_from_wire(wire).unwrap();
        assert_eq!(fixture.home_team, "TBD");
        assert_eq!(fixture.away_team, "TBD");
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn fetches_and_maps_fixtures() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/teams/81/matches?dateFrom=2025-03-01&dateTo=2025-05-30")
            .match_header("X-Auth-Token", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"matches": [
                    {"id": 1, "utcDate": "2025-03-15T19:00:00Z",
                     "homeTeam": {"name": "A"}, "awayTeam": {"name": "B"}},
                    {"id": 2,
                     "homeTeam": {"name": "C"}, "awayTeam": {"name": "D"}}
                ]}"#,
            )
            .create_async()
            .await;

        let client = FootballDataClient::with_base_url(Some("test-key".into()), &server.url());
        let fixtures = client
            .upcoming_fixtures(81, date("2025-03-01"), date("2025-05-30"))
            .await
            .unwrap();

        // The dateless second entry is dropped, not an error.
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].id, 1);
    }

    #[tokio::test]
    async fn throttling_maps_to_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/teams/81/matches?dateFrom=2025-03-01&dateTo=2025-05-30")
            .with_status(429)
            .with_header("Retry-After", "60")
            .create_async()
            .await;

        let client = FootballDataClient::with_base_url(None, &server.url());
        let err = client
            .upcoming_fixtures(81, date("2025-03-01"), date("2025-05-30"))
            .await
            .unwrap_err();

        match err {
            FixcalError::RateLimited { retry_after } => assert_eq!(retry_after, Some(60)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn forbidden_maps_to_authentication_failed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/teams/81/matches?dateFrom=2025-03-01&dateTo=2025-05-30")
            .with_status(403)
            .create_async()
            .await;

        let client = FootballDataClient::with_base_url(None, &server.url());
        let err = client
            .upcoming_fixtures(81, date("2025-03-01"), date("2025-05-30"))
            .await
            .unwrap_err();

        assert!(matches!(err, FixcalError::AuthenticationFailed(_)));
    }

    #[tokio::test]
    async fn server_errors_map_to_provider_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/teams/81/matches?dateFrom=2025-03-01&dateTo=2025-05-30")
            .with_status(503)
            .create_async()
            .await;

        let client = FootballDataClient::with_base_url(None, &server.url());
        let err = client
            .upcoming_fixtures(81, date("2025-03-01"), date("2025-05-30"))
            .await
            .unwrap_err();

        assert!(matches!(err, FixcalError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn inverted_window_is_a_config_error() {
        let client = FootballDataClient::new(None);
        let err = client
            .upcoming_fixtures(81, date("2025-05-30"), date("2025-03-01"))
            .await
            .unwrap_err();

        assert!(matches!(err, FixcalError::Config(_)));
    }
}
