//! List upcoming fixtures without writing anything.

use anyhow::Result;
use chrono::{Duration, Utc};
use owo_colors::OwoColorize;

use fixcal_core::service::FixtureSource;

use crate::config::FixcalConfig;

pub async fn run(config: &FixcalConfig) -> Result<()> {
    let client = super::fixture_client(config);

    let today = Utc::now().date_naive();
    let until = today + Duration::days(config.window_days as i64);
    let mut fixtures = client.upcoming_fixtures(config.team_id, today, until).await?;

    if fixtures.is_empty() {
        println!("No fixtures in the next {} days.", config.window_days);
        return Ok(());
    }

    fixtures.sort_by(|a, b| a.kickoff.cmp(&b.kickoff));

    for fixture in &fixtures {
        let when = fixture.kickoff.format("%Y-%m-%d %H:%M").to_string();
        let competition = fixture.competition.as_deref().unwrap_or("Football");
        println!(
            "{}  {} vs {} {}",
            when.dimmed(),
            fixture.home_team,
            fixture.away_team,
            format!("({competition})").dimmed(),
        );
    }

    Ok(())
}
