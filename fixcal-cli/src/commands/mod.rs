//! CLI subcommands.

pub mod calendars;
pub mod fixtures;
pub mod init;
pub mod sync;

use anyhow::{Result, bail};

use fixcal_provider_football::FootballDataClient;
use fixcal_provider_google::{GoogleCalendarClient, StaticToken, StoredSession, TokenSource};

use crate::config::FixcalConfig;

/// Build the fixture provider from config.
pub(crate) fn fixture_client(config: &FixcalConfig) -> FootballDataClient {
    match &config.football_api_base {
        Some(base) => FootballDataClient::with_base_url(config.football_api_key.clone(), base),
        None => FootballDataClient::new(config.football_api_key.clone()),
    }
}

/// Build the calendar client. A `GOOGLE_ACCESS_TOKEN` from the environment
/// (a service identity minted by the scheduler platform) wins over a stored
/// OAuth session.
pub(crate) fn calendar_client(config: &FixcalConfig) -> Result<GoogleCalendarClient> {
    let tokens: Box<dyn TokenSource> = match std::env::var("GOOGLE_ACCESS_TOKEN") {
        Ok(token) if !token.is_empty() => Box::new(StaticToken::new(token)),
        _ => match &config.google_account {
            Some(account) => Box::new(StoredSession::for_account(account)?),
            None => bail!(
                "No calendar credentials. Set google_account in the config \
                or supply GOOGLE_ACCESS_TOKEN in the environment."
            ),
        },
    };

    Ok(GoogleCalendarClient::new(tokens))
}
