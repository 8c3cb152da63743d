//! List the calendars visible to the configured credentials.

use anyhow::Result;
use owo_colors::OwoColorize;

use fixcal_core::service::CalendarApi;

use crate::config::FixcalConfig;

pub async fn run(config: &FixcalConfig) -> Result<()> {
    let client = super::calendar_client(config)?;
    let calendars = client.list_calendars().await?;

    if calendars.is_empty() {
        println!("No calendars visible to these credentials.");
        return Ok(());
    }

    for calendar in &calendars {
        let marker = if calendar.name == config.calendar_name {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {} {}", marker, calendar.name, calendar.id.dimmed());
    }

    Ok(())
}
