//! fixcal configuration.
//!
//! Loaded from ~/.config/fixcal/config.toml (or `FIXCAL_CONFIG`), with
//! secrets overridable from the environment so unattended schedulers never
//! have to write them to disk.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

fn default_window_days() -> u32 {
    90
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixcalConfig {
    /// Provider-side team identifier (e.g. 81 for FC Barcelona).
    pub team_id: u64,

    /// Display name of the destination calendar.
    pub calendar_name: String,

    /// How far ahead to fetch fixtures.
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Timezone for a newly created calendar.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Account to grant write access when this run creates the calendar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_with: Option<String>,

    /// Account whose stored OAuth session authenticates calendar calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub football_api_key: Option<String>,

    /// Alternate fixture API deployment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub football_api_base: Option<String>,
}

impl FixcalConfig {
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("FIXCAL_CONFIG") {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("fixcal");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let contents = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "Could not read config at {}. Run `fixcal init` to create one.",
                path.display()
            )
        })?;

        let mut config = Self::parse(&contents)
            .with_context(|| format!("Invalid config at {}", path.display()))?;

        if let Ok(key) = std::env::var("FOOTBALL_API_KEY") {
            config.football_api_key = Some(key);
        }
        if let Ok(base) = std::env::var("FOOTBALL_API_BASE") {
            config.football_api_base = Some(base);
        }

        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: FixcalConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.calendar_name.is_empty() {
            bail!("calendar_name must not be empty");
        }
        if self.window_days == 0 {
            bail!("window_days must be at least 1");
        }
        chrono_tz::Tz::from_str(&self.timezone)
            .map_err(|_| anyhow::anyhow!("unknown timezone '{}'", self.timezone))?;
        Ok(())
    }

    pub fn with_window_override(mut self, window_days: Option<u32>) -> Self {
        if let Some(days) = window_days {
            self.window_days = days;
        }
        self
    }

    /// Write a default config file with all options spelled out.
    pub fn create_default_config(path: &std::path::Path) -> Result<()> {
        let contents = "\
# fixcal configuration

# Provider-side team id (81 = FC Barcelona on football-data.org):
team_id = 81

# Destination calendar, matched by exact display name:
calendar_name = \"Barcelona FC Games\"

# How far ahead to fetch fixtures:
# window_days = 90

# Timezone for a newly created calendar:
# timezone = \"Europe/Madrid\"

# Grant this account write access when the calendar gets created:
# share_with = \"you@example.com\"

# Account whose stored OAuth session authenticates calendar calls.
# Leave unset when supplying GOOGLE_ACCESS_TOKEN from the environment.
# google_account = \"you@example.com\"

# football-data.org API key (or set FOOTBALL_API_KEY):
# football_api_key = \"...\"
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Could not write config file {}", path.display()))?;

        Ok(())
    }
}
