//! Write a default config file.

use anyhow::{Result, bail};

use crate::config::FixcalConfig;

pub fn run() -> Result<()> {
    let path = FixcalConfig::config_path()?;

    if path.exists() {
        bail!("Config already exists at {}", path.display());
    }

    FixcalConfig::create_default_config(&path)?;

    println!("Wrote {}", path.display());
    println!("Edit it, then run `fixcal sync`.");
    Ok(())
}
