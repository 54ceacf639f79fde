//! Config commands

use anyhow::Result;

use crate::config::Config;
use crate::ConfigCommands;

pub fn handle(action: ConfigCommands, config: &Config, profile: Option<&str>) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            println!("{}", toml::to_string_pretty(config)?);
        }
        ConfigCommands::Init => {
            let path = Config::config_path(profile)?;
            if path.exists() {
                println!("Config already exists: {}", path.display());
            } else {
                let path = Config::default().save(profile)?;
                println!("Wrote default config to {}", path.display());
            }
        }
    }
    Ok(())
}
