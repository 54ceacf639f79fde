//! CLI Configuration

use crate::output::OutputFormat;
use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use devicecalc_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub catalog_path: Option<String>,
    pub default_format: Option<String>,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            config.engine.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf> {
        let path = Self::config_path(profile)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Engine constants: explicit file first, then the profile's `[engine]` table
    pub fn engine_config(&self, override_path: Option<&str>) -> Result<EngineConfig> {
        match override_path {
            Some(path) => Ok(EngineConfig::load(path)?),
            None => Ok(self.engine.clone()),
        }
    }

    /// Output format: flag first, then config, then table
    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or_else(|| {
            self.default_format
                .as_deref()
                .and_then(|f| OutputFormat::from_str(f, true).ok())
        })
        .unwrap_or(OutputFormat::Table)
    }

    /// Catalog path: flag/env first, then config
    pub fn catalog(&self, flag: Option<&str>) -> Result<String> {
        flag.map(String::from)
            .or_else(|| self.catalog_path.clone())
            .ok_or_else(|| anyhow!("no device catalog given (use --catalog or set catalog_path)"))
    }

    pub fn config_path(profile: Option<&str>) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot find home directory"))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".devicecalc").join(filename))
    }
}
