use crate::core::headlines::DEFAULT_HEADLINE_LIMIT;
use crate::core::series::TickerSelection;
use crate::core::wacc::CapitalStructureInputs;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub ticker: String,
    pub competitors: Vec<String>,
    pub wacc: CapitalStructureInputs,
    pub date_column: String,
    /// Refuse to chart when any requested ticker is missing from the upload.
    pub strict_columns: bool,
    pub headlines_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            ticker: "LMT".to_string(),
            competitors: vec!["NOC".to_string(), "RTX".to_string(), "GD".to_string()],
            wacc: CapitalStructureInputs::default(),
            date_column: "date".to_string(),
            strict_columns: false,
            headlines_limit: DEFAULT_HEADLINE_LIMIT,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when
    /// it has not been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "compdash", "compdash")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn ticker_selection(&self) -> TickerSelection {
        TickerSelection::new(self.ticker.clone(), self.competitors.clone())
    }
}
