use crate::error::{Error, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const ENV_EXPLORER_API: &str = "TRO_EXPLORER_API";
pub const ENV_EXPLORER_WEB: &str = "TRO_EXPLORER_WEB";
pub const ENV_TOKEN_ID: &str = "TRO_TOKEN_ID";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub explorer: ExplorerConfig,
    pub chart: ChartConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Base URL of the explorer REST API.
    pub api_base_url: String,
    /// Base URL of the public explorer used for deep links.
    pub web_base_url: String,
    pub token_id: String,
    pub transactions_page_size: usize,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    pub length: usize,
    pub floor: f64,
    /// Largest absolute move between two neighbouring points.
    pub max_step: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://explorer-api.multiversx.com".to_string(),
            web_base_url: "https://explorer.multiversx.com".to_string(),
            token_id: "TRO-94c925".to_string(),
            transactions_page_size: 5,
            request_timeout_secs: 10,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 100.0,
            margin: 8.0,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            length: 14,
            floor: 0.01,
            max_step: 0.01,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No configuration at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        fs::write(path, config_str)?;
        Ok(())
    }

    /// Applies `TRO_*` overrides, after loading a `.env` file if one is present.
    pub fn apply_env_overrides(&mut self) {
        dotenv::dotenv().ok();
        if let Ok(url) = env::var(ENV_EXPLORER_API) {
            self.explorer.api_base_url = url;
        }
        if let Ok(url) = env::var(ENV_EXPLORER_WEB) {
            self.explorer.web_base_url = url;
        }
        if let Ok(token_id) = env::var(ENV_TOKEN_ID) {
            self.explorer.token_id = token_id;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.explorer.api_base_url.trim().is_empty() {
            return Err(Error::ConfigError("Explorer API base URL cannot be empty".to_string()));
        }
        if self.explorer.token_id.trim().is_empty() {
            return Err(Error::ConfigError("Token identifier cannot be empty".to_string()));
        }
        if self.explorer.transactions_page_size == 0 {
            return Err(Error::ConfigError("Transaction page size must be positive".to_string()));
        }
        if self.history.length == 0 {
            return Err(Error::ConfigError("History length must be positive".to_string()));
        }
        if !(self.history.floor.is_finite() && self.history.floor > 0.0) {
            return Err(Error::ConfigError(format!(
                "History floor must be positive, got {}",
                self.history.floor
            )));
        }
        if !(self.history.max_step.is_finite() && self.history.max_step >= 0.0) {
            return Err(Error::ConfigError(format!(
                "History step must be non-negative, got {}",
                self.history.max_step
            )));
        }
        let chart = &self.chart;
        if chart.margin < 0.0 || chart.width <= 2.0 * chart.margin || chart.height <= 3.0 * chart.margin {
            return Err(Error::ConfigError(format!(
                "Chart canvas {}x{} is too small for margin {}",
                chart.width, chart.height, chart.margin
            )));
        }
        Ok(())
    }
}
