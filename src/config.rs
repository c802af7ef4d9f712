use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{HubError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Deserialize, Default)]
pub struct Config {
    pub api_url: Option<String>,
    /// Fall back to the built-in demo dataset when the backend is
    /// unreachable, instead of failing the command.
    pub demo: Option<bool>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| HubError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| HubError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "taskhub")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(HubError::NoConfigDir)
    }

    /// Base URL of the backend, env var taking precedence over config file.
    pub fn api_url(&self) -> String {
        if let Ok(url) = std::env::var("TASKHUB_API_URL") {
            return url;
        }
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Demo fallback is opt-in: the --demo flag or `demo = true` in config.
    pub fn demo_enabled(&self, flag: bool) -> bool {
        flag || self.demo.unwrap_or(false)
    }
}
