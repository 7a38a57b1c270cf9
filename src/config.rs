use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Relative location of the settings file inside the working directory.
pub const CONFIG_FILE: &str = "config/voicecraft.toml";

/// Dashboard settings, normally loaded from `config/voicecraft.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Runtime flavour. Development enables the sample-agent fallback.
    pub environment: RuntimeEnvironment,
    /// Interval between UI ticks, in milliseconds.
    pub tick_rate_ms: u64,
    /// How long a toast stays on screen.
    pub toast_duration_secs: u64,
    pub data_service: DataServiceConfig,
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: RuntimeEnvironment::Development,
            tick_rate_ms: 250,
            toast_duration_secs: 4,
            data_service: DataServiceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Reads `config/voicecraft.toml` under `root` and applies environment
    /// overrides. A missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        let settings = if config_path.exists() {
            let raw = fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read settings: {}", config_path.display()))?;
            Self::parse(&raw)
                .with_context(|| format!("failed to parse settings: {}", config_path.display()))?
        } else {
            Self::default()
        };
        Ok(settings.with_env_overrides(|name| env::var(name).ok()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Applies `VOICECRAFT_*` overrides read through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(url) = lookup("VOICECRAFT_SERVER_URL") {
            self.data_service.server_url = Some(url);
        }
        if let Some(project) = lookup("VOICECRAFT_PROJECT_ID") {
            self.data_service.project_id = Some(project);
        }
        if let Some(flavour) = lookup("VOICECRAFT_ENV") {
            match RuntimeEnvironment::parse(&flavour) {
                Some(environment) => self.environment = environment,
                None => log::warn!("Ignoring unknown VOICECRAFT_ENV value: {}", flavour),
            }
        }
        self
    }

    /// Writes the settings back as pretty TOML, creating `config/` if needed.
    pub fn save_to_file(&self, root: &Path) -> Result<PathBuf> {
        let config_path = root.join(CONFIG_FILE);
        if let Some(dir) = config_path.parent()
            && !dir.exists()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create config dir: {}", dir.display()))?;
        }
        let serialized = toml::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(&config_path, serialized)
            .with_context(|| format!("failed to write settings: {}", config_path.display()))?;
        Ok(config_path)
    }

    /// Whether a failed fetch may be papered over with the sample agents.
    pub fn allows_sample_fallback(&self, remote_configured: bool) -> bool {
        self.environment == RuntimeEnvironment::Development || !remote_configured
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeEnvironment {
    Development,
    Production,
}

impl RuntimeEnvironment {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Where and how to reach the remote row store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataServiceConfig {
    /// Base URL; queries go to `{server_url}/query`.
    pub server_url: Option<String>,
    pub project_id: Option<String>,
    /// API key given inline.
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    pub request_timeout_secs: u64,
    /// Extra HTTP headers attached to every request.
    pub extra_headers: BTreeMap<String, String>,
}

impl Default for DataServiceConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            project_id: None,
            api_key: None,
            api_key_env: Some(String::from("VOICECRAFT_API_KEY")),
            request_timeout_secs: 15,
            extra_headers: BTreeMap::new(),
        }
    }
}

impl DataServiceConfig {
    /// `api_key` wins over `api_key_env`.
    pub fn resolved_api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key {
            Some(key.clone())
        } else if let Some(var) = &self.api_key_env {
            env::var(var).ok().filter(|value| !value.trim().is_empty())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    /// Log file, relative to the working directory.
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            file: PathBuf::from("logs/voicecraft.log"),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}
