use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub anilist: AnilistConfig,

    pub server: ServerConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Emit logs as JSON lines instead of human readable text
    pub json_logs: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnilistConfig {
    pub api_url: String,

    pub user_agent: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for AnilistConfig {
    fn default() -> Self {
        Self {
            api_url: "https://graphql.anilist.co".to_string(),
            user_agent: "AniDiff/1.0".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6790,
            cors_allowed_origins: vec![
                "http://localhost:6790".to_string(),
                "http://127.0.0.1:6790".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("anidiff").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".anidiff").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.anilist.api_url)
            .with_context(|| format!("Invalid AniList URL: {}", self.anilist.api_url))?;

        if self.anilist.request_timeout_seconds == 0 {
            anyhow::bail!("AniList request timeout must be > 0");
        }

        Ok(())
    }
}
