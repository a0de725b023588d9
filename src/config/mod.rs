//! Configuration management for applegal

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Default main backend (auth, case files, deadlines, notes)
pub const DEFAULT_API_URL: &str = "http://192.168.100.252:3000";

/// Default document service
pub const DEFAULT_DOCS_URL: &str = "http://192.168.100.252:8081";

/// Default AI summarization service
pub const DEFAULT_AI_URL: &str = "http://192.168.100.252:3003";

/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Main backend base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Document service base URL
    #[serde(default = "default_docs_url")]
    pub docs_url: String,

    /// AI summarization service base URL
    #[serde(default = "default_ai_url")]
    pub ai_url: String,

    /// Numeric client id, used to key the realtime channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,

    /// Upper bound for every request
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_docs_url() -> String {
    DEFAULT_DOCS_URL.to_string()
}

fn default_ai_url() -> String {
    DEFAULT_AI_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Config {
    /// Directory holding config and session files (`~/.applegal`)
    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".applegal"))
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::default_dir()?.join("config.yaml"))
    }

    /// Resolve an optional override into a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Reject configurations that cannot produce a working client
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("api_url", &self.api_url),
            ("docs_url", &self.docs_url),
            ("ai_url", &self.ai_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "{} must start with http:// or https:// (got '{}')",
                    name, url
                ))
                .into());
            }
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be positive".to_string()).into());
        }
        Ok(())
    }

    /// Client id required by the realtime listener
    pub fn require_client_id(&self) -> Result<i64> {
        self.client_id
            .ok_or_else(|| ConfigError::MissingClientId.into())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            docs_url: default_docs_url(),
            ai_url: default_ai_url(),
            client_id: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            preferences: Preferences::default(),
        }
    }
}
