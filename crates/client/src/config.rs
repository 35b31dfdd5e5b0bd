//! Client configuration
//!
//! Values are resolved in three layers: built-in defaults, an optional TOML
//! file at `~/.config/edutalks/config.toml`, then environment variables.
//!
//! ```toml
//! base_url = "https://api.edutalks.example"
//! timeout_secs = 20
//! session_path = "/home/me/.local/share/edutalks/session.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "EDUTALKS_API_URL";
/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "EDUTALKS_TIMEOUT_SECS";
/// Environment variable overriding the session file location
pub const ENV_SESSION_FILE: &str = "EDUTALKS_SESSION_FILE";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`ApiClient`](crate::ApiClient) and the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend, without trailing slash
    pub base_url: String,
    /// Transport timeout for every request
    pub timeout_secs: u64,
    /// Where the session (token, role, landing flag) is persisted
    pub session_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_path: Self::default_session_path(),
        }
    }
}

impl ClientConfig {
    /// Config for a given base URL, other fields defaulted
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Returns: ~/.config/edutalks/config.toml
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push("edutalks");
        path.push("config.toml");
        path
    }

    /// Returns: ~/.local/share/edutalks/session.json (platform equivalent)
    pub fn default_session_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from(".edutalks"));
        path.push("edutalks");
        path.push("session.json");
        path
    }

    /// Load defaults, then the default config file if present, then the
    /// process environment.
    pub fn load() -> ClientResult<Self> {
        Self::load_from(&Self::default_config_path(), |key| std::env::var(key).ok())
    }

    /// Layered load with an explicit file path and environment lookup
    pub fn load_from<F>(path: &Path, env: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            info!("Loading client config from: {}", path.display());
            Self::from_file(path)?
        } else {
            debug!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("invalid {}: {}", path.display(), e)))
    }

    /// Apply `EDUTALKS_*` overrides
    pub fn apply_env<F>(&mut self, env: F) -> ClientResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(raw) = env(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("{ENV_TIMEOUT_SECS} must be a number, got '{raw}'"))
            })?;
        }
        if let Some(path) = env(ENV_SESSION_FILE).filter(|v| !v.trim().is_empty()) {
            self.session_path = PathBuf::from(path);
        }
        Ok(())
    }

    /// Check the resolved values
    pub fn validate(&self) -> ClientResult<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ClientError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL without trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout_secs, 30);
        assert!(config.session_path.ends_with("edutalks/session.json"));
    }

    #[test]
    fn test_file_then_env_layering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"https://api.example.org/\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = ClientConfig::load_from(&path, env_of(&[])).unwrap();
        assert_eq!(config.base_url, "https://api.example.org/");
        assert_eq!(config.normalized_base_url(), "https://api.example.org");
        assert_eq!(config.timeout_secs, 5);

        let config = ClientConfig::load_from(
            &path,
            env_of(&[
                (ENV_API_URL, "http://localhost:9000"),
                (ENV_SESSION_FILE, "/tmp/s.json"),
            ]),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.session_path, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_from(&dir.path().join("absent.toml"), env_of(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = ClientConfig::load_from(&path, env_of(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = ClientConfig::load_from(&path, env_of(&[(ENV_API_URL, "ftp://files")]))
            .unwrap_err();
        assert!(err.to_string().contains("base_url"));

        let err = ClientConfig::load_from(&path, env_of(&[(ENV_TIMEOUT_SECS, "0")])).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [").unwrap();
        assert!(ClientConfig::from_file(&path).is_err());
    }
}
