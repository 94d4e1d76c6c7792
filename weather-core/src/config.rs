use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_BASE_URL: &str = "https://opendata.cwa.gov.tw/api/v1/rest/datastore";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "CWA-XXXXXXXX"
/// bind = "127.0.0.1:3000"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Shared credential for the open-data service.
    pub api_key: Option<String>,
    pub base_url: String,
    pub bind: String,
    /// Request deadline for upstream calls; the HTTP client default when absent.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            bind: DEFAULT_BIND.to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Like [`Config::load`], but a host with no platform config directory
    /// (no HOME, for instance) gets the defaults instead of an error, so
    /// environment overrides still apply. A file that exists but cannot be
    /// read or parsed is still an error.
    pub fn load_or_default() -> Result<Self> {
        Self::load_at(Self::config_file_path().ok().as_deref())
    }

    fn load_at(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                tracing::warn!("no platform config directory; using default configuration");
                Ok(Self::default())
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("tw", "tw-weather", "tw-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply `CWA_API_KEY`, `CWA_BASE_URL` and `BIND_ADDR` from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("CWA_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(url) = get("CWA_BASE_URL") {
            self.base_url = url;
        }
        if let Some(bind) = get("BIND_ADDR") {
            self.bind = bind;
        }
        self
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Returns the credential, treating a blank value as missing.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_has_no_api_key() {
        let cfg = Config::default();
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.bind, DEFAULT_BIND);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        assert_eq!(cfg.api_key(), None);

        cfg.set_api_key("KEY".into());
        assert_eq!(cfg.api_key(), Some("KEY"));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = Config::default();
        cfg.set_api_key("FROM_FILE".into());

        let cfg = cfg.apply_overrides(env(&[
            ("CWA_API_KEY", "FROM_ENV"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ]));

        assert_eq!(cfg.api_key(), Some("FROM_ENV"));
        assert_eq!(cfg.bind, "127.0.0.1:8080");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key("FROM_FILE".into());

        let cfg = cfg.apply_overrides(env(&[("CWA_API_KEY", ""), ("CWA_BASE_URL", " ")]));

        assert_eq!(cfg.api_key(), Some("FROM_FILE"));
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("api_key = \"abc\"\ntimeout_secs = 5\n").unwrap();
        assert_eq!(cfg.api_key(), Some("abc"));
        assert_eq!(cfg.bind, DEFAULT_BIND);
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn toml_roundtrip_preserves_settings() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.timeout_secs = Some(12);

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_config_dir_still_takes_env_overrides() {
        let cfg = Config::load_at(None)
            .unwrap()
            .apply_overrides(env(&[("CWA_API_KEY", "FROM_ENV")]));

        assert_eq!(cfg.api_key(), Some("FROM_ENV"));
        assert_eq!(cfg.bind, DEFAULT_BIND);
    }

    #[test]
    fn absent_file_loads_defaults_but_broken_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("tw-weather-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let absent = dir.join("absent.toml");
        assert_eq!(Config::load_at(Some(&absent)).unwrap(), Config::default());

        let broken = dir.join("broken.toml");
        fs::write(&broken, "api_key = [unterminated").unwrap();
        let err = Config::load_at(Some(&broken)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
