use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";
pub const DEFAULT_LOCATION: &str = "Ayodhya, Uttar Pradesh, India";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// endpoint = "http://localhost:8000"
/// default_location = "Tokyo, Japan"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Base URL of the weather service.
    pub endpoint: Option<String>,

    /// Location used by the initial fetch.
    pub default_location: Option<String>,
}

impl Config {
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn default_location(&self) -> &str {
        self.default_location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }

    /// Store a new endpoint. Only absolute http(s) URLs are accepted.
    pub fn set_endpoint(&mut self, endpoint: &str) -> Result<()> {
        let endpoint = endpoint.trim();
        let url = reqwest::Url::parse(endpoint)
            .with_context(|| format!("Invalid endpoint URL: {endpoint}"))?;

        if !matches!(url.scheme(), "http" | "https") {
            bail!("Endpoint must use http or https, got '{}'", url.scheme());
        }

        self.endpoint = Some(endpoint.trim_end_matches('/').to_string());
        Ok(())
    }

    pub fn set_default_location(&mut self, location: &str) -> Result<()> {
        let location = location.trim();
        if location.is_empty() {
            bail!("Default location cannot be empty");
        }

        self.default_location = Some(location.to_string());
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast-dashboard", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = Config::default();

        assert_eq!(cfg.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(cfg.default_location(), DEFAULT_LOCATION);
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: Config = toml::from_str(r#"default_location = "Paris""#).expect("valid toml");

        assert_eq!(cfg.default_location(), "Paris");
        assert_eq!(cfg.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn set_endpoint_validates_scheme() {
        let mut cfg = Config::default();

        cfg.set_endpoint("https://weather.example.com/").expect("https is fine");
        assert_eq!(cfg.endpoint(), "https://weather.example.com");

        let err = cfg.set_endpoint("ftp://weather.example.com").unwrap_err();
        assert!(err.to_string().contains("http or https"));

        assert!(cfg.set_endpoint("not a url").is_err());
        assert_eq!(cfg.endpoint(), "https://weather.example.com");
    }

    #[test]
    fn set_default_location_rejects_blank() {
        let mut cfg = Config::default();

        assert!(cfg.set_default_location("   ").is_err());
        cfg.set_default_location("  Tokyo ").expect("non-empty");
        assert_eq!(cfg.default_location(), "Tokyo");
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("forecast-cli-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_endpoint("http://127.0.0.1:9000").expect("valid url");
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_from_missing_file_is_default() {
        let path = std::env::temp_dir().join("forecast-cli-does-not-exist").join("config.toml");
        assert_eq!(Config::load_from(&path).expect("default"), Config::default());
    }
}
