use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::color::ACCENT_MIN_CONTRAST;
use crate::quote::DEFAULT_ENDPOINT;

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "QUOTE_MACHINE_ENDPOINT";

/// Contrast between black and white; no pair of colors exceeds it.
const MAX_CONTRAST: f64 = 21.0;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub endpoint: Option<String>,
    pub min_contrast: Option<f64>,
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// Apply the environment override on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Same as `with_env_overrides`, reading variables through `var`.
    /// Blank values are ignored.
    pub fn with_env_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                self.endpoint = Some(endpoint);
            }
        }
        self
    }

    /// Command-line values win over everything loaded so far.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        data_dir: Option<PathBuf>,
        min_contrast: Option<f64>,
    ) -> Self {
        if endpoint.is_some() {
            self.endpoint = endpoint;
        }
        if data_dir.is_some() {
            self.data_dir = data_dir;
        }
        if min_contrast.is_some() {
            self.min_contrast = min_contrast;
        }
        self
    }

    /// Reject settings no accent color could ever satisfy.
    pub fn validate(&self) -> Result<()> {
        let min_contrast = self.min_contrast();
        if !min_contrast.is_finite() || min_contrast >= MAX_CONTRAST {
            return Err(anyhow!(
                "min_contrast must be a finite number below {}, got {}",
                MAX_CONTRAST,
                min_contrast
            ));
        }
        Ok(())
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn min_contrast(&self) -> f64 {
        self.min_contrast.unwrap_or(ACCENT_MIN_CONTRAST)
    }

    /// Where favorites and the log file live.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;

        Ok(data_dir.join("quote-machine"))
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("quote-machine").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.min_contrast(), 7.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            endpoint: Some("http://localhost:8080/random".to_string()),
            min_contrast: Some(4.5),
            data_dir: Some(dir.path().join("data")),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.data_dir().unwrap(), dir.path().join("data"));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"min_contrast": 10.0}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.min_contrast(), 10.0);
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
    }

    fn env(value: &'static str) -> impl Fn(&str) -> Option<String> {
        move |name| (name == ENDPOINT_ENV).then(|| value.to_string())
    }

    fn from_file() -> Config {
        Config {
            endpoint: Some("http://file/random".to_string()),
            min_contrast: Some(4.5),
            data_dir: Some(PathBuf::from("/file/data")),
        }
    }

    #[test]
    fn test_env_beats_file() {
        let config = from_file().with_env_from(env("http://env/random"));
        assert_eq!(config.endpoint(), "http://env/random");
        assert_eq!(config.min_contrast(), 4.5);
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let config = from_file().with_env_from(env("   "));
        assert_eq!(config.endpoint(), "http://file/random");

        let config = from_file().with_env_from(|_| None);
        assert_eq!(config, from_file());
    }

    #[test]
    fn test_flags_beat_env_and_file() {
        let config = from_file()
            .with_env_from(env("http://env/random"))
            .with_overrides(
                Some("http://flag/random".to_string()),
                Some(PathBuf::from("/flag/data")),
                Some(10.0),
            );
        assert_eq!(config.endpoint(), "http://flag/random");
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/flag/data"));
        assert_eq!(config.min_contrast(), 10.0);
    }

    #[test]
    fn test_absent_flags_keep_earlier_values() {
        let config = from_file()
            .with_env_from(env("http://env/random"))
            .with_overrides(None, None, None);
        assert_eq!(config.endpoint(), "http://env/random");
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/file/data"));
        assert_eq!(config.min_contrast(), 4.5);
    }

    #[test]
    fn test_validate_min_contrast() {
        assert!(Config::new().validate().is_ok());
        assert!(from_file().with_overrides(None, None, Some(20.9)).validate().is_ok());

        for bad in [21.0, 42.0, f64::NAN, f64::INFINITY] {
            let config = Config::new().with_overrides(None, None, Some(bad));
            assert!(config.validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
