use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Backend the hosted frontend talks to.
pub const DEFAULT_API_BASE_URL: &str = "https://bilimler-bellesiwi.kozqaras.xyz";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const CONFIG_FILE: &str = "bilim-check.yaml";
const API_URL_ENV: &str = "BILIM_CHECK_API_URL";

/// Environment variable holding the structured-generation API key.
pub const MODEL_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the site API, without a trailing slash.
    pub api_base_url: String,
    /// Model name used for study plan generation.
    pub model: String,
    /// TTF font embedded into exported plans.
    pub font_path: PathBuf,
    /// Directory exported plans are written to.
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            font_path: PathBuf::from("assets/DejaVuSans.ttf"),
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Reads `bilim-check.yaml` from the working directory when present,
    /// then applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self) {
        if let Some(url) = std::env::var(API_URL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
        {
            self.api_base_url = url.trim().trim_end_matches('/').to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_hosted_backend() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("api_base_url: http://localhost:8000\n").unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
