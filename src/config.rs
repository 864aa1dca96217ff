use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_question_temperature")]
    pub question_temperature: f32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_question_temperature() -> f32 {
    0.7
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_log_filter() -> String {
    "enemquiz=info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            question_temperature: default_question_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("enemquiz")
            .join("config.toml")
    }

    /// Environment variables win over the file. Blank values count as unset.
    pub fn api_key(&self) -> Option<String> {
        API_KEY_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .chain(self.gemini_api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    /// Clamp values that would make requests misbehave.
    pub fn normalize(&mut self) {
        if !self.question_temperature.is_finite() {
            self.question_temperature = default_question_temperature();
        }
        self.question_temperature = self.question_temperature.clamp(0.0, 2.0);
        self.request_timeout_secs = self.request_timeout_secs.clamp(5, 120);
        if self.model.trim().is_empty() {
            self.model = default_model();
        }
        if self.api_base_url.trim().is_empty() {
            self.api_base_url = default_api_base_url();
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.request_timeout_secs, 30);
        assert!((config.question_temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.log_filter, "enemquiz=info");
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
model = "gemini-2.0-flash"
question_temperature = 1.2
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert!((config.question_temperature - 1.2).abs() < f32::EPSILON);
        assert_eq!(
            config.api_base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
    }

    #[test]
    fn test_normalize_clamps_out_of_range_values() {
        let mut config = Config {
            question_temperature: 9.0,
            request_timeout_secs: 1,
            api_base_url: "http://localhost:8080/v1beta/".to_string(),
            model: "  ".to_string(),
            ..Config::default()
        };
        config.normalize();
        assert!((config.question_temperature - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.api_base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_save_and_load_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            gemini_api_key: Some("abc".to_string()),
            request_timeout_secs: 60,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.gemini_api_key.as_deref(), Some("abc"));
        assert_eq!(loaded.request_timeout_secs, 60);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "model = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
