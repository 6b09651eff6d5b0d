use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::player::ai::AiConfig;

pub const CONFIG_PATH: &str = "reversi_config.json";

/// 盤面アニメーションの設定
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// 1枚ごとの裏返し間隔
    pub flip_interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            flip_interval_ms: 60,
        }
    }
}

/// Top-level application configuration, loadable from JSON.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the per-user save location.
    pub save_path: Option<PathBuf>,
    /// Overrides the log file location (defaults to the save file's directory).
    pub log_path: Option<PathBuf>,
    pub animation: AnimationConfig,
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ai.temperature.is_finite() && self.ai.temperature > 0.0) {
            return Err(ConfigError::Validation(
                "ai.temperature must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_PATH);
        std::fs::write(&path, r#"{ "ai": { "min_think_ms": 0 } }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.ai.min_think_ms, 0);
        assert_eq!(config.ai.temperature, AiConfig::default().temperature);
        assert_eq!(config.animation.flip_interval_ms, 60);
        assert!(config.save_path.is_none());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config.ai.min_think_ms, 600);
    }

    #[test]
    fn test_rejects_bad_temperature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_PATH);
        std::fs::write(&path, r#"{ "ai": { "temperature": 0.0 } }"#).unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_PATH);
        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::JsonParse(_))
        ));
    }
}
