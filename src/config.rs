use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dashboard::DashboardSettings;
use crate::distribution::GoalType;
use crate::logging::LogConfig;
use crate::validation::ValidationSettings;
use crate::zones::estimate_max_heart_rate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// Logging output
    #[serde(default)]
    pub logging: LogConfig,

    /// Dashboard aggregation settings
    #[serde(default)]
    pub dashboard: DashboardSettings,

    /// Form validation bounds
    #[serde(default)]
    pub validation: ValidationSettings,

    /// Defaults used when the command line omits them
    #[serde(default)]
    pub profile: ProfileDefaults,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Personal defaults for the command line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDefaults {
    /// Age used to estimate max heart rate
    pub age: Option<u8>,

    /// Measured max heart rate, preferred over the age estimate
    pub max_heart_rate: Option<u16>,

    /// Goal used for distribution comparisons
    pub goal: Option<GoalType>,
}

impl ProfileDefaults {
    /// Measured max heart rate if set, otherwise the estimate from age
    pub fn resolve_max_heart_rate(&self) -> Option<u16> {
        self.max_heart_rate
            .or_else(|| self.age.map(estimate_max_heart_rate))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            logging: LogConfig::default(),
            dashboard: DashboardSettings::default(),
            validation: ValidationSettings::default(),
            profile: ProfileDefaults::default(),
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fivezone")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(_) => {
                tracing::debug!(path = %config_path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Save configuration to default location
    pub fn save_default(&mut self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to_file(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.metadata.version, deserialized.metadata.version);
        assert_eq!(deserialized.dashboard.window_days, 7);
        assert_eq!(deserialized.validation.age_min, 10);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml_str = r#"
            [metadata]
            version = "1.0"
            created_at = "2024-05-01T00:00:00Z"
            updated_at = "2024-05-01T00:00:00Z"

            [dashboard]
            window_days = 14
            recent_log_limit = 10

            [profile]
            age = 40
            goal = "marathon"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.dashboard.window_days, 14);
        assert_eq!(config.validation, ValidationSettings::default());
        assert_eq!(config.profile.goal, Some(GoalType::Marathon));
        assert_eq!(config.profile.resolve_max_heart_rate(), Some(185));
    }

    #[test]
    fn test_measured_max_heart_rate_wins() {
        let profile = ProfileDefaults {
            age: Some(40),
            max_heart_rate: Some(192),
            goal: None,
        };
        assert_eq!(profile.resolve_max_heart_rate(), Some(192));
        assert_eq!(ProfileDefaults::default().resolve_max_heart_rate(), None);
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original_config = AppConfig::default();
        original_config.profile.max_heart_rate = Some(188);

        original_config.save_to_file(&config_path).unwrap();
        let loaded_config = AppConfig::load_from_file(&config_path).unwrap();

        assert_eq!(loaded_config.profile.max_heart_rate, Some(188));
        assert!(AppConfig::load_from_file(temp_dir.path().join("missing.toml")).is_err());
    }
}
