//! Configuration system for work-persona
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (WORK_PERSONA_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::progress::{FileProgressStore, ProgressKeeper, DEFAULT_STORAGE_KEY};

/// File name looked for in the working directory
pub const LOCAL_CONFIG_FILE: &str = "work-persona.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Survey behaviour and share links
    pub survey: SurveySettings,

    /// Where progress is kept
    pub storage: StorageSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Survey settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveySettings {
    /// Public origin that share links and share text point at
    pub base_url: String,

    /// Key under which in-progress answers are stored
    pub storage_key: String,
}

/// Storage path settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Base data directory
    pub data_dir: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for SurveySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.work-persona".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            max_file_size_mb: 10,
            max_files: 5,
            json_format: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            config = Self::from_file(&path)?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides(|key| std::env::var(key).ok());

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Parse a single TOML file without overrides or validation
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            message: format!("{}: {}", path.display(), e.message()),
            source: Some(e),
        })
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        for path in search_paths() {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides read through `lookup`
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Survey settings
        if let Some(val) = lookup("WORK_PERSONA_BASE_URL") {
            self.survey.base_url = val;
        }
        if let Some(val) = lookup("WORK_PERSONA_STORAGE_KEY") {
            self.survey.storage_key = val;
        }

        // Storage settings
        if let Some(val) = lookup("WORK_PERSONA_DATA_DIR") {
            self.storage.data_dir = val;
        }

        // Logging settings
        if let Some(val) = lookup("WORK_PERSONA_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("WORK_PERSONA_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Some(val) = lookup("WORK_PERSONA_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.storage.data_dir = expand_path(&self.storage.data_dir);
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate base URL
        let base_url = url::Url::parse(&self.survey.base_url).map_err(|e| {
            Error::config_field_invalid(
                "survey.base_url",
                format!("'{}' is not a valid URL: {}", self.survey.base_url, e),
            )
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::config_field_invalid(
                "survey.base_url",
                "Base URL must start with http:// or https://",
            ));
        }

        // Storage key becomes a file name
        let key = &self.survey.storage_key;
        if key.is_empty() {
            return Err(Error::config_field_invalid(
                "survey.storage_key",
                "Storage key cannot be empty",
            ));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            || key.starts_with('.')
        {
            return Err(Error::config_field_invalid(
                "survey.storage_key",
                format!(
                    "Storage key '{}' may only contain letters, digits, '-', '_' and '.'",
                    key
                ),
            ));
        }

        if self.storage.data_dir.is_empty() {
            return Err(Error::config_field_invalid(
                "storage.data_dir",
                "Data directory cannot be empty",
            ));
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Get the data directory as a PathBuf
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Progress keeper backed by files in the data directory
    pub fn progress_keeper(&self) -> ProgressKeeper<FileProgressStore> {
        ProgressKeeper::new(
            FileProgressStore::new(self.data_dir()),
            self.survey.storage_key.clone(),
        )
    }
}

/// Standard locations searched when no explicit path is given
fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("work-persona").join("config.toml"));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".work-persona").join("config.toml"));
    }
    paths
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file, returning where it was written
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".work-persona")
                .join("config.toml")
        });

    // Check if file exists
    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    // Create parent directories
    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# work-persona configuration

[survey]
# Public origin used in share links and share text
base_url = "http://localhost:3000"

# Key under which in-progress answers are stored
storage_key = "newsletter-survey-progress"

[storage]
# Base data directory
data_dir = "~/.work-persona"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.work-persona/logs/work-persona.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 10

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.survey.base_url, "http://localhost:3000");
        assert_eq!(config.survey.storage_key, "newsletter-survey-progress");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_env_override() {
        let vars: HashMap<&str, &str> = [
            ("WORK_PERSONA_BASE_URL", "https://persona.example.com"),
            ("WORK_PERSONA_DATA_DIR", "/tmp/persona"),
            ("WORK_PERSONA_LOG_LEVEL", "debug"),
            ("WORK_PERSONA_LOG_JSON", "1"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.survey.base_url, "https://persona.example.com");
        assert_eq!(config.storage.data_dir, "/tmp/persona");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
        assert_eq!(config.survey.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut config = AppConfig::default();
        config.survey.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.survey.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_storage_key() {
        let mut config = AppConfig::default();
        for bad in ["", "../escape", "with space", ".hidden"] {
            config.survey.storage_key = bad.to_string();
            assert!(config.validate().is_err(), "accepted {:?}", bad);
        }

        config.survey.storage_key = "team_survey-2.v1".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "invalid".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigValidation { field: Some(ref f), .. } if f == "logging.level"
        ));
    }

    #[test]
    fn test_path_expansion() {
        let mut config = AppConfig::default();
        config.storage.data_dir = "~/test/data".to_string();
        config.expand_paths();
        assert!(!config.storage.data_dir.contains('~'));
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.survey.base_url, parsed.survey.base_url);
        assert_eq!(config.logging.max_files, parsed.logging.max_files);
    }

    #[test]
    fn test_parse_partial_config_file() {
        let config_str = r#"
[survey]
base_url = "https://persona.example.com"

[logging]
level = "debug"
"#;

        let config: AppConfig = toml::from_str(config_str).unwrap();
        assert_eq!(config.survey.base_url, "https://persona.example.com");
        assert_eq!(config.survey.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.storage.data_dir, "~/.work-persona");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = AppConfig::load(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.toml");
        fs::write(&path, "[survey\nbase_url = ").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { source: Some(_), .. }));
    }

    #[test]
    fn test_init_config_writes_loadable_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        let path_str = path.to_string_lossy().to_string();

        let written = init_config(Some(&path_str), false).unwrap();
        assert_eq!(written, path);

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.survey.storage_key, DEFAULT_STORAGE_KEY);
        assert!(config.validate().is_ok());

        // Refuses to overwrite without force
        assert!(init_config(Some(&path_str), false).is_err());
        assert!(init_config(Some(&path_str), true).is_ok());
    }
}
