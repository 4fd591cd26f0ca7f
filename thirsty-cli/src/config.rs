use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding today's record, settings and history
    pub data_dir: ConfigValue<PathBuf>,
    /// Directory holding the widget's shared region (`None` disables it)
    pub shared_dir: ConfigValue<Option<PathBuf>>,
    /// Push totals to and pull changes from the widget
    pub widget_sync: ConfigValue<bool>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    shared_dir: Option<PathBuf>,
    widget_sync: Option<bool>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    fn load_with<F>(config_path: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut shared_dir: Option<ConfigValue<Option<PathBuf>>> = None;
        let mut widget_sync = ConfigValue::new(true, ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                data_dir = ConfigValue::new(resolve(&path, dir), ConfigSource::File);
            }
            if let Some(dir) = file_config.shared_dir {
                let dir = non_empty(dir).map(|d| resolve(&path, d));
                shared_dir = Some(ConfigValue::new(dir, ConfigSource::File));
            }
            if let Some(enabled) = file_config.widget_sync {
                widget_sync = ConfigValue::new(enabled, ConfigSource::File);
            }
        }

        if let Some(dir) = env("THIRSTY_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Some(dir) = env("THIRSTY_SHARED_DIR") {
            shared_dir = Some(ConfigValue::new(
                non_empty(PathBuf::from(dir)),
                ConfigSource::Environment,
            ));
        }
        if let Some(raw) = env("THIRSTY_WIDGET_SYNC") {
            let enabled = parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("THIRSTY_WIDGET_SYNC".to_string(), raw))?;
            widget_sync = ConfigValue::new(enabled, ConfigSource::Environment);
        }

        // Follows the data directory unless set explicitly
        let shared_dir = shared_dir.unwrap_or_else(|| {
            ConfigValue::new(
                Some(data_dir.value.join("shared")),
                ConfigSource::Default,
            )
        });

        Ok(Self {
            data_dir,
            shared_dir,
            widget_sync,
            config_file,
        })
    }

    /// The shared region directory, if widget sync is on.
    pub fn widget_dir(&self) -> Option<&Path> {
        if !self.widget_sync.value {
            return None;
        }
        self.shared_dir.value.as_deref()
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/thirsty/
    /// - macOS: ~/Library/Application Support/thirsty/
    /// - Windows: %APPDATA%/thirsty/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("thirsty")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/thirsty/
    /// - macOS: ~/Library/Application Support/thirsty/
    /// - Windows: %APPDATA%/thirsty/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("thirsty")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Resolves a relative path against the config file's directory.
fn resolve(config_path: &Path, dir: PathBuf) -> PathBuf {
    if dir.is_relative() {
        config_path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
    } else {
        dir
    }
}

fn non_empty(dir: PathBuf) -> Option<PathBuf> {
    if dir.as_os_str().is_empty() {
        None
    } else {
        Some(dir)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(String, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(key, value) => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
