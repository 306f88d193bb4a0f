use lunchsplit_core::ExportFormat;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "lunchsplit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

/// Where the session snapshot lives
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" | "in_memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::InvalidValue {
                key: "storage.backend".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub backend: StorageBackend,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), backend: StorageBackend::default() }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
    /// Shown instead of the code when set
    #[serde(default)]
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { currency_code: default_currency_code(), currency_symbol: String::new() }
    }
}

impl DisplayConfig {
    /// Text printed after amounts.
    pub fn currency(&self) -> &str {
        if self.currency_symbol.trim().is_empty() {
            &self.currency_code
        } else {
            &self.currency_symbol
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
    #[serde(default)]
    pub default_format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { directory: default_export_dir(), default_format: ExportFormat::default() }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter(), json: false }
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    #[default]
    Defaults,
    /// The file did not exist; defaults were used
    Missing(PathBuf),
    File(PathBuf),
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LunchSplitConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(skip)]
    pub source: ConfigSource,
}

impl LunchSplitConfig {
    /// Loads the file named by `LUNCHSPLIT_CONFIG_PATH`, or `lunchsplit.toml`.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("LUNCHSPLIT_CONFIG_PATH")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Loads `path`. A missing file yields the built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config_str = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(Self {
                    source: ConfigSource::Missing(path.to_path_buf()),
                    ..Self::default()
                });
            }
            Err(source) => return Err(ConfigError::Io { path: path.to_path_buf(), source }),
        };

        let mut config: Self = toml::from_str(&config_str)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.source = ConfigSource::File(path.to_path_buf());
        Ok(config)
    }

    /// Applies `LUNCHSPLIT_*` environment variable overrides.
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `var`.
    pub fn apply_overrides_from(
        mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(data_dir) = var("LUNCHSPLIT_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }
        if let Some(backend) = var("LUNCHSPLIT_STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(currency) = var("LUNCHSPLIT_CURRENCY") {
            self.display.currency_code = currency;
        }
        if let Some(export_dir) = var("LUNCHSPLIT_EXPORT_DIR") {
            self.export.directory = PathBuf::from(export_dir);
        }
        if let Some(filter) = var("LUNCHSPLIT_LOG") {
            self.logging.filter = filter;
        }
        Ok(self)
    }

    /// Logs the effective settings once logging is up.
    pub fn log_summary(&self) {
        info!(
            backend = %self.storage.backend,
            data_dir = %self.storage.data_dir.display(),
            currency = %self.display.currency(),
            export_dir = %self.export.directory.display(),
            "Configuration loaded"
        );
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".lunchsplit")
}

fn default_currency_code() -> String {
    "TJS".to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_filter() -> String {
    "lunchsplit=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = LunchSplitConfig::default();
        assert_eq!(config.storage.data_dir, PathBuf::from(".lunchsplit"));
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.display.currency(), "TJS");
        assert_eq!(config.export.default_format, ExportFormat::Csv);
        assert_eq!(config.logging.filter, "lunchsplit=info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: LunchSplitConfig = toml::from_str(
            r#"
[display]
currency_symbol = "с."

[export]
default_format = "markdown"
"#,
        )
        .unwrap();
        assert_eq!(config.display.currency_code, "TJS");
        assert_eq!(config.display.currency(), "с.");
        assert_eq!(config.export.default_format, ExportFormat::Markdown);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("LUNCHSPLIT_DATA_DIR", "/tmp/lunch"),
            ("LUNCHSPLIT_STORAGE_BACKEND", "memory"),
            ("LUNCHSPLIT_CURRENCY", "EUR"),
        ]);
        let config = LunchSplitConfig::default()
            .apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/lunch"));
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.display.currency(), "EUR");
        assert_eq!(config.export.directory, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_backend_override() {
        let result = LunchSplitConfig::default().apply_overrides_from(|key| {
            (key == "LUNCHSPLIT_STORAGE_BACKEND").then(|| "redis".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
