use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}', expected compact or json")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Runtime settings for the shop store.
///
/// ```toml
/// data_dir = "/var/lib/shop"
/// products_file = "productos.json"
/// carts_file = "carrito.json"
/// buffer_size = 32
///
/// [log]
/// level = "debug"
/// format = "json"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub data_dir: PathBuf,
    pub products_file: String,
    pub carts_file: String,
    /// Mailbox capacity of each collection actor.
    pub buffer_size: usize,
    pub log: LogConfig,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            products_file: "productos.json".to_string(),
            carts_file: "carrito.json".to_string(),
            buffer_size: 32,
            log: LogConfig::default(),
        }
    }
}

impl ShopConfig {
    /// Defaults, then the optional TOML file, then `SHOP_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies `SHOP_DATA_DIR`, `SHOP_LOG_LEVEL` and `SHOP_LOG_FORMAT` as found by `lookup`.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = lookup("SHOP_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("SHOP_LOG_LEVEL") {
            self.log.level = level;
        }
        if let Some(format) = lookup("SHOP_LOG_FORMAT") {
            self.log.format = format.parse().map_err(|reason| ConfigError::Invalid {
                field: "SHOP_LOG_FORMAT".to_string(),
                reason,
            })?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, name) in [("products_file", &self.products_file), ("carts_file", &self.carts_file)] {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: field.to_string(),
                    reason: "file name must not be empty".to_string(),
                });
            }
        }
        if self.products_file == self.carts_file {
            return Err(ConfigError::Invalid {
                field: "carts_file".to_string(),
                reason: "products and carts need separate files".to_string(),
            });
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::Invalid {
                field: "buffer_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn carts_path(&self) -> PathBuf {
        self.data_dir.join(&self.carts_file)
    }
}
