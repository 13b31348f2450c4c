// src/config.rs
use crate::domain::errors::{AppError, AppResult};
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Settings for the field-sales core: where collections live and how much to log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local, lost on exit
    Memory,
    /// One JSON file per collection under `data_dir`
    File,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            other => Err(AppError::Config(format!(
                "Unsupported storage backend: {}",
                other
            ))),
        }
    }
}

/// Which key-value backend holds the product and order collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory holding the collection files (file backend only)
    pub data_dir: PathBuf,

    /// Write the default catalog when no product collection exists yet
    pub seed_catalog: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`; anything else means `info`
    pub level: String,

    /// Send log lines to `file_path` instead of stderr
    pub to_file: bool,
    pub file_path: Option<String>,
}

impl Config {
    /// Read `STORAGE_*` and `LOG_*` variables, after merging a `.env` file if present
    pub fn from_env() -> AppResult<Self> {
        dotenv().ok();

        let storage_config = StorageConfig {
            backend: env::var("STORAGE_BACKEND")
                .unwrap_or_else(|_| "file".to_string())
                .parse()?,
            data_dir: env::var("STORAGE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            seed_catalog: env::var("STORAGE_SEED_CATALOG")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        };

        let logging_config = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            to_file: env::var("LOG_TO_FILE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            file_path: env::var("LOG_FILE_PATH").ok(),
        };

        Ok(Config {
            storage: storage_config,
            logging: logging_config,
        })
    }

    /// Settings saved as JSON; the binary reads the file named by `FIELD_SALES_CONFIG`
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Invalid settings in {}: {}", path.display(), e))
        })
    }

    /// Write the settings as pretty JSON, the format [`Config::from_file`] reads
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Cannot encode settings: {}", e)))?;

        fs::write(path, contents).map_err(|e| {
            AppError::Config(format!("Cannot write {}: {}", path.display(), e))
        })
    }

    /// Install the global logger. Fails if one is already installed.
    pub fn init_logging(&self) -> AppResult<()> {
        let mut builder = env_logger::Builder::new();

        builder.filter_level(self.level_filter());

        if self.logging.to_file {
            if let Some(file_path) = &self.logging.file_path {
                let file = File::create(file_path).map_err(|e| {
                    AppError::Config(format!("Cannot create log file {}: {}", file_path, e))
                })?;
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }

        builder
            .try_init()
            .map_err(|e| AppError::Config(format!("Logger already installed: {}", e)))
    }

    fn level_filter(&self) -> log::LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                backend: StorageBackend::File,
                data_dir: PathBuf::from("./data"),
                seed_catalog: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                to_file: false,
                file_path: None,
            },
        }
    }
}
