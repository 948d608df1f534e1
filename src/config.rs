use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::table::TableColumns;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub study: StudyConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub source_file: String,
    pub progress_file: String,
    pub stats_file: String,
    pub front_column: String,
    pub back_column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            source_file: "urdu_words.csv".to_string(),
            progress_file: "words_to_learn.csv".to_string(),
            stats_file: "learning_stats.csv".to_string(),
            front_column: "Urdu".to_string(),
            back_column: "English".to_string(),
        }
    }
}

impl DataConfig {
    pub fn source_path(&self) -> PathBuf {
        self.dir.join(&self.source_file)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.dir.join(&self.progress_file)
    }

    pub fn stats_path(&self) -> PathBuf {
        self.dir.join(&self.stats_file)
    }

    pub fn columns(&self) -> TableColumns {
        TableColumns {
            front: self.front_column.clone(),
            back: self.back_column.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardOrder {
    #[default]
    Random,
    Sequential,
}

/// What a sequential `advance` does on the last card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndBehavior {
    #[default]
    Wrap,
    Stop,
}

/// What "don't know" does with the current word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    #[default]
    Keep,
    Requeue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    pub auto_flip: bool,
    pub flip_delay_ms: u64,
    pub order: CardOrder,
    pub at_end: EndBehavior,
    pub unknown: UnknownPolicy,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            auto_flip: true,
            flip_delay_ms: 3000,
            order: CardOrder::default(),
            at_end: EndBehavior::default(),
            unknown: UnknownPolicy::default(),
        }
    }
}

impl StudyConfig {
    pub fn flip_delay(&self) -> Duration {
        Duration::from_millis(self.flip_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from("flashcards.log"),
        }
    }
}

impl Config {
    /// `~/.config/urdu-flashcards/config.toml` or the platform equivalent.
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("urdu-flashcards").join("config.toml")
    }

    /// Loads the file at `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_reporting(path).map(|(config, _)| config)
    }

    /// Like [`Config::load_from`], also telling whether the file existed.
    /// Runs before logging is set up, so callers log the outcome.
    pub fn load_reporting(path: &Path) -> Result<(Self, bool), ConfigError> {
        if !path.exists() {
            return Ok((Config::default(), false));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok((config, true))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| -> Result<(), ConfigError> {
            Err(ConfigError::Validation {
                message: message.to_string(),
            })
        };

        if self.study.flip_delay_ms == 0 {
            return invalid("study.flip_delay_ms must be greater than zero");
        }
        if self.data.front_column.trim().is_empty() || self.data.back_column.trim().is_empty() {
            return invalid("data.front_column and data.back_column must not be empty");
        }
        if self.data.front_column == self.data.back_column {
            return invalid("data.front_column and data.back_column must differ");
        }
        let files = [
            &self.data.source_file,
            &self.data.progress_file,
            &self.data.stats_file,
        ];
        if files.iter().any(|name| name.trim().is_empty()) {
            return invalid("data file names must not be empty");
        }
        if self.data.source_file == self.data.progress_file {
            return invalid("data.progress_file must differ from data.source_file");
        }
        Ok(())
    }
}
