use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Failures of the word tables on disk.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("'{path}' line {line}: row is missing a field")]
    MalformedRow { path: PathBuf, line: u64 },
}

impl StorageError {
    /// Short lead-in for showing the error to the user.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Read { .. } | Self::MissingColumn { .. } | Self::MalformedRow { .. } => {
                "Could not load words"
            }
            Self::Write { .. } => "Could not save progress",
            Self::Io { .. } => "Storage error",
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_follows_variant() {
        let path = PathBuf::from("data/words_to_learn.csv");
        let malformed = StorageError::MalformedRow {
            path: path.clone(),
            line: 2,
        };
        assert_eq!(malformed.headline(), "Could not load words");

        let missing = StorageError::MissingColumn {
            path: path.clone(),
            column: "Urdu".to_string(),
        };
        assert_eq!(missing.headline(), "Could not load words");

        let write = StorageError::Write {
            path: path.clone(),
            source: csv::Error::from(std::io::Error::other("disk full")),
        };
        assert_eq!(write.headline(), "Could not save progress");

        let io = StorageError::Io {
            path,
            source: std::io::Error::other("denied"),
        };
        assert_eq!(io.headline(), "Storage error");
    }
}
