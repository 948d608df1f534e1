use crate::error::{StorageError, StorageResult};
use chrono::{DateTime, Local};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Counters of one study session, from launch to exit.
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub started_at: DateTime<Local>,
}

impl SessionStats {
    pub fn start() -> Self {
        Self {
            started_at: Local::now(),
        }
    }

    pub fn started_label(&self) -> String {
        self.started_at.format("%H:%M").to_string()
    }

    pub fn record(&self, learned: usize, remaining: usize, total: usize) -> SessionRecord {
        SessionRecord {
            started_at: self.started_at.format(TIMESTAMP_FORMAT).to_string(),
            ended_at: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            learned,
            remaining,
            total,
        }
    }
}

/// One row of the stats table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub started_at: String,
    pub ended_at: String,
    pub learned: usize,
    pub remaining: usize,
    pub total: usize,
}

/// Appends `record` to the stats table, writing the header if the file is new.
pub fn append_record(path: &Path, record: &SessionRecord) -> StorageResult<()> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(io_err)?;
    }

    let is_new = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;

    let mut writer = WriterBuilder::new().has_headers(is_new).from_writer(file);
    writer.serialize(record).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)?;

    tracing::info!(learned = record.learned, remaining = record.remaining, "session stats saved");
    Ok(())
}
