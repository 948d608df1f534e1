use crate::config::DataConfig;
use crate::error::{StorageError, StorageResult};
use crate::models::Word;
use crate::table::{TableColumns, load_words, save_words};
use std::fs;
use std::path::PathBuf;

/// Where the deck of a session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckOrigin {
    Progress,
    Source,
    Demo,
    /// Nothing could be loaded; the session starts empty.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDeck {
    pub words: Vec<Word>,
    /// Size of the full word list, the denominator of progress.
    pub original_count: usize,
    pub origin: DeckOrigin,
}

/// Backing storage of the word tables.
pub trait WordStore {
    /// Saved progress if there is any, otherwise the original words.
    fn load_deck(&self) -> StorageResult<LoadedDeck>;

    /// The original words, ignoring saved progress.
    fn load_original(&self) -> StorageResult<LoadedDeck>;

    fn save_progress(&self, words: &[Word]) -> StorageResult<()>;

    fn clear_progress(&self) -> StorageResult<()>;
}

pub fn demo_words() -> Vec<Word> {
    vec![
        Word::new("سلام", "Hello"),
        Word::new("شکریہ", "Thank you"),
        Word::new("پانی", "Water"),
    ]
}

/// Startup load that never fails outright.
///
/// A damaged progress file falls back to the original words. When those
/// cannot be read either, the deck starts empty so a reset can still
/// recover. The first error is handed back for display.
pub fn open_deck<S: WordStore + ?Sized>(store: &S) -> (LoadedDeck, Option<StorageError>) {
    let error = match store.load_deck() {
        Ok(deck) => return (deck, None),
        Err(e) => e,
    };
    tracing::warn!("cannot load saved deck: {}", error);

    match store.load_original() {
        Ok(deck) => (deck, Some(error)),
        Err(e) => {
            tracing::error!("cannot load original words: {}", e);
            let deck = LoadedDeck {
                words: Vec::new(),
                original_count: 0,
                origin: DeckOrigin::Unavailable,
            };
            (deck, Some(error))
        }
    }
}

/// Word tables kept as CSV files in the data directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    source_path: PathBuf,
    progress_path: PathBuf,
    columns: TableColumns,
}

impl CsvStore {
    pub fn new(source_path: PathBuf, progress_path: PathBuf, columns: TableColumns) -> Self {
        Self {
            source_path,
            progress_path,
            columns,
        }
    }

    pub fn from_config(data: &DataConfig) -> Self {
        Self::new(data.source_path(), data.progress_path(), data.columns())
    }

    fn source_words(&self) -> StorageResult<Option<Vec<Word>>> {
        if !self.source_path.exists() {
            return Ok(None);
        }
        load_words(&self.source_path, &self.columns).map(Some)
    }
}

impl WordStore for CsvStore {
    fn load_deck(&self) -> StorageResult<LoadedDeck> {
        if self.progress_path.exists() {
            let words = load_words(&self.progress_path, &self.columns)?;
            if !words.is_empty() {
                let original_count = match self.source_words() {
                    Ok(Some(source)) => source.len().max(words.len()),
                    Ok(None) => words.len(),
                    Err(e) => {
                        tracing::warn!("cannot count source words: {}", e);
                        words.len()
                    }
                };
                tracing::info!(
                    remaining = words.len(),
                    original_count,
                    "resuming saved progress"
                );
                return Ok(LoadedDeck {
                    words,
                    original_count,
                    origin: DeckOrigin::Progress,
                });
            }
        }
        self.load_original()
    }

    fn load_original(&self) -> StorageResult<LoadedDeck> {
        match self.source_words()? {
            Some(words) => {
                tracing::info!(
                    path = %self.source_path.display(),
                    count = words.len(),
                    "loaded source words"
                );
                Ok(LoadedDeck {
                    original_count: words.len(),
                    words,
                    origin: DeckOrigin::Source,
                })
            }
            None => {
                tracing::warn!(
                    path = %self.source_path.display(),
                    "no vocabulary file found, using demo words"
                );
                let words = demo_words();
                Ok(LoadedDeck {
                    original_count: words.len(),
                    words,
                    origin: DeckOrigin::Demo,
                })
            }
        }
    }

    fn save_progress(&self, words: &[Word]) -> StorageResult<()> {
        save_words(&self.progress_path, &self.columns, words)?;
        tracing::debug!(remaining = words.len(), "progress saved");
        Ok(())
    }

    fn clear_progress(&self) -> StorageResult<()> {
        match fs::remove_file(&self.progress_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                path: self.progress_path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// In-memory store with switchable read and write failures.
    #[derive(Debug)]
    pub struct MemoryStore {
        pub original: Vec<Word>,
        pub progress: RefCell<Option<Vec<Word>>>,
        pub fail_reads: Cell<bool>,
        pub fail_writes: Cell<bool>,
        pub saves: Cell<usize>,
    }

    impl MemoryStore {
        pub fn new(original: Vec<Word>) -> Self {
            Self {
                original,
                progress: RefCell::new(None),
                fail_reads: Cell::new(false),
                fail_writes: Cell::new(false),
                saves: Cell::new(0),
            }
        }

        pub fn saved(&self) -> Option<Vec<Word>> {
            self.progress.borrow().clone()
        }

        fn read_failure(&self) -> StorageError {
            StorageError::MalformedRow {
                path: PathBuf::from("memory"),
                line: 2,
            }
        }

        fn write_failure(&self) -> StorageError {
            StorageError::Write {
                path: PathBuf::from("memory"),
                source: csv::Error::from(std::io::Error::other("disk unavailable")),
            }
        }
    }

    impl WordStore for MemoryStore {
        fn load_deck(&self) -> StorageResult<LoadedDeck> {
            if self.fail_reads.get() {
                return Err(self.read_failure());
            }
            match self.progress.borrow().as_ref() {
                Some(words) if !words.is_empty() => Ok(LoadedDeck {
                    words: words.clone(),
                    original_count: self.original.len().max(words.len()),
                    origin: DeckOrigin::Progress,
                }),
                _ => self.load_original(),
            }
        }

        fn load_original(&self) -> StorageResult<LoadedDeck> {
            if self.fail_reads.get() {
                return Err(self.read_failure());
            }
            Ok(LoadedDeck {
                words: self.original.clone(),
                original_count: self.original.len(),
                origin: DeckOrigin::Source,
            })
        }

        fn save_progress(&self, words: &[Word]) -> StorageResult<()> {
            if self.fail_writes.get() {
                return Err(self.write_failure());
            }
            self.saves.set(self.saves.get() + 1);
            *self.progress.borrow_mut() = Some(words.to_vec());
            Ok(())
        }

        fn clear_progress(&self) -> StorageResult<()> {
            if self.fail_writes.get() {
                return Err(self.write_failure());
            }
            *self.progress.borrow_mut() = None;
            Ok(())
        }
    }
}
