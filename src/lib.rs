pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod session;
pub mod stats;
pub mod store;
pub mod table;
pub mod timer;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use app::{Action, App, action_for_key};
pub use cli::Args;
pub use config::{CardOrder, Config, ConfigError, EndBehavior, StudyConfig, UnknownPolicy};
pub use error::{AppError, StorageError, StorageResult};
pub use models::{AppState, CardFace, DeckState, Notice, Progress, RemovedWord, Word};
pub use session::StudySession;
pub use store::{CsvStore, DeckOrigin, LoadedDeck, WordStore, open_deck};
pub use table::{TableColumns, load_words, save_words};
pub use timer::FlipTimer;
pub use ui::draw;
