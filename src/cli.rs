use crate::config::{CardOrder, Config, UnknownPolicy};
use clap::Parser;
use std::path::PathBuf;

/// Learn Urdu vocabulary with flashcards in the terminal.
#[derive(Debug, Parser)]
#[command(name = "urdu-flashcards", version, about)]
pub struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the word, progress and stats tables
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Start with auto-flip disabled
    #[arg(long)]
    pub no_auto_flip: bool,

    /// Auto-flip delay in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Show cards in table order instead of at random
    #[arg(long)]
    pub sequential: bool,

    /// Move "don't know" words to the back of the deck
    #[arg(long)]
    pub requeue_unknown: bool,

    /// Log filter, e.g. "debug" (RUST_LOG wins)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Command-line values override the config file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.data_dir {
            config.data.dir = dir.clone();
        }
        if self.no_auto_flip {
            config.study.auto_flip = false;
        }
        if let Some(ms) = self.delay_ms {
            config.study.flip_delay_ms = ms;
        }
        if self.sequential {
            config.study.order = CardOrder::Sequential;
        }
        if self.requeue_unknown {
            config.study.unknown = UnknownPolicy::Requeue;
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
    }
}
