/// One vocabulary entry: Urdu on the front, English on the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub front: String,
    pub back: String,
}

impl Word {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// A word taken out of the deck by "mark known", kept for undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedWord {
    pub word: Word,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardFace {
    #[default]
    Front,
    Back,
}

impl CardFace {
    pub fn flipped(self) -> Self {
        match self {
            CardFace::Front => CardFace::Back,
            CardFace::Back => CardFace::Front,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckState {
    Active,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub learned: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(total: usize, remaining: usize) -> Self {
        Self {
            learned: total.saturating_sub(remaining),
            total,
        }
    }

    /// Fraction of the original deck already learned, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.learned as f64 / self.total as f64
        }
    }

    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Study,
    ResetConfirm,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// One-line message shown under the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}
