use crate::config::{CardOrder, EndBehavior, StudyConfig, UnknownPolicy};
use crate::error::StorageResult;
use crate::models::{CardFace, DeckState, Progress, RemovedWord, Word};
use crate::store::{DeckOrigin, LoadedDeck, WordStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The words left to learn plus the transient study state around them.
///
/// `current_index` is always a valid position in `deck`, or `deck` is empty.
/// Every operation that changes the deck writes the new deck to the store
/// first and only commits it in memory once the write succeeded, so a
/// storage failure leaves the session exactly as it was.
#[derive(Debug)]
pub struct StudySession {
    deck: Vec<Word>,
    current_index: usize,
    face: CardFace,
    last_removed: Option<RemovedWord>,
    original_count: usize,
    learned_this_session: usize,
    order: CardOrder,
    at_end: EndBehavior,
    unknown: UnknownPolicy,
    rng: StdRng,
}

impl StudySession {
    pub fn new(loaded: LoadedDeck, study: &StudyConfig) -> Self {
        Self::with_rng(loaded, study, StdRng::from_entropy())
    }

    pub fn with_rng(loaded: LoadedDeck, study: &StudyConfig, rng: StdRng) -> Self {
        let mut session = Self {
            original_count: loaded.original_count.max(loaded.words.len()),
            deck: loaded.words,
            current_index: 0,
            face: CardFace::Front,
            last_removed: None,
            learned_this_session: 0,
            order: study.order,
            at_end: study.at_end,
            unknown: study.unknown,
            rng,
        };
        session.current_index = session.first_index();
        session
    }

    pub fn deck(&self) -> &[Word] {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&Word> {
        self.deck.get(self.current_index)
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    pub fn is_flipped(&self) -> bool {
        self.face == CardFace::Back
    }

    pub fn last_removed(&self) -> Option<&RemovedWord> {
        self.last_removed.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.last_removed.is_some()
    }

    pub fn deck_state(&self) -> DeckState {
        if self.deck.is_empty() {
            DeckState::Empty
        } else {
            DeckState::Active
        }
    }

    pub fn original_count(&self) -> usize {
        self.original_count
    }

    pub fn learned_this_session(&self) -> usize {
        self.learned_this_session
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.original_count, self.deck.len())
    }

    /// Moves to the next card and shows its front. Returns false when there
    /// was nowhere to go (empty deck, or the last card with `at_end = stop`).
    pub fn advance(&mut self) -> bool {
        self.face = CardFace::Front;
        if self.deck.is_empty() {
            return false;
        }

        match self.order {
            CardOrder::Random => {
                self.current_index = self.pick_random(Some(self.current_index));
                true
            }
            CardOrder::Sequential => {
                if self.current_index + 1 < self.deck.len() {
                    self.current_index += 1;
                    true
                } else {
                    match self.at_end {
                        EndBehavior::Wrap => {
                            self.current_index = 0;
                            true
                        }
                        EndBehavior::Stop => false,
                    }
                }
            }
        }
    }

    pub fn flip(&mut self) -> CardFace {
        if !self.deck.is_empty() {
            self.face = self.face.flipped();
        }
        self.face
    }

    /// Removes the current word from the deck and moves on. Returns false on
    /// an empty deck.
    pub fn mark_known<S: WordStore + ?Sized>(&mut self, store: &S) -> StorageResult<bool> {
        if self.deck.is_empty() {
            return Ok(false);
        }

        let index = self.current_index;
        let mut staged = self.deck.clone();
        let word = staged.remove(index);
        store.save_progress(&staged)?;

        tracing::info!(word = %word.back, remaining = staged.len(), "marked known");
        self.deck = staged;
        self.last_removed = Some(RemovedWord { word, index });
        self.learned_this_session += 1;
        self.face = CardFace::Front;
        self.current_index = match self.order {
            _ if self.deck.is_empty() => 0,
            CardOrder::Random => self.pick_random(None),
            CardOrder::Sequential => self.index_after_removal(index),
        };
        Ok(true)
    }

    /// Keeps the current word and moves on. With `unknown = requeue` the
    /// word goes to the back of the deck first.
    pub fn mark_unknown<S: WordStore + ?Sized>(&mut self, store: &S) -> StorageResult<()> {
        if self.deck.is_empty() {
            return Ok(());
        }
        if self.unknown == UnknownPolicy::Keep || self.deck.len() == 1 {
            self.advance();
            return Ok(());
        }

        let index = self.current_index;
        let mut staged = self.deck.clone();
        let word = staged.remove(index);
        staged.push(word);
        store.save_progress(&staged)?;

        tracing::debug!(from = index, "requeued unknown word");
        self.deck = staged;
        self.face = CardFace::Front;
        let requeued = self.deck.len() - 1;
        self.current_index = match self.order {
            CardOrder::Random => self.pick_random(Some(requeued)),
            // The next card slid into `index`, unless the word was already last.
            CardOrder::Sequential if index < requeued => index,
            CardOrder::Sequential => match self.at_end {
                EndBehavior::Wrap => 0,
                EndBehavior::Stop => requeued,
            },
        };
        Ok(())
    }

    /// Puts the last known word back where it was and shows it. Only the
    /// most recent removal is kept, so a second undo is a no-op returning false.
    pub fn undo<S: WordStore + ?Sized>(&mut self, store: &S) -> StorageResult<bool> {
        let Some(removed) = self.last_removed.as_ref() else {
            return Ok(false);
        };

        let index = removed.index.min(self.deck.len());
        let mut staged = self.deck.clone();
        staged.insert(index, removed.word.clone());
        store.save_progress(&staged)?;

        tracing::info!(index, "undo restored word");
        self.deck = staged;
        self.current_index = index;
        self.face = CardFace::Front;
        self.last_removed = None;
        self.learned_this_session = self.learned_this_session.saturating_sub(1);
        Ok(true)
    }

    /// Drops all progress and starts over from the original word list.
    /// Returns where the reloaded words came from.
    pub fn reset<S: WordStore + ?Sized>(&mut self, store: &S) -> StorageResult<DeckOrigin> {
        let loaded = store.load_original()?;
        store.clear_progress()?;

        tracing::info!(count = loaded.words.len(), origin = ?loaded.origin, "progress reset");
        self.original_count = loaded.original_count.max(loaded.words.len());
        self.deck = loaded.words;
        self.last_removed = None;
        self.learned_this_session = 0;
        self.face = CardFace::Front;
        self.current_index = self.first_index();
        Ok(loaded.origin)
    }

    pub fn persist<S: WordStore + ?Sized>(&self, store: &S) -> StorageResult<()> {
        store.save_progress(&self.deck)
    }

    fn first_index(&mut self) -> usize {
        match self.order {
            CardOrder::Random if !self.deck.is_empty() => self.pick_random(None),
            _ => 0,
        }
    }

    fn index_after_removal(&self, removed_at: usize) -> usize {
        if removed_at < self.deck.len() {
            return removed_at;
        }
        match self.at_end {
            EndBehavior::Wrap => 0,
            EndBehavior::Stop => self.deck.len() - 1,
        }
    }

    /// Random position in the deck, avoiding `exclude` when there is a choice.
    fn pick_random(&mut self, exclude: Option<usize>) -> usize {
        let len = self.deck.len();
        if len <= 1 {
            return 0;
        }
        match exclude {
            Some(skip) if skip < len => {
                let pick = self.rng.gen_range(0..len - 1);
                if pick >= skip { pick + 1 } else { pick }
            }
            _ => self.rng.gen_range(0..len),
        }
    }
}
