use crate::config::StudyConfig;
use crate::error::{StorageError, StorageResult};
use crate::models::{AppState, CardFace, DeckState, Notice};
use crate::session::StudySession;
use crate::stats::{SessionRecord, SessionStats};
use crate::store::{DeckOrigin, WordStore};
use crate::timer::FlipTimer;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Flip,
    MarkKnown,
    MarkUnknown,
    Undo,
    RequestReset,
    ConfirmReset,
    CancelReset,
    ToggleAutoFlip,
    Quit,
}

pub fn action_for_key(state: AppState, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match state {
        AppState::Study => match key.code {
            KeyCode::Char(' ') => Some(Action::Flip),
            KeyCode::Left | KeyCode::Char('k') => Some(Action::MarkKnown),
            KeyCode::Right | KeyCode::Char('j') => Some(Action::MarkUnknown),
            KeyCode::Char('u') => Some(Action::Undo),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::RequestReset),
            KeyCode::Char('a') => Some(Action::ToggleAutoFlip),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        AppState::Complete => match key.code {
            KeyCode::Char('u') => Some(Action::Undo),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::RequestReset),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        AppState::ResetConfirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ConfirmReset),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CancelReset),
            _ => None,
        },
    }
}

/// Everything the study screen needs: the session, where it is saved, the
/// auto-flip timer and what the user currently sees.
pub struct App<S: WordStore> {
    session: StudySession,
    store: S,
    state: AppState,
    notice: Option<Notice>,
    auto_flip: bool,
    flip_delay: Duration,
    timer: FlipTimer,
    stats: SessionStats,
    origin: DeckOrigin,
    should_quit: bool,
}

impl<S: WordStore> App<S> {
    pub fn new(session: StudySession, store: S, study: &StudyConfig, origin: DeckOrigin) -> Self {
        let notice = match origin {
            DeckOrigin::Demo => Some(Notice::warning(
                "No vocabulary files found. Loaded demo words.",
            )),
            DeckOrigin::Progress => Some(Notice::info(format!(
                "Welcome back: {} words left to learn",
                session.len()
            ))),
            DeckOrigin::Source | DeckOrigin::Unavailable => None,
        };

        let mut app = Self {
            session,
            store,
            state: AppState::Study,
            notice,
            auto_flip: study.auto_flip,
            flip_delay: study.flip_delay(),
            timer: FlipTimer::new(),
            stats: SessionStats::start(),
            origin,
            should_quit: false,
        };
        app.show_current_card();
        app
    }

    pub fn session(&self) -> &StudySession {
        &self.session
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn auto_flip(&self) -> bool {
        self.auto_flip
    }

    pub fn flip_delay(&self) -> Duration {
        self.flip_delay
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn origin(&self) -> DeckOrigin {
        self.origin
    }

    pub fn timer(&self) -> &FlipTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut FlipTimer {
        &mut self.timer
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = action_for_key(self.state, key) {
            self.apply(action);
        }
    }

    pub fn apply(&mut self, action: Action) {
        tracing::debug!(?action, state = ?self.state, "applying action");
        match action {
            Action::Flip => {
                self.timer.cancel();
                self.session.flip();
            }
            Action::MarkKnown => match self.session.mark_known(&self.store) {
                Ok(true) => {
                    self.notice = None;
                    self.show_current_card();
                }
                Ok(false) => {}
                Err(e) => self.report(e),
            },
            Action::MarkUnknown => match self.session.mark_unknown(&self.store) {
                Ok(()) => {
                    self.notice = None;
                    self.show_current_card();
                }
                Err(e) => self.report(e),
            },
            Action::Undo => match self.session.undo(&self.store) {
                Ok(true) => {
                    self.notice = Some(Notice::info("Last word restored to learning list!"));
                    self.show_current_card();
                }
                Ok(false) => {}
                Err(e) => self.report(e),
            },
            Action::RequestReset => {
                self.timer.cancel();
                self.state = AppState::ResetConfirm;
            }
            Action::ConfirmReset => match self.session.reset(&self.store) {
                Ok(origin) => {
                    self.origin = origin;
                    self.notice = Some(Notice::info("Progress has been reset!"));
                    self.show_current_card();
                }
                Err(e) => {
                    self.report(e);
                    self.return_from_confirm();
                }
            },
            Action::CancelReset => self.return_from_confirm(),
            Action::ToggleAutoFlip => {
                self.auto_flip = !self.auto_flip;
                if !self.auto_flip {
                    self.timer.cancel();
                } else if self.session.face() == CardFace::Front
                    && self.session.deck_state() == DeckState::Active
                {
                    self.timer.arm(self.flip_delay);
                }
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Auto-flip deadline passed: reveal the back of the current card.
    pub fn on_flip_timer(&mut self) {
        if self.state == AppState::Study && self.session.face() == CardFace::Front {
            self.session.flip();
        }
    }

    /// Shows why the deck could not be loaded at startup.
    pub fn report_load_failure(&mut self, error: StorageError) {
        self.report(error);
    }

    /// Final save on exit. Skipped while nothing could be loaded, so that
    /// unreadable tables are left for the user to inspect.
    pub fn finish(&mut self) -> StorageResult<SessionRecord> {
        self.timer.cancel();
        if self.origin != DeckOrigin::Unavailable {
            self.session.persist(&self.store)?;
        }
        let progress = self.session.progress();
        Ok(self.stats.record(
            self.session.learned_this_session(),
            self.session.len(),
            progress.total,
        ))
    }

    /// Front face of the (new) current card, restarting the auto-flip timer.
    fn show_current_card(&mut self) {
        self.timer.cancel();
        match self.session.deck_state() {
            DeckState::Empty => {
                self.state = AppState::Complete;
                self.notice = Some(Notice::info(format!(
                    "You've learned all {} words! Press r to start over.",
                    self.session.original_count()
                )));
            }
            DeckState::Active => {
                self.state = AppState::Study;
                if self.auto_flip {
                    self.timer.arm(self.flip_delay);
                }
            }
        }
    }

    fn return_from_confirm(&mut self) {
        self.state = match self.session.deck_state() {
            DeckState::Empty => AppState::Complete,
            DeckState::Active => AppState::Study,
        };
        if self.state == AppState::Study
            && self.auto_flip
            && self.session.face() == CardFace::Front
        {
            self.timer.arm(self.flip_delay);
        }
    }

    fn report(&mut self, error: StorageError) {
        tracing::error!("storage operation failed: {}", error);
        self.notice = Some(Notice::error(format!("{}: {error}", error.headline())));
    }
}
