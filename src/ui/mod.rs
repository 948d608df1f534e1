pub mod layout;
mod confirm;
mod study;

pub use confirm::draw_reset_confirmation;
pub use layout::{calculate_study_chunks, centered_rect};
pub use study::draw_study;

use crate::app::App;
use crate::models::AppState;
use crate::store::WordStore;
use ratatui::Frame;

pub fn draw<S: WordStore>(f: &mut Frame, app: &App<S>) {
    draw_study(f, app);
    if app.state() == AppState::ResetConfirm {
        draw_reset_confirmation(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CardOrder, StudyConfig};
    use crate::models::Word;
    use crate::session::StudySession;
    use crate::store::DeckOrigin;
    use crate::store::memory::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn app() -> App<MemoryStore> {
        let store = MemoryStore::new(vec![
            Word::new("salaam", "Hello"),
            Word::new("paani", "Water"),
        ]);
        let study = StudyConfig {
            order: CardOrder::Sequential,
            auto_flip: false,
            ..StudyConfig::default()
        };
        let session = StudySession::new(store.load_deck().unwrap(), &study);
        App::new(session, store, &study, DeckOrigin::Source)
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn render(app: &App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_front_face_rendered() {
        let screen = render(&app());
        assert!(screen.contains("Progress: 0/2 words learned (0.0%)"));
        assert!(screen.contains(" Urdu "));
        assert!(screen.contains("salaam"));
        assert!(!screen.contains("Hello"));
        assert!(screen.contains("Auto-flip: off"));
    }

    #[test]
    fn test_back_face_rendered() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        let screen = render(&app);
        assert!(screen.contains(" English "));
        assert!(screen.contains("Hello"));
    }

    #[test]
    fn test_progress_after_known() {
        let mut app = app();
        press(&mut app, KeyCode::Left);
        let screen = render(&app);
        assert!(screen.contains("Progress: 1/2 words learned (50.0%)"));
        assert!(screen.contains("paani"));
        assert!(screen.contains("Undo available"));
    }

    #[test]
    fn test_completion_rendered() {
        let mut app = app();
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        let screen = render(&app);
        assert!(screen.contains("All words learned!"));
        assert!(screen.contains("Reset All"));
    }

    #[test]
    fn test_unreadable_deck_rendered() {
        let store = MemoryStore::new(vec![Word::new("salaam", "Hello")]);
        store.fail_reads.set(true);
        let (loaded, error) = crate::store::open_deck(&store);
        let study = StudyConfig::default();
        let origin = loaded.origin;
        let session = StudySession::new(loaded, &study);
        let mut app = App::new(session, store, &study, origin);
        app.report_load_failure(error.unwrap());

        let screen = render(&app);
        assert!(screen.contains("No words loaded"));
        assert!(screen.contains("Could not load words"));
        assert!(!screen.contains("All words learned!"));
    }

    #[test]
    fn test_reset_popup_rendered() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        let screen = render(&app);
        assert!(screen.contains("Reset Progress"));
        assert!(screen.contains("This cannot be undone!"));
    }
}
