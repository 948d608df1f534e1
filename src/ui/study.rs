use crate::app::App;
use crate::models::{AppState, CardFace, NoticeLevel};
use crate::store::{DeckOrigin, WordStore};
use crate::ui::layout::calculate_study_chunks;
use crate::utils::{progress_label, session_label, truncate_string};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

const CARD_FRONT_BG: Color = Color::White;
const CARD_FRONT_FG: Color = Color::Black;
const CARD_BACK_BG: Color = Color::Rgb(0x2B, 0x2B, 0x2B);
const CARD_BACK_FG: Color = Color::White;

pub fn draw_study<S: WordStore>(f: &mut Frame, app: &App<S>) {
    let layout = calculate_study_chunks(f.area());
    let session = app.session();
    let progress = session.progress();

    let header = Paragraph::new(progress_label(&progress))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(header, layout.header_area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
        .ratio(progress.ratio())
        .label(format!("{:.0}%", progress.percent()));
    f.render_widget(gauge, layout.gauge_area);

    draw_card(f, app, layout.card_area);
    draw_status(f, app, layout.status_area);
    draw_help(f, app.state(), layout.help_area);
}

fn draw_card<S: WordStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let session = app.session();
    let (title, word, style) = match session.current() {
        None if app.origin() == DeckOrigin::Unavailable => (
            "No words loaded",
            "Press r to reload the word list",
            Style::default().fg(Color::Red).bg(CARD_FRONT_BG),
        ),
        None => (
            "Congratulations!",
            "All words learned!",
            Style::default().fg(Color::Green).bg(CARD_FRONT_BG),
        ),
        Some(card) => match session.face() {
            CardFace::Front => (
                "Urdu",
                card.front.as_str(),
                Style::default().fg(CARD_FRONT_FG).bg(CARD_FRONT_BG),
            ),
            CardFace::Back => (
                "English",
                card.back.as_str(),
                Style::default().fg(CARD_BACK_FG).bg(CARD_BACK_BG),
            ),
        },
    };

    // Vertically centre the word inside the bordered card.
    let inner_height = area.height.saturating_sub(2) as usize;
    let mut text = Text::default();
    for _ in 0..inner_height.saturating_sub(1) / 2 {
        text.push_line(Line::from(""));
    }
    text.push_line(Line::from(Span::styled(
        word,
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let card = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(format!(" {} ", title)).centered())
                .title_style(Style::default().add_modifier(Modifier::ITALIC)),
        );
    f.render_widget(card, area);
}

fn draw_status<S: WordStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let session = app.session();
    let width = area.width.saturating_sub(2) as usize;

    let auto_flip = if app.auto_flip() {
        format!("Auto-flip: on ({:.0}s)", app.flip_delay().as_secs_f64())
    } else {
        "Auto-flip: off".to_string()
    };
    let undo = if session.can_undo() {
        "Undo available"
    } else {
        "Nothing to undo"
    };

    let mut text = Text::default();
    text.push_line(Line::from(format!(
        "{} | {} | {}",
        session_label(
            session.learned_this_session(),
            &app.stats().started_label()
        ),
        auto_flip,
        undo
    )));
    if let Some(notice) = app.notice() {
        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        text.push_line(Line::from(Span::styled(
            truncate_string(&notice.text, width),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }

    let status = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_help(f: &mut Frame, state: AppState, area: Rect) {
    let spans = match state {
        AppState::Complete => vec![
            key_span("r"),
            Span::from(" Reset All  "),
            key_span("u"),
            Span::from(" Undo  "),
            key_span("Esc"),
            Span::from(" Quit"),
        ],
        _ => vec![
            key_span("Space"),
            Span::from(" Flip  "),
            key_span("←"),
            Span::from(" Know  "),
            key_span("→"),
            Span::from(" Don't Know  "),
            key_span("u"),
            Span::from(" Undo  "),
            key_span("a"),
            Span::from(" Auto-flip  "),
            key_span("r"),
            Span::from(" Reset  "),
            key_span("Esc"),
            Span::from(" Quit"),
        ],
    };

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
