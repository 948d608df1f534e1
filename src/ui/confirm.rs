use crate::ui::layout::centered_rect;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Popup asking whether to throw away all progress.
pub fn draw_reset_confirmation(f: &mut Frame) {
    let area = centered_rect(f.area(), 50, 9);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(" Reset Progress ").centered())
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let message = Paragraph::new(vec![
        Line::from("Are you sure you want to reset all progress?"),
        Line::from(Span::styled(
            "This cannot be undone!",
            Style::default().fg(Color::Red),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(message, chunks[0]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes, reset  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No, keep studying"),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[1]);
}
