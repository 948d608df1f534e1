use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

pub struct StudyLayout {
    pub header_area: Rect,
    pub gauge_area: Rect,
    pub card_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_study_chunks(area: Rect) -> StudyLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(area);

    StudyLayout {
        header_area: chunks[0],
        gauge_area: chunks[1],
        card_area: chunks[2],
        status_area: chunks[3],
        help_area: chunks[4],
    }
}

/// A `width` x `height` box centred in `area`, clipped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_study_layout() {
        let area = Rect::new(0, 0, 80, 30);
        let layout = calculate_study_chunks(area);

        assert_eq!(layout.header_area.height, 1);
        assert_eq!(layout.gauge_area.height, 3);
        assert_eq!(layout.status_area.height, 4);
        assert_eq!(layout.help_area.height, 3);
        // Margin 1 leaves 28 rows, 11 of them fixed.
        assert_eq!(layout.card_area.height, 17);
        assert_eq!(layout.card_area.width, 78);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 30);
        let rect = centered_rect(area, 40, 7);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 7);
        assert_eq!(rect.x, 20);
        assert!(rect.y >= 11 && rect.y <= 12);
    }

    #[test]
    fn test_centered_rect_clipped() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(area, 40, 7);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 5);
    }
}
