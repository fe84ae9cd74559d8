use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub main: Rect,
    pub toast_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[2]);

    UiAreas {
        size,
        header: vertical[0],
        main: vertical[1],
        toast_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_cover_terminal() {
        let size = Rect::new(0, 0, 100, 40);
        let areas = areas(size);
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.toast_line.height, 1);
        assert_eq!(areas.command_line.height, 1);
        assert_eq!(areas.main.height, 34);
        assert_eq!(areas.command_line.y, 39);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 50, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
        assert_eq!(inner.width, 60);
    }
}
