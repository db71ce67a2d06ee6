use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
};

// Helper function to split ASCII art into multiple lines and apply color
pub fn split_ascii_art(art: &str, color: Color) -> Vec<Line<'static>> {
    art.trim_matches('\n').lines()
        .map(|line| Line::from(vec![Span::styled(line.to_string(), Style::default().fg(color))]))
        .collect()
}

/// Rect of `percent_x` by `height` rows centred in `area`
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Wrap `text` to the inner width of a bordered block of `width` columns.
pub fn wrap_for(text: &str, width: u16) -> String {
    let available_width = width.saturating_sub(4).max(1);
    textwrap::wrap(text, available_width as usize).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_inner_blank_lines() {
        let lines = split_ascii_art("\nab\n\ncd\n", Color::Cyan);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 10, area);
        assert_eq!(rect.height, 10);
        assert!(rect.y + rect.height <= area.height);
    }

    #[test]
    fn wrap_uses_inner_width() {
        assert_eq!(wrap_for("one two three", 9), "one\ntwo\nthree");
    }
}
