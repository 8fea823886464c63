pub mod cooking;
pub mod screen;
pub mod setup;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

/// A rect of at most `width` x `height` centered inside `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

/// Key hints along the bottom of a screen
pub fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
}

/// `left` and `right` on one line, padded apart to fill `width` columns
pub fn spread(left: &str, right: &str, width: u16) -> (String, String) {
    let used = left.width() + right.width();
    let gap = (width as usize).saturating_sub(used).max(1);
    (left.to_string(), format!("{}{}", " ".repeat(gap), right))
}
