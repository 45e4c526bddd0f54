//! Mock menu
//!
//! Numbered entries of the current menu; the number is the key that selects
//! the entry.

use ratatui::{Frame, layout::Rect, text::Line, widgets::Paragraph};

use crate::App;

/// Render the mock menu.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .menu()
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| Line::from(format!("{}) {}", i + 1, entry.label)))
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
