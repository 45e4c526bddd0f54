//! Event history
//!
//! Draws the entries the scrollback algorithm placed in the viewport, newest
//! at the top, wrapping each at the terminal width. The selected entry is
//! bold.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use super::wrap_chars;
use crate::App;

/// Shown until the first event is sent or received.
pub const PLACEHOLDER: &str = "Events broadcast by the zBus server will appear here.";

/// Render the history.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = usize::from(app.terminal_size().0);

    if app.history().is_empty() {
        let lines: Vec<Line> = wrap_chars(PLACEHOLDER, columns).into_iter().map(Line::from).collect();
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    let mut lines = Vec::new();
    for placement in app.visible_history() {
        let Some(entry) = app.history().get(placement.index) else {
            continue;
        };
        let style = if app.selection() == Some(placement.index) {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.extend(wrap_chars(entry.line(), columns).into_iter().map(|row| Line::styled(row, style)));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
