//! Help line
//!
//! Key bindings for the current mode.

use ratatui::{Frame, layout::Rect, text::Line, widgets::Paragraph};

use super::wrap_chars;
use crate::App;

/// Render the help text.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = wrap_chars(app.mode().help(), usize::from(area.width))
        .into_iter()
        .map(Line::from)
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
