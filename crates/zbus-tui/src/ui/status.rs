//! Status lines
//!
//! Connection status, plus the last error while disconnected.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::App;

/// Render the status lines.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let lines = if app.is_connected() {
        let style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
        vec![Line::styled("status: connected to zBus", style)]
    } else {
        let style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        vec![
            Line::styled("status: disconnected from zBus", style),
            Line::styled(format!("error: {}", app.last_error()), style),
        ]
    };

    frame.render_widget(Paragraph::new(lines), area);
}
