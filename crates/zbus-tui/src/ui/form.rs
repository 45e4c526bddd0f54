//! Send form
//!
//! Three labelled fields: event name and requestId on one row each, data
//! wrapped over the rows below its label. When the data is longer than its
//! rows, the rows around the cursor are shown. The terminal cursor is placed
//! in the focused field.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use zbus_app::{form::Field, layout::field_rows};

use super::wrap_chars;
use crate::App;

/// Render the form and position the cursor.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = app.form();
    let data_width = app.data_width();
    let mut lines = Vec::new();
    let mut cursor = None;

    for field in Field::ALL {
        let label = field.label();
        let focused = form.focus() == field;
        let visible = usize::from(field_rows(field).saturating_sub(1)).max(1);

        let (rows, cursor_row, cursor_column) = match field {
            Field::Data => (
                wrap_chars(form.value(field), data_width),
                form.cursor() / data_width.max(1),
                form.cursor() % data_width.max(1),
            ),
            Field::Name | Field::RequestId => (vec![form.value(field).to_owned()], 0, form.cursor()),
        };
        let skip = if focused { cursor_row.saturating_sub(visible - 1) } else { 0 };

        if focused {
            cursor = Some((lines.len() + cursor_row - skip, label.len() + cursor_column));
        }

        let label_style =
            if focused { Style::default().add_modifier(Modifier::BOLD) } else { Style::default() };
        let indent = " ".repeat(label.len());
        let padded = rows.into_iter().skip(skip).chain(std::iter::repeat(String::new()));
        for (i, row) in padded.take(visible).enumerate() {
            let lead =
                if i == 0 { Span::styled(label, label_style) } else { Span::raw(indent.clone()) };
            lines.push(Line::from(vec![lead, Span::raw(row)]));
        }
        lines.push(Line::default());
    }

    frame.render_widget(Paragraph::new(lines), area);

    if let Some((row, column)) = cursor {
        let x = area.x.saturating_add(u16::try_from(column).unwrap_or(u16::MAX));
        let y = area.y.saturating_add(u16::try_from(row).unwrap_or(u16::MAX));
        if y < area.bottom() {
            frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), y));
        }
    }
}
