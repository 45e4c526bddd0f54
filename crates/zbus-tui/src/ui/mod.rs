//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into the frame.
//!
//! Region sizes come from [`App::layout`] so the history viewport drawn here
//! is exactly the one the scrollback algorithm windowed.

mod form;
mod help;
mod history;
mod menu;
mod status;

use ratatui::{Frame, layout::Rect};
use zbus_app::{Mode, layout::Region};

pub use history::PLACEHOLDER;

use crate::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let layout = app.layout();
    let area = frame.area();

    help::render(frame, app, band(area, layout.help));
    status::render(frame, app, band(area, layout.status));
    match app.mode() {
        Mode::Command => menu::render(frame, app, band(area, layout.panel)),
        Mode::Send => form::render(frame, app, band(area, layout.panel)),
        Mode::Peruse => {},
    }
    history::render(frame, app, band(area, layout.history));
}

/// Full-width rectangle for `region`, clipped to `area`.
fn band(area: Rect, region: Region) -> Rect {
    Rect::new(area.x, area.y.saturating_add(region.y), area.width, region.rows).intersection(area)
}

/// Split `text` into rows of `width` characters, the way a terminal wraps it.
///
/// Always yields at least one row.
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width.max(1)).map(|chunk| chunk.iter().collect()).collect()
}
