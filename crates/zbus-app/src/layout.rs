//! Screen regions.
//!
//! The screen is split top to bottom into help, status, a mode panel and the
//! history. Only the history height varies freely; the others depend on mode,
//! connection status and menu.

use crate::{MenuId, Mode, form::Field};

/// Rows reserved for the help line.
pub const HELP_ROWS: u16 = 2;

/// Status rows while connected: status line and a spacer.
pub const STATUS_ROWS_CONNECTED: u16 = 2;

/// Status rows while disconnected: status line, error line and a spacer.
pub const STATUS_ROWS_DISCONNECTED: u16 = 3;

/// Rows of one form field, including its spacer.
pub fn field_rows(field: Field) -> u16 {
    match field {
        Field::Name | Field::RequestId => 2,
        Field::Data => 6,
    }
}

/// Rows of the whole send form.
pub fn form_rows() -> u16 {
    Field::ALL.into_iter().map(field_rows).sum()
}

/// A horizontal band of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    /// First row.
    pub y: u16,
    /// Height in rows.
    pub rows: u16,
}

/// Regions of the screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Key bindings for the current mode.
    pub help: Region,
    /// Connection status and last error.
    pub status: Region,
    /// Mock menu in Command mode, form in Send mode, empty in Peruse mode.
    pub panel: Region,
    /// Event history.
    pub history: Region,
    /// Screen width.
    pub columns: u16,
}

impl ScreenLayout {
    /// Compute the regions for a screen of `columns x rows`.
    ///
    /// Regions are clipped at the bottom edge, so the history may be empty on
    /// a small terminal.
    pub fn compute(mode: Mode, connected: bool, menu: MenuId, (columns, rows): (u16, u16)) -> Self {
        let status_rows =
            if connected { STATUS_ROWS_CONNECTED } else { STATUS_ROWS_DISCONNECTED };
        let panel_rows = match mode {
            Mode::Command => u16::try_from(menu.entries().len() + 1).unwrap_or(u16::MAX),
            Mode::Send => form_rows(),
            Mode::Peruse => 0,
        };

        let mut next = 0;
        let mut band = |want: u16| {
            let y = next;
            let rows = want.min(rows.saturating_sub(y));
            next = y + rows;
            Region { y, rows }
        };

        let help = band(HELP_ROWS);
        let status = band(status_rows);
        let panel = band(panel_rows);
        let history = band(u16::MAX);

        Self { help, status, panel, history, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_mode_sizes_panel_to_menu() {
        let layout = ScreenLayout::compute(Mode::Command, true, MenuId::Main, (80, 24));

        assert_eq!(layout.help, Region { y: 0, rows: 2 });
        assert_eq!(layout.status, Region { y: 2, rows: 2 });
        assert_eq!(layout.panel, Region { y: 4, rows: 4 });
        assert_eq!(layout.history, Region { y: 8, rows: 16 });
    }

    #[test]
    fn disconnected_status_takes_extra_row() {
        let layout = ScreenLayout::compute(Mode::Peruse, false, MenuId::Main, (80, 24));

        assert_eq!(layout.status.rows, 3);
        assert_eq!(layout.panel.rows, 0);
        assert_eq!(layout.history, Region { y: 5, rows: 19 });
    }

    #[test]
    fn send_mode_reserves_form() {
        let layout = ScreenLayout::compute(Mode::Send, true, MenuId::PinpadCard, (80, 24));

        assert_eq!(form_rows(), 10);
        assert_eq!(layout.panel, Region { y: 4, rows: 10 });
        assert_eq!(layout.history.rows, 10);
    }

    #[test]
    fn tiny_terminal_clips_regions() {
        let layout = ScreenLayout::compute(Mode::Send, false, MenuId::Main, (20, 6));

        assert_eq!(layout.status, Region { y: 2, rows: 3 });
        assert_eq!(layout.panel, Region { y: 5, rows: 1 });
        assert_eq!(layout.history, Region { y: 6, rows: 0 });
    }
}
