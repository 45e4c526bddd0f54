//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Arrow keys are translated into
//! the `Esc [ A..D` sequences the [`App`] understands.

use std::{
    io::{self, Stdout, stdout},
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{FutureExt, StreamExt};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use zbus_app::{App, AppEvent, Driver, KeyInput};

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The terminal event stream ended.
    #[error("terminal input closed")]
    InputClosed,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the terminal for its lifetime: raw mode and the alternate screen are
/// entered on creation and restored on drop.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    poll_interval: Duration,
    /// Events produced before the first poll (initial size).
    pending: Vec<AppEvent>,
}

impl TerminalDriver {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or the alternate screen cannot be
    /// entered.
    pub fn new(poll_interval: Duration) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let (columns, rows) = terminal::size()?;

        Ok(Self {
            terminal,
            event_stream: EventStream::new(),
            poll_interval,
            pending: vec![AppEvent::Resize(columns, rows)],
        })
    }

    /// Convert a crossterm key press into app events.
    pub fn convert_key(key: KeyEvent) -> Vec<AppEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            return vec![AppEvent::Interrupt];
        }

        let keys = match key.code {
            KeyCode::Char(c) => vec![KeyInput::Char(c)],
            KeyCode::Enter => vec![KeyInput::Enter],
            KeyCode::Tab => vec![KeyInput::Tab],
            KeyCode::Backspace => vec![KeyInput::Backspace],
            KeyCode::Esc => vec![KeyInput::Esc],
            KeyCode::Up => KeyInput::arrow('A').to_vec(),
            KeyCode::Down => KeyInput::arrow('B').to_vec(),
            KeyCode::Right => KeyInput::arrow('C').to_vec(),
            KeyCode::Left => KeyInput::arrow('D').to_vec(),
            _ => vec![],
        };
        keys.into_iter().map(AppEvent::Key).collect()
    }

    fn convert_event(event: Event, events: &mut Vec<AppEvent>) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                events.extend(Self::convert_key(key));
            },
            Event::Resize(columns, rows) => events.push(AppEvent::Resize(columns, rows)),
            _ => {},
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;
    type Instant = Instant;

    async fn poll_event(&mut self) -> Result<Vec<AppEvent>, Self::Error> {
        let mut events = std::mem::take(&mut self.pending);

        tokio::select! {
            biased;

            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => Self::convert_event(event, &mut events),
                    Some(Err(e)) => return Err(TerminalError::Io(e)),
                    None => return Err(TerminalError::InputClosed),
                }
            }

            () = tokio::time::sleep(self.poll_interval) => {}
        }

        // Drain whatever else is already buffered so a key sequence lands in
        // one cycle.
        while let Some(Some(Ok(event))) = self.event_stream.next().now_or_never() {
            Self::convert_event(event, &mut events);
        }

        Ok(events)
    }

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Vec<AppEvent> {
        TerminalDriver::convert_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn ctrl_c_interrupts() {
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), vec![AppEvent::Interrupt]);
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::NONE), vec![AppEvent::Key(
            KeyInput::Char('c')
        )]);
    }

    #[test]
    fn arrows_become_escape_sequences() {
        assert_eq!(press(KeyCode::Up, KeyModifiers::NONE), vec![
            AppEvent::Key(KeyInput::Esc),
            AppEvent::Key(KeyInput::Char('[')),
            AppEvent::Key(KeyInput::Char('A')),
        ]);
        assert_eq!(press(KeyCode::Left, KeyModifiers::NONE).last(), Some(&AppEvent::Key(
            KeyInput::Char('D')
        )));
    }

    #[test]
    fn unsupported_keys_are_dropped() {
        assert!(press(KeyCode::F(1), KeyModifiers::NONE).is_empty());
        assert!(press(KeyCode::Home, KeyModifiers::NONE).is_empty());
    }
}
