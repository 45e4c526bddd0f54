//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive session completely decoupled from terminal and network I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Interprets keys in Command, Send and Peruse mode, including the
//!   `Esc [ A..D` arrow sequences.
//! - Owns the send form, the session history and the simulator.
//! - Tracks connection status and terminal dimensions for rendering.
//! - Closes each input cycle with [`App::end_cycle`], which re-windows the
//!   history and reports which screen regions changed.

use tracing::{debug, info};
use zbus_proto::{Event, MockId};

use crate::{
    AppAction, AppEvent, HistoryEntry, KeyInput, MenuId, MenuTarget, Mode, Origin, SendForm,
    SessionConfig, SessionContext, Simulator,
    form::Field,
    layout::ScreenLayout,
    scrollback::{self, Placement},
};

/// Progress through an `Esc [ X` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escape {
    Idle,
    /// Saw `Esc`; the next key decides between sequence and bare Escape.
    Started,
    /// Saw `Esc [`; the next key is the arrow direction.
    Bracket,
}

/// Screen regions that changed during a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Redraw {
    /// Mode changed.
    pub help: bool,
    /// Help changed, or the connection status or error changed.
    pub status: bool,
    /// Status changed, or the menu changed.
    pub panel: bool,
    /// History was re-windowed.
    pub history: bool,
    /// Form contents or cursor changed.
    pub form: bool,
}

impl Redraw {
    /// Whether anything needs drawing.
    pub fn any(self) -> bool {
        self.help || self.status || self.panel || self.history || self.form
    }
}

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Context being built by the current cycle.
    context: SessionContext,
    escape: Escape,
    form: SendForm,
    /// Every event sent or received, oldest first.
    history: Vec<HistoryEntry>,
    simulator: Simulator,
    /// Live connection status. Copied into the context at cycle end.
    connected: bool,
    last_error: String,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    resized: bool,
    status_changed: bool,
    form_changed: bool,
}

impl App {
    /// Create an App in Command mode with an empty history.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            context: SessionContext::default(),
            escape: Escape::Idle,
            form: SendForm::new(),
            history: Vec::new(),
            simulator: Simulator::new(
                config.simulator,
                config.slow_reply_delay,
                config.fast_reply_delay,
            ),
            connected: false,
            last_error: String::new(),
            terminal_size: (80, 24),
            resized: false,
            status_changed: false,
            form_changed: false,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => {
                self.resolve_escape();
                vec![]
            },
            AppEvent::Interrupt => vec![AppAction::Quit],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                self.resized = true;
                vec![]
            },
            AppEvent::Connected => {
                self.connected = true;
                self.status_changed = true;
                vec![]
            },
            AppEvent::Disconnected { error } => {
                self.connected = false;
                self.last_error = error;
                self.status_changed = true;
                vec![]
            },
            AppEvent::Received(event) => {
                let replies = self.simulator.observe(&event);
                self.history.push(HistoryEntry::new(Origin::Received, event));
                replies.into_iter().map(|(mock, delay)| AppAction::Schedule { mock, delay }).collect()
            },
            AppEvent::SimulatorReply(mock) => {
                let event = self.simulator.build(mock);
                self.submit(event)
            },
        }
    }

    /// Finish an input cycle that started at `previous`.
    ///
    /// Refreshes the connection status and history size in the context,
    /// recomputes `top` when the mode, the selection or the terminal size
    /// changed or the history grew, and reports what needs redrawing.
    pub fn end_cycle(&mut self, previous: SessionContext) -> Redraw {
        self.context.connected = self.connected;
        self.context.history_size = self.history.len();
        let resized = std::mem::take(&mut self.resized);
        let status_changed = std::mem::take(&mut self.status_changed);
        let next = self.context;

        let mode_changed = previous.mode != next.mode;
        let help = resized || mode_changed;
        let status = help || status_changed || previous.connected != next.connected;
        let panel = status || previous.menu != next.menu;
        let history = resized
            || mode_changed
            || previous.selection != next.selection
            || next.history_size > previous.history_size;

        if history {
            let rows = usize::from(self.layout().history.rows);
            let heights = scrollback::heights(&self.history, usize::from(self.terminal_size.0));
            self.context.top = scrollback::next_top(&heights, rows, previous.top, next.selection);
        }

        Redraw { help, status, panel, history, form: std::mem::take(&mut self.form_changed) }
    }

    /// Current context.
    pub fn context(&self) -> SessionContext {
        self.context
    }

    /// Mode the next key is interpreted in.
    pub fn mode(&self) -> Mode {
        self.context.mode
    }

    /// Menu shown in Command mode.
    pub fn menu(&self) -> MenuId {
        self.context.menu
    }

    /// Selected history index, if any.
    pub fn selection(&self) -> Option<usize> {
        self.context.selection
    }

    /// History index at the top edge of the history viewport.
    pub fn top(&self) -> usize {
        self.context.top
    }

    /// Send form.
    pub fn form(&self) -> &SendForm {
        &self.form
    }

    /// Every event sent or received, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Simulator state.
    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    /// Whether the bus connection is up.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Last connection error, empty if none.
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Screen regions for the current state.
    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::compute(self.context.mode, self.connected, self.context.menu, self.terminal_size)
    }

    /// History entries that fit the history viewport at the current `top`.
    pub fn visible_history(&self) -> Vec<Placement> {
        let rows = usize::from(self.layout().history.rows);
        let heights = scrollback::heights(&self.history, usize::from(self.terminal_size.0));
        scrollback::layout(&heights, rows, self.context.top)
    }

    /// Columns available to the data field.
    pub fn data_width(&self) -> usize {
        usize::from(self.terminal_size.0).saturating_sub(Field::Data.label().len())
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match std::mem::replace(&mut self.escape, Escape::Idle) {
            Escape::Started if key == KeyInput::Char('[') => {
                self.escape = Escape::Bracket;
                return vec![];
            },
            Escape::Started => {
                self.enter_command();
                return self.command_key(key);
            },
            Escape::Bracket => {
                if let KeyInput::Char(direction) = key {
                    self.arrow(direction);
                }
                return vec![];
            },
            Escape::Idle => {},
        }

        match self.context.mode {
            Mode::Command => self.command_key(key),
            Mode::Send => self.send_key(key),
            Mode::Peruse => {
                if key == KeyInput::Esc {
                    self.escape = Escape::Started;
                }
                vec![]
            },
        }
    }

    /// A tick between `Esc` and its follow-up key means a bare Escape.
    fn resolve_escape(&mut self) {
        match std::mem::replace(&mut self.escape, Escape::Idle) {
            Escape::Started => self.enter_command(),
            Escape::Bracket | Escape::Idle => {},
        }
    }

    fn command_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let KeyInput::Char(c) = key else {
            return vec![];
        };

        match c {
            's' => self.enter(Mode::Send),
            'p' => self.enter(Mode::Peruse),
            'm' => {
                self.simulator.toggle();
                info!(enabled = self.simulator.is_enabled(), "pinpad simulator toggled");
            },
            _ => {
                if let Some(digit) = c.to_digit(10) {
                    self.select(digit);
                }
            },
        }
        vec![]
    }

    fn select(&mut self, digit: u32) {
        match self.context.menu.select(digit) {
            Some(MenuTarget::Menu(menu)) => self.context.menu = menu,
            Some(MenuTarget::Mock(mock)) => self.load_mock(mock),
            None => debug!(digit, menu = ?self.context.menu, "ignoring out of range selection"),
        }
    }

    fn load_mock(&mut self, mock: MockId) {
        self.form.load(&self.simulator.build(mock));
        self.form_changed = true;
        self.enter(Mode::Send);
    }

    fn send_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc => {
                self.escape = Escape::Started;
                return vec![];
            },
            KeyInput::Enter => {
                let event = self.form.to_event();
                return self.submit(event);
            },
            KeyInput::Tab => self.form.focus_next(),
            KeyInput::Backspace => self.form.backspace(),
            KeyInput::Char(c) => self.form.insert(c),
        }
        self.form_changed = true;
        vec![]
    }

    fn arrow(&mut self, direction: char) {
        match self.context.mode {
            Mode::Send => {
                let width = self.data_width();
                match direction {
                    'A' => self.form.up(width),
                    'B' => self.form.down(width),
                    'C' => self.form.right(),
                    'D' => self.form.left(),
                    _ => return,
                }
                self.form_changed = true;
            },
            Mode::Peruse => self.move_selection(direction),
            Mode::Command => {},
        }
    }

    /// Up walks toward newer entries and Down toward older ones, each
    /// wrapping to the newest.
    fn move_selection(&mut self, direction: char) {
        let Some(newest) = self.history.len().checked_sub(1) else {
            return;
        };

        self.context.selection = match (direction, self.context.selection) {
            ('A', Some(selection)) if selection < newest => Some(selection + 1),
            ('B', Some(selection)) if selection > 0 => Some(selection - 1),
            ('A' | 'B', _) => Some(newest),
            _ => return,
        };
    }

    fn enter(&mut self, mode: Mode) {
        self.context.mode = mode;
        self.context.menu = MenuId::ROOT;
    }

    fn enter_command(&mut self) {
        if self.context.mode == Mode::Peruse {
            self.context.selection = None;
        }
        self.context.mode = Mode::Command;
    }

    fn submit(&mut self, event: Event) -> Vec<AppAction> {
        info!(event = %event.display_name(), "sending event");
        self.history.push(HistoryEntry::new(Origin::Sent, event.clone()));
        vec![AppAction::Send(event)]
    }
}
