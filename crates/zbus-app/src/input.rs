//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
///
/// Arrow keys have no variant of their own: they arrive as the three-key
/// sequence `Esc`, `[`, `A`..`D`, and the [`App`](crate::App) decodes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Tab key (next form field).
    Tab,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Escape key, alone or as the start of an arrow sequence.
    Esc,
}

impl KeyInput {
    /// Sequence a terminal sends for an arrow key, `direction` being `A`
    /// (up), `B` (down), `C` (right) or `D` (left).
    pub fn arrow(direction: char) -> [Self; 3] {
        [Self::Esc, Self::Char('['), Self::Char(direction)]
    }
}
