//! Send form: three editable text fields and a cursor.
//!
//! The cursor is a character index into the focused field. Event name and
//! requestId are single-line fields; data wraps at the width the frontend
//! gives it, and Up/Down move one wrapped line there.

use zbus_proto::Event;

/// A field of the send form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    /// Full `domain.type` event name.
    #[default]
    Name,
    /// Optional request id.
    RequestId,
    /// Event payload, JSON or plain text.
    Data,
}

impl Field {
    /// Focus order, first to last.
    pub const ALL: [Self; 3] = [Self::Name, Self::RequestId, Self::Data];

    /// Label drawn before the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "event ",
            Self::RequestId => "requestId ",
            Self::Data => "data ",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Name => Self::RequestId,
            Self::RequestId => Self::Data,
            Self::Data => Self::Name,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::RequestId => 1,
            Self::Data => 2,
        }
    }
}

/// Send-mode entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendForm {
    values: [String; 3],
    focus: Field,
    /// Character index into the focused field.
    cursor: usize,
}

impl SendForm {
    /// Empty form focused on the event name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every field with the contents of `event` and focus the name.
    pub fn load(&mut self, event: &Event) {
        self.values = [event.display_name(), event.request_id.clone(), event.data_string()];
        self.focus = Field::Name;
        self.cursor = 0;
    }

    /// Build an event from the trimmed field contents.
    pub fn to_event(&self) -> Event {
        Event::from_name_and_data(
            self.value(Field::Name).trim(),
            self.value(Field::Data).trim(),
            self.value(Field::RequestId).trim(),
        )
    }

    /// Current text of `field`.
    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Focused field.
    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Cursor position, in characters, within the focused field.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Focus the next field, wrapping, with the cursor at its end.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.cursor = self.len();
    }

    /// Insert `c` at the cursor.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.values[self.focus.index()].insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character left of the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.values[self.focus.index()].remove(at);
    }

    /// Move the cursor one character left.
    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right, stopping at the end.
    pub fn right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    /// Move up one wrapped line of `width` columns. Data field only.
    pub fn up(&mut self, width: usize) {
        if self.focus == Field::Data && width > 0 && self.cursor >= width {
            self.cursor -= width;
        }
    }

    /// Move down one wrapped line of `width` columns. Data field only.
    pub fn down(&mut self, width: usize) {
        if self.focus != Field::Data || width == 0 {
            return;
        }
        let len = self.len();
        if self.cursor / width < len / width {
            self.cursor = (self.cursor + width).min(len);
        }
    }

    fn len(&self) -> usize {
        self.values[self.focus.index()].chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        let value = &self.values[self.focus.index()];
        value.char_indices().nth(chars).map_or(value.len(), |(offset, _)| offset)
    }
}
