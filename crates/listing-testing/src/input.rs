//! Input simulation for testing.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// A sequence of input events for testing.
#[derive(Debug, Clone, Default)]
pub struct InputSequence {
    events: Vec<Event>,
}

impl InputSequence {
    /// Create a new empty input sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key event.
    pub fn key(&mut self, key: KeyCode) -> &mut Self {
        self.key_mod(key, KeyModifiers::NONE)
    }

    /// Add a key event with modifiers.
    pub fn key_mod(&mut self, key: KeyCode, modifiers: KeyModifiers) -> &mut Self {
        self.events.push(Event::Key(KeyEvent::new(key, modifiers)));
        self
    }

    /// Add a character key event.
    pub fn char(&mut self, c: char) -> &mut Self {
        self.key(KeyCode::Char(c))
    }

    /// Add a Ctrl+key event.
    pub fn ctrl(&mut self, c: char) -> &mut Self {
        self.key_mod(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Add an Enter key event.
    pub fn enter(&mut self) -> &mut Self {
        self.key(KeyCode::Enter)
    }

    /// Add an Escape key event.
    pub fn esc(&mut self) -> &mut Self {
        self.key(KeyCode::Esc)
    }

    /// Add a Space key event.
    pub fn space(&mut self) -> &mut Self {
        self.key(KeyCode::Char(' '))
    }

    /// Add an Up arrow key event.
    pub fn up(&mut self) -> &mut Self {
        self.key(KeyCode::Up)
    }

    /// Add a Down arrow key event.
    pub fn down(&mut self) -> &mut Self {
        self.key(KeyCode::Down)
    }

    /// Add a Left arrow key event.
    pub fn left(&mut self) -> &mut Self {
        self.key(KeyCode::Left)
    }

    /// Add a Right arrow key event.
    pub fn right(&mut self) -> &mut Self {
        self.key(KeyCode::Right)
    }

    /// Add a Home key event.
    pub fn home(&mut self) -> &mut Self {
        self.key(KeyCode::Home)
    }

    /// Add an End key event.
    pub fn end(&mut self) -> &mut Self {
        self.key(KeyCode::End)
    }

    /// Add a mouse click event.
    pub fn click(&mut self, x: u16, y: u16) -> &mut Self {
        self.mouse_event(MouseEventKind::Down(MouseButton::Left), x, y, KeyModifiers::NONE)
    }

    /// Add a mouse move event (hover).
    pub fn hover(&mut self, x: u16, y: u16) -> &mut Self {
        self.mouse_event(MouseEventKind::Moved, x, y, KeyModifiers::NONE)
    }

    /// Add vertical wheel events; positive deltas scroll up.
    pub fn scroll(&mut self, x: u16, y: u16, delta: i16) -> &mut Self {
        let kind = if delta > 0 {
            MouseEventKind::ScrollUp
        } else {
            MouseEventKind::ScrollDown
        };
        for _ in 0..delta.unsigned_abs() {
            self.mouse_event(kind, x, y, KeyModifiers::NONE);
        }
        self
    }

    /// Add horizontal wheel events; positive deltas scroll right.
    pub fn scroll_horizontal(&mut self, x: u16, y: u16, delta: i16) -> &mut Self {
        let kind = if delta > 0 {
            MouseEventKind::ScrollRight
        } else {
            MouseEventKind::ScrollLeft
        };
        for _ in 0..delta.unsigned_abs() {
            self.mouse_event(kind, x, y, KeyModifiers::NONE);
        }
        self
    }

    /// Add Shift+wheel events, which terminals send for horizontal scrolling.
    pub fn shift_scroll(&mut self, x: u16, y: u16, delta: i16) -> &mut Self {
        let kind = if delta > 0 {
            MouseEventKind::ScrollDown
        } else {
            MouseEventKind::ScrollUp
        };
        for _ in 0..delta.unsigned_abs() {
            self.mouse_event(kind, x, y, KeyModifiers::SHIFT);
        }
        self
    }

    fn mouse_event(
        &mut self,
        kind: MouseEventKind,
        x: u16,
        y: u16,
        modifiers: KeyModifiers,
    ) -> &mut Self {
        self.events.push(Event::Mouse(MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers,
        }));
        self
    }

    /// Get all events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get all key events.
    pub fn key_events(&self) -> Vec<KeyEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Key(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    /// Get all mouse events.
    pub fn mouse_events(&self) -> Vec<MouseEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Mouse(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    /// Get the total count of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append another sequence.
    pub fn append(&mut self, other: &InputSequence) -> &mut Self {
        self.events.extend(other.events.iter().cloned());
        self
    }

    /// Repeat the current sequence so it occurs n times in total.
    pub fn repeat(&mut self, n: usize) -> &mut Self {
        let events = self.events.clone();
        for _ in 1..n {
            self.events.extend(events.iter().cloned());
        }
        self
    }
}
