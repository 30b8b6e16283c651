//! Per-widget test helpers.

use crate::input::InputSequence;
use crate::terminal::TestTerminal;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::Frame;

/// Common navigation keys for testing.
pub const NAVIGATION_KEYS: &[KeyCode] = &[
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Home,
    KeyCode::End,
    KeyCode::PageUp,
    KeyCode::PageDown,
    KeyCode::Enter,
    KeyCode::Esc,
    KeyCode::Char(' '),
];

/// Test that a key handler accepts every navigation key, with and without
/// modifiers, without panicking.
pub fn assert_navigation_safe(mut handle_key: impl FnMut(KeyEvent) -> bool) {
    for modifiers in [KeyModifiers::NONE, KeyModifiers::SHIFT, KeyModifiers::CONTROL] {
        for key in NAVIGATION_KEYS {
            let _ = handle_key(KeyEvent::new(*key, modifiers));
        }
    }
}

/// Test that a handler survives the same event many times over.
pub fn assert_handles_rapid_input(
    mut handle_key: impl FnMut(KeyEvent) -> bool,
    event: KeyEvent,
    count: usize,
) {
    for _ in 0..count {
        let _ = handle_key(event);
    }
}

/// Test that rendering into tiny, empty and large areas does not panic.
pub fn assert_handles_any_area(mut render: impl FnMut(&mut Frame, Rect)) {
    for (width, height) in [(1, 10), (10, 1), (1, 1), (2, 2), (5, 3), (200, 50)] {
        let mut terminal = TestTerminal::new(width, height);
        terminal.draw(|frame| {
            render(frame, Rect::new(0, 0, 0, height));
            render(frame, Rect::new(0, 0, width, 0));
            render(frame, frame.area());
        });
    }
}

/// A terminal and a widget state driven together.
///
/// The widget itself stays with the test; rendering and event delivery are
/// closures so any widget/state pair can be exercised.
pub struct WidgetHarness<S> {
    terminal: TestTerminal,
    state: S,
}

impl<S> WidgetHarness<S> {
    /// Create a harness with a terminal of the given size.
    pub fn new(state: S, width: u16, height: u16) -> Self {
        Self {
            terminal: TestTerminal::new(width, height),
            state,
        }
    }

    /// Render a frame.
    pub fn render(&mut self, f: impl FnOnce(&mut Frame, &mut S)) -> &mut Self {
        let state = &mut self.state;
        self.terminal.draw(|frame| f(frame, state));
        self
    }

    /// Deliver every event of a sequence; returns how many were consumed.
    pub fn send(
        &mut self,
        seq: &InputSequence,
        mut handle: impl FnMut(&Event, &mut S) -> bool,
    ) -> usize {
        seq.events()
            .iter()
            .filter(|event| handle(event, &mut self.state))
            .count()
    }

    /// Get access to the state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get mutable access to the state.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Get the terminal for inspection.
    pub fn terminal(&self) -> &TestTerminal {
        &self.terminal
    }

    /// Assert the terminal contains the given text.
    pub fn assert_contains(&self, text: &str) -> &Self {
        self.terminal.assert_contains(text);
        self
    }

    /// Assert the terminal does not contain the given text.
    pub fn assert_not_contains(&self, text: &str) -> &Self {
        self.terminal.assert_not_contains(text);
        self
    }

    /// Assert a specific line contains the given text.
    pub fn assert_line_contains(&self, line: u16, text: &str) -> &Self {
        let line_content = self.terminal.line(line);
        assert!(
            line_content.contains(text),
            "Line {} does not contain '{}': '{}'",
            line,
            text,
            line_content
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_harness_counts_consumed_events() {
        let mut harness = WidgetHarness::new(0usize, 20, 3);
        let mut seq = InputSequence::new();
        seq.down().down().up().char('x');

        let consumed = harness.send(&seq, |event, count| match event {
            Event::Key(k) if k.code == KeyCode::Down => {
                *count += 1;
                true
            }
            _ => false,
        });

        assert_eq!(consumed, 2);
        assert_eq!(*harness.state(), 2);
    }

    #[test]
    fn test_harness_render() {
        let mut harness = WidgetHarness::new("Hello", 20, 3);
        harness
            .render(|frame, text| frame.render_widget(Paragraph::new(*text), frame.area()))
            .assert_contains("Hello")
            .assert_not_contains("Goodbye")
            .assert_line_contains(0, "Hello");
    }

    #[test]
    fn test_any_area() {
        assert_handles_any_area(|frame, area| {
            frame.render_widget(Paragraph::new("Test content"), area)
        });
    }

    #[test]
    fn test_navigation_safe() {
        let mut seen = 0;
        assert_navigation_safe(|_| {
            seen += 1;
            false
        });
        assert_eq!(seen, NAVIGATION_KEYS.len() * 3);
    }
}
