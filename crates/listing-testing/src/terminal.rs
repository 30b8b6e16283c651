//! Virtual terminal for headless testing.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::Terminal;

/// A virtual terminal for testing widgets.
pub struct TestTerminal {
    terminal: Terminal<TestBackend>,
    frame_history: Vec<String>,
}

impl TestTerminal {
    /// Create a new test terminal with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create terminal");
        Self {
            terminal,
            frame_history: Vec::new(),
        }
    }

    /// Get the current terminal size.
    pub fn size(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    /// Get the width of the terminal.
    pub fn width(&self) -> u16 {
        self.size().width
    }

    /// Get the height of the terminal.
    pub fn height(&self) -> u16 {
        self.size().height
    }

    /// Draw to the terminal.
    pub fn draw<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f).expect("Failed to draw to terminal");
    }

    /// Get a reference to the current buffer.
    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Get the buffer content as a string.
    pub fn to_string(&self) -> String {
        let area = self.buffer().area;
        (0..area.height)
            .map(|y| self.raw_line(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Assert that the buffer contains the given substring.
    pub fn assert_contains(&self, needle: &str) {
        let content = self.to_string();
        if !content.contains(needle) {
            panic!("Buffer does not contain \"{}\":\n{}", needle, content);
        }
    }

    /// Assert that the buffer does not contain the given substring.
    pub fn assert_not_contains(&self, needle: &str) {
        let content = self.to_string();
        if content.contains(needle) {
            panic!("Buffer unexpectedly contains \"{}\":\n{}", needle, content);
        }
    }

    fn raw_line(&self, line_num: u16) -> String {
        let buffer = self.buffer();
        let area = buffer.area;
        let y = area.y + line_num;
        if y >= area.bottom() {
            return String::new();
        }
        (area.x..area.right())
            .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    /// Get the content of a specific line, trailing blanks trimmed.
    pub fn line(&self, line_num: u16) -> String {
        self.raw_line(line_num).trim_end().to_string()
    }

    /// Find the first line containing `needle`.
    pub fn find_line(&self, needle: &str) -> Option<u16> {
        (0..self.height()).find(|&y| self.raw_line(y).contains(needle))
    }

    /// Find the cell where `needle` starts, scanning lines top to bottom.
    pub fn find(&self, needle: &str) -> Option<(u16, u16)> {
        let buffer = self.buffer();
        let area = buffer.area;
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let mut text = String::new();
                let mut cx = x;
                while cx < area.right() && text.len() < needle.len() {
                    if let Some(cell) = buffer.cell((cx, y)) {
                        text.push_str(cell.symbol());
                    }
                    cx += 1;
                }
                if text.starts_with(needle) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Get the content of a specific cell.
    pub fn cell(&self, x: u16, y: u16) -> Option<String> {
        self.buffer().cell((x, y)).map(|c| c.symbol().to_string())
    }

    /// Get the style of a specific cell.
    pub fn style_at(&self, x: u16, y: u16) -> Option<Style> {
        self.buffer().cell((x, y)).map(|c| c.style())
    }

    /// Store the current frame text in history.
    pub fn capture_frame(&mut self) -> usize {
        let text = self.to_string();
        self.frame_history.push(text);
        self.frame_history.len() - 1
    }

    /// Get a frame from history.
    pub fn frame(&self, index: usize) -> Option<&str> {
        self.frame_history.get(index).map(String::as_str)
    }

    /// Get all captured frames.
    pub fn frame_history(&self) -> &[String] {
        &self.frame_history
    }

    /// Resize the terminal.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal.backend_mut().resize(width, height);
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
