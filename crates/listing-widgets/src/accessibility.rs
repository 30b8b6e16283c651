//! Accessibility support for the listing widgets.
//!
//! Provides screen reader hints and text-based announcements for terminal
//! front ends that cannot rely on a platform accessibility tree.

/// Trait for accessible widgets.
///
/// Widgets keep their interactive state outside themselves, so every
/// state-dependent hint takes that state as an argument.
pub trait Accessible {
    /// State type the widget renders with.
    type State;

    /// Get the ARIA-like role for this widget.
    ///
    /// Common roles: "button", "listbox", "grid", "dialog"
    fn aria_role(&self, state: &Self::State) -> &str;

    /// Get a human-readable label for the widget.
    fn aria_label(&self) -> String;

    /// Get the current value or state as a string.
    fn aria_value(&self, _state: &Self::State) -> Option<String> {
        None
    }

    /// Get whether the widget is expanded (for popovers, menus, etc.).
    fn aria_expanded(&self, _state: &Self::State) -> Option<bool> {
        None
    }

    /// Get the position of the focused item in its set (1-based, total).
    fn aria_position(&self, _state: &Self::State) -> Option<(usize, usize)> {
        None
    }

    /// One-line description combining every available hint.
    fn describe(&self, state: &Self::State) -> String {
        let mut parts = vec![format!("{} {}", self.aria_label(), self.aria_role(state))];
        if let Some(expanded) = self.aria_expanded(state) {
            parts.push(if expanded { "expanded" } else { "collapsed" }.to_string());
        }
        if let Some(value) = self.aria_value(state) {
            parts.push(value);
        }
        if let Some((pos, total)) = self.aria_position(state) {
            parts.push(format!("{} of {}", pos, total));
        }
        parts.join(", ")
    }
}

/// Announcement buffer for screen reader messages.
///
/// Hosts queue announcements here when a widget reports a committed change
/// and poll for the next one to display in a status line.
#[derive(Debug, Default)]
pub struct AnnouncementBuffer {
    messages: Vec<Announcement>,
}

/// A single announcement with priority.
#[derive(Debug, Clone)]
pub struct Announcement {
    /// The message text
    pub message: String,
    /// Priority level (higher = more important)
    pub priority: AnnouncementPriority,
}

/// Priority levels for announcements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnnouncementPriority {
    /// Low priority, can be skipped if busy
    Low,
    /// Normal priority
    Normal,
    /// High priority, should be announced soon
    High,
}

impl AnnouncementBuffer {
    /// Create a new empty announcement buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an announcement.
    pub fn announce(&mut self, message: impl Into<String>, priority: AnnouncementPriority) {
        self.messages.push(Announcement {
            message: message.into(),
            priority,
        });
    }

    /// Take the next announcement to read.
    ///
    /// Returns the oldest of the highest priority announcements.
    pub fn next(&mut self) -> Option<Announcement> {
        let max_priority = self.messages.iter().map(|a| a.priority).max()?;
        let idx = self.messages.iter().position(|a| a.priority == max_priority)?;
        Some(self.messages.remove(idx))
    }

    /// Check if there are any pending announcements.
    pub fn has_pending(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Clear all pending announcements.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
