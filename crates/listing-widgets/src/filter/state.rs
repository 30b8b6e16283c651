//! State management for OptionFilter.

use super::option::DEFAULT_OPTION_ID;
use crate::hit::HitMap;

use ratatui::layout::Rect;

/// Whether the dropdown is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPhase {
    #[default]
    Closed,
    /// Dropdown visible below `anchor`
    Open { anchor: Rect },
}

/// Visual indicators carried by the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorIndicators {
    /// A non-default option is selected
    pub active: bool,
    /// The dropdown is open
    pub opened: bool,
}

/// Things a click inside the filter can land on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FilterTarget {
    Anchor,
    Dialog,
    Option(String),
    Apply,
    Cancel,
}

/// State for OptionFilter widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionFilterState {
    phase: FilterPhase,
    /// Provisional choice, follows the user while browsing
    selected_id: String,
    /// Last confirmed choice
    applied_id: String,
    /// Keyboard/hover highlight
    focused_id: String,
    /// First option row shown in the dropdown
    pub(crate) list_offset: usize,
    /// Anchor rectangle from the last render
    pub(crate) anchor_area: Rect,
    pub(crate) hits: HitMap<FilterTarget>,
}

impl Default for OptionFilterState {
    fn default() -> Self {
        Self {
            phase: FilterPhase::Closed,
            selected_id: DEFAULT_OPTION_ID.to_string(),
            applied_id: DEFAULT_OPTION_ID.to_string(),
            focused_id: DEFAULT_OPTION_ID.to_string(),
            list_offset: 0,
            anchor_area: Rect::default(),
            hits: HitMap::new(),
        }
    }
}

impl OptionFilterState {
    /// Create a new closed state with "All" applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously applied option, e.g. one restored by the host.
    pub fn with_applied(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            selected_id: id.clone(),
            applied_id: id,
            ..Self::default()
        }
    }

    /// Current phase.
    pub fn phase(&self) -> FilterPhase {
        self.phase
    }

    /// Check if the dropdown is open.
    pub fn is_open(&self) -> bool {
        matches!(self.phase, FilterPhase::Open { .. })
    }

    /// Provisionally selected option id.
    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    /// Last applied option id.
    pub fn applied_id(&self) -> &str {
        &self.applied_id
    }

    /// Highlighted option id.
    pub fn focused_id(&self) -> &str {
        &self.focused_id
    }

    /// Anchor indicators for the current state.
    pub fn indicators(&self) -> AnchorIndicators {
        AnchorIndicators {
            active: self.selected_id != DEFAULT_OPTION_ID,
            opened: self.is_open(),
        }
    }

    pub(crate) fn open(&mut self, anchor: Rect) {
        self.selected_id = self.applied_id.clone();
        self.focused_id = self.applied_id.clone();
        self.phase = FilterPhase::Open { anchor };
    }

    /// Move an open dropdown to a new anchor without touching the selection.
    pub(crate) fn reanchor(&mut self, anchor: Rect) {
        if self.is_open() {
            self.phase = FilterPhase::Open { anchor };
        }
    }

    /// Close without committing, reverting the provisional choice.
    pub(crate) fn cancel(&mut self) {
        self.selected_id = self.applied_id.clone();
        self.phase = FilterPhase::Closed;
    }

    /// Close and commit the provisional choice. Returns the applied id.
    pub(crate) fn apply(&mut self) -> &str {
        self.applied_id = self.selected_id.clone();
        self.phase = FilterPhase::Closed;
        &self.applied_id
    }

    pub(crate) fn select(&mut self, id: &str) {
        self.selected_id = id.to_string();
    }

    /// Select whatever is highlighted.
    pub(crate) fn select_focused(&mut self) {
        self.selected_id = self.focused_id.clone();
    }

    /// Highlight an option under the pointer. Returns whether focus moved.
    pub(crate) fn hover(&mut self, id: &str) -> bool {
        if self.focused_id == id {
            return false;
        }
        self.focused_id = id.to_string();
        true
    }

    /// Move focus by `delta` through `ids`, wrapping at both ends.
    ///
    /// A focus id missing from `ids` counts as sitting just before the first
    /// entry.
    pub(crate) fn move_focus(&mut self, ids: &[&str], delta: isize) {
        if ids.is_empty() {
            return;
        }
        let len = ids.len() as isize;
        let current = ids
            .iter()
            .position(|id| *id == self.focused_id)
            .map(|i| i as isize)
            .unwrap_or(-1);
        let next = current + delta;
        let idx = if next < 0 {
            len - 1
        } else if next >= len {
            0
        } else {
            next
        };
        self.focused_id = ids[idx as usize].to_string();
    }

    pub(crate) fn focus_first(&mut self, ids: &[&str]) {
        if let Some(first) = ids.first() {
            self.focused_id = first.to_string();
        }
    }

    pub(crate) fn focus_last(&mut self, ids: &[&str]) {
        if let Some(last) = ids.last() {
            self.focused_id = last.to_string();
        }
    }

    /// Keep the focused row inside a window of `visible` rows.
    pub(crate) fn scroll_to_focus(&mut self, ids: &[&str], visible: usize) {
        if visible == 0 {
            return;
        }
        if let Some(idx) = ids.iter().position(|id| *id == self.focused_id) {
            if idx < self.list_offset {
                self.list_offset = idx;
            } else if idx >= self.list_offset + visible {
                self.list_offset = idx + 1 - visible;
            }
        }
        self.list_offset = self.list_offset.min(ids.len().saturating_sub(visible));
    }
}
