//! State management for PagedTable.

use super::scroll::{ScrollContainer, ScrollSubscription, StickyShadows};
use super::{RowId, SelectionSet};
use crate::hit::HitMap;

use ratatui::layout::Rect;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, trace};

/// Braille spinner frames drawn while loading.
pub(crate) const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Things a click inside the table can land on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TableTarget {
    SelectAll,
    ToggleRow(RowId),
    Sort(String),
    Page(usize),
    PrevPage,
    NextPage,
    PerPage,
    /// Body row by index into the current rows
    Row(usize),
}

/// Shadow inputs the scroll listener was attached with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mounted {
    has_left: bool,
    has_right: bool,
    threshold: u16,
}

/// State for PagedTable widget.
///
/// The first render mounts the state: a listener is attached to the scroll
/// container and keeps the sticky shadows current. It stays attached until
/// [`PagedTableState::unmount`] or until the state is dropped.
#[derive(Debug, Default)]
pub struct PagedTableState {
    selection: SelectionSet,
    /// Highlighted body row
    cursor: Option<usize>,
    scroll: ScrollContainer,
    shadows: Rc<Cell<StickyShadows>>,
    subscription: Option<ScrollSubscription>,
    mounted: Option<Mounted>,
    spinner_frame: usize,
    /// First body row shown when the page does not fit vertically
    pub(crate) row_offset: usize,
    /// Area from the last render
    pub(crate) area: Rect,
    pub(crate) hits: HitMap<TableTarget>,
}

impl PagedTableState {
    /// Create a new unmounted state with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected rows.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Replace the selection, e.g. to clear it after the host reloads rows.
    pub fn set_selection(&mut self, selection: SelectionSet) {
        self.selection = selection;
    }

    /// Highlighted body row.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub(crate) fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor;
    }

    /// The horizontally scrollable region of the table.
    pub fn scroll(&self) -> &ScrollContainer {
        &self.scroll
    }

    /// Which sticky shadows are showing.
    pub fn shadows(&self) -> StickyShadows {
        self.shadows.get()
    }

    /// Check if the scroll listener is attached.
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Attach the scroll listener and compute the shadows once.
    ///
    /// Mounting again with the same inputs is a no-op; different inputs
    /// replace the listener.
    pub fn mount(&mut self, has_left: bool, has_right: bool, threshold: u16) {
        let wanted = Mounted {
            has_left,
            has_right,
            threshold,
        };
        if self.mounted == Some(wanted) && self.subscription.is_some() {
            return;
        }
        self.unmount();

        let shadows = Rc::clone(&self.shadows);
        let subscription = self.scroll.add_scroll_listener(move |metrics| {
            let next = StickyShadows::compute(metrics, has_left, has_right, threshold);
            trace!(
                scroll_left = metrics.scroll_left,
                left = next.left,
                right = next.right,
                "sticky shadows updated"
            );
            shadows.set(next);
        });
        self.shadows.set(StickyShadows::compute(
            &self.scroll.metrics(),
            has_left,
            has_right,
            threshold,
        ));
        self.subscription = Some(subscription);
        self.mounted = Some(wanted);
        debug!(has_left, has_right, threshold, "table mounted");
    }

    /// Detach the scroll listener. Shadows keep their last value.
    pub fn unmount(&mut self) {
        if self.subscription.take().is_some() {
            debug!("table unmounted");
        }
        self.mounted = None;
    }

    /// Advance the loading spinner by one frame.
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub(crate) fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// Toggle one row in the selection.
    pub(crate) fn toggle_row(&mut self, id: &RowId) {
        self.selection = self.selection.toggled(id);
    }

    /// Apply select-all against the rendered row ids.
    pub(crate) fn toggle_all(&mut self, rendered: &[RowId]) {
        self.selection = self.selection.toggled_all(rendered);
    }

    /// Clamp the cursor and vertical offset to `rows` rows with `visible`
    /// shown at once.
    pub(crate) fn fit_rows(&mut self, rows: usize, visible: usize) {
        if rows == 0 {
            self.cursor = None;
            self.row_offset = 0;
            return;
        }
        if let Some(cursor) = self.cursor {
            let cursor = cursor.min(rows - 1);
            self.cursor = Some(cursor);
            if visible > 0 {
                if cursor < self.row_offset {
                    self.row_offset = cursor;
                } else if cursor >= self.row_offset + visible {
                    self.row_offset = cursor + 1 - visible;
                }
            }
        }
        self.row_offset = self.row_offset.min(rows.saturating_sub(visible.max(1)));
    }
}
