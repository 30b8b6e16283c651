//! PagedTable widget - paged record table with pinned column groups.
//!
//! # Example
//!
//! ```ignore
//! use listing_widgets::{Column, PagedTable, PagedTableState, Row, StickyColumn};
//!
//! let table = PagedTable::new("id")
//!     .left_sticky_columns(vec![StickyColumn::new("lastname", "Last name").sortable(true)])
//!     .columns(vec![Column::new("email", "Email").width(28).ellipsis(true)])
//!     .right_sticky_columns(vec![StickyColumn::new("status", "Status").width(10)])
//!     .checkbox(true)
//!     .rows(vec![Row::new().with("id", 1).with("lastname", "Doe")])
//!     .total_rows(47)
//!     .per_page(10)
//!     .on_paginate(|page| println!("go to page {page}"))
//!     .on_sort(|column| println!("sort by {column}"));
//!
//! let mut state = PagedTableState::new();
//! frame.render_stateful_widget(&table, area, &mut state);
//! ```
//!
//! The table never sorts or slices rows itself. It renders the page the host
//! hands it and reports sort, page and per-page requests through callbacks.

mod cell;
mod column;
mod group;
mod pagination;
mod scroll;
mod selection;
mod state;

pub use cell::{CellContent, Row, RowId};
pub use column::{Column, StickyColumn, CHECKBOX_COLUMN_WIDTH, DEFAULT_COLUMN_WIDTH};
pub use pagination::{cycle_per_page, page_count, page_items, PageItem, PER_PAGE_CHOICES};
pub use scroll::{ScrollContainer, ScrollMetrics, ScrollSubscription, StickyShadows, SHADOW_THRESHOLD};
pub use selection::{CheckState, SelectionSet};
pub use state::PagedTableState;

use group::{ColumnGroup, HeaderContext, RowContext, Strip};
use state::TableTarget;

use crate::accessibility::Accessible;
use crate::error::WidgetError;
use crate::hit::HitMap;
use crate::text::{display_width, fit, truncate};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Clear, StatefulWidget, Widget};
use std::collections::HashSet;
use tracing::debug;

/// Cells moved per horizontal scroll step.
const SCROLL_STEP: i32 = 4;

const SEPARATOR: &str = "\u{2502}";
const SEPARATOR_SHADOW: &str = "\u{2503}";
const PREV_LABEL: &str = "\u{2039}";
const NEXT_LABEL: &str = "\u{203a}";
const ELLIPSIS_LABEL: &str = "\u{2026}";

/// Sort direction for columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Toggle the sort direction.
    pub fn toggle(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Sort currently applied by the host. An empty `sort_by` means unsorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub sort_by: String,
    pub sort_dir: SortDirection,
}

impl SortSpec {
    /// Create a sort spec.
    pub fn new(sort_by: impl Into<String>, sort_dir: SortDirection) -> Self {
        Self {
            sort_by: sort_by.into(),
            sort_dir,
        }
    }

    /// The sort after the user activates `column`: the same column flips
    /// direction, another column starts ascending.
    pub fn next(&self, column: &str) -> Self {
        if self.sort_by == column {
            Self::new(column, self.sort_dir.toggle())
        } else {
            Self::new(column, SortDirection::Ascending)
        }
    }

    /// Check if no column is sorted.
    pub fn is_unsorted(&self) -> bool {
        self.sort_by.is_empty()
    }
}

/// Horizontal placement of the column groups inside the table area.
#[derive(Debug, Clone, Copy)]
struct Lanes {
    left: (u16, u16),
    left_sep: Option<u16>,
    centre: (u16, u16),
    right_sep: Option<u16>,
    right: (u16, u16),
}

impl Lanes {
    /// Pinned groups take their full width first; the right group gives way
    /// before the left one when space runs out.
    fn new(area: Rect, left: &ColumnGroup<'_>, right: &ColumnGroup<'_>) -> Self {
        let mut x = area.x;
        let mut avail = area.width;

        let left_width = left.width().min(avail);
        let left_lane = (x, left_width);
        x += left_width;
        avail -= left_width;

        let left_sep = if !left.is_empty() && avail > 0 {
            avail -= 1;
            x += 1;
            Some(x - 1)
        } else {
            None
        };

        let right_wanted = if right.is_empty() { 0 } else { right.width().saturating_add(1) };
        let right_total = right_wanted.min(avail);
        let centre_width = avail - right_total;
        let centre = (x, centre_width);
        x += centre_width;

        let (right_sep, right_lane) = if right_total > 0 {
            (Some(x), (x + 1, right_total - 1))
        } else {
            (None, (x, 0))
        };

        Self {
            left: left_lane,
            left_sep,
            centre,
            right_sep,
            right: right_lane,
        }
    }

    fn lane(lane: (u16, u16), y: u16) -> Rect {
        Rect::new(lane.0, y, lane.1, 1)
    }

    fn blit(&self, y: u16, strips: [Strip; 3], scroll_left: u16, buf: &mut Buffer, hits: &mut HitMap<TableTarget>) {
        let [left, centre, right] = strips;
        left.blit(0, Self::lane(self.left, y), buf, hits);
        centre.blit(scroll_left, Self::lane(self.centre, y), buf, hits);
        right.blit(0, Self::lane(self.right, y), buf, hits);
    }

    fn separators(&self, y: u16, shadows: StickyShadows, buf: &mut Buffer) {
        let glyph = |shadow: bool| {
            if shadow {
                (SEPARATOR_SHADOW, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            } else {
                (SEPARATOR, Style::default().fg(Color::DarkGray))
            }
        };
        if let Some(x) = self.left_sep {
            let (symbol, style) = glyph(shadows.left);
            buf.set_string(x, y, symbol, style);
        }
        if let Some(x) = self.right_sep {
            let (symbol, style) = glyph(shadows.right);
            buf.set_string(x, y, symbol, style);
        }
    }
}

/// One piece of the pagination line.
struct Segment {
    text: String,
    target: Option<TableTarget>,
    style: Style,
}

impl Segment {
    fn plain(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            target: None,
            style,
        }
    }

    fn button(text: impl Into<String>, target: TableTarget, style: Style) -> Self {
        Self {
            text: text.into(),
            target: Some(target),
            style,
        }
    }
}

/// Paged record table with pinned left/right column groups.
pub struct PagedTable {
    /// Field holding each row's identity
    id_field: String,
    rows: Vec<Row>,
    columns: Vec<Column>,
    left_sticky_columns: Vec<StickyColumn>,
    right_sticky_columns: Vec<StickyColumn>,
    has_checkbox: bool,
    total_rows: usize,
    per_page: usize,
    /// 1-based
    current_page: usize,
    sort: SortSpec,
    is_loading: bool,
    empty_rows_message: String,
    pagination_summary: String,
    shadow_threshold: u16,
    label: String,
    block: Option<Block<'static>>,
    on_change_per_page: Option<Box<dyn Fn(usize)>>,
    on_paginate: Option<Box<dyn Fn(usize)>>,
    on_sort: Option<Box<dyn Fn(&str)>>,
}

impl PagedTable {
    /// Create an empty table whose rows are identified by `id_field`.
    pub fn new(id_field: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
            rows: Vec::new(),
            columns: Vec::new(),
            left_sticky_columns: Vec::new(),
            right_sticky_columns: Vec::new(),
            has_checkbox: false,
            total_rows: 0,
            per_page: 5,
            current_page: 1,
            sort: SortSpec::default(),
            is_loading: false,
            empty_rows_message: "No rows data".to_string(),
            pagination_summary: String::new(),
            shadow_threshold: SHADOW_THRESHOLD,
            label: "Table".to_string(),
            block: None,
            on_change_per_page: None,
            on_paginate: None,
            on_sort: None,
        }
    }

    /// Set the rows of the current page.
    pub fn rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    /// Set the scrollable columns.
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Set the columns pinned to the left edge.
    pub fn left_sticky_columns(mut self, columns: Vec<StickyColumn>) -> Self {
        self.left_sticky_columns = columns;
        self
    }

    /// Set the columns pinned to the right edge.
    pub fn right_sticky_columns(mut self, columns: Vec<StickyColumn>) -> Self {
        self.right_sticky_columns = columns;
        self
    }

    /// Show a selection checkbox in front of every row.
    pub fn checkbox(mut self, has_checkbox: bool) -> Self {
        self.has_checkbox = has_checkbox;
        self
    }

    /// Set the number of rows across all pages.
    pub fn total_rows(mut self, total: usize) -> Self {
        self.total_rows = total;
        self
    }

    /// Set rows per page.
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the current 1-based page.
    pub fn current_page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }

    /// Set the sort the rows are in.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Set loading state.
    pub fn loading(mut self, loading: bool) -> Self {
        self.is_loading = loading;
        self
    }

    /// Set the message shown when there are no rows.
    pub fn empty_rows_message(mut self, message: impl Into<String>) -> Self {
        self.empty_rows_message = message.into();
        self
    }

    /// Set the text shown left of the page controls.
    pub fn pagination_summary(mut self, summary: impl Into<String>) -> Self {
        self.pagination_summary = summary.into();
        self
    }

    /// Set how far content must be scrolled under a pinned group before its
    /// shadow shows.
    pub fn shadow_threshold(mut self, threshold: u16) -> Self {
        self.shadow_threshold = threshold;
        self
    }

    /// Set the label announced to screen readers.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the block wrapper.
    pub fn block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set per-page change callback.
    ///
    /// Not called for zero, for the current page size, or while loading.
    pub fn on_change_per_page(mut self, f: impl Fn(usize) + 'static) -> Self {
        self.on_change_per_page = Some(Box::new(f));
        self
    }

    /// Set page change callback, called with the requested 1-based page.
    ///
    /// Not called for the current page, for pages outside `1..=page_count()`,
    /// or while loading.
    pub fn on_paginate(mut self, f: impl Fn(usize) + 'static) -> Self {
        self.on_paginate = Some(Box::new(f));
        self
    }

    /// Set sort callback, called with the activated column id.
    pub fn on_sort(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_sort = Some(Box::new(f));
        self
    }

    /// Replace the rows in place.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    /// Update paging inputs in place.
    pub fn set_paging(&mut self, total_rows: usize, current_page: usize, per_page: usize) {
        self.total_rows = total_rows;
        self.current_page = current_page;
        self.per_page = per_page;
    }

    /// Update the sort in place.
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Update loading state in place.
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Update the pagination summary in place.
    pub fn set_pagination_summary(&mut self, summary: impl Into<String>) {
        self.pagination_summary = summary.into();
    }

    /// Rows of the current page.
    pub fn row_list(&self) -> &[Row] {
        &self.rows
    }

    /// Current sort.
    pub fn current_sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Check if the table is loading.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.current_page
    }

    /// Rows per page.
    pub fn rows_per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        page_count(self.total_rows, self.per_page)
    }

    /// Number of columns across all groups, the checkbox included.
    pub fn column_span(&self) -> usize {
        self.groups().iter().map(ColumnGroup::column_count).sum()
    }

    /// Ids of the rendered rows; rows without an id are skipped.
    pub fn row_ids(&self) -> Vec<RowId> {
        self.rows.iter().filter_map(|r| r.id(&self.id_field)).collect()
    }

    fn groups(&self) -> [ColumnGroup<'_>; 3] {
        [
            ColumnGroup::LeftSticky {
                checkbox: self.has_checkbox,
                columns: &self.left_sticky_columns,
            },
            ColumnGroup::Scrollable(&self.columns),
            ColumnGroup::RightSticky(&self.right_sticky_columns),
        ]
    }

    /// Check row identities and the sort column.
    pub fn validate(&self) -> Result<(), WidgetError> {
        let mut seen = HashSet::new();
        for (index, row) in self.rows.iter().enumerate() {
            let id = row.id(&self.id_field).ok_or_else(|| WidgetError::MissingRowId {
                index,
                field: self.id_field.clone(),
            })?;
            if !seen.insert(id.clone()) {
                return Err(WidgetError::DuplicateRowId(id.to_string()));
            }
        }

        if !self.sort.is_unsorted()
            && !self.groups().iter().any(|g| g.has_column(&self.sort.sort_by))
        {
            return Err(WidgetError::UnknownSortColumn(self.sort.sort_by.clone()));
        }
        Ok(())
    }

    /// Add or remove one row from the selection.
    pub fn toggle_row(&self, id: &RowId, state: &mut PagedTableState) -> bool {
        state.toggle_row(id);
        debug!(row = %id, selected = state.selection().len(), "row toggled");
        true
    }

    /// Select every rendered row, or clear when all are already selected.
    ///
    /// While loading the rows on screen are stale, so this only clears.
    pub fn toggle_all(&self, state: &mut PagedTableState) -> bool {
        if self.is_loading {
            state.set_selection(SelectionSet::new());
        } else {
            state.toggle_all(&self.row_ids());
        }
        debug!(selected = state.selection().len(), "select all toggled");
        true
    }

    /// Ask the host to sort by a sortable column. Ignored while loading.
    pub fn request_sort(&self, column: &str) -> bool {
        if self.is_loading || !self.groups().iter().any(|g| g.is_sortable(column)) {
            return false;
        }
        debug!(column, "sort requested");
        if let Some(ref callback) = self.on_sort {
            callback(column);
        }
        true
    }

    /// Ask the host for another page. Ignored while loading or out of range.
    pub fn paginate(&self, page: usize) -> bool {
        if self.is_loading || page == 0 || page > self.page_count() || page == self.current_page {
            return false;
        }
        debug!(page, "page requested");
        if let Some(ref callback) = self.on_paginate {
            callback(page);
        }
        true
    }

    /// Ask the host for a different page size. Ignored while loading.
    pub fn change_per_page(&self, per_page: usize) -> bool {
        if self.is_loading || per_page == 0 || per_page == self.per_page {
            return false;
        }
        debug!(per_page, "per-page change requested");
        if let Some(ref callback) = self.on_change_per_page {
            callback(per_page);
        }
        true
    }

    fn move_cursor(&self, delta: isize, state: &mut PagedTableState) {
        let count = self.rows.len();
        if count == 0 {
            return;
        }
        let next = match state.cursor() {
            None => 0,
            Some(current) => current.saturating_add_signed(delta).min(count - 1),
        };
        state.set_cursor(Some(next));
    }

    /// Handle a key event.
    pub fn handle_key(&self, key: KeyEvent, state: &mut PagedTableState) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-1, state);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(1, state);
                true
            }
            KeyCode::Home => {
                if !self.rows.is_empty() {
                    state.set_cursor(Some(0));
                }
                true
            }
            KeyCode::End => {
                if !self.rows.is_empty() {
                    state.set_cursor(Some(self.rows.len() - 1));
                }
                true
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.toggle_all(state)
            }
            KeyCode::Char(' ') => {
                let id = state
                    .cursor()
                    .and_then(|i| self.rows.get(i))
                    .and_then(|r| r.id(&self.id_field));
                match id {
                    Some(id) => self.toggle_row(&id, state),
                    None => false,
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                state.scroll().scroll_by(-SCROLL_STEP);
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                state.scroll().scroll_by(SCROLL_STEP);
                true
            }
            KeyCode::Char('n') | KeyCode::PageDown => self.paginate(self.current_page + 1),
            KeyCode::Char('p') | KeyCode::PageUp => {
                self.paginate(self.current_page.saturating_sub(1))
            }
            KeyCode::Char('+') => self.change_per_page(cycle_per_page(self.per_page, true)),
            KeyCode::Char('-') => self.change_per_page(cycle_per_page(self.per_page, false)),
            _ => false,
        }
    }

    /// Handle a mouse event using the regions from the last render.
    pub fn handle_mouse(&self, mouse: MouseEvent, state: &mut PagedTableState) -> bool {
        if !state.area.contains(Position::new(mouse.column, mouse.row)) {
            return false;
        }
        let horizontal = mouse.modifiers.contains(KeyModifiers::SHIFT);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(target) = state.hits.hit(mouse.column, mouse.row).cloned() else {
                    return false;
                };
                match target {
                    TableTarget::SelectAll => self.toggle_all(state),
                    TableTarget::ToggleRow(id) => self.toggle_row(&id, state),
                    TableTarget::Sort(column) => self.request_sort(&column),
                    TableTarget::Page(page) => self.paginate(page),
                    TableTarget::PrevPage => self.paginate(self.current_page.saturating_sub(1)),
                    TableTarget::NextPage => self.paginate(self.current_page + 1),
                    TableTarget::PerPage => {
                        self.change_per_page(cycle_per_page(self.per_page, true))
                    }
                    TableTarget::Row(index) => {
                        state.set_cursor(Some(index));
                        true
                    }
                }
            }
            MouseEventKind::ScrollLeft => state.scroll().scroll_by(-SCROLL_STEP),
            MouseEventKind::ScrollRight => state.scroll().scroll_by(SCROLL_STEP),
            MouseEventKind::ScrollUp if horizontal => state.scroll().scroll_by(-SCROLL_STEP),
            MouseEventKind::ScrollDown if horizontal => state.scroll().scroll_by(SCROLL_STEP),
            MouseEventKind::ScrollUp => {
                self.move_cursor(-1, state);
                true
            }
            MouseEventKind::ScrollDown => {
                self.move_cursor(1, state);
                true
            }
            _ => false,
        }
    }

    fn row_style(&self, index: usize, selected: bool, cursor: bool) -> Style {
        let mut style = if selected {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else if cursor {
            Style::default().bg(Color::DarkGray)
        } else if index % 2 == 0 {
            Style::default()
        } else {
            Style::default().bg(Color::Rgb(30, 30, 30))
        };
        if selected && cursor {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.is_loading {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }

    fn pagination_segments(&self) -> Vec<Segment> {
        let base = if self.is_loading {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        let muted = base.fg(Color::DarkGray);
        let pages = self.page_count();
        let mut segments = Vec::new();

        let mut push = |text: String, target: Option<TableTarget>, style: Style| {
            match target {
                Some(target) if !self.is_loading => {
                    segments.push(Segment::button(text, target, style))
                }
                _ => segments.push(Segment::plain(text, style)),
            }
        };

        push(
            format!("Rows: {} \u{25be}", self.per_page),
            Some(TableTarget::PerPage),
            base,
        );

        let prev_style = if self.current_page > 1 { base } else { muted };
        push(format!("  {} ", PREV_LABEL), Some(TableTarget::PrevPage), prev_style);

        for item in page_items(pages, self.current_page) {
            match item {
                PageItem::Page(page) => {
                    let style = if page == self.current_page {
                        base.fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        base
                    };
                    push(format!(" {} ", page), Some(TableTarget::Page(page)), style);
                }
                PageItem::Ellipsis => push(format!(" {} ", ELLIPSIS_LABEL), None, muted),
            }
        }

        let next_style = if self.current_page < pages { base } else { muted };
        push(format!(" {}", NEXT_LABEL), Some(TableTarget::NextPage), next_style);
        segments
    }

    fn render_pagination(&self, line: Rect, buf: &mut Buffer, hits: &mut HitMap<TableTarget>) {
        let segments = self.pagination_segments();
        let controls_width: u16 = segments
            .iter()
            .fold(0u16, |acc, s| acc.saturating_add(display_width(&s.text)));

        let mut summary_end = line.x;
        if !self.pagination_summary.is_empty() {
            let room = line.width.saturating_sub(controls_width.saturating_add(1));
            let summary = truncate(&self.pagination_summary, room, true);
            buf.set_stringn(
                line.x,
                line.y,
                &summary,
                room as usize,
                Style::default().fg(Color::DarkGray),
            );
            summary_end = line.x.saturating_add(display_width(&summary) + 1);
        }

        let mut x = line.right().saturating_sub(controls_width).max(summary_end);
        for segment in segments {
            if x >= line.right() {
                break;
            }
            let room = line.right() - x;
            let width = display_width(&segment.text).min(room);
            buf.set_stringn(x, line.y, &segment.text, width as usize, segment.style);
            if let Some(target) = segment.target {
                hits.push(Rect::new(x, line.y, width, 1), target);
            }
            x += width;
        }
    }

    fn render_spinner(&self, body: Rect, buf: &mut Buffer, state: &PagedTableState) {
        let text = format!("{} Loading\u{2026}", state.spinner());
        let width = (display_width(&text) + 2).min(body.width);
        if width == 0 || body.height == 0 {
            return;
        }
        let overlay = Rect::new(
            body.x + (body.width - width) / 2,
            body.y + body.height / 2,
            width,
            1,
        );
        Clear.render(overlay, buf);
        buf.set_stringn(
            overlay.x + 1,
            overlay.y,
            &text,
            width.saturating_sub(2) as usize,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        );
    }
}

impl StatefulWidget for &PagedTable {
    type State = PagedTableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.hits.clear();
        state.area = area;

        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        // Header, at least one body line and the pagination line
        if inner.width == 0 || inner.height < 3 {
            return;
        }

        let [left, centre, right] = self.groups();
        let lanes = Lanes::new(inner, &left, &right);

        state.scroll().set_extent(centre.width(), lanes.centre.1);
        // The checkbox alone does not make a pinned group
        state.mount(
            !self.left_sticky_columns.is_empty(),
            !self.right_sticky_columns.is_empty(),
            self.shadow_threshold,
        );
        let shadows = state.shadows();
        let scroll_left = state.scroll().metrics().scroll_left;

        // Header
        let mut header_style = Style::default().add_modifier(Modifier::BOLD);
        if self.is_loading {
            header_style = header_style.add_modifier(Modifier::DIM);
        }
        let header = HeaderContext {
            sort: &self.sort,
            check: state.selection().check_state(self.rows.len()),
            style: header_style,
        };
        let header_line = Rect::new(inner.x, inner.y, inner.width, 1);
        buf.set_style(header_line, header_style);
        lanes.blit(
            inner.y,
            [left.header(&header), centre.header(&header), right.header(&header)],
            scroll_left,
            buf,
            &mut state.hits,
        );
        lanes.separators(inner.y, shadows, buf);

        // Body
        let body = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 2);
        if self.rows.is_empty() {
            let message = fit(&self.empty_rows_message, body.width, Alignment::Center, true);
            buf.set_stringn(
                body.x,
                body.y,
                &message,
                body.width as usize,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            );
        } else {
            let visible = body.height as usize;
            state.fit_rows(self.rows.len(), visible);
            let offset = state.row_offset;

            for (index, row) in self.rows.iter().enumerate().skip(offset).take(visible) {
                let y = body.y + (index - offset) as u16;
                let id = row.id(&self.id_field);
                let selected = id.as_ref().is_some_and(|id| state.selection().contains(id));
                let style = self.row_style(index, selected, state.cursor() == Some(index));

                let line = Rect::new(body.x, y, body.width, 1);
                buf.set_style(line, style);
                state.hits.push(line, TableTarget::Row(index));

                let ctx = RowContext {
                    row,
                    id,
                    selected,
                    style,
                };
                lanes.blit(
                    y,
                    [left.row(&ctx), centre.row(&ctx), right.row(&ctx)],
                    scroll_left,
                    buf,
                    &mut state.hits,
                );
                lanes.separators(y, shadows, buf);
            }
        }

        let pagination_line = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
        self.render_pagination(pagination_line, buf, &mut state.hits);

        if self.is_loading {
            self.render_spinner(body, buf, state);
        }
    }
}

impl Accessible for PagedTable {
    type State = PagedTableState;

    fn aria_role(&self, _state: &PagedTableState) -> &str {
        "grid"
    }

    fn aria_label(&self) -> String {
        self.label.clone()
    }

    fn aria_value(&self, state: &PagedTableState) -> Option<String> {
        if self.is_loading {
            return Some("loading".to_string());
        }
        if self.rows.is_empty() {
            return Some(self.empty_rows_message.clone());
        }
        Some(format!(
            "page {} of {}, {} selected",
            self.current_page,
            self.page_count(),
            state.selection().len()
        ))
    }

    fn aria_position(&self, state: &PagedTableState) -> Option<(usize, usize)> {
        state.cursor().map(|i| (i + 1, self.rows.len()))
    }
}
