//! OptionFilter widget - anchor button with a deferred-apply option dropdown.
//!
//! # Example
//!
//! ```ignore
//! use listing_widgets::{FilterOption, OptionFilter, OptionFilterState};
//!
//! let filter = OptionFilter::new("status", "Status", "Select status")
//!     .options(vec![
//!         FilterOption::new("active", "Active"),
//!         FilterOption::new("inactive", "Inactive"),
//!     ])
//!     .on_apply(|attribute, id| println!("{attribute} = {id}"));
//!
//! let mut state = OptionFilterState::new();
//! frame.render_stateful_widget(&filter, area, &mut state);
//! ```
//!
//! Browsing only changes the provisional selection. The host hears about a
//! choice once, through `on_apply`, when the user confirms it.

mod option;
mod state;

pub use option::{validate_options, FilterOption, DEFAULT_OPTION_DISPLAY, DEFAULT_OPTION_ID};
pub use state::{AnchorIndicators, FilterPhase, OptionFilterState};

use state::FilterTarget;

use crate::accessibility::Accessible;
use crate::error::WidgetError;
use crate::text::{display_width, truncate};

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, StatefulWidget, Widget};
use tracing::debug;

const ARROW_CLOSED: &str = "\u{203a}";
const ARROW_OPEN: &str = "\u{25be}";
const CHECK: &str = "\u{2713}";
const APPLY_LABEL: &str = "[Apply]";
const CANCEL_LABEL: &str = "[Cancel]";

/// Header, footer and two borders around the option rows.
const DIALOG_CHROME_HEIGHT: u16 = 4;

/// Anchor that opens a list of options and reports the confirmed choice.
pub struct OptionFilter {
    attribute_name: String,
    anchor_text: String,
    dialog_header_text: String,
    options: Vec<FilterOption>,
    default_option: FilterOption,
    /// Option rows shown before the list scrolls
    max_visible_options: usize,
    on_apply: Option<Box<dyn Fn(&str, &str)>>,
}

impl OptionFilter {
    /// Create a filter for `attribute_name` with no options besides "All".
    pub fn new(
        attribute_name: impl Into<String>,
        anchor_text: impl Into<String>,
        dialog_header_text: impl Into<String>,
    ) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            anchor_text: anchor_text.into(),
            dialog_header_text: dialog_header_text.into(),
            options: Vec::new(),
            default_option: FilterOption::all(),
            max_visible_options: 8,
            on_apply: None,
        }
    }

    /// Set the options listed after "All".
    pub fn options(mut self, options: Vec<FilterOption>) -> Self {
        self.options = options;
        self
    }

    /// Set how many option rows are visible at once.
    pub fn max_visible_options(mut self, max: usize) -> Self {
        self.max_visible_options = max.max(1);
        self
    }

    /// Set apply callback, called with the attribute name and option id.
    pub fn on_apply(mut self, f: impl Fn(&str, &str) + 'static) -> Self {
        self.on_apply = Some(Box::new(f));
        self
    }

    /// Attribute this filter applies to.
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// The explicit options (without "All").
    pub fn option_list(&self) -> &[FilterOption] {
        &self.options
    }

    /// Check the option ids.
    pub fn validate(&self) -> Result<(), WidgetError> {
        validate_options(&self.options)
    }

    /// "All" followed by the explicit options.
    pub fn entries(&self) -> impl Iterator<Item = &FilterOption> {
        std::iter::once(&self.default_option).chain(self.options.iter())
    }

    /// Find an option (including "All") by id.
    pub fn find(&self, id: &str) -> Option<&FilterOption> {
        self.entries().find(|o| o.id == id)
    }

    fn ids(&self) -> Vec<&str> {
        self.entries().map(|o| o.id.as_str()).collect()
    }

    /// Activate the anchor: open when closed, cancel when open.
    pub fn toggle(&self, state: &mut OptionFilterState) {
        if state.is_open() {
            self.cancel(state);
        } else {
            self.open(state);
        }
    }

    /// Open the dropdown below the anchor.
    pub fn open(&self, state: &mut OptionFilterState) {
        let anchor = state.anchor_area;
        state.open(anchor);
        debug!(attribute = %self.attribute_name, applied = %state.applied_id(), "filter opened");
    }

    /// Close without committing.
    pub fn cancel(&self, state: &mut OptionFilterState) {
        if !state.is_open() {
            return;
        }
        state.cancel();
        debug!(attribute = %self.attribute_name, "filter cancelled");
    }

    /// Close and commit the provisional choice, notifying the host.
    pub fn apply(&self, state: &mut OptionFilterState) {
        if !state.is_open() {
            return;
        }
        let applied = state.apply();
        debug!(attribute = %self.attribute_name, applied = %applied, "filter applied");
        if let Some(ref callback) = self.on_apply {
            callback(&self.attribute_name, applied);
        }
    }

    /// Provisionally select an option. Ignored while closed or for unknown ids.
    pub fn select(&self, id: &str, state: &mut OptionFilterState) -> bool {
        if !state.is_open() || self.find(id).is_none() {
            return false;
        }
        state.select(id);
        true
    }

    /// Handle a key event.
    pub fn handle_key(&self, key: KeyEvent, state: &mut OptionFilterState) -> bool {
        if !state.is_open() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                    self.open(state);
                    true
                }
                _ => false,
            };
        }

        let ids = self.ids();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                state.move_focus(&ids, 1);
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                state.move_focus(&ids, -1);
                true
            }
            KeyCode::Home => {
                state.focus_first(&ids);
                true
            }
            KeyCode::End => {
                state.focus_last(&ids);
                true
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                state.select_focused();
                true
            }
            KeyCode::Char('a') => {
                self.apply(state);
                true
            }
            KeyCode::Esc | KeyCode::Char('c') => {
                self.cancel(state);
                true
            }
            _ => false,
        }
    }

    /// Handle a mouse event using the regions from the last render.
    ///
    /// A click outside an open dropdown cancels it but is not consumed, so
    /// the host can still deliver it to whatever was clicked.
    pub fn handle_mouse(&self, mouse: MouseEvent, state: &mut OptionFilterState) -> bool {
        let target = match state.hits.hit(mouse.column, mouse.row) {
            // Dropdown regions from the last frame are stale once closed
            Some(FilterTarget::Anchor) => Some(FilterTarget::Anchor),
            Some(_) if !state.is_open() => None,
            other => other.cloned(),
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match target {
                Some(FilterTarget::Anchor) => {
                    self.toggle(state);
                    true
                }
                Some(FilterTarget::Option(id)) => self.select(&id, state),
                Some(FilterTarget::Apply) => {
                    self.apply(state);
                    true
                }
                Some(FilterTarget::Cancel) => {
                    self.cancel(state);
                    true
                }
                Some(FilterTarget::Dialog) => true,
                None => {
                    self.cancel(state);
                    false
                }
            },
            MouseEventKind::Moved => match target {
                Some(FilterTarget::Option(id)) if state.is_open() => {
                    state.hover(&id);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn render_dialog(&self, anchor: Rect, buf: &mut Buffer, state: &mut OptionFilterState) {
        let bounds = buf.area;
        let entries: Vec<&FilterOption> = self.entries().collect();
        let ids: Vec<&str> = entries.iter().map(|o| o.id.as_str()).collect();

        let footer_width = display_width(CANCEL_LABEL) + 1 + display_width(APPLY_LABEL);
        let content_width = entries
            .iter()
            .map(|o| display_width(&o.display) + 4)
            .chain([display_width(&self.dialog_header_text), footer_width])
            .max()
            .unwrap_or(footer_width);
        let width = (content_width + 2).min(bounds.width);

        let list_height = entries.len().min(self.max_visible_options) as u16;
        let wanted = list_height + DIALOG_CHROME_HEIGHT;
        let below = bounds.bottom().saturating_sub(anchor.bottom());
        let above = anchor.y.saturating_sub(bounds.y);
        let (y, height) = if wanted <= below || below >= above {
            (anchor.bottom(), wanted.min(below))
        } else {
            let height = wanted.min(above);
            (anchor.y - height, height)
        };
        if height < DIALOG_CHROME_HEIGHT + 1 || width < 4 {
            return;
        }
        let x = anchor
            .x
            .min(bounds.right().saturating_sub(width))
            .max(bounds.x);
        let dialog = Rect::new(x, y, width, height);

        Clear.render(dialog, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(dialog);
        block.render(dialog, buf);
        state.hits.push(dialog, FilterTarget::Dialog);

        buf.set_stringn(
            inner.x,
            inner.y,
            &self.dialog_header_text,
            inner.width as usize,
            Style::default().add_modifier(Modifier::BOLD),
        );

        let visible = inner.height.saturating_sub(2) as usize;
        state.scroll_to_focus(&ids, visible);
        let offset = state.list_offset;

        for (row, option) in entries.iter().enumerate().skip(offset).take(visible) {
            let y = inner.y + 1 + (row - offset) as u16;
            let line = Rect::new(inner.x, y, inner.width, 1);
            let is_selected = state.selected_id() == option.id;
            let is_focused = state.focused_id() == option.id;

            let mut style = Style::default();
            if is_focused {
                style = style.bg(Color::DarkGray);
            }
            if is_selected {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            buf.set_style(line, style);

            let text_width = inner.width.saturating_sub(3);
            let text = truncate(&option.display, text_width, true);
            buf.set_stringn(inner.x + 1, y, &text, text_width as usize, style);
            if is_selected {
                buf.set_string(inner.right() - 2, y, CHECK, style);
            }
            state.hits.push(line, FilterTarget::Option(option.id.clone()));
        }

        let footer_y = inner.bottom() - 1;
        let apply_width = display_width(APPLY_LABEL);
        let cancel_width = display_width(CANCEL_LABEL);
        let apply_x = inner.right().saturating_sub(apply_width).max(inner.x);
        let cancel_x = apply_x.saturating_sub(cancel_width + 1).max(inner.x);

        buf.set_stringn(
            cancel_x,
            footer_y,
            CANCEL_LABEL,
            (apply_x - cancel_x) as usize,
            Style::default(),
        );
        buf.set_stringn(
            apply_x,
            footer_y,
            APPLY_LABEL,
            (inner.right() - apply_x) as usize,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        );
        state.hits.push(
            Rect::new(cancel_x, footer_y, cancel_width.min(apply_x - cancel_x), 1),
            FilterTarget::Cancel,
        );
        state.hits.push(
            Rect::new(apply_x, footer_y, apply_width.min(inner.right() - apply_x), 1),
            FilterTarget::Apply,
        );
    }
}

impl StatefulWidget for &OptionFilter {
    type State = OptionFilterState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.hits.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let indicators = state.indicators();
        let icon = if indicators.opened { ARROW_OPEN } else { ARROW_CLOSED };
        let label = format!("{} {}", self.anchor_text, icon);
        let anchor = Rect::new(area.x, area.y, display_width(&label).min(area.width), 1);

        let mut style = Style::default();
        if indicators.active {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if indicators.opened {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        buf.set_stringn(anchor.x, anchor.y, &label, anchor.width as usize, style);

        state.anchor_area = anchor;
        state.hits.push(anchor, FilterTarget::Anchor);

        if state.is_open() {
            // Follow the anchor if the host moved it since opening
            state.reanchor(anchor);
            self.render_dialog(anchor, buf, state);
        }
    }
}

impl Accessible for OptionFilter {
    type State = OptionFilterState;

    fn aria_role(&self, state: &OptionFilterState) -> &str {
        if state.is_open() {
            "listbox"
        } else {
            "button"
        }
    }

    fn aria_label(&self) -> String {
        self.anchor_text.clone()
    }

    fn aria_value(&self, state: &OptionFilterState) -> Option<String> {
        self.find(state.applied_id()).map(|o| o.display.clone())
    }

    fn aria_expanded(&self, state: &OptionFilterState) -> Option<bool> {
        Some(state.is_open())
    }

    fn aria_position(&self, state: &OptionFilterState) -> Option<(usize, usize)> {
        if !state.is_open() {
            return None;
        }
        let ids = self.ids();
        ids.iter()
            .position(|id| *id == state.focused_id())
            .map(|idx| (idx + 1, ids.len()))
    }
}
