//! Application state and logic.

use crate::config::Config;
use crate::data::{Dataset, Query, ID_FIELD, STATUS_FIELD};
use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use listing_widgets::{
    Accessible, AnnouncementBuffer, AnnouncementPriority, Column, OptionFilter,
    OptionFilterState, PagedTable, PagedTableState, SelectionSet, StickyColumn,
};
use ratatui::layout::Alignment;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Something a widget asked the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Filter(String),
    Sort(String),
    Page(usize),
    PerPage(usize),
}

type Requests = Rc<RefCell<Vec<Request>>>;

/// Which widget receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filter,
    Table,
}

/// Application state.
pub struct App {
    dataset: Dataset,
    /// What the table shows once the pending fetch lands.
    pub query: Query,
    pub filter: OptionFilter,
    pub filter_state: OptionFilterState,
    pub table: PagedTable,
    pub table_state: PagedTableState,
    pub focus: Focus,
    /// Show help popup.
    pub show_help: bool,
    /// Latest screen reader announcement, shown in the status line.
    pub announcement: Option<String>,
    announcements: AnnouncementBuffer,
    requests: Requests,
    latency: Duration,
    /// When the simulated fetch completes.
    pending: Option<Instant>,
}

impl App {
    /// Create the application from configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let dataset = match &config.data.fixture {
            Some(path) => Dataset::load(path)?,
            None => Dataset::generate(config.data.generated_rows),
        };
        if dataset.is_empty() {
            warn!("dataset is empty");
        }
        info!(records = dataset.len(), "dataset loaded");

        let requests: Requests = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&requests);
        let filter = OptionFilter::new(STATUS_FIELD, "Status", "Filter by status")
            .options(dataset.status_options())
            .on_apply(move |_attribute, id| sink.borrow_mut().push(Request::Filter(id.to_string())));
        filter.validate().context("invalid status options")?;

        let table = build_table(config, &requests);

        let mut app = Self {
            dataset,
            query: Query::new(config.display.per_page),
            filter,
            filter_state: OptionFilterState::new(),
            table,
            table_state: PagedTableState::new(),
            focus: Focus::Table,
            show_help: false,
            announcement: None,
            announcements: AnnouncementBuffer::new(),
            requests,
            latency: Duration::from_millis(config.data.latency_ms),
            pending: None,
        };
        app.refresh()?;
        Ok(app)
    }

    /// Whether `q` should quit rather than reach a widget.
    pub fn can_quit(&self) -> bool {
        !self.filter_state.is_open()
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        if self.show_help {
            self.show_help = false;
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab if !self.filter_state.is_open() => {
                self.focus = match self.focus {
                    Focus::Filter => Focus::Table,
                    Focus::Table => Focus::Filter,
                };
            }
            KeyCode::Char('f') if !self.filter_state.is_open() => {
                self.focus = Focus::Filter;
                self.filter.open(&mut self.filter_state);
            }
            KeyCode::Char('?') if !self.filter_state.is_open() => self.show_help = true,
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.table_state.set_selection(SelectionSet::new());
            }
            _ => {
                let consumed = match self.focus {
                    Focus::Filter => self.filter.handle_key(key, &mut self.filter_state),
                    Focus::Table => self.table.handle_key(key, &mut self.table_state),
                };
                if !consumed {
                    debug!(?key, "key ignored");
                }
            }
        }
        self.process_requests()
    }

    /// Handle a mouse event. The open dropdown sees it first.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> anyhow::Result<()> {
        if self.filter.handle_mouse(mouse, &mut self.filter_state) {
            self.focus = Focus::Filter;
        } else if self.table.handle_mouse(mouse, &mut self.table_state) {
            self.focus = Focus::Table;
        }
        self.process_requests()
    }

    /// Advance the spinner, land a pending fetch once it is due and pick up
    /// the next announcement.
    pub fn tick(&mut self) -> anyhow::Result<()> {
        if let Some(due) = self.pending {
            self.table_state.tick();
            if Instant::now() >= due {
                self.pending = None;
                self.refresh()?;
            }
        }
        if let Some(next) = self.announcements.next() {
            self.announcement = Some(next.message);
        }
        Ok(())
    }

    /// Apply widget requests to the query and start a fetch.
    fn process_requests(&mut self) -> anyhow::Result<()> {
        let requests: Vec<Request> = self.requests.borrow_mut().drain(..).collect();
        if requests.is_empty() {
            return Ok(());
        }

        for request in requests {
            debug!(?request, "request");
            match request {
                Request::Filter(status) => {
                    self.announcements.announce(
                        self.filter.describe(&self.filter_state),
                        AnnouncementPriority::High,
                    );
                    self.query.status = status;
                    self.query.page = 1;
                    self.table_state.set_selection(SelectionSet::new());
                }
                Request::Sort(column) => {
                    self.query.sort = self.query.sort.next(&column);
                    self.query.page = 1;
                }
                Request::Page(page) => self.query.page = page,
                Request::PerPage(per_page) => {
                    self.query.per_page = per_page;
                    self.query.page = 1;
                }
            }
        }

        if self.latency.is_zero() {
            return self.refresh();
        }
        self.table.set_loading(true);
        self.pending = Some(Instant::now() + self.latency);
        Ok(())
    }

    /// Run the query and hand the page to the table.
    fn refresh(&mut self) -> anyhow::Result<()> {
        let result = self.dataset.query(&self.query);
        // The query clamps pages past the end
        self.query.page = if result.total == 0 {
            1
        } else {
            (result.first - 1) / self.query.per_page.max(1) + 1
        };

        let total = result.total;
        self.table.set_pagination_summary(result.summary());
        self.table.set_rows(result.rows);
        self.table.set_paging(total, self.query.page, self.query.per_page);
        self.table.set_sort(self.query.sort.clone());
        self.table.set_loading(false);
        self.table.validate().context("query returned an invalid page")?;

        self.announcements.announce(
            self.table.describe(&self.table_state),
            AnnouncementPriority::Normal,
        );
        debug!(status = %self.query.status, page = self.query.page, total, "page loaded");
        Ok(())
    }

    /// Text for the status line.
    pub fn status_line(&self) -> String {
        let focus = match self.focus {
            Focus::Filter => "filter",
            Focus::Table => "table",
        };
        let mut parts = vec![format!("focus: {}", focus)];
        let selected = self.table_state.selection().len();
        if selected > 0 {
            parts.push(format!("{} selected", selected));
        }
        if self.pending.is_some() {
            parts.push("fetching".to_string());
        }
        parts.join("  |  ")
    }
}

fn build_table(config: &Config, requests: &Requests) -> PagedTable {
    let on_sort = Rc::clone(requests);
    let on_page = Rc::clone(requests);
    let on_per_page = Rc::clone(requests);

    PagedTable::new(ID_FIELD)
        .left_sticky_columns(vec![StickyColumn::new("lastname", "Last name")
            .width(14)
            .sortable(true)])
        .columns(vec![
            Column::new("firstname", "First name").width(12).sortable(true),
            Column::new("email", "Email").width(26).ellipsis(true),
            Column::new("mrn", "MRN").width(12),
            Column::new("organization", "Organization").width(18).ellipsis(true),
            Column::new("age", "Age").width(6).align(Alignment::Right).sortable(true),
        ])
        .right_sticky_columns(vec![StickyColumn::new(STATUS_FIELD, "Status").width(10)])
        .checkbox(config.display.checkbox)
        .per_page(config.display.per_page)
        .shadow_threshold(config.display.shadow_threshold)
        .empty_rows_message(config.display.empty_message.clone())
        .label("Patients")
        .on_sort(move |column| on_sort.borrow_mut().push(Request::Sort(column.to_string())))
        .on_paginate(move |page| on_page.borrow_mut().push(Request::Page(page)))
        .on_change_per_page(move |n| on_per_page.borrow_mut().push(Request::PerPage(n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseButton, MouseEventKind};

    fn app() -> App {
        let mut config = Config::default();
        config.data.generated_rows = 47;
        config.data.latency_ms = 0;
        App::new(&config).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_starts_on_first_page() {
        let app = app();
        assert_eq!(app.table.page(), 1);
        assert_eq!(app.table.page_count(), 5);
        assert_eq!(app.table.row_list().len(), 10);
    }

    #[test]
    fn test_next_page_request() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.query.page, 2);
        assert_eq!(app.table.page(), 2);
        assert_eq!(app.table.row_ids()[0].as_str(), "11");
    }

    #[test]
    fn test_per_page_resets_page() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('n'))).unwrap();
        app.handle_key(key(KeyCode::Char('+'))).unwrap();
        assert_eq!(app.query.per_page, 20);
        assert_eq!(app.query.page, 1);
        assert_eq!(app.table.page_count(), 3);
    }

    #[test]
    fn test_filter_apply_narrows_rows() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('f'))).unwrap();
        assert!(!app.can_quit());

        // All, then the first status
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Char('a'))).unwrap();

        let status = app.filter_state.applied_id().to_string();
        assert_ne!(status, "all");
        assert_eq!(app.query.status, status);
        assert!(app
            .table
            .row_list()
            .iter()
            .all(|r| r.display(STATUS_FIELD) == status));
        assert!(app.can_quit());
    }

    #[test]
    fn test_latency_shows_loading_until_tick() {
        let mut config = Config::default();
        config.data.latency_ms = 60_000;
        let mut app = App::new(&config).unwrap();

        app.handle_key(key(KeyCode::Char('n'))).unwrap();
        assert!(app.table.is_loading());
        assert_eq!(app.table.page(), 1);

        app.pending = Some(Instant::now());
        app.tick().unwrap();
        assert!(!app.table.is_loading());
        assert_eq!(app.table.page(), 2);
    }

    #[test]
    fn test_announces_committed_changes() {
        let mut app = app();
        app.tick().unwrap();
        assert_eq!(
            app.announcement.as_deref(),
            Some("Patients grid, page 1 of 5, 0 selected")
        );

        app.handle_key(key(KeyCode::Char('f'))).unwrap();
        app.handle_key(key(KeyCode::End)).unwrap();
        app.handle_key(key(KeyCode::Char(' '))).unwrap();
        app.handle_key(key(KeyCode::Char('a'))).unwrap();
        app.tick().unwrap();

        let announced = app.announcement.clone().unwrap_or_default();
        assert!(announced.starts_with("Status button, collapsed"), "{announced}");
    }

    #[test]
    fn test_click_outside_dropdown_reaches_nothing_else() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('f'))).unwrap();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 70,
            row: 20,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(click).unwrap();
        assert!(!app.filter_state.is_open());
        assert_eq!(app.filter_state.applied_id(), "all");
    }
}
