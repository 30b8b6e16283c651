//! # listing-widgets
//!
//! Widgets for record listing screens: a filter popover and a paged table.
//!
//! ## Components
//!
//! - [`OptionFilter`] - Anchor button opening a list of options; the host
//!   hears about a choice only when the user applies it
//! - [`PagedTable`] - Paged record table with row selection, pinned column
//!   groups, scroll shadows and sort/pagination requests
//!
//! ## Architecture
//!
//! Both widgets:
//! - Keep interactive state in a separate state struct owned by the host
//! - Implement Ratatui's `StatefulWidget` trait for a shared reference
//! - Record hit regions during render and consume them in `handle_mouse`
//! - Report requests to the host through optional boxed callbacks
//! - Expose screen reader hints through [`Accessible`]

mod accessibility;
mod error;
mod filter;
mod hit;
mod table;
mod text;

pub use accessibility::{Accessible, Announcement, AnnouncementBuffer, AnnouncementPriority};
pub use error::WidgetError;
pub use filter::{
    validate_options, AnchorIndicators, FilterOption, FilterPhase, OptionFilter,
    OptionFilterState, DEFAULT_OPTION_DISPLAY, DEFAULT_OPTION_ID,
};
pub use table::{
    cycle_per_page, page_count, page_items, CellContent, CheckState, Column, PageItem, PagedTable,
    PagedTableState, Row, RowId, ScrollContainer, ScrollMetrics, ScrollSubscription, SelectionSet,
    SortDirection, SortSpec, StickyColumn, StickyShadows, CHECKBOX_COLUMN_WIDTH,
    DEFAULT_COLUMN_WIDTH, PER_PAGE_CHOICES, SHADOW_THRESHOLD,
};
