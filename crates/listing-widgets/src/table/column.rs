//! Column definitions for PagedTable.

use ratatui::layout::Alignment;
use serde::{Deserialize, Serialize};

/// Width of a column that does not declare one, in cells.
pub const DEFAULT_COLUMN_WIDTH: u16 = 14;

/// Width of the row-selection checkbox column, in cells.
pub const CHECKBOX_COLUMN_WIDTH: u16 = 4;

/// Scrollable column in the centre region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Field of each row shown in this column
    pub id: String,
    /// Header text
    pub label: String,
    /// Whether the header requests sorting when activated
    #[serde(default)]
    pub sortable: bool,
    /// Horizontal alignment of cell text
    #[serde(default = "default_align", with = "align_serde")]
    pub align: Alignment,
    /// Declared width in cells
    #[serde(default)]
    pub width: Option<u16>,
    /// Mark truncated text with an ellipsis
    #[serde(default)]
    pub ellipsis: bool,
}

fn default_align() -> Alignment {
    Alignment::Left
}

impl Column {
    /// Create a new column.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sortable: false,
            align: Alignment::Left,
            width: None,
            ellipsis: false,
        }
    }

    /// Set whether the column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set the cell alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set the column width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set whether overflowing text ends in an ellipsis.
    pub fn ellipsis(mut self, ellipsis: bool) -> Self {
        self.ellipsis = ellipsis;
        self
    }

    /// Width actually used for layout.
    pub fn resolved_width(&self) -> u16 {
        self.width.unwrap_or(DEFAULT_COLUMN_WIDTH)
    }
}

/// Column pinned to the left or right edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickyColumn {
    /// Field of each row shown in this column
    pub id: String,
    /// Header text
    pub label: String,
    /// Whether the header requests sorting when activated
    #[serde(default)]
    pub sortable: bool,
    /// Declared width in cells
    #[serde(default)]
    pub width: Option<u16>,
}

impl StickyColumn {
    /// Create a new pinned column.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sortable: false,
            width: None,
        }
    }

    /// Set whether the column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set the column width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Width actually used for layout.
    pub fn resolved_width(&self) -> u16 {
        self.width.unwrap_or(DEFAULT_COLUMN_WIDTH)
    }
}

mod align_serde {
    use ratatui::layout::Alignment;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(align: &Alignment, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(match align {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Alignment, D::Error> {
        match String::deserialize(d)?.as_str() {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["left", "center", "right"],
            )),
        }
    }
}
