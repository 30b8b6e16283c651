//! Column groups composed left to right into a table line.
//!
//! Each group renders a full line of its own into an off-screen [`Strip`].
//! The table then copies the visible window of every strip into the frame:
//! pinned groups are copied whole, the scrollable group from its current
//! scroll offset.

use super::column::CHECKBOX_COLUMN_WIDTH;
use super::state::TableTarget;
use super::{CheckState, Column, Row, RowId, SortDirection, SortSpec, StickyColumn};
use crate::hit::HitMap;
use crate::text::fit;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};

const ARROW_UP: &str = "\u{25b2}";
const ARROW_DOWN: &str = "\u{25bc}";

/// One rendered line of a group, with the clickable spans inside it.
pub(crate) struct Strip {
    buf: Buffer,
    /// (start, width, target) in strip coordinates
    spans: Vec<(u16, u16, TableTarget)>,
    cursor: u16,
}

impl Strip {
    fn new(width: u16, style: Style) -> Self {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        buf.set_style(area, style);
        Self {
            buf,
            spans: Vec::new(),
            cursor: 0,
        }
    }

    /// Write one cell; the last column of each cell stays blank as a gutter.
    fn cell(&mut self, width: u16, text: &str, align: Alignment, ellipsis: bool, style: Style) -> u16 {
        let start = self.cursor;
        let inner = width.saturating_sub(1);
        if inner > 0 {
            let text = fit(text, inner, align, ellipsis);
            self.buf.set_stringn(start, 0, &text, inner as usize, style);
        }
        self.cursor = self.cursor.saturating_add(width);
        start
    }

    fn span(&mut self, start: u16, width: u16, target: TableTarget) {
        self.spans.push((start, width.saturating_sub(1).max(1), target));
    }

    /// Copy the window starting at `src_x` into `dst` (one line high).
    pub(crate) fn blit(
        &self,
        src_x: u16,
        dst: Rect,
        buf: &mut Buffer,
        hits: &mut HitMap<TableTarget>,
    ) {
        let src_width = self.buf.area.width;
        for dx in 0..dst.width {
            let sx = src_x.saturating_add(dx);
            if sx >= src_width {
                break;
            }
            if let (Some(src), Some(out)) = (self.buf.cell((sx, 0)), buf.cell_mut((dst.x + dx, dst.y))) {
                *out = src.clone();
            }
        }

        let window_end = src_x.saturating_add(dst.width);
        for (start, width, target) in &self.spans {
            let lo = (*start).max(src_x);
            let hi = start.saturating_add(*width).min(window_end);
            if lo < hi {
                hits.push(
                    Rect::new(dst.x + (lo - src_x), dst.y, hi - lo, 1),
                    target.clone(),
                );
            }
        }
    }
}

/// Inputs to header rendering.
pub(crate) struct HeaderContext<'a> {
    pub sort: &'a SortSpec,
    pub check: CheckState,
    pub style: Style,
}

/// Inputs to body row rendering.
pub(crate) struct RowContext<'a> {
    pub row: &'a Row,
    pub id: Option<RowId>,
    pub selected: bool,
    pub style: Style,
}

/// A run of columns that scrolls (or stays pinned) together.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ColumnGroup<'a> {
    /// Optional checkbox column followed by left-pinned columns
    LeftSticky {
        checkbox: bool,
        columns: &'a [StickyColumn],
    },
    Scrollable(&'a [Column]),
    RightSticky(&'a [StickyColumn]),
}

impl<'a> ColumnGroup<'a> {
    /// Total width in cells.
    pub fn width(&self) -> u16 {
        match self {
            Self::LeftSticky { checkbox, columns } => {
                let base = if *checkbox { CHECKBOX_COLUMN_WIDTH } else { 0 };
                sticky_width(columns).saturating_add(base)
            }
            Self::Scrollable(columns) => columns
                .iter()
                .fold(0u16, |acc, c| acc.saturating_add(c.resolved_width())),
            Self::RightSticky(columns) => sticky_width(columns),
        }
    }

    /// Number of columns, the checkbox included.
    pub fn column_count(&self) -> usize {
        match self {
            Self::LeftSticky { checkbox, columns } => columns.len() + usize::from(*checkbox),
            Self::Scrollable(columns) => columns.len(),
            Self::RightSticky(columns) => columns.len(),
        }
    }

    /// Check if the group draws nothing.
    pub fn is_empty(&self) -> bool {
        self.column_count() == 0
    }

    /// Whether `id` names a sortable column of this group.
    pub fn is_sortable(&self, id: &str) -> bool {
        match self {
            Self::LeftSticky { columns, .. } | Self::RightSticky(columns) => {
                columns.iter().any(|c| c.id == id && c.sortable)
            }
            Self::Scrollable(columns) => columns.iter().any(|c| c.id == id && c.sortable),
        }
    }

    /// Whether `id` names any column of this group.
    pub fn has_column(&self, id: &str) -> bool {
        match self {
            Self::LeftSticky { columns, .. } | Self::RightSticky(columns) => {
                columns.iter().any(|c| c.id == id)
            }
            Self::Scrollable(columns) => columns.iter().any(|c| c.id == id),
        }
    }

    /// Render the header line.
    pub fn header(&self, ctx: &HeaderContext<'_>) -> Strip {
        let mut strip = Strip::new(self.width(), ctx.style);
        match self {
            Self::LeftSticky { checkbox, columns } => {
                if *checkbox {
                    let at = strip.cell(
                        CHECKBOX_COLUMN_WIDTH,
                        ctx.check.symbol(),
                        Alignment::Left,
                        false,
                        ctx.style,
                    );
                    strip.span(at, CHECKBOX_COLUMN_WIDTH, TableTarget::SelectAll);
                }
                for col in columns.iter() {
                    sticky_header(&mut strip, col, ctx);
                }
            }
            Self::Scrollable(columns) => {
                for col in columns.iter() {
                    let (label, style) = header_label(&col.label, &col.id, col.sortable, ctx);
                    let width = col.resolved_width();
                    let at = strip.cell(width, &label, col.align, true, style);
                    if col.sortable {
                        strip.span(at, width, TableTarget::Sort(col.id.clone()));
                    }
                }
            }
            Self::RightSticky(columns) => {
                for col in columns.iter() {
                    sticky_header(&mut strip, col, ctx);
                }
            }
        }
        strip
    }

    /// Render one body row.
    pub fn row(&self, ctx: &RowContext<'_>) -> Strip {
        let mut strip = Strip::new(self.width(), ctx.style);
        match self {
            Self::LeftSticky { checkbox, columns } => {
                if *checkbox {
                    let check = if ctx.selected {
                        CheckState::Checked
                    } else {
                        CheckState::Unchecked
                    };
                    let at = strip.cell(
                        CHECKBOX_COLUMN_WIDTH,
                        check.symbol(),
                        Alignment::Left,
                        false,
                        ctx.style,
                    );
                    if let Some(id) = &ctx.id {
                        strip.span(at, CHECKBOX_COLUMN_WIDTH, TableTarget::ToggleRow(id.clone()));
                    }
                }
                for col in columns.iter() {
                    strip.cell(
                        col.resolved_width(),
                        &ctx.row.display(&col.id),
                        Alignment::Left,
                        false,
                        ctx.style,
                    );
                }
            }
            Self::Scrollable(columns) => {
                for col in columns.iter() {
                    strip.cell(
                        col.resolved_width(),
                        &ctx.row.display(&col.id),
                        col.align,
                        col.ellipsis,
                        ctx.style,
                    );
                }
            }
            Self::RightSticky(columns) => {
                for col in columns.iter() {
                    strip.cell(
                        col.resolved_width(),
                        &ctx.row.display(&col.id),
                        Alignment::Left,
                        false,
                        ctx.style,
                    );
                }
            }
        }
        strip
    }
}

fn sticky_width(columns: &[StickyColumn]) -> u16 {
    columns
        .iter()
        .fold(0u16, |acc, c| acc.saturating_add(c.resolved_width()))
}

fn sticky_header(strip: &mut Strip, col: &StickyColumn, ctx: &HeaderContext<'_>) {
    let (label, style) = header_label(&col.label, &col.id, col.sortable, ctx);
    let width = col.resolved_width();
    let at = strip.cell(width, &label, Alignment::Left, true, style);
    if col.sortable {
        strip.span(at, width, TableTarget::Sort(col.id.clone()));
    }
}

/// Header text with the sort arrow, and its style.
fn header_label(label: &str, id: &str, sortable: bool, ctx: &HeaderContext<'_>) -> (String, Style) {
    let active = sortable && !ctx.sort.sort_by.is_empty() && ctx.sort.sort_by == id;
    if !active {
        return (label.to_string(), ctx.style);
    }
    let arrow = match ctx.sort.sort_dir {
        SortDirection::Ascending => ARROW_UP,
        SortDirection::Descending => ARROW_DOWN,
    };
    (
        format!("{} {}", label, arrow),
        ctx.style.fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sticky() -> Vec<StickyColumn> {
        vec![
            StickyColumn::new("lastname", "Last").width(10).sortable(true),
            StickyColumn::new("firstname", "First").width(8),
        ]
    }

    fn line(strip: &Strip) -> String {
        let area = strip.buf.area;
        (0..area.width)
            .map(|x| strip.buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_widths_use_declared_column_widths() {
        let left = sticky();
        let group = ColumnGroup::LeftSticky {
            checkbox: true,
            columns: &left,
        };
        assert_eq!(group.width(), CHECKBOX_COLUMN_WIDTH + 18);
        assert_eq!(group.column_count(), 3);

        let right = vec![StickyColumn::new("age", "Age").width(5), StickyColumn::new("sex", "Sex")];
        assert_eq!(ColumnGroup::RightSticky(&right).width(), 5 + 14);

        let centre = vec![Column::new("email", "Email"), Column::new("mrn", "MRN").width(6)];
        assert_eq!(ColumnGroup::Scrollable(&centre).width(), 20);
    }

    #[test]
    fn test_header_marks_sorted_column() {
        let left = sticky();
        let group = ColumnGroup::LeftSticky {
            checkbox: false,
            columns: &left,
        };
        let sort = SortSpec::new("lastname", SortDirection::Descending);
        let strip = group.header(&HeaderContext {
            sort: &sort,
            check: CheckState::Unchecked,
            style: Style::default(),
        });

        assert!(line(&strip).starts_with("Last \u{25bc}"));
        assert_eq!(strip.spans, vec![(0, 9, TableTarget::Sort("lastname".into()))]);
    }

    #[test]
    fn test_row_checkbox_span() {
        let left = sticky();
        let group = ColumnGroup::LeftSticky {
            checkbox: true,
            columns: &left,
        };
        let row = Row::new().with("id", 4).with("lastname", "Doe");
        let strip = group.row(&RowContext {
            row: &row,
            id: row.id("id"),
            selected: true,
            style: Style::default(),
        });

        assert!(line(&strip).starts_with("[x] Doe"));
        assert_eq!(strip.spans[0].2, TableTarget::ToggleRow(RowId::from(4)));
    }

    #[test]
    fn test_blit_clips_window_and_spans() {
        let centre = vec![
            Column::new("a", "Alpha").width(6).sortable(true),
            Column::new("b", "Beta").width(6).sortable(true),
        ];
        let sort = SortSpec::default();
        let strip = ColumnGroup::Scrollable(&centre).header(&HeaderContext {
            sort: &sort,
            check: CheckState::Unchecked,
            style: Style::default(),
        });

        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 1));
        let mut hits = HitMap::new();
        strip.blit(3, Rect::new(2, 0, 6, 1), &mut buf, &mut hits);

        // Window covers strip cells 3..9: "ha " then "Bet"
        assert_eq!(buf[(2, 0)].symbol(), "h");
        assert_eq!(buf[(5, 0)].symbol(), "B");
        assert_eq!(hits.hit(2, 0), Some(&TableTarget::Sort("a".into())));
        assert_eq!(hits.hit(5, 0), Some(&TableTarget::Sort("b".into())));
        assert_eq!(hits.hit(0, 0), None);
    }
}
