//! Page arithmetic and the page strip shown under the table.

/// Rows-per-page choices offered by the per-page selector.
pub const PER_PAGE_CHOICES: [usize; 4] = [5, 10, 20, 50];

/// Pages always shown at each end of the strip.
const BOUNDARY_COUNT: i64 = 1;
/// Pages shown on each side of the current one.
const SIBLING_COUNT: i64 = 1;

/// Number of pages needed for `total` rows; a per-page of 0 counts as 1.
pub fn page_count(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

/// Next or previous per-page choice, wrapping around.
///
/// A value that is not one of the choices steps from the nearest larger one.
pub fn cycle_per_page(current: usize, forward: bool) -> usize {
    let len = PER_PAGE_CHOICES.len();
    let idx = PER_PAGE_CHOICES
        .iter()
        .position(|&c| c >= current)
        .unwrap_or(len - 1);
    let exact = PER_PAGE_CHOICES[idx] == current;
    let next = match (forward, exact) {
        (true, true) => (idx + 1) % len,
        (true, false) => idx,
        (false, _) => (idx + len - 1) % len,
    };
    PER_PAGE_CHOICES[next]
}

/// One entry of the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A 1-based page number
    Page(usize),
    /// Gap standing in for skipped pages
    Ellipsis,
}

/// Lay out the page strip for `count` pages with `current` selected.
///
/// The first and last pages and the neighbours of the current page are
/// always listed; runs of skipped pages collapse into a single ellipsis,
/// which never hides just one page.
pub fn page_items(count: usize, current: usize) -> Vec<PageItem> {
    let count = count as i64;
    let page = current as i64;
    let b = BOUNDARY_COUNT;
    let s = SIBLING_COUNT;

    let start_pages = 1..=b.min(count);
    let end_pages = (count - b + 1).max(b + 1)..=count;

    let siblings_start = (page - s).min(count - b - s * 2 - 1).max(b + 2);
    let siblings_end = (page + s)
        .max(b + s * 2 + 2)
        .min(if end_pages.is_empty() { count - 1 } else { end_pages.start() - 2 });

    let mut items: Vec<PageItem> = start_pages.map(|p| PageItem::Page(p as usize)).collect();

    if siblings_start > b + 2 {
        items.push(PageItem::Ellipsis);
    } else if b + 1 < count - b {
        items.push(PageItem::Page((b + 1) as usize));
    }

    items.extend((siblings_start..=siblings_end).map(|p| PageItem::Page(p as usize)));

    if siblings_end < count - b - 1 {
        items.push(PageItem::Ellipsis);
    } else if count - b > b {
        items.push(PageItem::Page((count - b) as usize));
    }

    items.extend(end_pages.map(|p| PageItem::Page(p as usize)));
    items
}
