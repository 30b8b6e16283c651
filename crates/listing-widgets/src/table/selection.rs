//! Row selection for PagedTable.

use super::RowId;

/// Tri-state of the header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    /// Some but not all rows selected
    Indeterminate,
    Checked,
}

impl CheckState {
    /// Glyph drawn for this state.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Unchecked => "[ ]",
            Self::Indeterminate => "[-]",
            Self::Checked => "[x]",
        }
    }
}

/// Ordered set of selected row ids.
///
/// Every operation returns a new set; the current one is never edited in
/// place, so a set handed to the host stays valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    ids: Vec<RowId>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from ids, dropping duplicates.
    pub fn from_ids(ids: impl IntoIterator<Item = RowId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    /// Check if a row is selected.
    pub fn contains(&self, id: &RowId) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[RowId] {
        &self.ids
    }

    /// Same selection with `id` added or removed.
    pub fn toggled(&self, id: &RowId) -> Self {
        let ids = if self.contains(id) {
            self.ids.iter().filter(|i| *i != id).cloned().collect()
        } else {
            self.ids.iter().cloned().chain(Some(id.clone())).collect()
        };
        Self { ids }
    }

    /// Select every rendered row unless that many are already selected, in
    /// which case clear.
    pub fn toggled_all(&self, rendered: &[RowId]) -> Self {
        if self.len() < rendered.len() {
            Self::from_ids(rendered.iter().cloned())
        } else {
            Self::new()
        }
    }

    /// Header checkbox state against `row_count` rendered rows.
    pub fn check_state(&self, row_count: usize) -> CheckState {
        let selected = self.len();
        if selected == 0 {
            CheckState::Unchecked
        } else if selected < row_count {
            CheckState::Indeterminate
        } else {
            CheckState::Checked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<RowId> {
        raw.iter().map(|&n| RowId::from(n)).collect()
    }

    #[test]
    fn test_toggle() {
        let sel = SelectionSet::new();

        let sel = sel.toggled(&RowId::from(5));
        assert!(sel.contains(&RowId::from(5)));
        assert_eq!(sel.len(), 1);

        let sel = sel.toggled(&RowId::from(3));
        assert_eq!(sel.ids(), ids(&[5, 3]).as_slice());

        let sel = sel.toggled(&RowId::from(5));
        assert_eq!(sel.ids(), ids(&[3]).as_slice());

        let sel = sel.toggled(&RowId::from(3));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_toggle_leaves_original_untouched() {
        let original = SelectionSet::from_ids(ids(&[1, 2, 3]));
        let removed = original.toggled(&RowId::from(2));

        assert_eq!(original.len(), 3);
        assert_eq!(removed.ids(), ids(&[1, 3]).as_slice());
    }

    #[test]
    fn test_toggle_middle_of_many() {
        let sel = SelectionSet::from_ids(ids(&[1, 2, 3, 4]));
        assert_eq!(sel.toggled(&RowId::from(1)).ids(), ids(&[2, 3, 4]).as_slice());
        assert_eq!(sel.toggled(&RowId::from(4)).ids(), ids(&[1, 2, 3]).as_slice());
        assert_eq!(sel.toggled(&RowId::from(3)).ids(), ids(&[1, 2, 4]).as_slice());
    }

    #[test]
    fn test_toggled_all() {
        let rows = ids(&[1, 2, 3]);

        let all = SelectionSet::new().toggled_all(&rows);
        assert_eq!(all.ids(), rows.as_slice());

        let none = all.toggled_all(&rows);
        assert!(none.is_empty());

        let partial = SelectionSet::from_ids(ids(&[2]));
        assert_eq!(partial.toggled_all(&rows).len(), 3);
    }

    #[test]
    fn test_check_state() {
        assert_eq!(SelectionSet::new().check_state(3), CheckState::Unchecked);
        assert_eq!(
            SelectionSet::from_ids(ids(&[1])).check_state(3),
            CheckState::Indeterminate
        );
        assert_eq!(
            SelectionSet::from_ids(ids(&[1, 2, 3])).check_state(3),
            CheckState::Checked
        );
        assert_eq!(SelectionSet::new().check_state(0), CheckState::Unchecked);
    }

    #[test]
    fn test_from_ids_dedups() {
        let sel = SelectionSet::from_ids(ids(&[1, 1, 2]));
        assert_eq!(sel.len(), 2);
    }
}
