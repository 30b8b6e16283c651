//! Validation errors for widget inputs.

use thiserror::Error;

/// Errors reported when the data handed to a widget breaks its invariants.
///
/// Rendering and event handling never fail; these errors only come out of the
/// explicit `validate` checks so a host can reject bad data up front.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("option id `{0}` appears more than once")]
    DuplicateOptionId(String),

    #[error("option id `{0}` is reserved for the default option")]
    ReservedOptionId(String),

    #[error("row {index} has no value for id field `{field}`")]
    MissingRowId { index: usize, field: String },

    #[error("row id `{0}` appears more than once")]
    DuplicateRowId(String),

    #[error("sort column `{0}` is not a column of this table")]
    UnknownSortColumn(String),
}
