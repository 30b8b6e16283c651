//! Options offered by an OptionFilter.

use crate::error::WidgetError;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Id of the implicit option that clears the filter.
pub const DEFAULT_OPTION_ID: &str = "all";

/// Label of the implicit option that clears the filter.
pub const DEFAULT_OPTION_DISPLAY: &str = "All";

/// A selectable choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterOption {
    /// Unique id within the option set
    pub id: String,
    /// Text shown in the list
    pub display: String,
}

impl FilterOption {
    /// Create an option.
    pub fn new(id: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: display.into(),
        }
    }

    /// The implicit "All" option prepended to every list.
    pub fn all() -> Self {
        Self::new(DEFAULT_OPTION_ID, DEFAULT_OPTION_DISPLAY)
    }

    /// Check if this is the implicit "All" option.
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_OPTION_ID
    }
}

/// Check that option ids are unique and do not shadow the default option.
pub fn validate_options(options: &[FilterOption]) -> Result<(), WidgetError> {
    let mut seen = HashSet::new();
    for option in options {
        if option.is_default() {
            return Err(WidgetError::ReservedOptionId(option.id.clone()));
        }
        if !seen.insert(option.id.as_str()) {
            return Err(WidgetError::DuplicateOptionId(option.id.clone()));
        }
    }
    Ok(())
}
