//! Cell values, row records and row identity for PagedTable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Content that can be displayed in a table cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellContent {
    /// Plain text
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean flag
    Flag(bool),
    /// No value; renders as an empty cell
    #[default]
    Empty,
}

impl CellContent {
    /// Create a text cell.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create a number cell.
    pub fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// Check if the cell has no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Use this value as a row identity.
    pub fn as_row_id(&self) -> Option<RowId> {
        match self {
            Self::Empty => None,
            other => Some(RowId(other.to_string())),
        }
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{:.2}", n)
                }
            }
            Self::Flag(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
            Self::Empty => Ok(()),
        }
    }
}

impl From<String> for CellContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for CellContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for CellContent {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellContent {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i64> for CellContent {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for CellContent {
    fn from(n: u32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for CellContent {
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for CellContent {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl<T: Into<CellContent>> From<Option<T>> for CellContent {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Identity of a row, taken from its id field.
///
/// Numbers and strings are both accepted as ids; they compare by their
/// display form, so the number `1` and the text `"1"` are the same row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Create a row id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl From<i32> for RowId {
    fn from(n: i32) -> Self {
        Self(n.to_string())
    }
}

impl From<u32> for RowId {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

impl From<usize> for RowId {
    fn from(n: usize) -> Self {
        Self(n.to_string())
    }
}

/// A record keyed by column id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, CellContent>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellContent>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellContent>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a field.
    pub fn get(&self, key: &str) -> Option<&CellContent> {
        self.fields.get(key)
    }

    /// Display text for a field; missing fields are empty.
    pub fn display(&self, key: &str) -> String {
        self.get(key).map(ToString::to_string).unwrap_or_default()
    }

    /// Identity of this row under `id_field`.
    pub fn id(&self, id_field: &str) -> Option<RowId> {
        self.get(id_field).and_then(CellContent::as_row_id)
    }

    /// Iterate over fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &CellContent)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<CellContent>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.set(k, v);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(CellContent::text("hello").to_string(), "hello");
        assert_eq!(CellContent::number(42.0).to_string(), "42");
        assert_eq!(CellContent::number(3.14159).to_string(), "3.14");
        assert_eq!(CellContent::from(true).to_string(), "yes");
        assert_eq!(CellContent::Empty.to_string(), "");
    }

    #[test]
    fn test_row_id_from_number_and_text() {
        let by_number = Row::new().with("id", 1);
        let by_text = Row::new().with("id", "1");
        assert_eq!(by_number.id("id"), Some(RowId::from(1)));
        assert_eq!(by_number.id("id"), by_text.id("id"));
        assert_eq!(Row::new().with("id", CellContent::Empty).id("id"), None);
        assert_eq!(by_number.id("mrn"), None);
    }

    #[test]
    fn test_missing_field_displays_empty() {
        let row = Row::new().with("lastname", "Doe");
        assert_eq!(row.display("lastname"), "Doe");
        assert_eq!(row.display("email"), "");
    }

    #[test]
    fn test_row_from_json() {
        let row: Row = serde_json::from_str(
            r#"{"id": 7, "lastname": "Doe", "active": true, "organization": null}"#,
        )
        .unwrap();

        assert_eq!(row.id("id"), Some(RowId::from(7)));
        assert_eq!(row.get("lastname"), Some(&CellContent::text("Doe")));
        assert_eq!(row.get("active"), Some(&CellContent::Flag(true)));
        assert!(row.get("organization").unwrap().is_empty());
    }

    #[test]
    fn test_row_from_iter() {
        let row: Row = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(row.fields().count(), 2);
        assert_eq!(row.display("b"), "2");
    }
}
