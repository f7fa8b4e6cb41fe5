use crate::error::{GeopointError, Result};
use std::collections::HashMap;

/// One data row of a tabular source, keyed by header name.
///
/// Cell values are trimmed. [`RowRecord::get`] treats an empty cell the same as a
/// missing one; [`RowRecord::cell`] keeps the distinction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    row_number: usize,
    fields: HashMap<String, String>,
}

impl RowRecord {
    /// Create a record from `(column, value)` pairs.
    ///
    /// `row_number` is the 1-based position among data rows (the header is not counted).
    pub fn from_pairs<I, K, V>(row_number: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.as_ref().trim().to_string()))
            .collect();
        Self { row_number, fields }
    }

    pub fn row_number(&self) -> usize {
        self.row_number
    }

    /// Non-empty value of `field`, if present
    pub fn get(&self, field: &str) -> Option<&str> {
        self.cell(field).filter(|v| !v.is_empty())
    }

    /// Value of `field` as read, empty string included; `None` only when the
    /// row has no such cell
    pub fn cell(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value of a mandatory column
    pub fn require(&self, field: &str) -> Result<&str> {
        self.get(field).ok_or_else(|| GeopointError::MissingField { field: field.to_string() })
    }

    /// Owned value of an optional column
    pub fn optional(&self, field: &str) -> Option<String> {
        self.get(field).map(str::to_string)
    }

    /// The `id` cell, used to identify the row in diagnostics
    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell_is_missing() {
        let row = RowRecord::from_pairs(3, [("id", "A"), ("tag", "   ")]);
        assert_eq!(row.get("tag"), None);
        assert_eq!(row.optional("tag"), None);
        assert!(matches!(row.require("lat"), Err(GeopointError::MissingField { .. })));
        assert_eq!(row.id(), Some("A"));
        assert_eq!(row.row_number(), 3);
    }

    #[test]
    fn test_cell_keeps_empty_values() {
        let row = RowRecord::from_pairs(1, [("id", ""), ("lon", "1")]);
        assert_eq!(row.cell("id"), Some(""));
        assert_eq!(row.get("id"), None);
        assert_eq!(row.cell("lat"), None);
    }
}
