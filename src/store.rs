//! Row store: the ordered rows behind the grid.
//!
//! Order is display order and decides which row is "last" when deriving a new
//! one. The store keeps the construction rows so that cancel can restore them.

use tracing::debug;

use crate::types::{fields, CellValue, RowRecord};

/// Offset added to the previous row's `high` to form the next row's `low`.
pub const LOW_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowStore {
    original: Vec<RowRecord>,
    rows: Vec<RowRecord>,
}

impl RowStore {
    #[must_use]
    pub fn new(rows: Vec<RowRecord>) -> Self {
        RowStore {
            original: rows.clone(),
            rows,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    /// Mutable access for host hooks. Rows can be edited in place but not
    /// added or removed; use [`replace`](Self::replace) for that.
    pub fn rows_mut(&mut self) -> &mut [RowRecord] {
        &mut self.rows
    }

    /// The rows the store was constructed with.
    #[must_use]
    pub fn original(&self) -> &[RowRecord] {
        &self.original
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, row_index: usize) -> Option<&RowRecord> {
        self.rows.get(row_index)
    }

    pub fn get_mut(&mut self, row_index: usize) -> Option<&mut RowRecord> {
        self.rows.get_mut(row_index)
    }

    /// Write one field. Returns `false` when the row does not exist.
    ///
    /// No validation happens here; the threshold rule is enforced by the
    /// editor that produced the value.
    pub fn set_field(&mut self, row_index: usize, field: &str, value: impl Into<CellValue>) -> bool {
        match self.rows.get_mut(row_index) {
            Some(row) => {
                row.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Replace every row with a fresh copy of the construction rows.
    pub fn reset(&mut self) {
        debug!(rows = self.original.len(), "row store reset");
        self.rows = self.original.clone();
    }

    /// Replace every row wholesale. The construction rows are kept.
    pub fn replace(&mut self, rows: Vec<RowRecord>) {
        self.rows = rows;
    }

    /// Append a row derived from the last one and return its index.
    /// `None` when the store is empty.
    pub fn append_derived(&mut self) -> Option<usize> {
        let next = derive_row(self.rows.last()?);
        self.rows.push(next);
        let index = self.rows.len() - 1;
        debug!(index, "derived row appended");
        Some(index)
    }

    #[must_use]
    pub fn can_add_row(&self) -> bool {
        can_add_row(&self.rows)
    }
}

/// A row is complete when `low`, `high` and `amount` are all non-empty.
#[must_use]
pub fn is_complete(row: &RowRecord) -> bool {
    [fields::LOW, fields::HIGH, fields::AMOUNT]
        .iter()
        .all(|field| !row.get(field).is_empty())
}

/// New rows may be added only while every existing row is complete.
#[must_use]
pub fn can_add_row(rows: &[RowRecord]) -> bool {
    rows.iter().all(is_complete)
}

/// Shallow copy of `last` with `low = last.high + 0.1` and `high` cleared.
///
/// When `last.high` is not numeric the new `low` is left empty.
#[must_use]
pub fn derive_row(last: &RowRecord) -> RowRecord {
    let mut next = last.clone();
    let low = last
        .get(fields::HIGH)
        .as_number()
        .map_or(CellValue::Empty, |high| CellValue::Number(high + LOW_STEP));
    next.set(fields::LOW, low);
    next.set(fields::HIGH, "");
    next
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn seed() -> Vec<RowRecord> {
        vec![RowRecord::new()
            .with("amount", 90899.0)
            .with("low", 0.0)
            .with("high", 1000.0)]
    }

    #[test]
    fn test_zero_counts_as_present() {
        assert!(can_add_row(&seed()));
    }

    #[test]
    fn test_incomplete_row_blocks_add() {
        let mut rows = seed();
        rows[0].set("high", "");
        assert!(!can_add_row(&rows));
        rows[0].set("high", 5.0);
        rows[0].set("amount", CellValue::Empty);
        assert!(!can_add_row(&rows));
    }

    #[test]
    fn test_empty_store_can_add_but_derives_nothing() {
        let mut store = RowStore::new(Vec::new());
        assert!(store.can_add_row());
        assert_eq!(store.append_derived(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_derive_from_text_high() {
        let last = RowRecord::new().with("low", "0").with("high", "1000");
        let next = derive_row(&last);
        let low = next.get("low").as_number().unwrap();
        assert!((low - 1000.1).abs() < 1e-9);
        assert_eq!(next.get("high"), &CellValue::from(""));
    }

    #[test]
    fn test_derive_from_non_numeric_high() {
        let last = RowRecord::new().with("low", "0").with("high", "n/a");
        assert_eq!(derive_row(&last).get("low"), &CellValue::Empty);
    }

    #[test]
    fn test_set_field_out_of_range() {
        let mut store = RowStore::new(seed());
        assert!(!store.set_field(3, "high", 5.0));
        assert!(store.set_field(0, "high", 5.0));
        assert_eq!(store.rows()[0].get("high"), &CellValue::Number(5.0));
        store.reset();
        assert_eq!(store.rows(), store.original());
    }
}
