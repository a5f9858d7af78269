use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::cell::EMPTY;
use super::CellValue;

/// Field names that take part in the threshold rules.
pub mod fields {
    pub const LOW: &str = "low";
    pub const HIGH: &str = "high";
    pub const AMOUNT: &str = "amount";
}

/// Address of a single cell: row index in display order plus column id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPosition {
    pub row_index: usize,
    pub col_id: String,
}

impl CellPosition {
    #[must_use]
    pub fn new(row_index: usize, col_id: &str) -> Self {
        CellPosition {
            row_index,
            col_id: col_id.to_string(),
        }
    }
}

/// One editable data row: an ordered, open mapping from field name to value.
///
/// Field order is insertion order and survives a serde round trip, so rows
/// coming from JavaScript objects keep their key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowRecord {
    fields: Vec<(String, CellValue)>,
}

impl RowRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `field`, or [`CellValue::Empty`] when the row lacks it.
    #[must_use]
    pub fn get(&self, field: &str) -> &CellValue {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map_or(&EMPTY, |(_, value)| value)
    }

    /// `true` if the row carries `field` at all, empty or not.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == field)
    }

    /// Set `field`, keeping its position when it already exists.
    pub fn set(&mut self, field: &str, value: impl Into<CellValue>) {
        let value = value.into();
        if let Some((_, slot)) = self.fields.iter_mut().find(|(name, _)| name == field) {
            *slot = value;
        } else {
            self.fields.push((field.to_string(), value));
        }
    }

    /// Builder form of [`RowRecord::set`].
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<CellValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RowRecord::new();
        for (field, value) in iter {
            let field: String = field.into();
            row.set(&field, value);
        }
        row
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = RowRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field names to cell values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RowRecord, A::Error> {
        let mut row = RowRecord {
            fields: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((name, value)) = access.next_entry::<String, CellValue>()? {
            row.set(&name, value);
        }
        Ok(row)
    }
}

impl<'de> Deserialize<'de> for RowRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
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

    #[test]
    fn test_missing_field_reads_empty() {
        let row = RowRecord::new().with("amount", 5.0);
        assert_eq!(row.get("low"), &CellValue::Empty);
        assert!(!row.contains("low"));
    }

    #[test]
    fn test_set_keeps_position() {
        let mut row = RowRecord::new()
            .with("amount", "90899")
            .with("low", "0")
            .with("high", "1000");
        row.set("low", 12.0);
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["amount", "low", "high"]);
        assert_eq!(row.get("low"), &CellValue::Number(12.0));
    }

    #[test]
    fn test_deserialize_preserves_key_order() {
        let row: RowRecord =
            serde_json::from_str(r#"{"high": "1000", "amount": 90899, "low": null}"#).unwrap();
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["high", "amount", "low"]);
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"high":"1000","amount":90899,"low":null}"#
        );
    }
}
