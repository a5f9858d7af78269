//! Column definitions as seen by the grid surface.

use std::collections::HashSet;

use crate::error::{GridError, Result};
use crate::types::{ColumnDef, ColumnType, EditorKind, GridColumnDef};

/// Editor to host for a column of the given abstract type.
#[must_use]
pub fn editor_for(column_type: Option<ColumnType>) -> Option<EditorKind> {
    match column_type {
        Some(ColumnType::Number) => Some(EditorKind::Numeric),
        Some(ColumnType::Text) | None => None,
    }
}

/// Derive surface column definitions: numeric columns get the numeric editor
/// and the abstract `type` marker is dropped. The input is left untouched.
#[must_use]
pub fn build_column_definitions(columns: &[ColumnDef]) -> Vec<GridColumnDef> {
    columns
        .iter()
        .map(|col| GridColumnDef {
            field: col.field.clone(),
            header_name: col.header_name.clone(),
            editable: col.editable,
            width: col.width.clone(),
            cell_editor: editor_for(col.column_type),
        })
        .collect()
}

/// Reject column sets where two columns share a field.
pub fn check_unique_fields(columns: &[ColumnDef]) -> Result<()> {
    let mut seen = HashSet::new();
    for col in columns {
        if !seen.insert(col.field.as_str()) {
            return Err(GridError::DuplicateField(col.field.clone()));
        }
    }
    Ok(())
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
    fn test_numeric_columns_get_editor() {
        let columns = vec![
            ColumnDef::new("amount", "Amount").numeric(),
            ColumnDef::new("low", "Low"),
        ];
        let defs = build_column_definitions(&columns);
        assert_eq!(defs[0].cell_editor, Some(EditorKind::Numeric));
        assert!(defs[0].editable);
        assert_eq!(defs[1].cell_editor, None);
        assert!(!defs[1].editable);
        // input keeps its type marker
        assert_eq!(columns[0].column_type, Some(ColumnType::Number));
    }

    #[test]
    fn test_type_marker_not_serialized() {
        let defs = build_column_definitions(&[ColumnDef::new("high", "High").numeric()]);
        let json = serde_json::to_value(&defs).unwrap();
        assert!(json[0].get("type").is_none());
        assert_eq!(json[0]["cellEditor"], "numeric");
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let columns = vec![ColumnDef::new("low", "A"), ColumnDef::new("low", "B")];
        assert!(matches!(
            check_unique_fields(&columns),
            Err(GridError::DuplicateField(f)) if f == "low"
        ));
    }
}
