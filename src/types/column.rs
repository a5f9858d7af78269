use serde::{Deserialize, Serialize};

/// Abstract column type supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
}

/// Caller-supplied column definition. Never mutated once passed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Unique key into a row record.
    pub field: String,
    #[serde(default)]
    pub header_name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    #[serde(default)]
    pub editable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl ColumnDef {
    #[must_use]
    pub fn new(field: &str, header_name: &str) -> Self {
        ColumnDef {
            field: field.to_string(),
            header_name: header_name.to_string(),
            column_type: None,
            editable: false,
            width: None,
        }
    }

    /// Mark the column as a numeric, editable column.
    #[must_use]
    pub fn numeric(mut self) -> Self {
        self.column_type = Some(ColumnType::Number);
        self.editable = true;
        self
    }

    #[must_use]
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    #[must_use]
    pub fn width(mut self, width: &str) -> Self {
        self.width = Some(width.to_string());
        self
    }
}

/// Custom editor attached to a derived column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorKind {
    Numeric,
}

/// Column definition as handed to the grid surface.
///
/// The abstract `type` marker is gone; in its place sits the editor to host
/// for the column, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridColumnDef {
    pub field: String,
    pub header_name: String,
    pub editable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_editor: Option<EditorKind>,
}
