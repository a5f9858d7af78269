use serde::{Deserialize, Serialize};

/// Message shown under a numeric cell whose draft breaks the threshold rule.
pub const DEFAULT_INVALID_MESSAGE: &str = "Please enter proper data";
/// Message shown under a text cell whose draft fails its predicate.
pub const DEFAULT_TEXT_ERROR_MESSAGE: &str = "Please enter proper value";

/// Column properties shared by every column, passed through to the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultColDef {
    pub sortable: bool,
    pub flex: u32,
    pub min_width: u32,
    pub resizable: bool,
}

impl Default for DefaultColDef {
    fn default() -> Self {
        DefaultColDef {
            sortable: true,
            flex: 1,
            min_width: 100,
            resizable: true,
        }
    }
}

/// Table configuration. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_height: Option<f32>,
    pub default_col_def: DefaultColDef,
    pub invalid_message: String,
    pub text_error_message: String,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            row_height: None,
            default_col_def: DefaultColDef::default(),
            invalid_message: DEFAULT_INVALID_MESSAGE.to_string(),
            text_error_message: DEFAULT_TEXT_ERROR_MESSAGE.to_string(),
        }
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
    fn test_empty_object_uses_defaults() {
        let options: GridOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, GridOptions::default());
        assert_eq!(options.default_col_def.min_width, 100);
    }

    #[test]
    fn test_partial_override() {
        let options: GridOptions =
            serde_json::from_str(r#"{"rowHeight": 32, "defaultColDef": {"flex": 2}}"#).unwrap();
        assert_eq!(options.row_height, Some(32.0));
        assert_eq!(options.default_col_def.flex, 2);
        assert!(options.default_col_def.sortable);
        assert_eq!(options.invalid_message, DEFAULT_INVALID_MESSAGE);
    }
}
