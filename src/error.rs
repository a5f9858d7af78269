//! Structured error types for editgrid.
//!
//! Only construction and host input can fail. Editing itself never errors:
//! validation failures are UI state and rejected commits are outcomes.

/// All errors that can occur while building or driving a table.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// JSON (de)serialization error from serde_json.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two column definitions share a field name.
    #[error("Duplicate column field: {0}")]
    DuplicateField(String),

    /// Host asked for an action name that does not exist.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// I/O error (replay scripts).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
