//! editgrid - editable data grid core for the web
//!
//! Drives inline editing of a tabular UI compiled to WebAssembly:
//! - Numeric cell editor with digits-only keyboard policy
//! - Live `high > low` threshold validation on every keystroke
//! - Row store with derived-row insertion and cancel-to-original
//! - Deferred edit-start on the new row once the grid has rendered
//!
//! Rendering stays with the host grid; the core talks to it through
//! [`surface::GridSurface`].
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { EditableTable } from 'editgrid';
//! await init();
//! const table = new EditableTable(rows, columns, gridApi);
//! table.attachInput(inputElement);
//! grid.setColumnDefs(table.columnDefs());
//! ```

pub mod controller;
pub mod editor;
pub mod error;
pub mod replay;
pub mod store;
pub mod surface;
pub mod types;
pub mod validation;

#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use controller::{Action, TableController};
pub use types::*;
#[cfg(target_arch = "wasm32")]
pub use web::EditableTable;

/// Play a JSON replay script and return the report as JSON.
///
/// # Errors
/// Returns an error if the script is malformed or its columns repeat a field.
#[wasm_bindgen]
pub fn replay_script(script: &str) -> Result<String, JsValue> {
    replay::run_json(script).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Derive grid column definitions from caller column definitions.
///
/// # Errors
/// Returns an error if `columns` is not an array of column definitions.
#[wasm_bindgen(js_name = "buildColumnDefinitions")]
pub fn build_column_definitions_js(columns: &str) -> Result<String, JsValue> {
    let columns: Vec<ColumnDef> =
        serde_json::from_str(columns).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&controller::build_column_definitions(&columns))
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
