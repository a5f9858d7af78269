//! Grid surface backed by a JavaScript grid api object.
//!
//! The host passes an object exposing any of:
//!
//! ```text
//! setColumnDefs(defs)           setRowData(rows)
//! getEditingCells() -> [{rowIndex, colId}]
//! setFocusedCell(rowIndex, colId)
//! startEditingCell({rowIndex, colKey, key}) -> bool
//! stopEditing()                 editingStopped({rowIndex, colId})
//! ```
//!
//! Missing methods are skipped. `startEditingCell` returning `true` asks the
//! core to open the editor inline; otherwise the host's editor component calls
//! `beginEdit` itself once the grid has created it.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use super::to_js;
use crate::surface::{GridSurface, StartEditRequest};
use crate::types::{CellPosition, GridColumnDef, RowRecord};

pub(crate) struct JsGridSurface {
    api: JsValue,
}

impl JsGridSurface {
    pub(crate) fn new(api: JsValue) -> Self {
        JsGridSurface { api }
    }

    fn call(&self, method: &str, args: &[JsValue]) -> Option<JsValue> {
        let func = Reflect::get(&self.api, &JsValue::from_str(method))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        let array = Array::new();
        for arg in args {
            array.push(arg);
        }
        match func.apply(&self.api, &array) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(method, ?err, "grid api call failed");
                None
            }
        }
    }
}

impl GridSurface for JsGridSurface {
    fn set_column_defs(&mut self, defs: &[GridColumnDef]) {
        if let Ok(defs) = to_js(&defs) {
            self.call("setColumnDefs", &[defs]);
        }
    }

    fn set_row_data(&mut self, rows: &[RowRecord]) {
        if let Ok(rows) = to_js(&rows) {
            self.call("setRowData", &[rows]);
        }
    }

    fn editing_cells(&self) -> Vec<CellPosition> {
        self.call("getEditingCells", &[])
            .and_then(|cells| serde_wasm_bindgen::from_value(cells).ok())
            .unwrap_or_default()
    }

    fn set_focused_cell(&mut self, row_index: usize, col_id: &str) {
        self.call(
            "setFocusedCell",
            &[JsValue::from(row_index), JsValue::from_str(col_id)],
        );
    }

    fn start_editing_cell(&mut self, request: &StartEditRequest) -> bool {
        let Ok(request) = to_js(request) else {
            return false;
        };
        self.call("startEditingCell", &[request])
            .and_then(|accepted| accepted.as_bool())
            .unwrap_or(false)
    }

    fn stop_editing(&mut self) {
        self.call("stopEditing", &[]);
    }

    fn editing_stopped(&mut self, cell: &CellPosition) {
        if let Ok(cell) = to_js(cell) {
            self.call("editingStopped", &[cell]);
        }
    }
}
