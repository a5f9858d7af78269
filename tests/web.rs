#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]

use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

use editgrid::{EditableTable, RowRecord};

fn js(value: &serde_json::Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap()
}

fn table() -> EditableTable {
    table_with_api(js_sys::Object::new().into())
}

fn table_with_api(api: JsValue) -> EditableTable {
    let rows = json!([{ "amount": "90899", "low": "0", "high": "1000" }]);
    let columns = json!([
        { "field": "amount", "headerName": "Amount", "type": "number", "editable": true },
        { "field": "low", "headerName": "Low" },
        { "field": "high", "headerName": "High", "type": "number", "editable": true }
    ]);
    EditableTable::new(
        js(&rows),
        js(&columns),
        api,
        JsValue::UNDEFINED,
    )
    .unwrap()
}

#[wasm_bindgen_test]
fn add_row_and_commit_through_bindings() {
    let table = table();
    assert!(table.can_add_row());
    assert!(table.add_row());
    assert!(!table.can_add_row());

    // the bare api object has no startEditingCell, so open the editor directly
    table.render_complete();
    assert!(table.begin_edit(1, "high", None));
    assert_eq!(table.key_down("x"), "suppress");
    assert!(table.input("999"));
    assert_eq!(table.error_message().as_deref(), Some("Please enter proper data"));
    assert_eq!(table.stop_editing(false), "rejected");

    assert!(table.begin_edit(1, "high", None));
    assert!(!table.input("2000"));
    assert_eq!(table.key_down("Enter"), "stopEditing");

    let rows: Vec<RowRecord> = serde_wasm_bindgen::from_value(table.row_data().unwrap()).unwrap();
    assert_eq!(rows[1].get("high").as_number(), Some(2000.0));
    assert!(table.can_add_row());
}

#[wasm_bindgen_test]
fn unknown_action_is_an_error() {
    let table = table();
    assert!(table.perform("explode").is_err());
    assert!(table.is_enabled("addRow").unwrap());
    assert!(table.perform("cancel").unwrap());
}

#[wasm_bindgen_test]
fn failing_grid_api_is_logged_not_fatal() {
    let api = js_sys::Object::new();
    let throws = js_sys::Function::new_no_args("throw new Error('grid not ready')");
    js_sys::Reflect::set(&api, &JsValue::from_str("startEditingCell"), &throws).unwrap();

    // a second table reuses the already installed console subscriber
    let _first = table();
    let table = table_with_api(api.into());
    table.start_editing(0, "high", None);
    assert_eq!(table.draft(), None);
    assert!(table.begin_edit(0, "high", None));
    assert_eq!(table.draft().as_deref(), Some("1000"));
}
