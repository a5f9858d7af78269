//! Host action hooks implemented by JavaScript callbacks.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::JsValue;

use super::to_js;
use crate::controller::{Action, TableActions};
use crate::store::RowStore;
use crate::types::RowRecord;

/// Callbacks keyed by action, shared with the exported table so handlers can
/// be (re)registered after construction.
pub(crate) type Handlers = Rc<RefCell<HashMap<Action, Function>>>;

pub(crate) struct JsActions {
    handlers: Handlers,
}

impl JsActions {
    pub(crate) fn new(handlers: Handlers) -> Self {
        JsActions { handlers }
    }

    fn invoke(&self, action: Action, rows: &[RowRecord]) -> Option<JsValue> {
        let handler = self.handlers.borrow().get(&action).cloned()?;
        let rows = to_js(&rows).ok()?;
        match handler.call1(&JsValue::NULL, &rows) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(%action, ?err, "action handler threw");
                None
            }
        }
    }

    /// Run a clearing hook. A handler returning an array of rows replaces the
    /// store contents; any other return value leaves them alone.
    fn clear(&self, action: Action, store: &mut RowStore) {
        let Some(result) = self.invoke(action, store.rows()) else {
            return;
        };
        if !js_sys::Array::is_array(&result) {
            return;
        }
        match serde_wasm_bindgen::from_value::<Vec<RowRecord>>(result) {
            Ok(rows) => store.replace(rows),
            Err(err) => tracing::warn!(%action, %err, "action handler returned bad rows"),
        }
    }
}

impl TableActions for JsActions {
    fn clear_rates(&mut self, store: &mut RowStore) {
        self.clear(Action::ClearRates, store);
    }

    fn clear_threshold(&mut self, store: &mut RowStore) {
        self.clear(Action::ClearThreshold, store);
    }

    fn clear_all(&mut self, store: &mut RowStore) {
        self.clear(Action::ClearAll, store);
    }

    fn save(&mut self, rows: &[RowRecord]) {
        self.invoke(Action::Save, rows);
    }
}
