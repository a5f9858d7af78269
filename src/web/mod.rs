//! WASM-exported `EditableTable`: the JavaScript face of the table controller.
//!
//! The controller lives in shared state so that DOM event closures (held
//! weakly) and the exported methods see the same table. Re-entrant calls from
//! grid callbacks while a method is running are ignored instead of panicking
//! on the `RefCell`.

mod actions;
mod logging;
mod surface;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlInputElement, KeyboardEvent};

use crate::controller::{Action, TableController};
use crate::editor::input::{self, EditorInput};
use crate::editor::{FocusAction, KeyDisposition};
use crate::types::{ColumnDef, GridOptions, RowRecord};
use actions::{Handlers, JsActions};
use surface::JsGridSurface;

type SharedTable = Rc<RefCell<TableController<JsGridSurface>>>;

/// Serialize into plain JS objects (not `Map`s).
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn parse_action(action: &str) -> Result<Action, JsValue> {
    action.parse::<Action>().map_err(JsValue::from)
}

/// Editable grid table exported to JavaScript.
#[wasm_bindgen]
pub struct EditableTable {
    table: SharedTable,
    handlers: Handlers,
    input: Option<EditorInput>,
}

impl EditableTable {
    /// Run `f` on the table unless it is already borrowed further up the stack.
    fn with_table<R>(
        table: &SharedTable,
        f: impl FnOnce(&mut TableController<JsGridSurface>) -> R,
    ) -> Option<R> {
        match table.try_borrow_mut() {
            Ok(mut table) => Some(f(&mut table)),
            Err(_) => {
                tracing::debug!("re-entrant table call ignored");
                None
            }
        }
    }

    /// Mirror a freshly opened session on the attached input, if any.
    fn show_input(&self, focus: Option<FocusAction>) {
        let (Some(focus), Some(editor_input)) = (focus, self.input.as_ref()) else {
            return;
        };
        let draft = self
            .table
            .try_borrow()
            .ok()
            .and_then(|t| t.active_editor().and_then(|e| e.draft()).map(str::to_string));
        input::show(editor_input.element(), draft.as_deref(), focus);
    }

    fn hide_input(&self) {
        if let Some(editor_input) = self.input.as_ref() {
            input::hide(editor_input.element());
        }
    }

    fn handle_key(table: &SharedTable, element: &HtmlInputElement, event: &KeyboardEvent) {
        let state = Self::with_table(table, |t| {
            let disposition = t.key_down(&event.key());
            (disposition, Self::session_state(t))
        });
        let Some((disposition, session)) = state else {
            return;
        };
        if disposition.prevents_default() {
            event.prevent_default();
        }
        if disposition.stops_propagation() {
            event.stop_propagation();
        }
        if disposition == KeyDisposition::StopEditing {
            match session {
                Some((invalid, message)) => {
                    input::set_invalid(element, invalid, message.as_deref());
                }
                None => input::hide(element),
            }
        }
    }

    /// Invalid flag and message of the open session, if one survived.
    fn session_state(table: &TableController<JsGridSurface>) -> Option<(bool, Option<String>)> {
        table
            .active_editor()
            .map(|_| (table.is_invalid(), table.error_message().map(str::to_string)))
    }

    /// Hide the input once the session is gone; otherwise show why it stayed.
    fn sync_input(&self) {
        let Some(editor_input) = self.input.as_ref() else {
            return;
        };
        let session = self.table.try_borrow().ok().and_then(|t| Self::session_state(&t));
        match session {
            Some((invalid, message)) => {
                input::set_invalid(editor_input.element(), invalid, message.as_deref());
            }
            None => input::hide(editor_input.element()),
        }
    }

    fn handle_input(table: &SharedTable, element: &HtmlInputElement) {
        let value = element.value();
        let state = Self::with_table(table, |t| {
            let invalid = t.input(&value);
            (invalid, t.error_message().map(str::to_string))
        });
        if let Some((invalid, message)) = state {
            input::set_invalid(element, invalid, message.as_deref());
        }
    }
}

#[wasm_bindgen]
impl EditableTable {
    /// Create a table from row objects, column definitions and a grid api
    /// object (see the surface module for the methods it may expose).
    #[wasm_bindgen(constructor)]
    pub fn new(
        rows: JsValue,
        columns: JsValue,
        api: JsValue,
        options: JsValue,
    ) -> Result<EditableTable, JsValue> {
        console_error_panic_hook::set_once();
        logging::init();
        let rows: Vec<RowRecord> = serde_wasm_bindgen::from_value(rows)?;
        let columns: Vec<ColumnDef> = serde_wasm_bindgen::from_value(columns)?;
        let options: GridOptions = if options.is_undefined() || options.is_null() {
            GridOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        let mut table = TableController::new(rows, columns, options, JsGridSurface::new(api))?;
        let handlers: Handlers = Rc::new(RefCell::new(HashMap::new()));
        table.set_actions(Box::new(JsActions::new(Rc::clone(&handlers))));
        Ok(EditableTable {
            table: Rc::new(RefCell::new(table)),
            handlers,
            input: None,
        })
    }

    /// Column definitions for the grid, with editors attached.
    #[wasm_bindgen(js_name = "columnDefs")]
    pub fn column_defs(&self) -> Result<JsValue, JsValue> {
        to_js(self.table.borrow().column_definitions())
    }

    /// Current rows.
    #[wasm_bindgen(js_name = "rowData")]
    pub fn row_data(&self) -> Result<JsValue, JsValue> {
        to_js(self.table.borrow().rows())
    }

    #[wasm_bindgen(js_name = "gridOptions")]
    pub fn grid_options(&self) -> Result<JsValue, JsValue> {
        to_js(self.table.borrow().options())
    }

    #[wasm_bindgen(js_name = "canAddRow")]
    pub fn can_add_row(&self) -> bool {
        self.table.borrow().can_add_row()
    }

    /// Append a derived row. The edit on its `high` cell fires on the next
    /// `renderComplete()`.
    #[wasm_bindgen(js_name = "addRow")]
    pub fn add_row(&self) -> bool {
        Self::with_table(&self.table, |t| t.add_row().is_some()).unwrap_or(false)
    }

    pub fn cancel(&self) {
        Self::with_table(&self.table, TableController::cancel);
        self.hide_input();
    }

    /// The grid has rendered; fire any pending edit-start.
    #[wasm_bindgen(js_name = "renderComplete")]
    pub fn render_complete(&self) {
        let focus = Self::with_table(&self.table, TableController::render_complete).flatten();
        self.show_input(focus);
    }

    #[wasm_bindgen(js_name = "startEditing")]
    pub fn start_editing(&self, row_index: usize, col_id: &str, key: Option<String>) {
        let focus = Self::with_table(&self.table, |t| {
            t.start_editing(row_index, col_id, key.as_deref())
        })
        .flatten();
        self.show_input(focus);
    }

    /// Open an editor on a cell. Returns `false` for read-only or unknown
    /// cells.
    #[wasm_bindgen(js_name = "beginEdit")]
    pub fn begin_edit(&self, row_index: usize, col_id: &str, key: Option<String>) -> bool {
        let focus = Self::with_table(&self.table, |t| {
            t.begin_edit(row_index, col_id, key.as_deref())
        })
        .flatten();
        self.show_input(focus);
        focus.is_some()
    }

    /// Key policy for the active editor: `"native"`, `"stopEditing"`,
    /// `"suppress"` or `"passThrough"`.
    #[wasm_bindgen(js_name = "keyDown")]
    pub fn key_down(&self, key: &str) -> String {
        let disposition = Self::with_table(&self.table, |t| t.key_down(key))
            .unwrap_or(KeyDisposition::PassThrough);
        if disposition == KeyDisposition::StopEditing {
            self.sync_input();
        }
        disposition.as_str().to_string()
    }

    /// New text for the active editor. Returns the invalid flag.
    pub fn input(&self, value: &str) -> bool {
        Self::with_table(&self.table, |t| t.input(value)).unwrap_or(false)
    }

    /// Run the commit protocol: `"committed"`, `"rejected"` or `"ignored"`.
    /// A rejected text cell stays in edit mode.
    #[wasm_bindgen(js_name = "stopEditing")]
    pub fn stop_editing(&self, cancel: bool) -> String {
        let outcome = Self::with_table(&self.table, |t| t.stop_editing(cancel));
        self.sync_input();
        outcome.map_or("ignored", |o| o.as_str()).to_string()
    }

    #[wasm_bindgen(js_name = "isInvalid")]
    pub fn is_invalid(&self) -> bool {
        self.table.borrow().is_invalid()
    }

    #[wasm_bindgen(js_name = "errorMessage")]
    pub fn error_message(&self) -> Option<String> {
        self.table.borrow().error_message().map(str::to_string)
    }

    /// Draft text of the active editor.
    pub fn draft(&self) -> Option<String> {
        let table = self.table.borrow();
        table.active_editor()?.draft().map(str::to_string)
    }

    #[wasm_bindgen(js_name = "isEnabled")]
    pub fn is_enabled(&self, action: &str) -> Result<bool, JsValue> {
        let action = parse_action(action)?;
        Ok(self.table.borrow().is_enabled(action))
    }

    /// Run an action button. Returns `false` when the action is disabled.
    pub fn perform(&self, action: &str) -> Result<bool, JsValue> {
        let action = parse_action(action)?;
        let performed = Self::with_table(&self.table, |t| t.perform(action)).unwrap_or(false);
        if performed {
            self.sync_input();
        }
        Ok(performed)
    }

    /// Register (or clear, with `undefined`) the callback for `clearRates`,
    /// `clearThreshold`, `clearAll` or `save`. Clear handlers receive the rows
    /// and may return replacement rows.
    #[wasm_bindgen(js_name = "setActionHandler")]
    pub fn set_action_handler(&self, action: &str, handler: Option<Function>) -> Result<(), JsValue> {
        let action = parse_action(action)?;
        let mut handlers = self.handlers.borrow_mut();
        match handler {
            Some(handler) => {
                handlers.insert(action, handler);
            }
            None => {
                handlers.remove(&action);
            }
        }
        Ok(())
    }

    /// Bind the `<input>` element rendered inside the editing cell. Keystrokes
    /// and input events are routed to the active editor from then on.
    #[wasm_bindgen(js_name = "attachInput")]
    pub fn attach_input(&mut self, element: HtmlInputElement) {
        let mut editor_input = EditorInput::new(element.clone());

        let on_key = {
            let table = Rc::downgrade(&self.table);
            let element = element.clone();
            Box::new(move |event: KeyboardEvent| {
                if let Some(table) = table.upgrade() {
                    Self::handle_key(&table, &element, &event);
                }
            }) as Box<dyn FnMut(KeyboardEvent)>
        };
        let on_input = {
            let table = Rc::downgrade(&self.table);
            Box::new(move |_event: Event| {
                if let Some(table) = table.upgrade() {
                    Self::handle_input(&table, &element);
                }
            }) as Box<dyn FnMut(Event)>
        };
        editor_input.listen(on_key, on_input);
        input::hide(editor_input.element());
        self.input = Some(editor_input);
    }
}
