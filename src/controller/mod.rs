//! Table controller: orchestrates the row store, the grid surface and the
//! single active edit session.
//!
//! The controller owns every mutation of the rows. Surfaces report editing
//! events through [`TableController::begin_edit`], [`TableController::key_down`],
//! [`TableController::input`] and [`TableController::stop_editing`]; the host
//! page drives the action buttons through [`TableController::perform`].

mod actions;
mod columns;

pub use actions::{Action, NoActions, TableActions};
pub use columns::{build_column_definitions, check_unique_fields, editor_for};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::editor::{
    ActiveEditor, CommitOutcome, FocusAction, KeyDisposition, NumericCellEditor, TextCellEditor,
};
use crate::error::Result;
use crate::store::RowStore;
use crate::surface::{GridSurface, StartEditRequest};
use crate::types::{
    fields, CellPosition, ColumnDef, ColumnType, GridColumnDef, GridOptions, RowRecord,
};
use crate::validation::{accept_all, RowPredicate};

/// Edit-start waiting for the surface to finish rendering a new row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEdit {
    pub row_index: usize,
    pub col_id: String,
}

pub struct TableController<S: GridSurface> {
    store: RowStore,
    columns: Vec<ColumnDef>,
    column_defs: Vec<GridColumnDef>,
    options: GridOptions,
    surface: S,
    session: Option<ActiveEditor>,
    scheduled: Option<ScheduledEdit>,
    actions: Box<dyn TableActions>,
    text_predicates: HashMap<String, RowPredicate>,
}

impl<S: GridSurface> TableController<S> {
    /// Build a controller and push the derived columns and the rows to the
    /// surface.
    ///
    /// # Errors
    /// Returns [`GridError::DuplicateField`](crate::error::GridError) when two
    /// columns share a field.
    pub fn new(
        rows: Vec<RowRecord>,
        columns: Vec<ColumnDef>,
        options: GridOptions,
        mut surface: S,
    ) -> Result<Self> {
        check_unique_fields(&columns)?;
        let column_defs = build_column_definitions(&columns);
        surface.set_column_defs(&column_defs);
        surface.set_row_data(&rows);
        debug!(rows = rows.len(), columns = columns.len(), "table created");
        Ok(TableController {
            store: RowStore::new(rows),
            columns,
            column_defs,
            options,
            surface,
            session: None,
            scheduled: None,
            actions: Box::new(NoActions),
            text_predicates: HashMap::new(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    #[must_use]
    pub fn column_definitions(&self) -> &[GridColumnDef] {
        &self.column_defs
    }

    #[must_use]
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    #[must_use]
    pub fn rows(&self) -> &[RowRecord] {
        self.store.rows()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.store.len()
    }

    /// Install host behaviour for Clear Rates / Clear Threshold / Clear All /
    /// Save.
    pub fn set_actions(&mut self, actions: Box<dyn TableActions>) {
        self.actions = actions;
    }

    /// Register the validity predicate used by the text editor on `field`.
    pub fn set_text_validator(&mut self, field: &str, predicate: RowPredicate) {
        self.text_predicates.insert(field.to_string(), predicate);
    }

    // ---- Row management ----

    #[must_use]
    pub fn can_add_row(&self) -> bool {
        self.store.can_add_row()
    }

    /// Append a row derived from the last one and schedule an edit on its
    /// `high` cell for after the next render.
    ///
    /// No-op while any row is incomplete or the table is empty.
    pub fn add_row(&mut self) -> Option<ScheduledEdit> {
        if !self.can_add_row() {
            debug!("add row refused: incomplete rows");
            return None;
        }
        let row_index = self.store.append_derived()?;
        self.push_rows();
        let scheduled = ScheduledEdit {
            row_index,
            col_id: fields::HIGH.to_string(),
        };
        self.scheduled = Some(scheduled.clone());
        Some(scheduled)
    }

    #[must_use]
    pub fn scheduled_edit(&self) -> Option<&ScheduledEdit> {
        self.scheduled.as_ref()
    }

    /// The surface finished rendering. Fires the pending edit-start if its row
    /// still exists; a stale one is dropped.
    pub fn render_complete(&mut self) -> Option<FocusAction> {
        let scheduled = self.scheduled.take()?;
        if scheduled.row_index >= self.store.len() {
            debug!(row = scheduled.row_index, "stale scheduled edit dropped");
            return None;
        }
        self.start_editing(scheduled.row_index, &scheduled.col_id, None)
    }

    /// Throw away every uncommitted change and restore the construction rows.
    pub fn cancel(&mut self) {
        if let Some(mut editor) = self.session.take() {
            editor.cancel();
            self.surface.editing_stopped(editor.position());
        }
        self.scheduled = None;
        self.store.reset();
        self.push_rows();
    }

    // ---- Editing ----

    /// Focus a cell and ask the surface to start editing it.
    pub fn start_editing(
        &mut self,
        row_index: usize,
        col_id: &str,
        key: Option<&str>,
    ) -> Option<FocusAction> {
        self.surface.set_focused_cell(row_index, col_id);
        let request = StartEditRequest {
            row_index,
            col_key: col_id.to_string(),
            key: key.map(str::to_string),
        };
        if self.surface.start_editing_cell(&request) {
            self.begin_edit(row_index, col_id, key)
        } else {
            None
        }
    }

    /// Open an edit session on a cell and focus it.
    ///
    /// Any open session is stopped (and committed) first. Unknown cells and
    /// non-editable columns are ignored.
    pub fn begin_edit(
        &mut self,
        row_index: usize,
        col_id: &str,
        key: Option<&str>,
    ) -> Option<FocusAction> {
        if self.session.is_some() && self.stop_editing(false) == CommitOutcome::Rejected {
            // moving away abandons a draft that cannot be committed
            self.stop_editing(true);
        }
        let column = self.columns.iter().find(|c| c.field == col_id)?;
        if !column.editable {
            trace!(col_id, "begin edit on read-only column ignored");
            return None;
        }
        let row = self.store.get(row_index)?;
        let position = CellPosition::new(row_index, col_id);
        let mut editor = match column.column_type {
            Some(ColumnType::Number) => {
                ActiveEditor::Numeric(NumericCellEditor::start(position, row, key))
            }
            Some(ColumnType::Text) | None => {
                let predicate = self
                    .text_predicates
                    .get(col_id)
                    .cloned()
                    .unwrap_or_else(accept_all);
                ActiveEditor::Text(TextCellEditor::start(position, row, key, predicate))
            }
        };
        let action = editor.focus();
        self.surface.editing_started(editor.position());
        self.session = Some(editor);
        Some(action)
    }

    #[must_use]
    pub fn active_editor(&self) -> Option<&ActiveEditor> {
        self.session.as_ref()
    }

    /// First cell the surface reports as being edited.
    #[must_use]
    pub fn editing_cell(&self) -> Option<CellPosition> {
        self.surface.editing_cells().into_iter().next()
    }

    /// Route a keystroke to the active editor. Enter and Tab end the session
    /// here, once per press.
    pub fn key_down(&mut self, key: &str) -> KeyDisposition {
        let Some(editor) = &self.session else {
            return KeyDisposition::PassThrough;
        };
        let disposition = editor.key_down(key);
        if disposition == KeyDisposition::StopEditing {
            self.surface.stop_editing();
            self.stop_editing(false);
        }
        disposition
    }

    /// New input text for the active editor. Returns the invalid flag.
    pub fn input(&mut self, value: &str) -> bool {
        let Some(editor) = self.session.as_mut() else {
            return false;
        };
        let Some(row) = self.store.get(editor.position().row_index) else {
            return false;
        };
        editor.input(row, value);
        editor.is_invalid()
    }

    /// Whether the active draft is invalid.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.session.as_ref().is_some_and(ActiveEditor::is_invalid)
    }

    /// Message to show under the active cell, when its draft is invalid.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self.session.as_ref()? {
            ActiveEditor::Numeric(e) if e.is_invalid() => Some(self.options.invalid_message.as_str()),
            ActiveEditor::Text(e) if e.is_invalid() => Some(self.options.text_error_message.as_str()),
            _ => None,
        }
    }

    /// Commit protocol: end the session, writing the draft unless it is
    /// invalid (or `cancel` is set), then tear the session down.
    ///
    /// A rejected text draft keeps its session open and invalid so the host
    /// can show the error message; a rejected numeric draft ends the session.
    /// A cancelled or missing session reports [`CommitOutcome::Ignored`].
    pub fn stop_editing(&mut self, cancel: bool) -> CommitOutcome {
        let Some(mut editor) = self.session.take() else {
            return CommitOutcome::Ignored;
        };
        let outcome = match self.store.get_mut(editor.position().row_index) {
            Some(row) if !cancel => editor.commit_if_valid(row),
            _ => {
                editor.cancel();
                CommitOutcome::Ignored
            }
        };
        if outcome == CommitOutcome::Rejected && matches!(editor, ActiveEditor::Text(_)) {
            self.session = Some(editor);
            return outcome;
        }
        self.surface.editing_stopped(editor.position());
        if outcome == CommitOutcome::Committed {
            self.push_rows();
        }
        outcome
    }

    // ---- Host actions ----

    #[must_use]
    pub fn is_enabled(&self, action: Action) -> bool {
        match action {
            Action::AddRow => self.can_add_row(),
            _ => true,
        }
    }

    /// Run a host action. Disabled actions do nothing and return `false`.
    ///
    /// Add Row commits the open session before checking whether it is
    /// enabled, so typing the last missing value and pressing the button works.
    pub fn perform(&mut self, action: Action) -> bool {
        if action == Action::AddRow {
            self.stop_editing(false);
        }
        if !self.is_enabled(action) {
            debug!(%action, "action disabled");
            return false;
        }
        debug!(%action, "perform action");
        match action {
            Action::Cancel => self.cancel(),
            Action::AddRow => return self.add_row().is_some(),
            Action::ClearRates => {
                self.stop_editing(false);
                self.actions.clear_rates(&mut self.store);
                self.push_rows();
            }
            Action::ClearThreshold => {
                self.stop_editing(false);
                self.actions.clear_threshold(&mut self.store);
                self.push_rows();
            }
            Action::ClearAll => {
                self.stop_editing(false);
                self.actions.clear_all(&mut self.store);
                self.push_rows();
            }
            Action::Save => {
                self.stop_editing(false);
                self.actions.save(self.store.rows());
            }
        }
        true
    }

    fn push_rows(&mut self) {
        self.surface.set_row_data(self.store.rows());
    }
}
