//! Contract with the grid surface that renders rows and hosts the editor.
//!
//! The core never renders. It pushes column definitions and rows to the
//! surface and drives focus and edit-start through it. The surface in turn
//! reports editing events back through the controller's `begin_edit`,
//! `key_down`, `input` and `stop_editing` entry points.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::{CellPosition, GridColumnDef, RowRecord};

/// Request to open an editor on a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartEditRequest {
    pub row_index: usize,
    pub col_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// What the core needs from the grid rendering engine.
///
/// Every call targeting a row that no longer exists must no-op silently.
pub trait GridSurface {
    fn set_column_defs(&mut self, defs: &[GridColumnDef]);

    fn set_row_data(&mut self, rows: &[RowRecord]);

    /// Cells currently in edit mode. The core keeps at most one.
    fn editing_cells(&self) -> Vec<CellPosition>;

    fn set_focused_cell(&mut self, row_index: usize, col_id: &str);

    /// Ask the surface to open an editor.
    ///
    /// Return `true` when the surface wants the core to open the session
    /// immediately; a surface that instantiates editors later (after its own
    /// render) returns `false` and calls `begin_edit` itself.
    fn start_editing_cell(&mut self, request: &StartEditRequest) -> bool;

    /// An edit session opened on `cell`.
    fn editing_started(&mut self, _cell: &CellPosition) {}

    /// Signal from the editor that the user finished editing (Enter or Tab).
    fn stop_editing(&mut self) {}

    /// The session on `cell` has been torn down.
    fn editing_stopped(&mut self, _cell: &CellPosition) {}
}

/// Headless surface that keeps what it was told in memory.
///
/// Used by the replay harness and tests. It accepts every in-range edit
/// request inline.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub column_defs: Vec<GridColumnDef>,
    pub rows: Vec<RowRecord>,
    pub focused: Option<CellPosition>,
    pub editing: Option<CellPosition>,
    /// Every edit-start request received, in order.
    pub start_requests: Vec<StartEditRequest>,
    /// Number of stop-editing signals received.
    pub stop_signals: usize,
    /// Number of times row data was pushed.
    pub row_pushes: usize,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn has_cell(&self, row_index: usize, col_id: &str) -> bool {
        row_index < self.rows.len() && self.column_defs.iter().any(|c| c.field == col_id)
    }
}

impl GridSurface for MemorySurface {
    fn set_column_defs(&mut self, defs: &[GridColumnDef]) {
        self.column_defs = defs.to_vec();
    }

    fn set_row_data(&mut self, rows: &[RowRecord]) {
        self.rows = rows.to_vec();
        self.row_pushes += 1;
        if let Some(editing) = &self.editing {
            if editing.row_index >= self.rows.len() {
                self.editing = None;
            }
        }
    }

    fn editing_cells(&self) -> Vec<CellPosition> {
        self.editing.iter().cloned().collect()
    }

    fn set_focused_cell(&mut self, row_index: usize, col_id: &str) {
        if self.has_cell(row_index, col_id) {
            self.focused = Some(CellPosition::new(row_index, col_id));
        } else {
            trace!(row_index, col_id, "focus on missing cell ignored");
        }
    }

    fn start_editing_cell(&mut self, request: &StartEditRequest) -> bool {
        self.start_requests.push(request.clone());
        if !self.has_cell(request.row_index, &request.col_key) {
            trace!(?request, "edit start on missing cell ignored");
            return false;
        }
        true
    }

    fn editing_started(&mut self, cell: &CellPosition) {
        self.editing = Some(cell.clone());
    }

    fn stop_editing(&mut self) {
        self.stop_signals += 1;
    }

    fn editing_stopped(&mut self, cell: &CellPosition) {
        if self.editing.as_ref() == Some(cell) {
            self.editing = None;
        }
    }
}
