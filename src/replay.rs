//! Headless replay of a scripted editing session.
//!
//! A [`Script`] carries the construction inputs plus a list of UI steps. The
//! steps run against a [`TableController`] backed by a [`MemorySurface`], with
//! a small stand-in for the browser's `<input>` element so that keystrokes the
//! editor lets through actually change the draft.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::controller::{Action, TableController};
use crate::editor::{keys, FocusAction, KeyDisposition};
use crate::error::Result;
use crate::surface::MemorySurface;
use crate::types::{CellPosition, ColumnDef, GridOptions, RowRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub rows: Vec<RowRecord>,
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub options: GridOptions,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One UI event in a script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Step {
    /// Programmatic edit start through the surface.
    StartEditing {
        row: usize,
        col: String,
        #[serde(default)]
        key: Option<String>,
    },
    /// Surface-initiated edit start (double click, typing on a cell).
    BeginEdit {
        row: usize,
        col: String,
        #[serde(default)]
        key: Option<String>,
    },
    Key {
        key: String,
    },
    /// Shorthand for one `Key` step per character.
    Type {
        text: String,
    },
    /// Set the input text directly, as a paste or IME commit would.
    Input {
        value: String,
    },
    StopEditing {
        #[serde(default)]
        cancel: bool,
    },
    AddRow,
    Cancel,
    RenderComplete,
    Action {
        action: Action,
    },
}

/// What happened while replaying, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ReplayEvent {
    #[serde(rename_all = "camelCase")]
    EditStarted {
        row_index: usize,
        col_id: String,
        draft: Option<String>,
        select_all: bool,
    },
    #[serde(rename_all = "camelCase")]
    EditNotStarted { row_index: usize, col_id: String },
    Key {
        key: String,
        disposition: String,
        draft: Option<String>,
        invalid: bool,
    },
    Input { value: String, invalid: bool },
    Stopped { outcome: String },
    #[serde(rename_all = "camelCase")]
    RowAdded { row_index: usize },
    AddRowRefused,
    Cancelled,
    Action { action: Action, performed: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub rows: Vec<RowRecord>,
    pub can_add_row: bool,
    pub editing: Option<CellPosition>,
    pub events: Vec<ReplayEvent>,
}

/// Stand-in for the native text input hosting the editor.
#[derive(Debug, Default)]
struct InputBuffer {
    chars: Vec<char>,
    caret: usize,
    all_selected: bool,
}

impl InputBuffer {
    fn open(draft: Option<&str>, focus: FocusAction) -> Self {
        let chars: Vec<char> = draft.unwrap_or_default().chars().collect();
        let (caret, all_selected) = match focus {
            FocusAction::SelectAll => (chars.len(), true),
            FocusAction::CaretAt(at) => (at.min(chars.len()), false),
        };
        InputBuffer {
            chars,
            caret,
            all_selected,
        }
    }

    fn value(&self) -> String {
        self.chars.iter().collect()
    }

    fn set(&mut self, value: &str) {
        self.chars = value.chars().collect();
        self.caret = self.chars.len();
        self.all_selected = false;
    }

    /// Apply a key the editor did not prevent. Returns `true` if the text
    /// changed.
    fn apply(&mut self, key: &str) -> bool {
        match key {
            keys::KEY_BACKSPACE => {
                if self.all_selected {
                    self.all_selected = false;
                    self.caret = 0;
                    let changed = !self.chars.is_empty();
                    self.chars.clear();
                    changed
                } else if self.caret > 0 && self.caret <= self.chars.len() {
                    self.caret -= 1;
                    self.chars.remove(self.caret);
                    true
                } else {
                    false
                }
            }
            keys::KEY_ARROW_LEFT => {
                self.caret = if self.all_selected {
                    0
                } else {
                    self.caret.saturating_sub(1)
                };
                self.all_selected = false;
                false
            }
            keys::KEY_ARROW_RIGHT => {
                self.caret = (self.caret + 1).min(self.chars.len());
                if self.all_selected {
                    self.caret = self.chars.len();
                }
                self.all_selected = false;
                false
            }
            key if keys::is_printable(key) => {
                if self.all_selected {
                    self.chars.clear();
                    self.caret = 0;
                    self.all_selected = false;
                }
                let at = self.caret.min(self.chars.len());
                self.chars.splice(at..at, key.chars());
                self.caret = at + 1;
                true
            }
            _ => false,
        }
    }
}

struct Replay {
    table: TableController<MemorySurface>,
    input: Option<InputBuffer>,
    events: Vec<ReplayEvent>,
}

impl Replay {
    fn on_focus(&mut self, row_index: usize, col_id: &str, focus: Option<FocusAction>) {
        let Some(focus) = focus else {
            self.events.push(ReplayEvent::EditNotStarted {
                row_index,
                col_id: col_id.to_string(),
            });
            return;
        };
        let draft = self
            .table
            .active_editor()
            .and_then(|e| e.draft())
            .map(str::to_string);
        self.input = Some(InputBuffer::open(draft.as_deref(), focus));
        self.events.push(ReplayEvent::EditStarted {
            row_index,
            col_id: col_id.to_string(),
            draft,
            select_all: focus == FocusAction::SelectAll,
        });
    }

    fn key(&mut self, key: &str) {
        let disposition = self.table.key_down(key);
        if disposition != KeyDisposition::StopEditing && !disposition.prevents_default() {
            if let Some(input) = self.input.as_mut() {
                if input.apply(key) {
                    let value = input.value();
                    self.table.input(&value);
                }
            }
        }
        let editor = self.table.active_editor();
        self.events.push(ReplayEvent::Key {
            key: key.to_string(),
            disposition: disposition.as_str().to_string(),
            draft: editor.and_then(|e| e.draft()).map(str::to_string),
            invalid: editor.is_some_and(|e| e.is_invalid()),
        });
    }

    fn step(&mut self, step: Step) {
        debug!(?step, "replay step");
        match step {
            Step::StartEditing { row, col, key } => {
                let focus = self.table.start_editing(row, &col, key.as_deref());
                self.on_focus(row, &col, focus);
            }
            Step::BeginEdit { row, col, key } => {
                let focus = self.table.begin_edit(row, &col, key.as_deref());
                self.on_focus(row, &col, focus);
            }
            Step::Key { key } => self.key(&key),
            Step::Type { text } => {
                for ch in text.chars() {
                    self.key(&ch.to_string());
                }
            }
            Step::Input { value } => {
                if let Some(input) = self.input.as_mut() {
                    input.set(&value);
                }
                let invalid = self.table.input(&value);
                self.events.push(ReplayEvent::Input { value, invalid });
            }
            Step::StopEditing { cancel } => {
                let outcome = self.table.stop_editing(cancel);
                self.events.push(ReplayEvent::Stopped {
                    outcome: outcome.as_str().to_string(),
                });
            }
            Step::AddRow => match self.table.add_row() {
                Some(scheduled) => self.events.push(ReplayEvent::RowAdded {
                    row_index: scheduled.row_index,
                }),
                None => self.events.push(ReplayEvent::AddRowRefused),
            },
            Step::Cancel => {
                self.table.cancel();
                self.events.push(ReplayEvent::Cancelled);
            }
            Step::RenderComplete => {
                if let Some(scheduled) = self.table.scheduled_edit().cloned() {
                    let focus = self.table.render_complete();
                    self.on_focus(scheduled.row_index, &scheduled.col_id, focus);
                }
            }
            Step::Action { action } => {
                let performed = self.table.perform(action);
                self.events.push(ReplayEvent::Action { action, performed });
            }
        }
        if self.table.active_editor().is_none() {
            self.input = None;
        }
    }
}

/// Play `script` and report the final rows and every event.
///
/// # Errors
/// Fails only when the table cannot be constructed (duplicate column fields).
pub fn run(script: Script) -> Result<ReplayReport> {
    let table = TableController::new(
        script.rows,
        script.columns,
        script.options,
        MemorySurface::new(),
    )?;
    let mut replay = Replay {
        table,
        input: None,
        events: Vec::new(),
    };
    for step in script.steps {
        replay.step(step);
    }
    Ok(ReplayReport {
        rows: replay.table.rows().to_vec(),
        can_add_row: replay.table.can_add_row(),
        editing: replay.table.editing_cell(),
        events: replay.events,
    })
}

/// Parse a JSON script, play it and return the report as pretty JSON.
///
/// # Errors
/// Returns an error for malformed scripts or duplicate column fields.
pub fn run_json(script: &str) -> Result<String> {
    let script: Script = serde_json::from_str(script)?;
    let report = run(script)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

/// [`run_json`] on the contents of a script file.
///
/// # Errors
/// Returns an error if the file cannot be read or the script is invalid.
pub fn run_file(path: &Path) -> Result<String> {
    let script = fs::read_to_string(path)?;
    info!(path = %path.display(), bytes = script.len(), "replaying script");
    run_json(&script)
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
    fn test_buffer_select_all_replaced_by_typing() {
        let mut input = InputBuffer::open(Some("1000"), FocusAction::SelectAll);
        assert!(input.apply("7"));
        assert_eq!(input.value(), "7");
    }

    #[test]
    fn test_buffer_caret_editing() {
        let mut input = InputBuffer::open(Some("12"), FocusAction::CaretAt(2));
        input.apply("ArrowLeft");
        input.apply("5");
        assert_eq!(input.value(), "152");
        input.apply("Backspace");
        assert_eq!(input.value(), "12");
    }

    #[test]
    fn test_buffer_backspace_on_selection_clears() {
        let mut input = InputBuffer::open(Some("1000"), FocusAction::SelectAll);
        assert!(input.apply("Backspace"));
        assert_eq!(input.value(), "");
        assert!(!input.apply("Backspace"));
    }
}
