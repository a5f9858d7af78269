//! Cell editors.
//!
//! An editor is a short-lived session bound to exactly one cell. It owns the
//! draft value, the validity flag and the keyboard policy, and writes back into
//! the row only when the commit protocol runs. The bound row is passed in on
//! every call rather than held, so the row store stays the single owner.
//!
//! - [`NumericCellEditor`]: digits-only editor with live threshold validation
//! - [`TextCellEditor`]: free-text editor with a caller-supplied predicate
//! - `input` (wasm32): DOM `<input>` binding for the active editor

#[cfg(target_arch = "wasm32")]
pub(crate) mod input;
pub mod keys;
mod numeric;
mod text;

pub use keys::KeyDisposition;
pub use numeric::{parse_int_prefix, NumericCellEditor};
pub use text::TextCellEditor;

use crate::types::{CellPosition, CellValue, RowRecord};

/// Lifecycle of an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Initializing,
    Focused { invalid: bool },
    Committed,
    Cancelled,
}

impl EditorState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, EditorState::Committed | EditorState::Cancelled)
    }
}

/// What the input element must do when the editor takes focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAction {
    /// Select the whole draft.
    SelectAll,
    /// Collapse the selection to this character offset.
    CaretAt(usize),
}

/// Result of the commit protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The draft was written into the row.
    Committed,
    /// The draft was invalid; the stored value is unchanged.
    Rejected,
    /// The session had already ended; nothing happened.
    Ignored,
}

impl CommitOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CommitOutcome::Committed => "committed",
            CommitOutcome::Rejected => "rejected",
            CommitOutcome::Ignored => "ignored",
        }
    }
}

/// Initial draft and select-all flag derived from the key that opened the
/// editor.
///
/// - Backspace clears the cell and selects everything
/// - a printable character seeds the draft so typing continues after it
/// - F2 keeps the current value with the caret at the end
/// - anything else keeps the current value, fully selected
pub(crate) fn seed_draft(trigger_key: Option<&str>, current: &CellValue) -> (Option<String>, bool) {
    match trigger_key {
        Some(keys::KEY_BACKSPACE) => (Some(String::new()), true),
        Some(key) if keys::is_printable(key) => (Some(key.to_string()), false),
        Some(keys::KEY_F2) => (current.to_draft(), false),
        _ => (current.to_draft(), true),
    }
}

/// Focus step shared by both editors.
fn take_focus(
    state: &mut EditorState,
    highlight_all_on_focus: &mut bool,
    invalid: bool,
    draft: Option<&str>,
) -> FocusAction {
    if *state == EditorState::Initializing {
        *state = EditorState::Focused { invalid };
    }
    if *highlight_all_on_focus {
        *highlight_all_on_focus = false;
        FocusAction::SelectAll
    } else {
        FocusAction::CaretAt(draft.map_or(0, |d| d.chars().count()))
    }
}

/// The single editor currently hosted by the grid.
#[derive(Debug)]
pub enum ActiveEditor {
    Numeric(NumericCellEditor),
    Text(TextCellEditor),
}

impl ActiveEditor {
    #[must_use]
    pub fn position(&self) -> &CellPosition {
        match self {
            ActiveEditor::Numeric(e) => e.position(),
            ActiveEditor::Text(e) => e.position(),
        }
    }

    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        match self {
            ActiveEditor::Numeric(e) => e.draft(),
            ActiveEditor::Text(e) => e.draft(),
        }
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        match self {
            ActiveEditor::Numeric(e) => e.is_invalid(),
            ActiveEditor::Text(e) => e.is_invalid(),
        }
    }

    #[must_use]
    pub fn state(&self) -> EditorState {
        match self {
            ActiveEditor::Numeric(e) => e.state(),
            ActiveEditor::Text(e) => e.state(),
        }
    }

    pub fn focus(&mut self) -> FocusAction {
        match self {
            ActiveEditor::Numeric(e) => e.focus(),
            ActiveEditor::Text(e) => e.focus(),
        }
    }

    #[must_use]
    pub fn key_down(&self, key: &str) -> KeyDisposition {
        match self {
            ActiveEditor::Numeric(e) => e.key_down(key),
            ActiveEditor::Text(e) => e.key_down(key),
        }
    }

    pub fn input(&mut self, row: &RowRecord, value: &str) {
        match self {
            ActiveEditor::Numeric(e) => e.input(row, value),
            ActiveEditor::Text(e) => e.input(value),
        }
    }

    pub fn commit_if_valid(&mut self, row: &mut RowRecord) -> CommitOutcome {
        match self {
            ActiveEditor::Numeric(e) => e.commit_if_valid(row),
            ActiveEditor::Text(e) => e.commit_if_valid(row),
        }
    }

    pub fn cancel(&mut self) {
        match self {
            ActiveEditor::Numeric(e) => e.cancel(),
            ActiveEditor::Text(e) => e.cancel(),
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
    fn test_seed_from_backspace() {
        let current = CellValue::from("1000");
        assert_eq!(seed_draft(Some("Backspace"), &current), (Some(String::new()), true));
    }

    #[test]
    fn test_seed_from_character() {
        let current = CellValue::from("1000");
        assert_eq!(seed_draft(Some("5"), &current), (Some("5".into()), false));
    }

    #[test]
    fn test_seed_from_f2_and_programmatic_start() {
        let current = CellValue::Number(1000.0);
        assert_eq!(seed_draft(Some("F2"), &current), (Some("1000".into()), false));
        assert_eq!(seed_draft(None, &current), (Some("1000".into()), true));
        assert_eq!(seed_draft(Some("Enter"), &current), (Some("1000".into()), true));
        assert_eq!(seed_draft(None, &CellValue::Empty), (None, true));
    }
}
