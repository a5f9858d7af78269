use std::fmt;

use tracing::debug;

use super::keys::{self, KeyDisposition};
use super::{seed_draft, take_focus, CommitOutcome, EditorState, FocusAction};
use crate::types::{CellPosition, CellValue, RowRecord};
use crate::validation::{self, RowPredicate};

/// Editor for a plain text cell.
///
/// Typing clears the invalid marker; the predicate only runs on commit. A
/// rejected commit marks the session invalid, leaves the row untouched and
/// keeps the editor open so the user can correct the text.
pub struct TextCellEditor {
    position: CellPosition,
    draft: Option<String>,
    highlight_all_on_focus: bool,
    invalid: bool,
    state: EditorState,
    predicate: RowPredicate,
}

impl fmt::Debug for TextCellEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextCellEditor")
            .field("position", &self.position)
            .field("draft", &self.draft)
            .field("invalid", &self.invalid)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl TextCellEditor {
    #[must_use]
    pub fn start(
        position: CellPosition,
        row: &RowRecord,
        trigger_key: Option<&str>,
        predicate: RowPredicate,
    ) -> Self {
        let (draft, highlight_all_on_focus) = seed_draft(trigger_key, row.get(&position.col_id));
        debug!(
            row = position.row_index,
            col = %position.col_id,
            ?trigger_key,
            "text editor started"
        );
        TextCellEditor {
            position,
            draft,
            highlight_all_on_focus,
            invalid: false,
            state: EditorState::Initializing,
            predicate,
        }
    }

    #[must_use]
    pub fn position(&self) -> &CellPosition {
        &self.position
    }

    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    #[must_use]
    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn focus(&mut self) -> FocusAction {
        take_focus(
            &mut self.state,
            &mut self.highlight_all_on_focus,
            self.invalid,
            self.draft.as_deref(),
        )
    }

    #[must_use]
    pub fn key_down(&self, key: &str) -> KeyDisposition {
        keys::text_disposition(key)
    }

    pub fn input(&mut self, value: &str) {
        if self.state.is_terminal() {
            return;
        }
        self.invalid = false;
        self.draft = Some(value.to_string());
        self.state = EditorState::Focused { invalid: false };
    }

    pub fn commit_if_valid(&mut self, row: &mut RowRecord) -> CommitOutcome {
        if self.state.is_terminal() {
            return CommitOutcome::Ignored;
        }
        let value = self.draft.clone().unwrap_or_default();
        let field = &self.position.col_id;
        if !(self.predicate)(row, &value) || !validation::is_valid(row, field, &value) {
            debug!(row = self.position.row_index, col = %field, "text commit rejected");
            self.invalid = true;
            self.state = EditorState::Focused { invalid: true };
            return CommitOutcome::Rejected;
        }
        row.set(field, CellValue::Text(value));
        self.state = EditorState::Committed;
        CommitOutcome::Committed
    }

    pub fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.state = EditorState::Cancelled;
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
    use std::rc::Rc;

    use super::*;
    use crate::validation::accept_all;

    #[test]
    fn test_default_predicate_commits_text() {
        let mut row = RowRecord::new().with("note", "old");
        let mut editor =
            TextCellEditor::start(CellPosition::new(0, "note"), &row, Some("F2"), accept_all());
        assert_eq!(editor.focus(), FocusAction::CaretAt(3));
        editor.input("new");
        assert_eq!(editor.commit_if_valid(&mut row), CommitOutcome::Committed);
        assert_eq!(row.get("note"), &CellValue::from("new"));
    }

    #[test]
    fn test_predicate_rejection_keeps_value() {
        let mut row = RowRecord::new().with("note", "old");
        let predicate: RowPredicate = Rc::new(|_: &RowRecord, value: &str| !value.contains(' '));
        let mut editor = TextCellEditor::start(CellPosition::new(0, "note"), &row, None, predicate);
        editor.focus();
        editor.input("has space");
        assert_eq!(editor.commit_if_valid(&mut row), CommitOutcome::Rejected);
        assert!(editor.is_invalid());
        assert_eq!(editor.state(), EditorState::Focused { invalid: true });
        assert_eq!(row.get("note"), &CellValue::from("old"));

        editor.input("fixed");
        assert_eq!(editor.commit_if_valid(&mut row), CommitOutcome::Committed);
        assert_eq!(row.get("note"), &CellValue::from("fixed"));
    }

    #[test]
    fn test_typing_clears_invalid() {
        let mut editor = TextCellEditor::start(
            CellPosition::new(0, "note"),
            &RowRecord::new(),
            None,
            accept_all(),
        );
        editor.invalid = true;
        editor.input("x");
        assert!(!editor.is_invalid());
        assert_eq!(editor.key_down("a"), KeyDisposition::Native);
        assert_eq!(editor.key_down("Tab"), KeyDisposition::StopEditing);
    }
}
