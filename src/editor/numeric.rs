use tracing::{debug, trace};

use super::keys::{self, KeyDisposition};
use super::{seed_draft, take_focus, CommitOutcome, EditorState, FocusAction};
use crate::types::{CellPosition, CellValue, RowRecord};
use crate::validation;

/// Editor for a numeric cell.
///
/// Only digits reach the draft; every keystroke re-runs the field rule against
/// the bound row so the host can show invalid styling live. A commit with the
/// invalid flag set is dropped and the stored value stays as it was.
#[derive(Debug, Clone)]
pub struct NumericCellEditor {
    position: CellPosition,
    draft: Option<String>,
    highlight_all_on_focus: bool,
    invalid: bool,
    state: EditorState,
}

impl NumericCellEditor {
    /// Open an editor on `position`, seeding the draft from `trigger_key` and
    /// the row's current value.
    #[must_use]
    pub fn start(position: CellPosition, row: &RowRecord, trigger_key: Option<&str>) -> Self {
        let (draft, highlight_all_on_focus) = seed_draft(trigger_key, row.get(&position.col_id));
        let invalid = !is_storable(row, &position.col_id, draft.as_deref().unwrap_or(""));
        debug!(
            row = position.row_index,
            col = %position.col_id,
            ?trigger_key,
            ?draft,
            "numeric editor started"
        );
        NumericCellEditor {
            position,
            draft,
            highlight_all_on_focus,
            invalid,
            state: EditorState::Initializing,
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

    /// Whether the next focus will select the whole draft.
    #[must_use]
    pub fn highlights_all_on_focus(&self) -> bool {
        self.highlight_all_on_focus
    }

    /// Enter the focused state. Select-all is one-shot: later calls place the
    /// caret at the end of the draft.
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
        let disposition = keys::numeric_disposition(key);
        trace!(key, ?disposition, "numeric editor key");
        disposition
    }

    /// Replace the draft with the input's current text and re-validate.
    pub fn input(&mut self, row: &RowRecord, value: &str) {
        if self.state.is_terminal() {
            return;
        }
        self.invalid = !is_storable(row, &self.position.col_id, value);
        self.draft = Some(value.to_string());
        self.state = EditorState::Focused {
            invalid: self.invalid,
        };
        trace!(value, invalid = self.invalid, "numeric editor input");
    }

    /// The value the editor hands back: `None` for a blank draft, otherwise
    /// the integer prefix of the draft (`"12.9"` gives 12).
    #[must_use]
    pub fn final_value(&self) -> Option<i64> {
        match self.draft.as_deref() {
            None | Some("") => None,
            Some(draft) => parse_int_prefix(draft),
        }
    }

    /// Write [`final_value`](Self::final_value) into the bound field unless the
    /// draft is invalid. An invalid draft is left on screen, not reverted.
    pub fn commit_if_valid(&mut self, row: &mut RowRecord) -> CommitOutcome {
        if self.state.is_terminal() {
            return CommitOutcome::Ignored;
        }
        self.state = EditorState::Committed;
        // the row may have changed since the last keystroke
        let draft = self.draft.as_deref().unwrap_or("");
        self.invalid = !is_storable(row, &self.position.col_id, draft);
        if self.invalid {
            debug!(
                row = self.position.row_index,
                col = %self.position.col_id,
                draft = ?self.draft,
                "numeric commit rejected"
            );
            return CommitOutcome::Rejected;
        }
        let value = CellValue::from(self.final_value());
        debug!(
            row = self.position.row_index,
            col = %self.position.col_id,
            %value,
            "numeric commit"
        );
        row.set(&self.position.col_id, value);
        CommitOutcome::Committed
    }

    pub fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.state = EditorState::Cancelled;
        }
    }
}

/// Field rule applied to what a commit would store: the integer prefix of
/// `draft`, or the raw text when it has none (stored as empty).
fn is_storable(row: &RowRecord, field: &str, draft: &str) -> bool {
    match parse_int_prefix(draft) {
        Some(stored) => validation::is_valid(row, field, &stored.to_string()),
        None => validation::is_valid(row, field, draft),
    }
}

/// Leading-integer parse in the manner of JavaScript `parseInt(s, 10)`:
/// optional whitespace and sign, then digits up to the first non-digit.
/// Returns `None` when no digit leads the text or the number overflows.
#[must_use]
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = rest.get(..end)?;
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
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

    fn threshold_row() -> RowRecord {
        RowRecord::new()
            .with("amount", "90899")
            .with("low", "0")
            .with("high", "1000")
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("12.9"), Some(12));
        assert_eq!(parse_int_prefix("  42abc"), Some(42));
        assert_eq!(parse_int_prefix("-7"), Some(-7));
        assert_eq!(parse_int_prefix("+3"), Some(3));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
    }

    #[test]
    fn test_focus_select_all_is_one_shot() {
        let row = threshold_row();
        let mut editor = NumericCellEditor::start(CellPosition::new(0, "high"), &row, None);
        assert_eq!(editor.state(), EditorState::Initializing);
        assert_eq!(editor.focus(), FocusAction::SelectAll);
        assert_eq!(editor.state(), EditorState::Focused { invalid: false });
        assert_eq!(editor.focus(), FocusAction::CaretAt(4));
    }

    #[test]
    fn test_seed_character_is_validated() {
        let row = RowRecord::new().with("low", "100").with("high", "1000");
        let editor = NumericCellEditor::start(CellPosition::new(0, "high"), &row, Some("5"));
        assert!(editor.is_invalid());
    }

    #[test]
    fn test_fraction_truncated_before_validation() {
        let row = RowRecord::new().with("low", "1000.1").with("high", "1000.5");
        let mut editor = NumericCellEditor::start(CellPosition::new(0, "high"), &row, Some("F2"));
        assert_eq!(editor.draft(), Some("1000.5"));
        assert!(editor.is_invalid());
        editor.input(&row, "1001.2");
        assert!(!editor.is_invalid());
        editor.input(&row, "1000.9");
        assert!(editor.is_invalid());
    }

    #[test]
    fn test_commit_rechecks_against_current_row() {
        let mut row = threshold_row();
        let mut editor = NumericCellEditor::start(CellPosition::new(0, "high"), &row, None);
        editor.focus();
        editor.input(&row, "500");
        assert!(!editor.is_invalid());
        row.set("low", "600");
        assert_eq!(editor.commit_if_valid(&mut row), CommitOutcome::Rejected);
        assert_eq!(row.get("high"), &CellValue::from("1000"));
    }

    #[test]
    fn test_input_after_commit_is_ignored() {
        let mut row = threshold_row();
        let mut editor = NumericCellEditor::start(CellPosition::new(0, "high"), &row, None);
        editor.focus();
        editor.input(&row, "2000");
        assert_eq!(editor.commit_if_valid(&mut row), CommitOutcome::Committed);
        editor.input(&row, "1");
        assert_eq!(editor.draft(), Some("2000"));
        assert_eq!(editor.commit_if_valid(&mut row), CommitOutcome::Ignored);
        assert_eq!(row.get("high"), &CellValue::Number(2000.0));
    }
}
