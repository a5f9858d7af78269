//! Tests for the numeric cell editor state machine.

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use editgrid::editor::{
        CommitOutcome, EditorState, FocusAction, KeyDisposition, NumericCellEditor,
    };
    use editgrid::{CellPosition, CellValue, RowRecord};
    use test_case::test_case;

    fn row(low: &str, high: &str) -> RowRecord {
        RowRecord::new()
            .with("amount", "90899")
            .with("low", low)
            .with("high", high)
    }

    fn high_editor(row: &RowRecord, key: Option<&str>) -> NumericCellEditor {
        NumericCellEditor::start(CellPosition::new(0, "high"), row, key)
    }

    // ================================================================
    // Seeding and focus
    // ================================================================

    #[test_case(None, Some("1000"), FocusAction::SelectAll ; "no key keeps value selected")]
    #[test_case(Some("Backspace"), Some(""), FocusAction::SelectAll ; "backspace clears")]
    #[test_case(Some("7"), Some("7"), FocusAction::CaretAt(1) ; "printable seeds draft")]
    #[test_case(Some("F2"), Some("1000"), FocusAction::CaretAt(4) ; "f2 keeps caret at end")]
    #[test_case(Some("Shift"), Some("1000"), FocusAction::SelectAll ; "other key keeps value selected")]
    fn test_seed_from_trigger_key(key: Option<&str>, draft: Option<&str>, focus: FocusAction) {
        let row = row("0", "1000");
        let mut editor = high_editor(&row, key);
        assert_eq!(editor.state(), EditorState::Initializing);
        assert_eq!(editor.draft(), draft);
        assert_eq!(editor.focus(), focus);
    }

    #[test]
    fn test_select_all_is_one_shot() {
        let row = row("0", "1000");
        let mut editor = high_editor(&row, None);
        assert!(editor.highlights_all_on_focus());
        assert_eq!(editor.focus(), FocusAction::SelectAll);
        assert!(!editor.highlights_all_on_focus());
        assert_eq!(editor.focus(), FocusAction::CaretAt(4));
        assert_eq!(editor.state(), EditorState::Focused { invalid: false });
    }

    #[test]
    fn test_empty_cell_opens_without_draft() {
        let row = RowRecord::new().with("low", "0");
        let editor = high_editor(&row, None);
        assert_eq!(editor.draft(), None);
        assert!(!editor.is_invalid());
        assert_eq!(editor.final_value(), None);
    }

    #[test_case("0", "1000", None, false ; "stored value above low")]
    #[test_case("2000", "1000", None, true ; "stored value below low")]
    #[test_case("0", "1000", Some("0"), true ; "seed equal to low")]
    #[test_case("0", "1000", Some("Backspace"), false ; "blank seed")]
    fn test_initial_invalid_flag(low: &str, high: &str, key: Option<&str>, invalid: bool) {
        let row = row(low, high);
        let mut editor = high_editor(&row, key);
        assert_eq!(editor.is_invalid(), invalid);
        editor.focus();
        assert_eq!(editor.state(), EditorState::Focused { invalid });
    }

    // ================================================================
    // Key policy
    // ================================================================

    #[test_case("ArrowLeft", KeyDisposition::Native)]
    #[test_case("ArrowRight", KeyDisposition::Native)]
    #[test_case("Backspace", KeyDisposition::Native)]
    #[test_case("Enter", KeyDisposition::StopEditing)]
    #[test_case("Tab", KeyDisposition::StopEditing)]
    #[test_case("0", KeyDisposition::PassThrough)]
    #[test_case("9", KeyDisposition::PassThrough)]
    #[test_case("a", KeyDisposition::Suppress)]
    #[test_case(".", KeyDisposition::Suppress)]
    #[test_case("-", KeyDisposition::Suppress)]
    #[test_case("F5", KeyDisposition::Suppress)]
    #[test_case("ArrowUp", KeyDisposition::Suppress)]
    #[test_case("Delete", KeyDisposition::Suppress)]
    fn test_key_policy(key: &str, expected: KeyDisposition) {
        let row = row("0", "1000");
        let editor = high_editor(&row, None);
        assert_eq!(editor.key_down(key), expected);
    }

    #[test]
    fn test_disposition_event_effects() {
        assert!(!KeyDisposition::Native.prevents_default());
        assert!(KeyDisposition::Native.stops_propagation());
        assert!(KeyDisposition::Suppress.prevents_default());
        assert!(!KeyDisposition::PassThrough.prevents_default());
        assert!(!KeyDisposition::PassThrough.stops_propagation());
    }

    // ================================================================
    // Input and commit
    // ================================================================

    #[test]
    fn test_input_revalidates_every_keystroke() {
        let row = row("100", "1000");
        let mut editor = high_editor(&row, None);
        editor.focus();

        editor.input(&row, "1");
        assert!(editor.is_invalid());
        editor.input(&row, "10");
        assert!(editor.is_invalid());
        editor.input(&row, "100");
        assert!(editor.is_invalid());
        editor.input(&row, "1001");
        assert!(!editor.is_invalid());
        assert_eq!(editor.state(), EditorState::Focused { invalid: false });
        assert_eq!(editor.draft(), Some("1001"));
    }

    #[test]
    fn test_amount_is_never_invalid() {
        let row = row("5000", "6000");
        let mut editor = NumericCellEditor::start(CellPosition::new(0, "amount"), &row, None);
        editor.input(&row, "1");
        assert!(!editor.is_invalid());
    }

    #[test]
    fn test_commit_writes_integer_value() {
        let mut row = row("0", "1000");
        let mut editor = high_editor(&row, Some("5"));
        editor.focus();
        editor.input(&row, "5000");
        assert_eq!(editor.final_value(), Some(5000));
        assert_eq!(editor.commit_if_valid(&mut row), CommitOutcome::Committed);
        assert_eq!(row.get("high"), &CellValue::Number(5000.0));
        assert_eq!(editor.state(), EditorState::Committed);
    }

    #[test]
    fn test_final_value_truncates_at_first_non_digit() {
        let row = row("0", "1000");
        let mut editor = high_editor(&row, None);
        editor.input(&row, "12.9");
        assert_eq!(editor.final_value(), Some(12));
    }

    #[test]
    fn test_invalid_commit_leaves_row_alone() {
        let mut row = row("1000", "2000");
        let before = row.clone();
        let mut editor = high_editor(&row, None);
        editor.focus();
        editor.input(&row, "999");
        assert_eq!(editor.commit_if_valid(&mut row), CommitOutcome::Rejected);
        assert_eq!(row, before);
        // the rejected draft stays visible
        assert_eq!(editor.draft(), Some("999"));
        assert!(editor.is_invalid());
    }

    #[test]
    fn test_blank_commit_clears_cell() {
        let mut row = row("0", "1000");
        let mut editor = high_editor(&row, Some("Backspace"));
        editor.focus();
        assert_eq!(editor.commit_if_valid(&mut row), CommitOutcome::Committed);
        assert!(row.get("high").is_empty());
    }

    #[test]
    fn test_terminal_states_ignore_further_calls() {
        let mut row = row("0", "1000");
        let mut editor = high_editor(&row, None);
        editor.focus();
        editor.cancel();
        assert_eq!(editor.state(), EditorState::Cancelled);
        editor.input(&row, "1");
        assert_eq!(editor.draft(), Some("1000"));
        assert_eq!(editor.commit_if_valid(&mut row), CommitOutcome::Ignored);
        assert_eq!(row.get("high"), &CellValue::from("1000"));
    }
}
