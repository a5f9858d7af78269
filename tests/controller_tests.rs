//! Tests for the table controller: row insertion, cancel, the commit
//! protocol and host actions.

mod common;

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use std::rc::Rc;

    use editgrid::editor::{CommitOutcome, FocusAction, KeyDisposition};
    use editgrid::error::GridError;
    use editgrid::surface::MemorySurface;
    use editgrid::types::{EditorKind, DEFAULT_INVALID_MESSAGE, DEFAULT_TEXT_ERROR_MESSAGE};
    use editgrid::validation::RowPredicate;
    use editgrid::{
        Action, CellPosition, CellValue, ColumnDef, GridOptions, RowRecord, TableController,
    };

    use super::common::*;

    // ================================================================
    // Construction
    // ================================================================

    #[test]
    fn test_new_pushes_columns_and_rows() {
        let table = threshold_table();
        let surface = table.surface();
        assert_eq!(surface.column_defs.len(), 3);
        assert_eq!(surface.rows, vec![seed_row()]);
        assert_eq!(surface.row_pushes, 1);

        let defs = table.column_definitions();
        assert_eq!(defs[0].cell_editor, Some(EditorKind::Numeric));
        assert_eq!(defs[0].width.as_deref(), Some("33.33%"));
        assert_eq!(defs[1].cell_editor, None);
        assert!(!defs[1].editable);
        assert_eq!(defs[2].cell_editor, Some(EditorKind::Numeric));
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let columns = vec![ColumnDef::new("high", "High"), ColumnDef::new("high", "Again")];
        let result = TableController::new(
            vec![seed_row()],
            columns,
            GridOptions::default(),
            MemorySurface::new(),
        );
        assert!(matches!(result, Err(GridError::DuplicateField(field)) if field == "high"));
    }

    // ================================================================
    // Adding rows
    // ================================================================

    #[test]
    fn test_add_row_derives_from_last() {
        let mut table = threshold_table();
        let scheduled = table.add_row().expect("seed row is complete");
        assert_eq!(scheduled.row_index, 1);
        assert_eq!(scheduled.col_id, "high");

        assert_eq!(table.row_count(), 2);
        assert!(approx_eq(number_at(&table, 1, "low").unwrap(), 1000.1));
        assert!(table.rows()[1].get("high").is_empty());
        assert_eq!(table.rows()[1].get("amount"), &CellValue::from("90899"));
        // the source row is untouched
        assert_eq!(table.rows()[0], seed_row());
        assert_eq!(table.surface().rows.len(), 2);
    }

    #[test]
    fn test_add_row_blocked_by_incomplete_row() {
        let mut table = threshold_table();
        table.add_row().unwrap();
        assert!(!table.can_add_row());
        assert!(!table.is_enabled(Action::AddRow));

        let rows_before = table.rows().to_vec();
        let pushes_before = table.surface().row_pushes;
        assert_eq!(table.add_row(), None);
        assert!(!table.perform(Action::AddRow));
        assert_eq!(table.rows(), rows_before.as_slice());
        assert_eq!(table.surface().row_pushes, pushes_before);
    }

    #[test]
    fn test_add_row_on_empty_table_is_noop() {
        let mut table = table_with(Vec::new());
        assert!(table.can_add_row());
        assert_eq!(table.add_row(), None);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.scheduled_edit(), None);
    }

    #[test]
    fn test_zero_low_counts_as_complete() {
        let row = RowRecord::new()
            .with("amount", 5.0)
            .with("low", 0.0)
            .with("high", 10.0);
        let table = table_with(vec![row]);
        assert!(table.can_add_row());
    }

    #[test]
    fn test_scheduled_edit_fires_after_render() {
        let mut table = threshold_table();
        table.add_row().unwrap();
        assert!(table.active_editor().is_none());
        assert_eq!(table.editing_cell(), None);

        let focus = table.render_complete();
        assert_eq!(focus, Some(FocusAction::SelectAll));
        assert_eq!(table.editing_cell(), Some(CellPosition::new(1, "high")));
        assert_eq!(table.surface().focused, Some(CellPosition::new(1, "high")));
        assert_eq!(table.surface().start_requests.len(), 1);
        assert_eq!(table.scheduled_edit(), None);

        // fires once
        assert_eq!(table.render_complete(), None);
    }

    #[test]
    fn test_stale_scheduled_edit_dropped() {
        let mut table = threshold_table();
        table.set_actions(Box::new(RecordingActions::default()));
        table.add_row().unwrap();
        assert!(table.perform(Action::ClearAll));
        assert_eq!(table.row_count(), 0);

        assert_eq!(table.render_complete(), None);
        assert!(table.active_editor().is_none());
        assert!(table.surface().start_requests.is_empty());
    }

    // ================================================================
    // Cancel
    // ================================================================

    #[test]
    fn test_cancel_restores_original_rows() {
        let mut table = threshold_table();
        table.begin_edit(0, "amount", None).unwrap();
        table.input("5");
        assert_eq!(table.stop_editing(false), CommitOutcome::Committed);
        table.add_row().unwrap();

        table.cancel();
        assert_eq!(table.rows(), &[seed_row()]);
        assert_eq!(table.surface().rows, vec![seed_row()]);
        assert_eq!(table.scheduled_edit(), None);
        assert_eq!(table.render_complete(), None);
    }

    #[test]
    fn test_cancel_drops_open_session() {
        let mut table = threshold_table();
        table.begin_edit(0, "high", None).unwrap();
        table.input("5000");
        table.cancel();
        assert!(table.active_editor().is_none());
        assert_eq!(table.editing_cell(), None);
        assert_eq!(table.rows()[0].get("high"), &CellValue::from("1000"));
    }

    // ================================================================
    // Editing
    // ================================================================

    #[test]
    fn test_read_only_and_unknown_cells_do_not_open() {
        let mut table = threshold_table();
        assert_eq!(table.begin_edit(0, "low", None), None);
        assert_eq!(table.begin_edit(0, "missing", None), None);
        assert_eq!(table.begin_edit(7, "high", None), None);
        assert_eq!(table.start_editing(7, "high", None), None);
        assert!(table.active_editor().is_none());
    }

    #[test]
    fn test_enter_stops_exactly_once() {
        let mut table = threshold_table();
        table.begin_edit(0, "high", Some("2")).unwrap();
        table.input("2000");

        assert_eq!(table.key_down("Enter"), KeyDisposition::StopEditing);
        assert_eq!(table.surface().stop_signals, 1);
        assert!(table.active_editor().is_none());
        assert_eq!(number_at(&table, 0, "high"), Some(2000.0));

        // a second Enter after the session closed does nothing
        assert_eq!(table.key_down("Enter"), KeyDisposition::PassThrough);
        assert_eq!(table.surface().stop_signals, 1);
    }

    #[test]
    fn test_letters_never_reach_the_draft() {
        let mut table = threshold_table();
        table.begin_edit(0, "high", None).unwrap();
        assert_eq!(table.key_down("a"), KeyDisposition::Suppress);
        assert_eq!(table.key_down("e"), KeyDisposition::Suppress);
        assert_eq!(table.active_editor().unwrap().draft(), Some("1000"));
    }

    #[test]
    fn test_invalid_commit_keeps_stored_value() {
        let mut table = threshold_table();
        table.add_row().unwrap();
        table.render_complete().unwrap();

        assert!(table.input("999"));
        assert!(table.is_invalid());
        assert_eq!(table.error_message(), Some(DEFAULT_INVALID_MESSAGE));

        let pushes = table.surface().row_pushes;
        assert_eq!(table.stop_editing(false), CommitOutcome::Rejected);
        assert!(table.rows()[1].get("high").is_empty());
        assert_eq!(table.surface().row_pushes, pushes);
        assert_eq!(table.editing_cell(), None);
    }

    #[test]
    fn test_valid_commit_enables_next_row() {
        let mut table = threshold_table();
        table.add_row().unwrap();
        table.render_complete().unwrap();
        assert!(!table.input("2000"));
        assert_eq!(table.error_message(), None);
        assert_eq!(table.stop_editing(false), CommitOutcome::Committed);
        assert_eq!(number_at(&table, 1, "high"), Some(2000.0));
        assert!(table.can_add_row());

        table.add_row().unwrap();
        assert!(approx_eq(number_at(&table, 2, "low").unwrap(), 2000.1));
    }

    #[test]
    fn test_fractional_high_cannot_commit_below_low() {
        let row = RowRecord::new()
            .with("amount", "90899")
            .with("low", "1000.1")
            .with("high", "1000.5");
        let mut table = table_with(vec![row]);

        assert_eq!(table.begin_edit(0, "high", Some("F2")), Some(FocusAction::CaretAt(6)));
        assert!(table.is_invalid());
        assert_eq!(table.key_down("Enter"), KeyDisposition::StopEditing);
        assert_eq!(table.rows()[0].get("high"), &CellValue::from("1000.5"));

        table.begin_edit(0, "high", Some("F2")).unwrap();
        table.input("1001.5");
        assert_eq!(table.stop_editing(false), CommitOutcome::Committed);
        let high = number_at(&table, 0, "high").unwrap();
        let low = number_at(&table, 0, "low").unwrap();
        assert_eq!(high, 1001.0);
        assert!(high > low);
    }

    #[test]
    fn test_cancelled_stop_writes_nothing() {
        let mut table = threshold_table();
        table.begin_edit(0, "high", None).unwrap();
        table.input("5000");
        assert_eq!(table.stop_editing(true), CommitOutcome::Ignored);
        assert_eq!(table.rows()[0].get("high"), &CellValue::from("1000"));
        assert_eq!(table.stop_editing(false), CommitOutcome::Ignored);
    }

    #[test]
    fn test_opening_second_editor_commits_first() {
        let mut table = threshold_table();
        table.begin_edit(0, "amount", None).unwrap();
        table.input("42");
        table.begin_edit(0, "high", None).unwrap();
        assert_eq!(number_at(&table, 0, "amount"), Some(42.0));
        assert_eq!(table.editing_cell(), Some(CellPosition::new(0, "high")));
    }

    // ================================================================
    // Text cells
    // ================================================================

    #[test]
    fn test_text_predicate_rejects_commit() {
        let mut columns = threshold_columns();
        columns.push(ColumnDef::new("note", "Note").editable(true));
        let row = seed_row().with("note", "ok");
        let mut table = TableController::new(
            vec![row],
            columns,
            GridOptions::default(),
            MemorySurface::new(),
        )
        .unwrap();
        let predicate: RowPredicate = Rc::new(|_: &RowRecord, value: &str| !value.trim().is_empty());
        table.set_text_validator("note", predicate);

        table.begin_edit(0, "note", None).unwrap();
        assert_eq!(table.key_down("x"), KeyDisposition::Native);
        table.input("   ");
        assert!(!table.is_invalid());
        assert_eq!(table.stop_editing(false), CommitOutcome::Rejected);
        assert_eq!(table.rows()[0].get("note"), &CellValue::from("ok"));

        // the cell stays in edit mode with its message
        assert!(table.is_invalid());
        assert_eq!(table.error_message(), Some(DEFAULT_TEXT_ERROR_MESSAGE));
        assert_eq!(table.editing_cell(), Some(CellPosition::new(0, "note")));

        // Enter on the bad draft keeps it open too
        assert_eq!(table.key_down("Enter"), KeyDisposition::StopEditing);
        assert!(table.active_editor().is_some());

        // typing clears the marker
        table.input("fine");
        assert!(!table.is_invalid());
        assert_eq!(table.error_message(), None);
        assert_eq!(table.stop_editing(false), CommitOutcome::Committed);
        assert_eq!(table.rows()[0].get("note"), &CellValue::from("fine"));
    }

    #[test]
    fn test_rejected_text_abandoned_when_moving_on() {
        let mut columns = threshold_columns();
        columns.push(ColumnDef::new("note", "Note").editable(true));
        let mut table = TableController::new(
            vec![seed_row().with("note", "ok")],
            columns,
            GridOptions::default(),
            MemorySurface::new(),
        )
        .unwrap();
        let predicate: RowPredicate = Rc::new(|_: &RowRecord, value: &str| !value.is_empty());
        table.set_text_validator("note", predicate);

        table.begin_edit(0, "note", None).unwrap();
        table.input("");
        assert_eq!(table.stop_editing(false), CommitOutcome::Rejected);

        table.begin_edit(0, "high", None).unwrap();
        assert_eq!(table.editing_cell(), Some(CellPosition::new(0, "high")));
        assert_eq!(table.rows()[0].get("note"), &CellValue::from("ok"));
        assert!(!table.is_invalid());
    }

    #[test]
    fn test_text_error_message_default() {
        assert_eq!(GridOptions::default().text_error_message, DEFAULT_TEXT_ERROR_MESSAGE);
    }

    // ================================================================
    // Host actions
    // ================================================================

    #[test]
    fn test_save_commits_open_session_first() {
        let actions = RecordingActions::default();
        let saved = actions.saved.clone();
        let mut table = threshold_table();
        table.set_actions(Box::new(actions));

        table.begin_edit(0, "high", None).unwrap();
        table.input("3000");
        assert!(table.perform(Action::Save));

        let saved = saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0][0].get("high"), &CellValue::Number(3000.0));
        assert!(table.active_editor().is_none());
    }

    #[test]
    fn test_clear_hooks_rewrite_rows() {
        let actions = RecordingActions::default();
        let calls = actions.calls.clone();
        let mut table = threshold_table();
        table.set_actions(Box::new(actions));

        assert!(table.perform(Action::ClearRates));
        assert!(table.rows()[0].get("amount").is_empty());
        assert_eq!(table.surface().rows, table.rows());
        assert!(table.perform(Action::ClearThreshold));
        assert_eq!(*calls.borrow(), vec!["clearRates", "clearThreshold"]);
    }

    #[test]
    fn test_default_actions_do_nothing() {
        let mut table = threshold_table();
        for action in [Action::ClearRates, Action::ClearThreshold, Action::ClearAll, Action::Save] {
            assert!(table.perform(action));
        }
        assert_eq!(table.rows(), &[seed_row()]);
    }

    #[test]
    fn test_add_row_commits_open_edit_first() {
        let mut table = threshold_table();
        table.add_row().unwrap();
        table.render_complete().unwrap();
        table.input("2000");
        assert!(!table.is_enabled(Action::AddRow));

        assert!(table.perform(Action::AddRow));
        assert_eq!(number_at(&table, 1, "high"), Some(2000.0));
        assert_eq!(table.row_count(), 3);
        assert!(approx_eq(number_at(&table, 2, "low").unwrap(), 2000.1));
    }

    #[test]
    fn test_add_row_refused_after_rejected_commit() {
        let mut table = threshold_table();
        table.add_row().unwrap();
        table.render_complete().unwrap();
        table.input("5");
        assert!(!table.perform(Action::AddRow));
        assert_eq!(table.row_count(), 2);
        assert!(table.active_editor().is_none());
    }

    #[test]
    fn test_perform_add_row_and_cancel() {
        let mut table = threshold_table();
        assert!(table.perform(Action::AddRow));
        assert_eq!(table.row_count(), 2);
        assert!(table.perform(Action::Cancel));
        assert_eq!(table.row_count(), 1);
    }
}
