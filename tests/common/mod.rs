//! Shared fixtures for the integration tests.
//!
//! The default table mirrors the threshold page: one seed row with an
//! editable `amount`, a read-only `low` and an editable `high`.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use editgrid::controller::TableActions;
use editgrid::store::RowStore;
use editgrid::surface::MemorySurface;
use editgrid::{ColumnDef, GridOptions, RowRecord, TableController};

pub type Table = TableController<MemorySurface>;

/// Columns of the threshold page.
#[must_use]
pub fn threshold_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("amount", "Amount").numeric().width("33.33%"),
        ColumnDef::new("low", "Low"),
        ColumnDef::new("high", "High").numeric(),
    ]
}

#[must_use]
pub fn seed_row() -> RowRecord {
    RowRecord::new()
        .with("amount", "90899")
        .with("low", "0")
        .with("high", "1000")
}

#[must_use]
pub fn threshold_table() -> Table {
    table_with(vec![seed_row()])
}

#[must_use]
pub fn table_with(rows: Vec<RowRecord>) -> Table {
    TableController::new(
        rows,
        threshold_columns(),
        GridOptions::default(),
        MemorySurface::new(),
    )
    .expect("threshold columns are unique")
}

/// Numeric view of `field` in row `row_index`.
#[must_use]
pub fn number_at(table: &Table, row_index: usize, field: &str) -> Option<f64> {
    table.rows()[row_index].get(field).as_number()
}

#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Action hooks that record what they were asked to do.
#[derive(Debug, Clone, Default)]
pub struct RecordingActions {
    pub calls: Rc<RefCell<Vec<String>>>,
    pub saved: Rc<RefCell<Vec<Vec<RowRecord>>>>,
}

impl TableActions for RecordingActions {
    fn clear_rates(&mut self, store: &mut RowStore) {
        self.calls.borrow_mut().push("clearRates".to_string());
        for row in store.rows_mut() {
            row.set("amount", "");
        }
    }

    fn clear_threshold(&mut self, _store: &mut RowStore) {
        self.calls.borrow_mut().push("clearThreshold".to_string());
    }

    fn clear_all(&mut self, store: &mut RowStore) {
        self.calls.borrow_mut().push("clearAll".to_string());
        store.replace(Vec::new());
    }

    fn save(&mut self, rows: &[RowRecord]) {
        self.calls.borrow_mut().push("save".to_string());
        self.saved.borrow_mut().push(rows.to_vec());
    }
}
