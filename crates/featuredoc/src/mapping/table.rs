//! Conversion of raw table rows into model tables.

use crate::model::{ExampleRow, ExampleTable, Table, TableRow};

/// Split `rows` into a header row and data rows.
///
/// Callers guarantee at least one row; the grammar never yields an empty
/// table.
pub(crate) fn map_table(rows: &[Vec<String>]) -> Table {
    debug_assert!(!rows.is_empty(), "tables always have a header row");
    let mut rows = rows.iter().cloned().map(TableRow::new);
    Table {
        header_row: rows.next().unwrap_or_default(),
        data_rows: rows.collect(),
    }
}

/// Like [`map_table`], but data rows carry unset result slots.
pub(crate) fn map_example_table(rows: &[Vec<String>]) -> ExampleTable {
    debug_assert!(!rows.is_empty(), "example tables always have a header row");
    let mut rows = rows.iter().cloned();
    ExampleTable {
        header_row: rows.next().map(TableRow::new).unwrap_or_default(),
        data_rows: rows.map(ExampleRow::from_values).collect(),
    }
}
