//! Step tables and outline example tables.

use derive_more::{Deref, From, IntoIterator};

/// One row of cell values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deref, From, IntoIterator)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableRow(Vec<String>);

impl TableRow {
    /// Wrap a list of cell values.
    #[must_use]
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    /// Cell values in column order.
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.0
    }
}

/// A data table attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Table {
    /// First row of the source table.
    pub header_row: TableRow,
    /// Remaining rows in source order.
    pub data_rows: Vec<TableRow>,
}

/// Outcome of running one example cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TestResult {
    /// The example passed.
    Passed,
    /// The example failed.
    Failed,
    /// The example ran without a verdict.
    Inconclusive,
}

/// A cell of an example row together with its execution result slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExampleCell {
    /// Cell text.
    pub value: String,
    /// Result filled in by whoever runs the examples; `None` until then.
    pub result: Option<TestResult>,
}

impl ExampleCell {
    /// Create a cell with an unset result.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            result: None,
        }
    }
}

/// A data row of an example table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deref, From, IntoIterator)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExampleRow(Vec<ExampleCell>);

impl ExampleRow {
    /// Build a row whose result slots are all unset.
    #[must_use]
    pub fn from_values(values: Vec<String>) -> Self {
        Self(values.into_iter().map(ExampleCell::new).collect())
    }

    /// Cells in column order.
    #[must_use]
    pub fn cells(&self) -> &[ExampleCell] {
        &self.0
    }

    /// Mutable access to the cells, for recording results.
    pub fn cells_mut(&mut self) -> &mut [ExampleCell] {
        &mut self.0
    }
}

/// The table of an `Examples:` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExampleTable {
    /// Column names.
    pub header_row: TableRow,
    /// Example rows in source order.
    pub data_rows: Vec<ExampleRow>,
}
