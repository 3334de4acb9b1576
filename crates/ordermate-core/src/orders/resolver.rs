//! Order detail resolution.
//!
//! Classifies a `(order number, field)` query against the order table into
//! exactly one of four outcomes. Misses are outcomes, not errors.

use super::table::{CellValue, OrderTable};

/// The four-way classification of a structured query result.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The cell exists and holds a value.
    Found(CellValue),
    /// No row with the given order number.
    OrderNotFound,
    /// The field is not a recognized column of the table.
    FieldNotFound,
    /// The row exists and the column is recognized, but the cell is null.
    FieldValueMissing,
}

/// Resolves one order detail query against the table.
///
/// Deterministic, no retries. If duplicate order numbers exist, the first
/// matching row is consulted (see [`OrderTable::find`]).
pub fn resolve(order_number: i64, field: &str, table: &OrderTable) -> LookupOutcome {
    let Some(row) = table.find(order_number) else {
        return LookupOutcome::OrderNotFound;
    };

    if !table.has_column(field) {
        return LookupOutcome::FieldNotFound;
    }

    match row.cell(field) {
        Some(value) => LookupOutcome::Found(value.clone()),
        None => LookupOutcome::FieldValueMissing,
    }
}
