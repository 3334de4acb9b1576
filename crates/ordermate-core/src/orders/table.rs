//! In-memory sales order table.
//!
//! The table is read-only from the engine's point of view: it is loaded once
//! by an external data-loading collaborator and then only queried.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single cell value, typed to match the column's declared content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Text columns (status, names, addresses, dates as stored).
    Text(String),
    /// Integer columns (quantities, line numbers, period ids).
    Integer(i64),
    /// Decimal columns (prices, sales amounts).
    Float(f64),
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Float(x) => write!(f, "{}", x),
        }
    }
}

/// One row of the order table, keyed by order number.
///
/// A column missing from `cells` is a null/absent cell, not an unknown
/// column; column existence is decided by the owning [`OrderTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    /// The order identifier.
    pub order_number: i64,
    /// Present cell values by column name.
    pub cells: HashMap<String, CellValue>,
}

impl OrderRow {
    /// Creates a row with no cells filled in.
    pub fn new(order_number: i64) -> Self {
        Self {
            order_number,
            cells: HashMap::new(),
        }
    }

    /// Sets a cell value, builder style.
    pub fn with_cell(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.cells.insert(column.into(), value);
        self
    }

    /// The cell value for `column`, if present.
    pub fn cell(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }
}

/// The read-only order table: a declared column set plus rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTable {
    columns: Vec<String>,
    rows: Vec<OrderRow>,
}

/// Column set of the sales order dataset, in sheet order.
pub const SALES_ORDER_COLUMNS: &[&str] = &[
    "ORDERNUMBER",
    "QUANTITYORDERED",
    "PRICEEACH",
    "ORDERLINENUMBER",
    "SALES",
    "ORDERDATE",
    "STATUS",
    "QTR_ID",
    "MONTH_ID",
    "YEAR_ID",
    "PRODUCTLINE",
    "MSRP",
    "PRODUCTCODE",
    "CUSTOMERNAME",
    "PHONE",
    "ADDRESSLINE1",
    "ADDRESSLINE2",
    "CITY",
    "STATE",
    "POSTALCODE",
    "COUNTRY",
    "TERRITORY",
    "CONTACTLASTNAME",
    "CONTACTFIRSTNAME",
    "DEALSIZE",
];

impl OrderTable {
    /// Creates an empty table with the given column set.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Creates an empty table with the sales order column set.
    pub fn sales_orders() -> Self {
        Self::new(SALES_ORDER_COLUMNS.iter().copied())
    }

    /// Appends a row. Duplicate order numbers are not rejected; lookups
    /// return the first matching row.
    pub fn push_row(&mut self, row: OrderRow) {
        self.rows.push(row);
    }

    /// Whether `column` is part of the declared column set.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// The first row with the given order number, if any.
    ///
    /// The source data model assumes order numbers are unique; if duplicates
    /// exist anyway, the first inserted row wins.
    pub fn find(&self, order_number: i64) -> Option<&OrderRow> {
        self.rows.iter().find(|r| r.order_number == order_number)
    }

    /// Declared column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
