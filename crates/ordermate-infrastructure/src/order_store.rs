//! JSON order-table loader.
//!
//! The order table is loaded once at startup from a JSON array of row
//! objects and handed to the engine as a read-only in-memory table. A
//! `null` (or absent) cell stays absent, which the resolver classifies as
//! `FieldValueMissing`.

use ordermate_core::orders::{CellValue, OrderRow, OrderTable};
use ordermate_core::{OrdermateError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Name of the primary key column.
const ORDER_NUMBER_COLUMN: &str = "ORDERNUMBER";

/// Loads the order table from a JSON file.
///
/// # Errors
///
/// Fails on unreadable files, invalid JSON, rows without an integer
/// `ORDERNUMBER`, or cell values that are not strings, numbers, or null.
pub fn load_order_table(path: impl AsRef<Path>) -> Result<OrderTable> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let table = order_table_from_json(&content)?;
    tracing::info!(path = %path.display(), rows = table.len(), "order table loaded");
    Ok(table)
}

/// Builds the order table from JSON text (an array of row objects).
pub fn order_table_from_json(json: &str) -> Result<OrderTable> {
    let rows: Vec<Value> = serde_json::from_str(json)?;
    let mut table = OrderTable::sales_orders();

    for (idx, value) in rows.into_iter().enumerate() {
        table.push_row(row_from_value(idx, value)?);
    }

    Ok(table)
}

fn row_from_value(idx: usize, value: Value) -> Result<OrderRow> {
    let Value::Object(fields) = value else {
        return Err(OrdermateError::internal(format!(
            "order row {} is not an object",
            idx
        )));
    };

    let order_number = fields
        .get(ORDER_NUMBER_COLUMN)
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            OrdermateError::internal(format!(
                "order row {} has no integer {}",
                idx, ORDER_NUMBER_COLUMN
            ))
        })?;

    let mut row = OrderRow::new(order_number);
    for (column, value) in fields {
        match cell_from_value(&value) {
            Ok(Some(cell)) => {
                row.cells.insert(column, cell);
            }
            Ok(None) => {} // null cell stays absent
            Err(_) => {
                return Err(OrdermateError::internal(format!(
                    "order row {} column {} holds an unsupported value: {}",
                    idx, column, value
                )));
            }
        }
    }

    Ok(row)
}

fn cell_from_value(value: &Value) -> std::result::Result<Option<CellValue>, ()> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(CellValue::Text(s.clone()))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(CellValue::Integer(i)))
            } else if let Some(f) = n.as_f64() {
                Ok(Some(CellValue::Float(f)))
            } else {
                Err(())
            }
        }
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordermate_core::orders::{resolve, LookupOutcome};

    const SAMPLE: &str = r#"[
        {
            "ORDERNUMBER": 10107,
            "QUANTITYORDERED": 30,
            "PRICEEACH": 95.7,
            "STATUS": "Shipped",
            "ADDRESSLINE2": null
        },
        {
            "ORDERNUMBER": 10121,
            "STATUS": "Cancelled"
        }
    ]"#;

    #[test]
    fn loads_rows_with_typed_cells() {
        let table = order_table_from_json(SAMPLE).unwrap();
        assert_eq!(table.len(), 2);

        let row = table.find(10107).unwrap();
        assert_eq!(row.cell("STATUS"), Some(&CellValue::Text("Shipped".into())));
        assert_eq!(row.cell("QUANTITYORDERED"), Some(&CellValue::Integer(30)));
        assert_eq!(row.cell("PRICEEACH"), Some(&CellValue::Float(95.7)));
        assert_eq!(
            row.cell(ORDER_NUMBER_COLUMN),
            Some(&CellValue::Integer(10107))
        );
    }

    #[test]
    fn null_cells_resolve_as_missing() {
        let table = order_table_from_json(SAMPLE).unwrap();
        assert_eq!(
            resolve(10107, "ADDRESSLINE2", &table),
            LookupOutcome::FieldValueMissing
        );
    }

    #[test]
    fn row_without_order_number_is_rejected() {
        let err = order_table_from_json(r#"[{"STATUS": "Shipped"}]"#).unwrap_err();
        assert!(err.to_string().contains("ORDERNUMBER"));
    }

    #[test]
    fn unsupported_cell_value_is_rejected() {
        let err = order_table_from_json(r#"[{"ORDERNUMBER": 1, "STATUS": ["a"]}]"#).unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("orders.json");
        fs::write(&path, SAMPLE).unwrap();

        let table = load_order_table(&path).unwrap();
        assert_eq!(
            resolve(10121, "STATUS", &table),
            LookupOutcome::Found(CellValue::Text("Cancelled".into()))
        );
    }
}
