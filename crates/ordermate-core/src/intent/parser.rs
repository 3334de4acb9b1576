//! Intent extraction from raw user text.

use super::field_map::FieldMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// An order number with at least 4 digits, on word boundaries.
static ORDER_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{4,}\b").expect("order number pattern is valid"));

/// The structured intent extracted from one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// The order identifier, if the text contained one.
    pub order_number: Option<i64>,
    /// The canonical column name, if a mapped keyword matched.
    pub field: Option<String>,
}

impl ParsedQuery {
    /// Whether both halves of the intent are present.
    pub fn is_complete(&self) -> bool {
        self.order_number.is_some() && self.field.is_some()
    }
}

/// Extracts an order number and a requested field from raw text.
///
/// The order number is the first run of 4 or more consecutive decimal digits
/// on word boundaries; only one is ever extracted even if several digit runs
/// exist. A run too long for `i64` counts as no identifier. The field is
/// resolved by [`FieldMap::match_field`] against the lowercased text.
///
/// Pure function of its inputs; no side effects.
pub fn parse(text: &str, mapping: &FieldMap) -> ParsedQuery {
    let order_number = ORDER_NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<i64>().ok());

    let field = mapping
        .match_field(&text.to_lowercase())
        .map(|column| column.to_string());

    ParsedQuery {
        order_number,
        field,
    }
}
