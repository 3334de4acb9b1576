//! Keyword-to-column mapping for structured queries.

use serde::{Deserialize, Serialize};

/// An ordered mapping from lowercase keyword phrases to canonical column
/// names.
///
/// The order is a first-class configuration artifact: field extraction
/// returns the column of the *first* keyword phrase that occurs as a
/// substring of the lowercased input. Overlapping phrases (`"order date"`
/// vs. a hypothetical `"date"`) are therefore resolved by insertion order,
/// not by specificity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Builds a mapping from `(keyword, column)` pairs, preserving order.
    ///
    /// Keywords are stored lowercased; matching happens against lowercased
    /// input.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into()))
                .collect(),
        }
    }

    /// The built-in mapping for the sales order dataset.
    pub fn sales_orders() -> Self {
        Self::new([
            ("quantity ordered", "QUANTITYORDERED"),
            ("price", "PRICEEACH"),
            ("order line number", "ORDERLINENUMBER"),
            ("sales", "SALES"),
            ("order date", "ORDERDATE"),
            ("status", "STATUS"),
            ("quarter id", "QTR_ID"),
            ("month id", "MONTH_ID"),
            ("year id", "YEAR_ID"),
            ("product line", "PRODUCTLINE"),
            ("msrp", "MSRP"),
            ("product code", "PRODUCTCODE"),
            ("customer name", "CUSTOMERNAME"),
            ("phone", "PHONE"),
            ("address line 1", "ADDRESSLINE1"),
            ("address line 2", "ADDRESSLINE2"),
            ("city", "CITY"),
            ("state", "STATE"),
            ("postal code", "POSTALCODE"),
            ("country", "COUNTRY"),
            ("territory", "TERRITORY"),
            ("contact last name", "CONTACTLASTNAME"),
            ("contact first name", "CONTACTFIRSTNAME"),
            ("deal size", "DEALSIZE"),
        ])
    }

    /// Returns the column of the first keyword contained in `text_lower`.
    ///
    /// `text_lower` must already be lowercased; [`crate::intent::parse`]
    /// takes care of that.
    pub fn match_field(&self, text_lower: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(keyword, _)| text_lower.contains(keyword.as_str()))
            .map(|(_, column)| column.as_str())
    }

    /// Iterates the `(keyword, column)` pairs in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries in the mapping.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::sales_orders()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins_by_insertion_order() {
        let map = FieldMap::new([("order date", "ORDERDATE"), ("date", "DATE")]);
        // Both keywords are substrings; the earlier entry wins.
        assert_eq!(map.match_field("what is the order date"), Some("ORDERDATE"));

        let reversed = FieldMap::new([("date", "DATE"), ("order date", "ORDERDATE")]);
        assert_eq!(reversed.match_field("what is the order date"), Some("DATE"));
    }

    #[test]
    fn keywords_are_lowercased_on_construction() {
        let map = FieldMap::new([("Status", "STATUS")]);
        assert_eq!(map.match_field("status of my order"), Some("STATUS"));
    }

    #[test]
    fn sales_orders_mapping_is_complete() {
        let map = FieldMap::sales_orders();
        assert_eq!(map.len(), 24);
        assert_eq!(map.match_field("status please"), Some("STATUS"));
        assert_eq!(map.match_field("what is the msrp"), Some("MSRP"));
    }

    #[test]
    fn price_shadows_nothing_but_matches_substrings() {
        // "price" is matched as a plain substring, so "price each" also hits
        // PRICEEACH via the "price" keyword.
        let map = FieldMap::sales_orders();
        assert_eq!(map.match_field("price each of order"), Some("PRICEEACH"));
    }
}
