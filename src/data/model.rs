use std::collections::BTreeMap;
use std::fmt;

use crate::error::QueryError;

// ---------------------------------------------------------------------------
// CellValue – a cell or literal after best-effort coercion
// ---------------------------------------------------------------------------

/// A loosely-typed value: numeric when the text parses as a float, text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Coerce raw text, falling back to `Text` when it is not a number.
    pub fn coerce(raw: &str) -> Self {
        match parse_number(raw) {
            Some(v) => CellValue::Number(v),
            None => CellValue::Text(raw.to_string()),
        }
    }

    /// Numeric view of the value. `Text` is re-coerced, so a literal kept as
    /// text at parse time can still compare numerically.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            CellValue::Text(s) => parse_number(s),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Parse a float, ignoring surrounding whitespace.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Record – one row of the CSV file
// ---------------------------------------------------------------------------

/// A single row: column name → cell text, exactly as read from the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    cells: BTreeMap<String, String>,
}

impl Record {
    pub fn new(cells: BTreeMap<String, String>) -> Self {
        Record { cells }
    }

    /// Cell text for `column`, if the row has it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Cell text for `column`, failing when the column does not exist.
    pub fn value(&self, column: &str) -> Result<&str, QueryError> {
        self.get(column)
            .ok_or_else(|| QueryError::MissingColumn(column.to_string()))
    }

    /// Cell value for `column` as a float. `row` is only used for the error.
    /// `nan` counts as non-numeric.
    pub fn number(&self, column: &str, row: usize) -> Result<f64, QueryError> {
        let raw = self.value(column)?;
        CellValue::coerce(raw)
            .as_f64()
            .filter(|v| !v.is_nan())
            .ok_or_else(|| QueryError::NotNumeric {
                row,
                column: column.to_string(),
                value: raw.to_string(),
            })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Dataset – the rows currently in scope
// ---------------------------------------------------------------------------

/// Rows in file order plus the header, which fixes column order for output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Column names in header order, without duplicates.
    pub column_names: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(column_names: Vec<String>, records: Vec<Record>) -> Self {
        Dataset {
            column_names,
            records,
        }
    }

    /// Same header, different rows. Used by the filter stage.
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        Dataset {
            column_names: self.column_names.clone(),
            records,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_numbers_and_text() {
        assert_eq!(CellValue::coerce("4.5"), CellValue::Number(4.5));
        assert_eq!(CellValue::coerce(" 100 "), CellValue::Number(100.0));
        assert_eq!(CellValue::coerce("apple"), CellValue::Text("apple".into()));
        assert_eq!(CellValue::coerce(""), CellValue::Text(String::new()));
    }

    #[test]
    fn text_literal_is_recoerced() {
        assert_eq!(CellValue::Text("100".into()).as_f64(), Some(100.0));
        assert_eq!(CellValue::Text("abc".into()).as_f64(), None);
    }

    #[test]
    fn record_lookup() {
        let record: Record = [("price", "100"), ("brand", "apple")].into_iter().collect();
        assert_eq!(record.value("brand"), Ok("apple"));
        assert_eq!(
            record.value("rating"),
            Err(QueryError::MissingColumn("rating".into()))
        );
        assert_eq!(record.number("price", 0), Ok(100.0));
        let special: Record = [("t", "nan"), ("u", "inf")].into_iter().collect();
        assert!(matches!(
            special.number("t", 0),
            Err(QueryError::NotNumeric { .. })
        ));
        assert_eq!(special.number("u", 0), Ok(f64::INFINITY));
        assert_eq!(
            record.number("brand", 3),
            Err(QueryError::NotNumeric {
                row: 3,
                column: "brand".into(),
                value: "apple".into(),
            })
        );
    }
}
