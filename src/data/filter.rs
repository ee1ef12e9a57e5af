use crate::error::QueryError;

use super::condition::{Condition, Operator, parse_where};
use super::model::{CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Row predicate
// ---------------------------------------------------------------------------

/// Whether `record` satisfies `condition`.
///
/// * Cell and value both numeric → numeric comparison for every operator.
/// * Otherwise `=` compares the two as strings, while `>` and `<` never
///   match (text has no ordering here).
///
/// Fails with [`QueryError::MissingColumn`] when the row lacks the column.
pub fn matches(record: &Record, condition: &Condition) -> Result<bool, QueryError> {
    let cell = CellValue::coerce(record.value(&condition.column)?);

    if let (Some(lhs), Some(rhs)) = (cell.as_f64(), condition.value.as_f64()) {
        return Ok(condition.operator.compare(lhs, rhs));
    }

    Ok(match condition.operator {
        Operator::Eq => cell.to_string() == condition.value.to_string(),
        Operator::Gt | Operator::Lt => false,
    })
}

// ---------------------------------------------------------------------------
// Dataset filter
// ---------------------------------------------------------------------------

/// Keep the rows matching `condition`, in their original order.
pub fn filter_records(dataset: &Dataset, condition: &Condition) -> Result<Dataset, QueryError> {
    let mut kept = Vec::new();
    for record in &dataset.records {
        if matches(record, condition)? {
            kept.push(record.clone());
        }
    }
    log::info!(
        "filter `{condition}` kept {} of {} rows",
        kept.len(),
        dataset.len()
    );
    Ok(dataset.with_records(kept))
}

/// Parse `condition` once and filter `dataset` with it.
pub fn apply_filter(dataset: &Dataset, condition: &str) -> Result<Dataset, QueryError> {
    let condition = parse_where(condition)?;
    filter_records(dataset, &condition)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    fn cond(column: &str, operator: Operator, value: CellValue) -> Condition {
        Condition {
            column: column.into(),
            operator,
            value,
        }
    }

    fn phones() -> Dataset {
        Dataset::new(
            vec!["price".into(), "brand".into()],
            vec![
                row(&[("price", "100"), ("brand", "apple")]),
                row(&[("price", "200"), ("brand", "samsung")]),
                row(&[("price", "50"), ("brand", "apple")]),
            ],
        )
    }

    #[test]
    fn numeric_comparisons() {
        let r = row(&[("price", "100")]);
        assert!(matches(&r, &cond("price", Operator::Gt, CellValue::Number(50.0))).unwrap());
        assert!(matches(&r, &cond("price", Operator::Lt, CellValue::Number(200.0))).unwrap());
        assert!(matches(&r, &cond("price", Operator::Eq, CellValue::Number(100.0))).unwrap());
        assert!(!matches(&r, &cond("price", Operator::Gt, CellValue::Number(100.0))).unwrap());
    }

    #[test]
    fn equals_text_literal_compares_numerically() {
        let r = row(&[("price", "100")]);
        assert!(matches(&r, &cond("price", Operator::Eq, CellValue::Text("100.0".into()))).unwrap());
    }

    #[test]
    fn string_equality() {
        let r = row(&[("brand", "apple")]);
        assert!(matches(&r, &cond("brand", Operator::Eq, CellValue::Text("apple".into()))).unwrap());
        assert!(!matches(&r, &cond("brand", Operator::Eq, CellValue::Text("samsung".into()))).unwrap());
    }

    #[test]
    fn ordering_against_text_never_matches() {
        let r = row(&[("brand", "apple")]);
        assert!(!matches(&r, &cond("brand", Operator::Gt, CellValue::Number(1.0))).unwrap());
        assert!(!matches(&r, &cond("brand", Operator::Lt, CellValue::Number(1.0))).unwrap());
    }

    #[test]
    fn numeric_cell_against_text_literal() {
        let r = row(&[("price", "100")]);
        let abc = || CellValue::Text("abc".into());
        assert!(!matches(&r, &cond("price", Operator::Eq, abc())).unwrap());
        assert!(!matches(&r, &cond("price", Operator::Gt, abc())).unwrap());
        assert!(!matches(&r, &cond("price", Operator::Lt, abc())).unwrap());
    }

    #[test]
    fn equality_uses_numeric_semantics() {
        let zero = row(&[("x", "-0")]);
        assert!(matches(&zero, &cond("x", Operator::Eq, CellValue::Text("0".into()))).unwrap());
        let nan = row(&[("x", "nan")]);
        assert!(!matches(&nan, &cond("x", Operator::Eq, CellValue::Text("nan".into()))).unwrap());
    }

    #[test]
    fn missing_column_is_an_error() {
        let r = row(&[("brand", "apple")]);
        assert_eq!(
            matches(&r, &cond("price", Operator::Gt, CellValue::Number(1.0))).unwrap_err(),
            QueryError::MissingColumn("price".into())
        );
    }

    #[test]
    fn apply_filter_preserves_order() {
        let filtered = apply_filter(&phones(), "price>99").unwrap();
        let prices: Vec<_> = filtered
            .records
            .iter()
            .map(|r| r.get("price").unwrap())
            .collect();
        assert_eq!(prices, ["100", "200"]);
        assert_eq!(filtered.column_names, ["price", "brand"]);
    }

    #[test]
    fn apply_filter_by_text() {
        let filtered = apply_filter(&phones(), "brand=apple").unwrap();
        assert_eq!(filtered.len(), 2);
        assert!(filtered.records.iter().all(|r| r.get("brand") == Some("apple")));
    }

    #[test]
    fn text_filter_over_numeric_column_is_empty() {
        assert!(apply_filter(&phones(), "price=abc").unwrap().is_empty());
    }

    #[test]
    fn apply_filter_can_be_empty() {
        assert!(apply_filter(&phones(), "price>1000").unwrap().is_empty());
    }

    #[test]
    fn apply_filter_rejects_bad_condition() {
        assert!(apply_filter(&phones(), "price").unwrap_err().is_format_error());
    }
}
