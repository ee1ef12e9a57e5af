use crate::error::QueryError;

use super::condition::AggregateOp;
use super::model::Record;

/// Reduce `column` over `records` to a single number.
///
/// Every value must be numeric (`nan` is not); one bad cell fails the whole
/// aggregate.
/// Returns `Ok(None)` for an empty input.
pub fn aggregate(
    records: &[Record],
    operation: AggregateOp,
    column: &str,
) -> Result<Option<f64>, QueryError> {
    let values = records
        .iter()
        .enumerate()
        .map(|(row, record)| record.number(column, row))
        .collect::<Result<Vec<f64>, _>>()?;

    if values.is_empty() {
        return Ok(None);
    }

    let result = match operation {
        AggregateOp::Avg => values.iter().sum::<f64>() / values.len() as f64,
        AggregateOp::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        AggregateOp::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };
    log::debug!("{operation}({column}) over {} rows = {result}", values.len());
    Ok(Some(result))
}
