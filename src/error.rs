use thiserror::Error;

/// Errors raised while parsing expressions or evaluating them against rows.
///
/// I/O and CSV reader failures are not part of this enum; the loader reports
/// them through `anyhow` with file context attached.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    // -- malformed expressions --
    #[error("unsupported condition `{0}`: only >, < and = are supported")]
    UnsupportedOperator(String),

    #[error("condition `{text}` must have the form column{operator}value")]
    MalformedCondition { text: String, operator: char },

    #[error("condition value `{0}` is not a number")]
    NonNumericLiteral(String),

    #[error("aggregate `{0}` must have the form column=operation")]
    MalformedAggregate(String),

    #[error("unsupported aggregate operation `{0}`: only avg, min and max are supported")]
    UnsupportedAggregate(String),

    // -- evaluation --
    #[error("column `{0}` not found")]
    MissingColumn(String),

    #[error("row {row}: value `{value}` in column `{column}` is not a number")]
    NotNumeric {
        row: usize,
        column: String,
        value: String,
    },
}

impl QueryError {
    /// Whether the error comes from a malformed `--where` / `--aggregate` expression.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            QueryError::UnsupportedOperator(_)
                | QueryError::MalformedCondition { .. }
                | QueryError::NonNumericLiteral(_)
                | QueryError::MalformedAggregate(_)
                | QueryError::UnsupportedAggregate(_)
        )
    }
}
