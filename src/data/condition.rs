use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

use super::model::{CellValue, parse_number};

// ---------------------------------------------------------------------------
// Filter condition: `column>number`, `column<number`, `column=text`
// ---------------------------------------------------------------------------

/// Comparison operator of a `--where` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Gt,
    Lt,
    Eq,
}

impl Operator {
    /// Operators in the order the parser looks for them.
    const PRECEDENCE: [Operator; 3] = [Operator::Gt, Operator::Lt, Operator::Eq];

    pub fn symbol(self) -> char {
        match self {
            Operator::Gt => '>',
            Operator::Lt => '<',
            Operator::Eq => '=',
        }
    }

    /// Numeric comparison `lhs <op> rhs`.
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Operator::Gt => lhs > rhs,
            Operator::Lt => lhs < rhs,
            Operator::Eq => lhs == rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A parsed `--where` expression.
///
/// For `>` and `<` the value is always [`CellValue::Number`]; for `=` it is
/// kept as [`CellValue::Text`] and only coerced when rows are compared.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub operator: Operator,
    pub value: CellValue,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.column, self.operator, self.value)
    }
}

/// Parse a `--where` expression.
///
/// `>` is checked first, then `<`, then `=`; the first operator found wins,
/// even if the value contains another one. The text must split into exactly
/// two parts around that operator, so `a>b>c` is rejected.
pub fn parse_where(text: &str) -> Result<Condition, QueryError> {
    let operator = Operator::PRECEDENCE
        .into_iter()
        .find(|op| text.contains(op.symbol()))
        .ok_or_else(|| QueryError::UnsupportedOperator(text.to_string()))?;

    let (column, raw_value) = split_pair(text, operator.symbol()).ok_or_else(|| {
        QueryError::MalformedCondition {
            text: text.to_string(),
            operator: operator.symbol(),
        }
    })?;

    let value = match operator {
        Operator::Eq => CellValue::Text(raw_value.to_string()),
        Operator::Gt | Operator::Lt => CellValue::Number(
            parse_number(raw_value)
                .ok_or_else(|| QueryError::NonNumericLiteral(raw_value.to_string()))?,
        ),
    };

    Ok(Condition {
        column: column.to_string(),
        operator,
        value,
    })
}

/// Split on every `sep` and return both trimmed halves if there are exactly two.
fn split_pair(text: &str, sep: char) -> Option<(&str, &str)> {
    let mut parts = text.split(sep);
    let left = parts.next()?;
    let right = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((left.trim(), right.trim()))
}

// ---------------------------------------------------------------------------
// Aggregate: `column=avg|min|max`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Avg,
    Min,
    Max,
}

impl FromStr for AggregateOp {
    type Err = QueryError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avg" => Ok(AggregateOp::Avg),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            other => Err(QueryError::UnsupportedAggregate(other.to_string())),
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregateOp::Avg => "avg",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        };
        f.write_str(name)
    }
}

/// A parsed `--aggregate` expression. The operation comes first, mirroring
/// the `(operation, column)` pair returned by [`AggregateSpec::parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSpec {
    pub operation: AggregateOp,
    pub column: String,
}

impl AggregateSpec {
    /// `(operation, column)`, the reverse of the `column=operation` input.
    pub fn parts(&self) -> (AggregateOp, &str) {
        (self.operation, &self.column)
    }

    /// Table header for the result, e.g. `avg(price)`.
    pub fn label(&self) -> String {
        format!("{}({})", self.operation, self.column)
    }
}

/// Parse an `--aggregate` expression of the form `column=operation`.
pub fn parse_aggregate(text: &str) -> Result<AggregateSpec, QueryError> {
    let (column, operation) =
        split_pair(text, '=').ok_or_else(|| QueryError::MalformedAggregate(text.to_string()))?;

    Ok(AggregateSpec {
        operation: operation.parse()?,
        column: column.to_string(),
    })
}
