use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow::util::pretty::pretty_format_batches;

use crate::data::condition::AggregateSpec;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Dataset → Arrow
// ---------------------------------------------------------------------------

/// One Utf8 column per header, in header order.
pub fn dataset_batch(dataset: &Dataset) -> Result<RecordBatch> {
    let fields: Vec<Field> = dataset
        .column_names
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, false))
        .collect();

    let columns: Vec<ArrayRef> = dataset
        .column_names
        .iter()
        .map(|name| {
            let values = dataset
                .records
                .iter()
                .map(|record| record.get(name).unwrap_or(""));
            Arc::new(StringArray::from_iter_values(values)) as ArrayRef
        })
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(dataset.len()));
    RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)
        .context("building table")
}

/// A single nullable Float64 cell headed `op(column)`.
pub fn aggregate_batch(spec: &AggregateSpec, value: Option<f64>) -> Result<RecordBatch> {
    let schema = Schema::new(vec![Field::new(spec.label(), DataType::Float64, true)]);
    let column: ArrayRef = Arc::new(Float64Array::from(vec![value]));
    RecordBatch::try_new(Arc::new(schema), vec![column]).context("building aggregate table")
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Print the rows as a table. A dataset without columns prints nothing.
pub fn write_dataset<W: Write>(out: &mut W, dataset: &Dataset) -> Result<()> {
    if dataset.column_names.is_empty() {
        log::debug!("no columns, nothing to print");
        return Ok(());
    }
    write_batch(out, &dataset_batch(dataset)?)
}

/// Print a single aggregate result. `None` renders as an empty cell.
pub fn write_aggregate<W: Write>(
    out: &mut W,
    spec: &AggregateSpec,
    value: Option<f64>,
) -> Result<()> {
    write_batch(out, &aggregate_batch(spec, value)?)
}

fn write_batch<W: Write>(out: &mut W, batch: &RecordBatch) -> Result<()> {
    let table = pretty_format_batches(std::slice::from_ref(batch)).context("formatting table")?;
    writeln!(out, "{table}").context("writing table")?;
    Ok(())
}
