use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::cli::Args;
use crate::data::aggregate::aggregate;
use crate::data::condition::{AggregateSpec, Condition, parse_aggregate, parse_where};
use crate::data::filter::filter_records;
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::error::QueryError;
use crate::table;

// ---------------------------------------------------------------------------
// Pipeline: load → optional filter → table or aggregate
// ---------------------------------------------------------------------------

/// What the last stage prints.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Every remaining row.
    Table,
    /// One aggregate over the remaining rows.
    Aggregate(AggregateSpec),
}

/// One invocation, with every expression already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub source: PathBuf,
    pub filter: Option<Condition>,
    pub output: Output,
}

/// Result of evaluating a [`Pipeline`], before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rows(Dataset),
    Aggregate {
        spec: AggregateSpec,
        value: Option<f64>,
    },
}

impl Pipeline {
    /// Build a pipeline from command line arguments. Empty expressions count
    /// as absent.
    pub fn from_args(args: &Args) -> Result<Self, QueryError> {
        let filter = non_empty(&args.condition).map(parse_where).transpose()?;
        let output = match non_empty(&args.aggregate) {
            Some(text) => Output::Aggregate(parse_aggregate(text)?),
            None => Output::Table,
        };
        Ok(Pipeline {
            source: args.file.clone(),
            filter,
            output,
        })
    }

    /// Load the file and run the filter and aggregate stages.
    pub fn evaluate(&self) -> Result<Outcome> {
        let mut dataset = load_file(&self.source)?;

        if let Some(condition) = &self.filter {
            dataset = filter_records(&dataset, condition)?;
        }

        Ok(match &self.output {
            Output::Table => Outcome::Rows(dataset),
            Output::Aggregate(spec) => {
                let value = aggregate(&dataset.records, spec.operation, &spec.column)?;
                Outcome::Aggregate {
                    spec: spec.clone(),
                    value,
                }
            }
        })
    }

    /// Evaluate and print the resulting table to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        self.evaluate()?.render(out)
    }
}

impl Outcome {
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        match self {
            Outcome::Rows(dataset) => table::write_dataset(out, dataset),
            Outcome::Aggregate { spec, value } => table::write_aggregate(out, spec, *value),
        }
    }
}

fn non_empty(arg: &Option<String>) -> Option<&str> {
    arg.as_deref().filter(|s| !s.is_empty())
}
