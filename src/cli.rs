use std::path::PathBuf;

use clap::Parser;

/// Filter rows of a CSV file and print them, or print one aggregate.
#[derive(Parser, Debug)]
#[command(name = "csv-query", version)]
#[command(about = "Filter and aggregate CSV files")]
pub struct Args {
    /// CSV file with a header row (`.tsv` files are read tab-separated)
    #[arg(long, value_name = "PATH")]
    pub file: PathBuf,

    /// Filter condition: `col>num`, `col<num` or `col=text`
    #[arg(long = "where", value_name = "EXPR")]
    pub condition: Option<String>,

    /// Aggregate: `col=avg`, `col=min` or `col=max`
    #[arg(long, value_name = "EXPR")]
    pub aggregate: Option<String>,
}
