//! Filter and aggregate CSV files from the command line.
//!
//! `csv-query --file phones.csv --where "price>99" --aggregate "price=avg"`
//! loads the file, keeps the rows matching the condition and prints the
//! average price as a one-cell table.

pub mod cli;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod table;
