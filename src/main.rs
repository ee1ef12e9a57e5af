use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

use csv_query::cli::Args;
use csv_query::pipeline::Pipeline;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let pipeline = Pipeline::from_args(&args)?;
    log::debug!("running {pipeline:?}");

    let mut stdout = io::stdout().lock();
    pipeline.run(&mut stdout)?;
    stdout.flush()?;
    Ok(())
}
