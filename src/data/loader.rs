use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a delimited text file. The delimiter is picked by extension:
///
/// * `.tsv` / `.tab` – tab
/// * anything else   – comma
///
/// The first row is the header.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let delimiter = match ext.as_str() {
        "tsv" | "tab" => b'\t',
        _ => b',',
    };

    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let dataset = read_delimited(file, delimiter)
        .with_context(|| format!("reading {}", path.display()))?;

    log::info!(
        "loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.column_names.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Read delimited rows from any source.
///
/// Rows may be ragged: missing trailing fields become empty strings and
/// extra fields are dropped. When a header name repeats, the column keeps
/// its first position and the row keeps the last value.
pub fn read_delimited<R: io::Read>(source: R, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV data row {}", row_no + 1))?;

        let cells: BTreeMap<String, String> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), row.get(idx).unwrap_or("").to_string()))
            .collect();

        records.push(Record::new(cells));
    }

    let mut column_names: Vec<String> = Vec::with_capacity(headers.len());
    for name in headers {
        if !column_names.contains(&name) {
            column_names.push(name);
        }
    }

    Ok(Dataset::new(column_names, records))
}
