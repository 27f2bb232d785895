//! AR reference table loading from CSV exports.
//!
//! The spreadsheet upstream is exported to CSV with a header row; the
//! configured column map decides which headers feed which EntityRecord
//! fields. A missing name column fails the run before any statement
//! line is processed.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use lockbox_core::{ColumnMap, EntityTable};

/// Load the AR table from a CSV file.
pub fn load_entity_csv(path: impl AsRef<Path>, columns: &ColumnMap) -> Result<EntityTable> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("opening AR table {}", path.display()))?;
    entity_table_from_reader(file, columns)
        .with_context(|| format!("loading AR table {}", path.display()))
}

/// Load the AR table from any CSV reader.
pub fn entity_table_from_reader<R: Read>(reader: R, columns: &ColumnMap) -> Result<EntityTable> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("reading AR table header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.context("reading AR table row")?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    EntityTable::from_rows(&headers, &rows, columns)
}
