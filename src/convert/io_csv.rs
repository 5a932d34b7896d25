// Primitives for reading the structured CSV export into raw grids.

use snafu::prelude::*;
use std::path::Path;

use precinct_tables::{Cell, RawGrid};

use crate::convert::*;

/// Reads a CSV file into a raw grid, header row included. The reshaper
/// assigns meaning to the columns by position, not by header name.
pub fn read_grid(path: &Path) -> ConvertResult<RawGrid> {
    let display = path.display().to_string();
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu {
            path: display.clone(),
        })?;

    let mut grid: RawGrid = Vec::new();
    for record in reader.into_records() {
        let record = record.context(CsvRowSnafu {
            path: display.clone(),
        })?;
        grid.push(record.iter().map(read_cell).collect());
    }
    Ok(grid)
}

// The CSV reader only sees text; numeric fields are recognized later, cell
// by cell.
fn read_cell(field: &str) -> Cell {
    if field.is_empty() {
        Cell::Empty
    } else {
        Cell::Text(field.to_string())
    }
}
