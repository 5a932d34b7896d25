// Primitives for reading Excel workbooks into raw grids.

use calamine::{open_workbook_auto, DataType, Reader};

use log::debug;
use snafu::prelude::*;
use std::path::Path;

use precinct_tables::{Cell, RawGrid};

use crate::convert::*;

/// Reads the first worksheet of a workbook (.xls or .xlsx) into a raw grid.
pub fn read_grid(path: &Path) -> ConvertResult<RawGrid> {
    let display = path.display().to_string();
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu {
        path: display.clone(),
    })?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu {
            path: display.clone(),
        })?
        .context(OpeningExcelSnafu {
            path: display.clone(),
        })?;
    debug!("read_grid: {}: size {:?}", display, wrange.get_size());

    let grid: RawGrid = wrange
        .rows()
        .map(|row| row.iter().map(read_cell).collect())
        .collect();
    Ok(grid)
}

// Everything that is not text or a number is treated as a blank cell.
fn read_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::String(s) => Cell::Text(s.clone()),
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::Float(f) => Cell::Number(*f),
        DataType::DateTime(f) => Cell::Number(*f),
        DataType::Bool(b) => Cell::Text(b.to_string()),
        _ => Cell::Empty,
    }
}
