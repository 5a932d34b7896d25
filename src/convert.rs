//! Orchestration for one election directory: discover the county files,
//! route each through the right reshape strategy and write the statewide
//! table.

use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use text_diff::print_diff;

use precinct_tables::*;

pub mod io_csv;
pub mod io_excel;

#[derive(Debug, Snafu)]
pub enum ConvertError {
    #[snafu(display("Error opening spreadsheet {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Spreadsheet {path} holds no readable sheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading a row of {path}"))]
    CsvRow { source: csv::Error, path: String },
    #[snafu(display("Error listing election directory {path}"))]
    ListingDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The election directory name {dirname:?} does not start with a year"))]
    MissingYear { dirname: String },
    #[snafu(display("Elections before 2014 are not supported (got {year})"))]
    UnsupportedYear { year: i32 },
    #[snafu(display("Could not reshape the table for county {county}"))]
    Reshaping {
        source: precinct_tables::TableError,
        county: String,
    },
    #[snafu(display("No county file produced a table"))]
    NoResults {},
    #[snafu(display("Error writing the output file {path}"))]
    WritingCsv { source: csv::Error, path: String },
    #[snafu(display("Error flushing the output file {path}"))]
    FlushingCsv {
        source: std::io::Error,
        path: String,
    },
    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ConvertResult<T> = Result<T, ConvertError>;

// County files are named like 2016-General-Autauga.xls; anything else in the
// directory is ignored.
static COUNTY_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(General|Primary)-(.+)\.(csv|xlsx|xls)$").unwrap());

// The election year is the leading component of the directory name.
static ELECTION_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(20\d\d)").unwrap());

/// Converts every county file under `in_dir` and writes the statewide table
/// to `out_path`. When a reference file is given, the produced output is
/// checked against it after writing.
pub fn run_conversion(in_dir: &str, out_path: &str, reference: Option<&str>) -> ConvertResult<()> {
    let year = election_year(in_dir)?;
    ensure!(supported_year(year), UnsupportedYearSnafu { year });

    let rules = NormalizeRules::statewide();
    info!("Election: {}", in_dir);

    let mut county_files: Vec<PathBuf> = fs::read_dir(in_dir)
        .context(ListingDirSnafu { path: in_dir })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    // Directory order is platform-dependent; sorting keeps the output stable.
    county_files.sort();

    let mut counties: Vec<(String, Vec<ResultRow>)> = Vec::new();
    for path in &county_files {
        debug!("{}", path.display());
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        let caps = match COUNTY_FILE.captures(file_name) {
            Some(caps) => caps,
            None => {
                debug!("skipping {}: not a county results file", file_name);
                continue;
            }
        };
        let county = caps.get(2).unwrap().as_str().to_string();
        let kind = match caps.get(3).unwrap().as_str() {
            "csv" => SourceKind::Csv,
            _ => SourceKind::Spreadsheet,
        };
        info!("==> County: {}", county);

        if let Some(rows) = process_county_file(path, kind, &county, &rules)? {
            // Keyed by county name: a later file for the same county
            // replaces the earlier table, keeping its position.
            match counties.iter_mut().find(|(name, _)| name == &county) {
                Some(entry) => entry.1 = rows,
                None => counties.push((county, rows)),
            }
        }
    }

    // Aggregating nothing at all is a structural failure; counties whose
    // tables came out empty still concatenate fine.
    ensure!(!counties.is_empty(), NoResultsSnafu {});

    write_statewide(&counties, out_path)?;
    println!("Output saved to: {}", out_path);

    if let Some(reference_path) = reference {
        check_against_reference(out_path, reference_path)?;
    }
    Ok(())
}

fn election_year(in_dir: &str) -> ConvertResult<i32> {
    let dirname = Path::new(in_dir)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string();
    let caps = ELECTION_YEAR.captures(&dirname).context(MissingYearSnafu {
        dirname: dirname.clone(),
    })?;
    let year: i32 = caps
        .get(1)
        .unwrap()
        .as_str()
        .parse()
        .whatever_context("the year digits do not form a number")?;
    Ok(year)
}

/// Reads one county file, classifies its layout and builds the county
/// table. Returns `None` when the layout is not recognized: the county is
/// skipped and the rest of the run continues.
fn process_county_file(
    path: &Path,
    kind: SourceKind,
    county: &str,
    rules: &NormalizeRules,
) -> ConvertResult<Option<Vec<ResultRow>>> {
    let grid = match kind {
        SourceKind::Csv => io_csv::read_grid(path)?,
        SourceKind::Spreadsheet => io_excel::read_grid(path)?,
    };
    let grid = clean_grid(grid);
    let layout = match classify(kind, &grid, rules) {
        Some(layout) => layout,
        None => {
            warn!("Not yet able to process this county: {}", county);
            return Ok(None);
        }
    };
    debug!("county {}: layout {:?}", county, layout);
    let rows = build_county_table(layout, &grid, rules).context(ReshapingSnafu { county })?;
    debug!("county {}: {} statewide rows", county, rows.len());
    Ok(Some(rows))
}

/// The fixed output schema. Serialized field order is the column order.
#[derive(Debug, Serialize)]
struct StatewideRow<'a> {
    county: &'a str,
    precinct: &'a str,
    office: &'a str,
    district: Option<&'a str>,
    party: &'a str,
    candidate: &'a str,
    votes: u64,
}

fn write_statewide(counties: &[(String, Vec<ResultRow>)], out_path: &str) -> ConvertResult<()> {
    let mut writer = csv::Writer::from_path(out_path).context(WritingCsvSnafu { path: out_path })?;
    for (county, rows) in counties {
        for row in rows {
            writer
                .serialize(StatewideRow {
                    county,
                    precinct: &row.precinct,
                    office: &row.office,
                    district: row.district.as_deref(),
                    party: &row.party,
                    candidate: &row.candidate,
                    votes: row.votes,
                })
                .context(WritingCsvSnafu { path: out_path })?;
        }
    }
    writer.flush().context(FlushingCsvSnafu { path: out_path })?;
    Ok(())
}

// The reference file, when provided, must match byte for byte.
fn check_against_reference(out_path: &str, reference_path: &str) -> ConvertResult<()> {
    let produced = fs::read_to_string(out_path)
        .whatever_context(format!("could not read back {}", out_path))?;
    let expected = fs::read_to_string(reference_path)
        .whatever_context(format!("could not read the reference file {}", reference_path))?;
    if produced != expected {
        warn!("Found differences with the reference file");
        print_diff(expected.as_str(), produced.as_str(), "\n");
        whatever!("Difference detected between the produced file and the reference file");
    }
    Ok(())
}
