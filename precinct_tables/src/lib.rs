//! Reshaping and normalization primitives for county precinct tables.
//!
//! Each county publishes its precinct-level election results in one of a
//! small number of incompatible layouts. The functions here classify a raw
//! grid of cells, pivot it into a long-format table (one row per precinct,
//! contest and candidate) and normalize the office and candidate labels so
//! that every county contributes rows of the same shape.
//!
//! The crate is deliberately free of file I/O: callers hand in a [`RawGrid`]
//! read from a spreadsheet or CSV file and receive [`ResultRow`] values back.

mod config;
pub mod labels;

use log::{debug, warn};

use std::error::Error;
use std::fmt::Display;

pub use crate::config::*;

// ********* Input data structures ***********

/// A single cell, as read from a source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The cell content as a label. Numbers keep their integral spelling
    /// when they have one, since precinct identifiers are sometimes numeric.
    pub fn label(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(f) if f.fract() == 0.0 => format!("{}", *f as i64),
            Cell::Number(f) => format!("{}", f),
            Cell::Empty => String::new(),
        }
    }

    /// The cell content as a vote count. Blank, negative and non-numeric
    /// cells have no count; their rows are dropped by the reshapers.
    pub fn votes(&self) -> Option<u64> {
        match self {
            Cell::Number(f) if *f >= 0.0 => Some(f.round() as u64),
            Cell::Text(s) => s.parse::<u64>().ok(),
            _ => None,
        }
    }

    fn int(&self) -> Option<i64> {
        match self {
            Cell::Number(f) => Some(*f as i64),
            Cell::Text(s) => s.parse::<i64>().ok(),
            Cell::Empty => None,
        }
    }
}

/// A raw 2-D grid of cells. Rows and columns carry no meaning until the grid
/// has been classified.
pub type RawGrid = Vec<Vec<Cell>>;

/// One entry of a county table: a single vote count for a (precinct, office,
/// district, party, candidate) combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub precinct: String,
    pub office: String,
    pub district: Option<String>,
    pub party: String,
    pub candidate: String,
    pub votes: u64,
}

/// Errors that prevent a county grid from being reshaped at all. Anything
/// less structural is logged and worked around instead.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TableError {
    /// The grid holds too few rows to carry the expected layout.
    EmptyGrid,
    /// A role column required by the layout is missing from the header.
    MissingColumn(String),
}

impl Error for TableError {}

impl Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::EmptyGrid => write!(f, "the grid holds no usable rows"),
            TableError::MissingColumn(column) => {
                write!(f, "missing expected column {:?}", column)
            }
        }
    }
}

// ********* Classification ***********

/// The known reshape strategies.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Layout {
    /// A header row with a "Contest Title" column, a party column, a
    /// candidate column and one column per precinct.
    ContestTitle,
    /// Office labels merged across their candidate columns in the first
    /// row, candidate labels in the second, precinct vote rows below.
    BlankHeader,
    /// The structured export with a fixed column order.
    FixedColumns,
}

/// The physical kind of a source file, derived from its extension.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SourceKind {
    Spreadsheet,
    Csv,
}

/// Whether an election year is handled at all.
///
/// Every supported year currently routes to the same set of layouts; the
/// filings before 2014 use layouts that are not implemented.
pub fn supported_year(year: i32) -> bool {
    year >= 2014
}

/// Picks the reshape strategy for a cleaned grid, or `None` when the layout
/// is not recognized and the file should be skipped.
pub fn classify(kind: SourceKind, grid: &RawGrid, rules: &NormalizeRules) -> Option<Layout> {
    if kind == SourceKind::Csv {
        return Some(Layout::FixedColumns);
    }
    let first = grid
        .first()
        .and_then(|row| row.first())
        .cloned()
        .unwrap_or(Cell::Empty);
    debug!("classify: first cell {:?}", first);
    match first {
        Cell::Text(s) if s == "Contest Title" => Some(Layout::ContestTitle),
        Cell::Empty => Some(Layout::BlankHeader),
        Cell::Text(s) if rules.valid_offices.contains(&s) => Some(Layout::BlankHeader),
        _ => None,
    }
}

/// Trims every text cell, turns blank text into [`Cell::Empty`] and drops
/// rows with no content at all.
pub fn clean_grid(grid: RawGrid) -> RawGrid {
    grid.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| match cell {
                    Cell::Text(s) => {
                        let trimmed = s.trim();
                        if trimmed.is_empty() {
                            Cell::Empty
                        } else {
                            Cell::Text(trimmed.to_string())
                        }
                    }
                    cell => cell,
                })
                .collect::<Vec<Cell>>()
        })
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect()
}

// ********* Reshaping ***********

fn cell_label(row: &[Cell], idx: usize) -> String {
    row.get(idx).map(|cell| cell.label()).unwrap_or_default()
}

/// The resolved column roles of a "Contest Title" header row.
struct HeaderRoles {
    contest: usize,
    party: usize,
    candidate: usize,
    /// Position and label of every precinct column, in sheet order.
    precincts: Vec<(usize, String)>,
}

fn header_roles(header: &[Cell]) -> Result<HeaderRoles, TableError> {
    let mut contest = None;
    let mut party = None;
    let mut candidate = None;
    let mut precincts: Vec<(usize, String)> = Vec::new();
    for (idx, cell) in header.iter().enumerate() {
        let label = cell.label();
        match label.as_str() {
            // Unnamed columns cannot name a precinct.
            "" => {}
            "Contest Title" if contest.is_none() => contest = Some(idx),
            "Party" | "Party Code" if party.is_none() => party = Some(idx),
            "Candidate" | "Candidate Name" if candidate.is_none() => candidate = Some(idx),
            _ => precincts.push((idx, label)),
        }
    }
    Ok(HeaderRoles {
        contest: contest.ok_or_else(|| TableError::MissingColumn("Contest Title".to_string()))?,
        party: party.ok_or_else(|| TableError::MissingColumn("Party".to_string()))?,
        candidate: candidate.ok_or_else(|| TableError::MissingColumn("Candidate".to_string()))?,
        precincts,
    })
}

/// Unpivots a sheet whose first row names a "Contest Title" column, a party
/// column, a candidate column and one column per precinct.
///
/// Rows come out in column-major order: every contest for the first precinct
/// column, then the next column. Cells without a vote count are dropped.
pub fn reshape_contest_title(grid: &RawGrid) -> Result<Vec<ResultRow>, TableError> {
    let header = grid.first().ok_or(TableError::EmptyGrid)?;
    let roles = header_roles(header)?;
    let data = &grid[1..];

    let mut rows: Vec<ResultRow> = Vec::new();
    for (col, precinct) in &roles.precincts {
        for grid_row in data {
            let votes = match grid_row.get(*col).and_then(|cell| cell.votes()) {
                Some(votes) => votes,
                None => continue,
            };
            rows.push(ResultRow {
                precinct: precinct.clone(),
                office: cell_label(grid_row, roles.contest),
                district: None,
                party: cell_label(grid_row, roles.party),
                candidate: cell_label(grid_row, roles.candidate),
                votes,
            });
        }
    }
    Ok(rows)
}

/// Propagates the last seen value to the right over blank cells.
pub fn forward_fill(row: &[Cell]) -> Vec<Cell> {
    let mut filled: Vec<Cell> = Vec::with_capacity(row.len());
    let mut last = Cell::Empty;
    for cell in row {
        if !cell.is_empty() {
            last = cell.clone();
        }
        filled.push(last.clone());
    }
    filled
}

/// Unpivots a sheet with merged office headers: the first row holds office
/// labels that only appear above the first of their candidate columns, the
/// second row holds candidate labels and every following row is one
/// precinct, named in its first cell.
///
/// The grid is conceptually forward-filled and transposed; the traversal
/// below reads the same cells in place and emits the same rows in the same
/// order. Parties and districts are filled in later from the labels.
pub fn reshape_blank_header(grid: &RawGrid) -> Result<Vec<ResultRow>, TableError> {
    if grid.len() < 2 {
        return Err(TableError::EmptyGrid);
    }
    let offices = forward_fill(&grid[0]);
    let candidates = &grid[1];
    let width = offices.len().max(candidates.len());

    let mut rows: Vec<ResultRow> = Vec::new();
    for precinct_row in &grid[2..] {
        let precinct = cell_label(precinct_row, 0);
        if precinct.is_empty() {
            continue;
        }
        for col in 1..width {
            let votes = match precinct_row.get(col).and_then(|cell| cell.votes()) {
                Some(votes) => votes,
                None => continue,
            };
            rows.push(ResultRow {
                precinct: precinct.clone(),
                office: offices.get(col).map(|cell| cell.label()).unwrap_or_default(),
                district: None,
                party: String::new(),
                candidate: cell_label(candidates, col),
                votes,
            });
        }
    }
    Ok(rows)
}

// Column positions of the structured export. The order is fixed; the header
// row spells the names differently from file to file and is ignored.
const CSV_CONTEST_NUMBER: usize = 2;
const CSV_VOTES: usize = 4;
const CSV_PARTY: usize = 5;
const CSV_CONTEST_TITLE: usize = 6;
const CSV_CANDIDATE: usize = 7;
const CSV_PRECINCT: usize = 8;

/// Contest numbers below 100 flag administrative counters (registered
/// voters, ballots cast) rather than contests.
const FIRST_CONTEST_NUMBER: i64 = 100;

/// Reads the structured export: ten columns in a fixed order, one already
/// long-format row per record.
pub fn reshape_fixed_columns(grid: &RawGrid) -> Result<Vec<ResultRow>, TableError> {
    if grid.is_empty() {
        return Err(TableError::EmptyGrid);
    }
    let mut rows: Vec<ResultRow> = Vec::new();
    for grid_row in &grid[1..] {
        let contest_number = match grid_row.get(CSV_CONTEST_NUMBER).and_then(|cell| cell.int()) {
            Some(number) => number,
            None => continue,
        };
        if contest_number < FIRST_CONTEST_NUMBER {
            continue;
        }
        let votes = match grid_row.get(CSV_VOTES).and_then(|cell| cell.votes()) {
            Some(votes) => votes,
            None => continue,
        };
        rows.push(ResultRow {
            precinct: cell_label(grid_row, CSV_PRECINCT),
            office: cell_label(grid_row, CSV_CONTEST_TITLE),
            district: None,
            party: cell_label(grid_row, CSV_PARTY),
            candidate: cell_label(grid_row, CSV_CANDIDATE),
            votes,
        });
    }
    Ok(rows)
}

// ********* Label splitting passes ***********

/// Fills the district column from trailing district qualifiers in the
/// contest labels ("STATE SENATOR, DISTRICT NO. 15").
pub fn extract_districts(rows: &mut [ResultRow]) {
    for row in rows.iter_mut() {
        let (office, district) = labels::split_trailing_district(&row.office);
        if district.is_some() {
            row.office = office;
            row.district = district;
        }
    }
}

/// Fills districts and parties for the merged-header layout, where both ride
/// along inside the office and candidate labels.
pub fn split_merged_labels(rows: &mut [ResultRow], rules: &NormalizeRules) {
    for row in rows.iter_mut() {
        let (office, district) = labels::split_office_district(&row.office, rules);
        if district.is_some() {
            row.office = office;
            row.district = district;
        }
        let (candidate, party) = labels::split_candidate_party(&row.candidate);
        if let Some(party) = party {
            row.candidate = candidate;
            row.party = party;
        }
    }
}

/// The merged-header files report the county total as a pseudo-precinct
/// named "CALCULATED TOTALS"; the statewide table calls it "Total".
pub fn normalize_total_precinct(rows: &mut [ResultRow]) {
    for row in rows.iter_mut() {
        if row.precinct == "CALCULATED TOTALS" {
            row.precinct = "Total".to_string();
        }
    }
}

// ********* Normalization ***********

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so that "UNITED STATES SENATOR" and "united states senator"
/// collapse to the same spelling.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Title-cases and canonicalizes office names, drops every row whose office
/// is not a statewide office, and canonicalizes pseudo-candidates.
///
/// Unmapped offices and candidates pass through unchanged; only the
/// allow-list is a hard filter.
pub fn normalize(rows: Vec<ResultRow>, rules: &NormalizeRules) -> Vec<ResultRow> {
    rows.into_iter()
        .filter_map(|mut row| {
            let office = title_case(&row.office);
            row.office = match rules.office_map.get(&office) {
                Some(canonical) => canonical.clone(),
                None => office,
            };
            if !rules.valid_offices.contains(&row.office) {
                return None;
            }
            if let Some(canonical) = rules.candidate_map.get(&row.candidate) {
                row.candidate = canonical.clone();
            }
            Some(row)
        })
        .collect()
}

// ********* Pipeline ***********

/// Runs the full reshape for one county grid: pivot to long format, split
/// the embedded labels and normalize down to the statewide offices.
pub fn build_county_table(
    layout: Layout,
    grid: &RawGrid,
    rules: &NormalizeRules,
) -> Result<Vec<ResultRow>, TableError> {
    let rows = match layout {
        Layout::ContestTitle => {
            let mut rows = reshape_contest_title(grid)?;
            extract_districts(&mut rows);
            normalize(rows, rules)
        }
        Layout::BlankHeader => {
            let mut rows = reshape_blank_header(grid)?;
            split_merged_labels(&mut rows, rules);
            normalize_total_precinct(&mut rows);
            normalize(rows, rules)
        }
        Layout::FixedColumns => {
            let mut rows = reshape_fixed_columns(grid)?;
            extract_districts(&mut rows);
            let mut rows = normalize(rows, rules);
            rows.sort_by(|a, b| {
                (&a.precinct, &a.office, &a.district, &a.party, &a.candidate).cmp(&(
                    &b.precinct,
                    &b.office,
                    &b.district,
                    &b.party,
                    &b.candidate,
                ))
            });
            rows
        }
    };
    if rows.is_empty() {
        warn!("the grid produced no statewide rows");
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn num(f: f64) -> Cell {
        Cell::Number(f)
    }

    #[test]
    fn year_gate() {
        assert!(!supported_year(2010));
        assert!(!supported_year(2013));
        assert!(supported_year(2014));
        assert!(supported_year(2016));
    }

    #[test]
    fn classify_contest_title() {
        let rules = NormalizeRules::statewide();
        let grid = vec![vec![text("Contest Title"), text("Party")]];
        assert_eq!(
            classify(SourceKind::Spreadsheet, &grid, &rules),
            Some(Layout::ContestTitle)
        );
    }

    #[test]
    fn classify_blank_first_cell() {
        let rules = NormalizeRules::statewide();
        let grid = vec![vec![Cell::Empty, text("GOVERNOR")]];
        assert_eq!(
            classify(SourceKind::Spreadsheet, &grid, &rules),
            Some(Layout::BlankHeader)
        );
    }

    #[test]
    fn classify_office_first_cell() {
        let rules = NormalizeRules::statewide();
        let grid = vec![vec![text("Governor"), Cell::Empty]];
        assert_eq!(
            classify(SourceKind::Spreadsheet, &grid, &rules),
            Some(Layout::BlankHeader)
        );
    }

    #[test]
    fn classify_unrecognized() {
        let rules = NormalizeRules::statewide();
        let grid = vec![vec![text("Some banner text"), text("GOVERNOR")]];
        assert_eq!(classify(SourceKind::Spreadsheet, &grid, &rules), None);
    }

    #[test]
    fn classify_csv_ignores_content() {
        let rules = NormalizeRules::statewide();
        let grid = vec![vec![text("anything")]];
        assert_eq!(
            classify(SourceKind::Csv, &grid, &rules),
            Some(Layout::FixedColumns)
        );
    }

    #[test]
    fn clean_grid_strips_and_drops() {
        let grid = vec![
            vec![text("  Contest Title "), text("")],
            vec![text("   "), Cell::Empty],
            vec![text("GOVERNOR"), num(12.0)],
        ];
        let cleaned = clean_grid(grid);
        assert_eq!(
            cleaned,
            vec![
                vec![text("Contest Title"), Cell::Empty],
                vec![text("GOVERNOR"), num(12.0)],
            ]
        );
    }

    #[test]
    fn forward_fill_propagates_rightwards() {
        let row = vec![Cell::Empty, text("A"), Cell::Empty, text("B"), Cell::Empty];
        let filled = forward_fill(&row);
        assert_eq!(
            filled,
            vec![Cell::Empty, text("A"), text("A"), text("B"), text("B")]
        );
    }

    #[test]
    fn title_case_examples() {
        assert_eq!(title_case("UNITED STATES SENATOR"), "United States Senator");
        assert_eq!(title_case("u.s. house"), "U.S. House");
        assert_eq!(title_case("State Senate"), "State Senate");
    }

    fn contest_title_grid() -> RawGrid {
        vec![
            vec![
                text("Contest Title"),
                text("Party"),
                text("Candidate"),
                text("Ward 1"),
                text("Ward 2"),
            ],
            vec![
                text("UNITED STATES SENATOR"),
                text("D"),
                text("Jane Doe"),
                num(10.0),
                num(20.0),
            ],
            vec![
                text("STATE SENATOR, DISTRICT NO. 15"),
                text("R"),
                text("John Smith"),
                num(5.0),
                Cell::Empty,
            ],
            vec![
                text("SHERIFF"),
                text("R"),
                text("Al Jones"),
                num(7.0),
                num(8.0),
            ],
        ]
    }

    #[test]
    fn contest_title_reshape_and_normalize() {
        let rules = NormalizeRules::statewide();
        let rows =
            build_county_table(Layout::ContestTitle, &contest_title_grid(), &rules).unwrap();
        // The sheriff rows are not statewide; John Smith's Ward 2 cell is
        // blank and dropped.
        assert_eq!(
            rows,
            vec![
                ResultRow {
                    precinct: "Ward 1".to_string(),
                    office: "U.S. Senate".to_string(),
                    district: None,
                    party: "D".to_string(),
                    candidate: "Jane Doe".to_string(),
                    votes: 10,
                },
                ResultRow {
                    precinct: "Ward 1".to_string(),
                    office: "State Senate".to_string(),
                    district: Some("15".to_string()),
                    party: "R".to_string(),
                    candidate: "John Smith".to_string(),
                    votes: 5,
                },
                ResultRow {
                    precinct: "Ward 2".to_string(),
                    office: "U.S. Senate".to_string(),
                    district: None,
                    party: "D".to_string(),
                    candidate: "Jane Doe".to_string(),
                    votes: 20,
                },
            ]
        );
    }

    #[test]
    fn contest_title_missing_role_column_is_an_error() {
        let grid = vec![vec![text("Contest Title"), text("Candidate"), text("Ward 1")]];
        assert_eq!(
            reshape_contest_title(&grid),
            Err(TableError::MissingColumn("Party".to_string()))
        );
    }

    fn blank_header_grid() -> RawGrid {
        vec![
            vec![
                Cell::Empty,
                text("STATE SENATOR Dist 15"),
                Cell::Empty,
                text("GOVERNOR"),
            ],
            vec![
                text("Precinct"),
                text("John Smith (R)"),
                text("Jane Doe (D)"),
                text("Write-In"),
            ],
            vec![text("Ward 1"), num(10.0), num(20.0), num(3.0)],
            vec![text("CALCULATED TOTALS"), num(10.0), num(20.0), num(3.0)],
        ]
    }

    #[test]
    fn blank_header_reshape_and_normalize() {
        let rules = NormalizeRules::statewide();
        let rows = build_county_table(Layout::BlankHeader, &blank_header_grid(), &rules).unwrap();
        assert_eq!(
            rows,
            vec![
                ResultRow {
                    precinct: "Ward 1".to_string(),
                    office: "State Senate".to_string(),
                    district: Some("15".to_string()),
                    party: "R".to_string(),
                    candidate: "John Smith".to_string(),
                    votes: 10,
                },
                ResultRow {
                    precinct: "Ward 1".to_string(),
                    office: "State Senate".to_string(),
                    district: Some("15".to_string()),
                    party: "D".to_string(),
                    candidate: "Jane Doe".to_string(),
                    votes: 20,
                },
                ResultRow {
                    precinct: "Ward 1".to_string(),
                    office: "Governor".to_string(),
                    district: None,
                    party: "".to_string(),
                    candidate: "Write-ins".to_string(),
                    votes: 3,
                },
                ResultRow {
                    precinct: "Total".to_string(),
                    office: "State Senate".to_string(),
                    district: Some("15".to_string()),
                    party: "R".to_string(),
                    candidate: "John Smith".to_string(),
                    votes: 10,
                },
                ResultRow {
                    precinct: "Total".to_string(),
                    office: "State Senate".to_string(),
                    district: Some("15".to_string()),
                    party: "D".to_string(),
                    candidate: "Jane Doe".to_string(),
                    votes: 20,
                },
                ResultRow {
                    precinct: "Total".to_string(),
                    office: "Governor".to_string(),
                    district: None,
                    party: "".to_string(),
                    candidate: "Write-ins".to_string(),
                    votes: 3,
                },
            ]
        );
    }

    #[test]
    fn blank_header_needs_two_header_rows() {
        assert_eq!(
            reshape_blank_header(&vec![vec![text("GOVERNOR")]]),
            Err(TableError::EmptyGrid)
        );
    }

    fn fixed_columns_grid() -> RawGrid {
        let header: Vec<Cell> = (0..10).map(|_| text("h")).collect();
        let row = |contest_number: &str,
                   votes: &str,
                   party: &str,
                   office: &str,
                   candidate: &str,
                   precinct: &str| {
            vec![
                text("Jefferson"),
                text("2016-11-08"),
                text(contest_number),
                text("1"),
                text(votes),
                text(party),
                text(office),
                text(candidate),
                text(precinct),
                Cell::Empty,
            ]
        };
        vec![
            header,
            // Administrative counter, dropped by the contest-number filter.
            row("10", "900", "", "BALLOTS CAST", "", "Ward 1"),
            row("201", "150", "D", "United States Senator", "Jane Doe", "Ward 1"),
            row("201", "80", "R", "United States Senator", "John Smith", "Ward 1"),
            row("105", "40", "R", "GOVERNOR", "Kay Smith", "Aville"),
        ]
    }

    #[test]
    fn fixed_columns_filters_and_sorts() {
        let rules = NormalizeRules::statewide();
        let rows = build_county_table(Layout::FixedColumns, &fixed_columns_grid(), &rules).unwrap();
        let keys: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|r| (r.precinct.as_str(), r.office.as_str(), r.candidate.as_str()))
            .collect();
        // Sorted by precinct first: Aville before Ward 1; the ballots-cast
        // counter is gone.
        assert_eq!(
            keys,
            vec![
                ("Aville", "Governor", "Kay Smith"),
                ("Ward 1", "U.S. Senate", "Jane Doe"),
                ("Ward 1", "U.S. Senate", "John Smith"),
            ]
        );
    }

    #[test]
    fn fixed_columns_end_to_end_row() {
        let rules = NormalizeRules::statewide();
        let grid = vec![
            (0..10).map(|_| text("h")).collect::<Vec<Cell>>(),
            vec![
                text("Jefferson"),
                text("2016-11-08"),
                text("201"),
                text("1"),
                text("150"),
                text("D"),
                text("United States Senator"),
                text("Jane Doe"),
                text("Ward 1"),
                Cell::Empty,
            ],
        ];
        let rows = build_county_table(Layout::FixedColumns, &grid, &rules).unwrap();
        assert_eq!(
            rows,
            vec![ResultRow {
                precinct: "Ward 1".to_string(),
                office: "U.S. Senate".to_string(),
                district: None,
                party: "D".to_string(),
                candidate: "Jane Doe".to_string(),
                votes: 150,
            }]
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let rules = NormalizeRules::statewide();
        let rows = build_county_table(Layout::ContestTitle, &contest_title_grid(), &rules).unwrap();
        let again = normalize(rows.clone(), &rules);
        assert_eq!(rows, again);
    }

    #[test]
    fn normalized_offices_stay_in_the_allow_list() {
        let rules = NormalizeRules::statewide();
        for (layout, grid) in [
            (Layout::ContestTitle, contest_title_grid()),
            (Layout::BlankHeader, blank_header_grid()),
            (Layout::FixedColumns, fixed_columns_grid()),
        ] {
            for row in build_county_table(layout, &grid, &rules).unwrap() {
                assert!(
                    rules.valid_offices.contains(&row.office),
                    "office {:?} escaped the filter",
                    row.office
                );
                assert!(!row.precinct.is_empty());
            }
        }
    }

    #[test]
    fn vote_cells_must_be_nonnegative_integers() {
        assert_eq!(num(150.0).votes(), Some(150));
        assert_eq!(text("150").votes(), Some(150));
        assert_eq!(num(-3.0).votes(), None);
        assert_eq!(text("n/a").votes(), None);
        assert_eq!(Cell::Empty.votes(), None);
    }
}
