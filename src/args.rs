use clap::Parser;

/// Converts the per-county precinct spreadsheets of one election into a
/// single normalized statewide CSV.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (directory path) The election directory holding the county files. The
    /// directory name must start with the election year, e.g. 2016-General.
    #[clap(value_parser)]
    pub in_dir: String,

    /// (file path) Where the statewide CSV will be written.
    #[clap(value_parser)]
    pub out_file: String,

    /// (file path, optional) A reference copy of the expected output. If provided,
    /// the produced file is checked against it and any difference is an error.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
