//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Attendance analyzer.
///
/// Reads an XML attendance export and writes how long employees were present,
/// per day or per day and employee, as CSV.
#[derive(Debug, Parser)]
#[command(name = "attn", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// XML file to analyze (`-` for stdin).
    #[arg(short, long, visible_alias = "in")]
    pub input: Option<PathBuf>,

    /// Where to write the CSV report (`-` or omitted for stdout).
    #[arg(short, long, visible_alias = "out")]
    pub output: Option<PathBuf>,

    /// Report per day and employee instead of per day.
    #[arg(short, long = "group-employees")]
    pub group_employees: bool,

    /// Only count records with this full_name. May be repeated.
    #[arg(short = 'f', long = "filter-person", value_name = "NAME")]
    pub filter_person: Vec<String>,

    /// Only count records starting on or after this date (e.g. 21-12-2011).
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<String>,

    /// Only count records ending on or before this date (e.g. 21-12-2011).
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<String>,

    /// Pattern for timestamps in <start>/<end>, e.g. "%d-%m-%Y %H:%M:%S".
    #[arg(short, long, visible_alias = "regex")]
    pub pattern: Option<String>,
}
