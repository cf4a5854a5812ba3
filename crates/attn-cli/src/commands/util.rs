//! Shared utilities for CLI commands.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use attn_core::{IntervalFilter, parse_date};
use chrono::NaiveDate;

/// Buffer size for `BufReader` (64KB for large exports).
const BUFFER_SIZE: usize = 64 * 1024;

/// Path that stands for stdin/stdout.
const STDIO_PATH: &str = "-";

/// Parse a `--start-date`/`--end-date` value.
///
/// `which` names the option in the error, e.g. "start date".
pub fn parse_date_bound(text: &str, pattern: &str, which: &str) -> Result<NaiveDate> {
    parse_date(text, pattern)
        .map_err(|_| anyhow::anyhow!("Provided {which} does not match '{pattern}'."))
}

/// Build the interval filter from the name allow-list and optional date bounds.
pub fn build_filter(
    names: &[String],
    start_date: Option<&str>,
    end_date: Option<&str>,
    date_pattern: &str,
) -> Result<IntervalFilter> {
    let mut filter = IntervalFilter::default().with_names(names.iter().cloned());
    if let Some(text) = start_date {
        filter = filter.with_start_date(parse_date_bound(text, date_pattern, "start date")?);
    }
    if let Some(text) = end_date {
        filter = filter.with_end_date(parse_date_bound(text, date_pattern, "end date")?);
    }
    Ok(filter)
}

/// Open the XML input, with `-` meaning stdin.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == STDIO_PATH {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
}

/// Open the report destination, with `-` or nothing meaning stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) if path.as_os_str() != STDIO_PATH => {
            let file =
                File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
