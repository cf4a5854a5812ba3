//! The attendance report: extract, filter, aggregate, write CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use attn_core::writer::{write_by_day, write_by_day_and_employee};
use attn_core::{IntervalFilter, IntervalRepository, XmlAttendanceSource, by_day, by_day_and_employee};

use crate::commands::util::{build_filter, open_input, open_output};
use crate::{Cli, Config};

/// Everything the report needs, after merging flags over configuration.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub group_employees: bool,
    pub filter: IntervalFilter,
    pub datetime_pattern: String,
}

impl ReportOptions {
    /// Command-line flags take precedence over configuration values.
    pub fn resolve(cli: &Cli, config: Config) -> Result<Self> {
        let input = cli
            .input
            .clone()
            .or(config.input)
            .context("no input file given; pass --input or set `input` in the config")?;
        let filter = build_filter(
            &cli.filter_person,
            cli.start_date.as_deref(),
            cli.end_date.as_deref(),
            &config.date_pattern,
        )?;

        Ok(Self {
            input,
            output: cli.output.clone().or(config.output),
            group_employees: cli.group_employees,
            filter,
            datetime_pattern: cli.pattern.clone().unwrap_or(config.datetime_pattern),
        })
    }
}

/// Run the report.
///
/// The output is only opened once aggregation succeeded, so a rejected input
/// never truncates an existing report file.
pub fn run(options: &ReportOptions) -> Result<()> {
    tracing::debug!(
        input = %options.input.display(),
        pattern = %options.datetime_pattern,
        grouped = options.group_employees,
        "running report"
    );

    let input = open_input(&options.input)?;
    let mut repository =
        IntervalRepository::new(XmlAttendanceSource::new(input, &options.datetime_pattern));
    let intervals = repository.filtered_intervals(options.filter.clone());
    let analyze_context = || format!("failed to analyze {}", options.input.display());

    if options.group_employees {
        let totals = by_day_and_employee(intervals).with_context(analyze_context)?;
        let out = open_output(options.output.as_deref())?;
        write_by_day_and_employee(out, &totals).context("failed to write report")?;
    } else {
        let totals = by_day(intervals).with_context(analyze_context)?;
        let out = open_output(options.output.as_deref())?;
        write_by_day(out, &totals).context("failed to write report")?;
    }

    Ok(())
}
