pub mod config;
pub mod domain;
pub mod error;
pub mod reader;
pub mod writer;

use std::collections::HashSet;
use tracing::{info, warn};

use config::Config;
use domain::OutputRecord;
use error::{DamLevelsError, Result};
use reader::{get_reader, read_latin1, skip_lines, Records};
use writer::{to_csv, write_atomic};

/// Counts of what happened during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_read: usize,
    pub future_rows: usize,
    pub rows_written: usize,
    pub duplicate_dates: usize,
}

/// Application runner
///
/// Reads the dam levels export named in `config`, cleans every row into
/// storage and fullness values per dam and dam group, drops rows dated after
/// `config.today` and writes the result to `config.output_path`.
///
/// ```no_run
/// use dam_levels::config::Config;
///
/// let config = Config::new("var/Dam levels update 2012-2018.csv", "var/dam_levels_cleaned.csv");
/// let summary = dam_levels::run(&config).unwrap();
/// assert!(summary.rows_written > 0);
/// ```
pub fn run(config: &Config) -> Result<RunSummary> {
    config.preflight()?;

    info!(path = %config.input_path.display(), "reading input CSV");
    let (records, mut summary) = process(config)?;

    if records.is_empty() {
        return Err(DamLevelsError::EmptyResult);
    }

    info!(path = %config.output_path.display(), "writing output CSV");
    let data = to_csv(&records)?;
    write_atomic(&config.output_path, &data)?;

    summary.rows_written = records.len();
    info!(
        rows_read = summary.rows_read,
        rows_written = summary.rows_written,
        future_rows = summary.future_rows,
        duplicate_dates = summary.duplicate_dates,
        "done"
    );
    Ok(summary)
}

/// Reads and transforms every row, keeping those dated up to `config.today`.
pub fn process(config: &Config) -> Result<(Vec<OutputRecord>, RunSummary)> {
    let text = read_latin1(&config.input_path)?;
    let body = skip_lines(&text, config.header_lines);
    let mut rdr = get_reader(body);
    let records = Records::new(&mut rdr, &config.capacity, config.header_lines as u64 + 1);

    let mut summary = RunSummary::default();
    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for record in records {
        let record = record?;
        summary.rows_read += 1;

        if record.date > config.today {
            summary.future_rows += 1;
            continue;
        }
        if !seen.insert(record.date) {
            summary.duplicate_dates += 1;
            warn!(date = %record.date, "duplicate date");
        }
        kept.push(record);
    }

    Ok((kept, summary))
}
