use chrono::{Local, NaiveDate};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use crate::domain::CapacityTable;
use crate::error::{DamLevelsError, Result};

/// Lines of title and column labels above the first data row of the export.
pub const HEADER_LINES: usize = 5;

pub const DEFAULT_OUTPUT_NAME: &str = "dam_levels_cleaned.csv";

/// Everything a run needs. Built once and handed to [`crate::run`].
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub header_lines: usize,
    /// Rows dated after this day are dropped.
    pub today: NaiveDate,
    pub capacity: CapacityTable,
}

impl Config {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            header_lines: HEADER_LINES,
            today: Local::now().date_naive(),
            capacity: CapacityTable::new(),
        }
    }

    /// Output path used when none is given: next to the input file.
    pub fn default_output_for(input_path: &Path) -> PathBuf {
        input_path.with_file_name(DEFAULT_OUTPUT_NAME)
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    /// Checks that the input can be read and the output directory written
    /// before any row is processed.
    pub fn preflight(&self) -> Result<()> {
        File::open(&self.input_path).map_err(|source| DamLevelsError::InputNotReadable {
            path: self.input_path.clone(),
            source,
        })?;

        let out_dir = match self.output_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let not_writable = |reason: String| DamLevelsError::OutputNotWritable {
            path: out_dir.clone(),
            reason,
        };

        let meta = fs::metadata(&out_dir).map_err(|e| not_writable(e.to_string()))?;
        if !meta.is_dir() {
            return Err(not_writable(String::from("not a directory")));
        }
        if meta.permissions().readonly() {
            return Err(not_writable(String::from("directory is read-only")));
        }
        if self.output_path.is_dir() {
            return Err(DamLevelsError::OutputNotWritable {
                path: self.output_path.clone(),
                reason: String::from("output path is a directory"),
            });
        }
        Ok(())
    }
}
