use csv::WriterBuilder;
use std::{
    fs,
    io::{self, Write},
    path::Path,
};
use tempfile::NamedTempFile;

use crate::domain::OutputRecord;
use crate::error::{DamLevelsError, Result};

pub const DATE_HEADER: &str = "Date";

/// Column order of the output file.
///
/// Columns are sorted by name so a dam is easy to find, with the aggregate
/// columns (anything containing "Dams") moved to the left after `Date`.
pub fn header<'a, I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut columns: Vec<&str> = keys.into_iter().filter(|k| *k != DATE_HEADER).collect();
    columns.sort_unstable();
    columns.dedup();

    let (aggregate, detail): (Vec<&str>, Vec<&str>) =
        columns.into_iter().partition(|k| k.contains("Dams"));

    std::iter::once(DATE_HEADER)
        .chain(aggregate)
        .chain(detail)
        .map(String::from)
        .collect()
}

/// Renders all records as CSV, header included.
pub fn to_csv(records: &[OutputRecord]) -> Result<Vec<u8>> {
    let columns = match records.first() {
        Some(first) => header(first.fields.keys().map(String::as_str)),
        None => return Err(DamLevelsError::EmptyResult),
    };

    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(vec![]);
    wtr.write_record(&columns)?;

    for record in records {
        let mut row = Vec::with_capacity(columns.len());
        row.push(record.date.format("%Y-%m-%d").to_string());
        for key in &columns[1..] {
            row.push(record.get(key).map(|v| v.to_string()).unwrap_or_default());
        }
        wtr.write_record(&row)?;
    }

    wtr.into_inner()
        .map_err(|e| DamLevelsError::Csv(e.into_error().into()))
}

/// Writes `data` to a temporary file next to `path` and renames it into
/// place, so readers never see a half-written file. The temporary file is
/// removed on every failure path.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_error(dir))?;
    tmp.write_all(data).map_err(io_error(tmp.path()))?;
    tmp.as_file().sync_all().map_err(io_error(tmp.path()))?;

    tmp.persist(path).map_err(|e| DamLevelsError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> DamLevelsError {
    let path = path.to_path_buf();
    move |source| DamLevelsError::Io { path, source }
}
