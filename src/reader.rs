use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use std::{fs, path::Path};
use tracing::debug;

use crate::domain::{CapacityTable, CleanedRecord, OutputRecord};
use crate::error::{DamLevelsError, Result};

/// Reads the input file and decodes it as ISO-8859-1.
///
/// The city's export is not UTF-8: the `Ë` of VOËLVLEI is the single byte
/// `0xCB`. In Latin-1 every byte is the code point of the same value, so the
/// decode cannot fail.
pub fn read_latin1(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| DamLevelsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_latin1(&bytes))
}

pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Drops the first `lines` lines of `text`.
pub fn skip_lines(text: &str, lines: usize) -> &str {
    if lines == 0 {
        return text;
    }
    text.splitn(lines + 1, '\n').nth(lines).unwrap_or("")
}

pub fn get_reader(body: &str) -> Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes())
}

/// Lazily turns raw rows into output records.
///
/// `first_line` is the line number of the first row in the original file and
/// is used for error reporting.
pub struct Records<'a, R: std::io::Read> {
    rows: csv::StringRecordsIter<'a, R>,
    capacity: &'a CapacityTable,
    first_line: u64,
}

impl<'a, R: std::io::Read> Records<'a, R> {
    pub fn new(rdr: &'a mut Reader<R>, capacity: &'a CapacityTable, first_line: u64) -> Self {
        Self {
            rows: rdr.records(),
            capacity,
            first_line,
        }
    }

    fn transform(&self, row: &StringRecord) -> Result<OutputRecord> {
        let line = row
            .position()
            .map(|p| p.line() - 1 + self.first_line)
            .unwrap_or(self.first_line);
        let cleaned = CleanedRecord::from_row(row, line)?;
        OutputRecord::expand(cleaned, self.capacity)
    }
}

impl<'a, R: std::io::Read> Iterator for Records<'a, R> {
    type Item = Result<OutputRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e.into())),
        };
        debug!(line = ?row.position().map(|p| p.line()), "transforming row");
        Some(self.transform(&row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const DATA: &str = "\
DAM LEVELS,,,
WEMMERSHOEK,,,
,,,
DATE,HEIGHT,STORAGE,%
,,(Ml),
15-Feb-18,,\"23 145\",39.5
16-Feb-18,,#VALUE!,39.4";

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_latin1(b"VO\xcbLVLEI"), "VOËLVLEI");
        assert_eq!(decode_latin1(b"plain"), "plain");
    }

    #[test]
    fn test_skip_lines() {
        assert_eq!(skip_lines("a\nb\nc\nd", 2), "c\nd");
        assert_eq!(skip_lines("a\r\nb\r\nc", 1), "b\r\nc");
        assert_eq!(skip_lines("a\nb", 5), "");
        assert_eq!(skip_lines("a\nb", 0), "a\nb");
    }

    #[test]
    fn test_records_runs() {
        let capacity = CapacityTable::new();
        let mut rdr = get_reader(skip_lines(DATA, 5));
        let mut records = Records::new(&mut rdr, &capacity, 6);

        let first = records.next().unwrap().unwrap();
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2018, 2, 15).unwrap());
        assert_eq!(first.get("Wemmershoek Storage (Ml)"), Some(dec!(23145)));

        let second = records.next().unwrap().unwrap();
        assert_eq!(second.date, NaiveDate::from_ymd_opt(2018, 2, 16).unwrap());
        assert_eq!(second.get("Wemmershoek Storage (Ml)"), None);

        assert!(records.next().is_none());
    }

    #[test]
    fn test_comma_only_row_is_fatal() {
        let capacity = CapacityTable::new();
        let data = format!("{}\n{}\n{}", DATA, ",,,", "17-Feb-18,,10,39.4");
        let mut rdr = get_reader(skip_lines(&data, 5));
        let mut records = Records::new(&mut rdr, &capacity, 6);

        assert!(records.next().unwrap().is_ok());
        assert!(records.next().unwrap().is_ok());
        match records.next() {
            Some(Err(DamLevelsError::UnparseableDate { line, value })) => {
                assert_eq!(line, 8);
                assert_eq!(value, "");
            }
            other => panic!("error expected, got {:?}", other),
        }
    }

    #[test]
    fn test_cells_are_trimmed_before_parsing() {
        let capacity = CapacityTable::new();
        let data = format!("{}\n{}", DATA, " 17-Feb-18 ,, -5 ,39.4");
        let mut rdr = get_reader(skip_lines(&data, 5));
        let last = Records::new(&mut rdr, &capacity, 6).last().unwrap().unwrap();

        assert_eq!(last.date, NaiveDate::from_ymd_opt(2018, 2, 17).unwrap());
        assert_eq!(last.get("Wemmershoek Storage (Ml)"), None);
    }

    #[test]
    fn test_records_error_line() {
        let capacity = CapacityTable::new();
        let data = format!("{}\n{}", DATA, "17-Feb-18,,12x,39.4");
        let mut rdr = get_reader(skip_lines(&data, 5));
        let result: Result<Vec<OutputRecord>> = Records::new(&mut rdr, &capacity, 6).collect();

        match result {
            Err(DamLevelsError::MalformedCell { line, value, .. }) => {
                assert_eq!(line, 8);
                assert_eq!(value, "12x");
            }
            other => panic!("error expected, got {:?}", other),
        }
    }
}
