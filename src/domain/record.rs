use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use csv::StringRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::capacity::{
    CapacityTable, ALL_DAMS, BIG_SIX_CAPACITY, BIG_SIX_DAMS, SMALL_CAPACITY, SMALL_DAMS,
};
use crate::domain::cell::{parse_storage, sum_all};
use crate::domain::layout::{
    DATE_COLUMN, LATE_START_DAM, SMALL_TOTAL_ONLY_COLUMN, STORAGE_COLUMNS,
};
use crate::error::{DamLevelsError, Result};

const DATE_FORMAT: &str = "%d-%b-%y";
const IRREGULAR_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses the date column of a row.
///
/// Most rows read like `05-Jan-18`. The rows for May 2017 were entered as
/// `DD/MM/YYYY` with inconsistent years, and one of them with August as month.
/// Those rows are pinned to May 2017 and keep only their day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }

    let date = NaiveDate::parse_from_str(value, IRREGULAR_DATE_FORMAT).ok()?;
    NaiveDate::from_ymd_opt(2017, 5, date.day())
}

/// Storage values of one day, before fullness is computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    pub date: NaiveDate,
    pub storage: Vec<(&'static str, Option<Decimal>)>,
}

impl CleanedRecord {
    /// Builds a record from one raw CSV row. `line` is only used for errors.
    pub fn from_row(row: &StringRecord, line: u64) -> Result<Self> {
        let raw_date = row.get(DATE_COLUMN).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| DamLevelsError::UnparseableDate {
            line,
            value: raw_date.to_owned(),
        })?;

        let mut storage = Vec::with_capacity(STORAGE_COLUMNS.len() + 3);
        for (name, column) in STORAGE_COLUMNS {
            let mut value = read_storage(row, column, line)?;

            // No readings before this dam came online; zero keeps the
            // small-dams total computable for those years.
            if name == LATE_START_DAM && value.is_none() {
                value = Some(dec!(0));
            }
            storage.push((name, value));
        }

        let (_, small_only_column) = SMALL_TOTAL_ONLY_COLUMN;
        let small_only = read_storage(row, small_only_column, line)?;

        let mut record = Self { date, storage };

        let big_six = record.group_total(&BIG_SIX_CAPACITY);
        let small = sum_all([record.group_total(&SMALL_CAPACITY), small_only]);
        let all = sum_all([big_six, small]);

        record.storage.push((SMALL_DAMS, small));
        record.storage.push((BIG_SIX_DAMS, big_six));
        record.storage.push((ALL_DAMS, all));

        Ok(record)
    }

    pub fn storage_of(&self, name: &str) -> Option<Decimal> {
        self.storage
            .iter()
            .find(|(dam, _)| *dam == name)
            .and_then(|(_, value)| *value)
    }

    fn group_total(&self, group: &[(&str, u32)]) -> Option<Decimal> {
        sum_all(group.iter().map(|(name, _)| self.storage_of(name)))
    }
}

fn read_storage(row: &StringRecord, column: usize, line: u64) -> Result<Option<Decimal>> {
    let raw = row.get(column).unwrap_or_default();
    parse_storage(raw).map_err(|_| DamLevelsError::MalformedCell {
        line,
        column,
        value: raw.to_owned(),
    })
}

pub fn storage_key(name: &str) -> String {
    format!("{} Storage (Ml)", name)
}

pub fn fullness_key(name: &str) -> String {
    format!("{} Fullness (%)", name)
}

/// One day of output: storage and fullness for every dam and aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub date: NaiveDate,
    pub fields: BTreeMap<String, Option<Decimal>>,
}

impl OutputRecord {
    /// Expands storage values into storage and fullness pairs. Fullness is a
    /// fraction of capacity and is not clamped: storage can exceed the
    /// nominal capacity.
    pub fn expand(record: CleanedRecord, capacity: &CapacityTable) -> Result<Self> {
        let mut fields = BTreeMap::new();
        for (name, value) in record.storage {
            let full = capacity.capacity_of(name)?;
            fields.insert(storage_key(name), value);
            fields.insert(fullness_key(name), value.map(|v| v / full));
        }

        Ok(Self {
            date: record.date,
            fields,
        })
    }

    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.fields.get(key).copied().flatten()
    }
}
