use std::str::FromStr;

use rust_decimal::Decimal;

/// Spreadsheet formula error that shows up in place of some readings.
const VALUE_ERROR: &str = "#VALUE!";

/// Parses a storage cell.
///
/// Empty cells, formula errors and negative readings are sensor or data faults
/// and come back as `None`. Spaces are thousands separators and are removed
/// before parsing.
pub fn parse_storage(value: &str) -> Result<Option<Decimal>, rust_decimal::Error> {
    if value.is_empty() || value == VALUE_ERROR || value.starts_with('-') {
        return Ok(None);
    }

    let digits: String = value.chars().filter(|c| *c != ' ').collect();
    Decimal::from_str(&digits).map(Some)
}

/// Sum where any missing addend makes the total missing.
pub fn sum_all<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    values.into_iter().sum()
}
