//! Annual returns from a daily adjusted-close price history

use std::collections::BTreeMap;
use std::io::Read;

use chrono::{Datelike, NaiveDate};
use log::debug;

use super::MarketDataError;

/// Calendar-year returns (percent) from a `Date,Adj Close` CSV
///
/// Rows must be in chronological order. Each year's return runs from its
/// first to its last close; rows with an unreadable date or price are
/// skipped.
pub fn annual_returns_from_prices<R: Read>(
    reader: R,
) -> Result<BTreeMap<i32, f64>, MarketDataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // year -> (first close, last close)
    let mut years: BTreeMap<i32, (f64, f64)> = BTreeMap::new();

    for record in csv_reader.records() {
        let record = record?;
        let (Some(date), Some(close)) = (record.get(0), record.get(1)) else {
            continue;
        };

        let date = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                debug!("Skipping price row with date '{}': {}", date, e);
                continue;
            }
        };
        let Ok(close) = close.parse::<f64>() else {
            debug!("Skipping price row with close '{}'", close);
            continue;
        };

        years
            .entry(date.year())
            .and_modify(|(_, last)| *last = close)
            .or_insert((close, close));
    }

    if years.is_empty() {
        return Err(MarketDataError::InsufficientData);
    }

    Ok(years
        .into_iter()
        .filter(|(_, (first, _))| *first > 0.0)
        .map(|(year, (first, last))| (year, (last - first) / first * 100.0))
        .collect())
}
