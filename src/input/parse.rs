//! Parsers for human-entered amounts, durations and rate lists
//!
//! Accepted forms:
//! - amounts: `500000`, `500K`, `1.2m`, `2B`, `6.5%`, `-10%` (empty is 0)
//! - durations: `30y`, `6m`, `5y6m` (must total more than zero months)
//! - rate lists: `10,5,3` (empty is a single 0)

use thiserror::Error;

use crate::scenario::YearSchedule;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("invalid duration '{0}': expected forms like 30y, 6m or 5y6m")]
    InvalidDuration(String),

    #[error("duration must be greater than 0 months")]
    NonPositiveDuration,

    #[error("invalid rate '{value}' at position {position}")]
    InvalidRate { value: String, position: usize },
}

/// Parse a currency amount or percentage
///
/// Case-insensitive `k`, `m` and `b` suffixes scale by a thousand, million
/// and billion. A trailing `%` is stripped; the number stays in percent.
pub fn parse_amount(input: &str) -> Result<f64, ParseError> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return Ok(0.0);
    }

    let stripped = normalized.trim_end_matches('%').trim();

    let (number, multiplier) = if let Some(n) = stripped.strip_suffix('k') {
        (n, 1_000.0)
    } else if let Some(n) = stripped.strip_suffix('m') {
        (n, 1_000_000.0)
    } else if let Some(n) = stripped.strip_suffix('b') {
        (n, 1_000_000_000.0)
    } else {
        (stripped, 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidAmount(input.trim().to_string()))?;

    Ok(value * multiplier)
}

/// Parse a duration such as `5y6m` into months
pub fn parse_duration(input: &str) -> Result<u32, ParseError> {
    let normalized = input.trim().to_lowercase();
    let invalid = || ParseError::InvalidDuration(input.trim().to_string());

    let mut rest = normalized.as_str();
    let mut years: i64 = 0;
    let mut months: i64 = 0;

    if let Some(idx) = rest.find('y') {
        years = rest[..idx].trim().parse().map_err(|_| invalid())?;
        rest = &rest[idx + 1..];
    }

    if let Some(idx) = rest.find('m') {
        months = rest[..idx].trim().parse().map_err(|_| invalid())?;
    }

    let total = years.saturating_mul(12).saturating_add(months);
    if total <= 0 {
        return Err(ParseError::NonPositiveDuration);
    }
    u32::try_from(total).map_err(|_| invalid())
}

/// Parse a comma-separated list of per-year values
///
/// The first value applies to year one, the second to year two, and the
/// last to every year after that.
pub fn parse_rate_list(input: &str) -> Result<YearSchedule, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(YearSchedule::flat(0.0));
    }

    let rates = trimmed
        .split(',')
        .enumerate()
        .map(|(position, part)| {
            parse_amount(part).map_err(|_| ParseError::InvalidRate {
                value: part.trim().to_string(),
                position: position + 1,
            })
        })
        .collect::<Result<Vec<f64>, ParseError>>()?;

    // split always yields at least one part, so the list is non-empty
    Ok(YearSchedule::new(rates).unwrap_or_default())
}

/// Interpret a saved toggle value
pub fn parse_toggle(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "1" | "yes" | "true"
    )
}
