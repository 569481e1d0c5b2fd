//! Report periods: whole years plus the loan's own term

use serde::Serialize;

/// Standard periods, always shown
const BASE_YEARS: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Added when long horizons are requested
const EXTENDED_YEARS: [u32; 3] = [15, 20, 30];

/// One row of a period table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub label: String,
    pub months: u32,
    /// True for the row marking the end of the loan
    pub loan_term: bool,
}

impl Period {
    fn standard(years: u32) -> Self {
        Self {
            label: format!("{}y", years),
            months: years * 12,
            loan_term: false,
        }
    }

    fn loan_end(months: u32) -> Self {
        let label = match (months / 12, months % 12) {
            (years, 0) => format!("X {}y", years),
            (years, rem) => format!("X {}y{}m", years, rem),
        };
        Self {
            label,
            months,
            loan_term: true,
        }
    }
}

/// Periods for the report tables, in ascending order
///
/// A loan term of 0 means no loan. Otherwise the term is inserted before
/// the first longer standard period, replaces a standard period of the
/// same length, or goes last when it outlasts them all.
pub fn canonical_periods(loan_term_months: u32, extended: bool) -> Vec<Period> {
    let extended_years: &[u32] = if extended { &EXTENDED_YEARS } else { &[] };
    let standard = BASE_YEARS
        .iter()
        .chain(extended_years)
        .map(|&years| Period::standard(years));

    let mut periods = Vec::with_capacity(BASE_YEARS.len() + EXTENDED_YEARS.len() + 1);
    let mut inserted = loan_term_months == 0;

    for period in standard {
        if !inserted && loan_term_months <= period.months {
            periods.push(Period::loan_end(loan_term_months));
            inserted = true;
            if period.months == loan_term_months {
                continue;
            }
        }
        periods.push(period);
    }

    if !inserted {
        periods.push(Period::loan_end(loan_term_months));
    }

    periods
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(periods: &[Period]) -> Vec<&str> {
        periods.iter().map(|p| p.label.as_str()).collect()
    }

    #[test]
    fn test_base_periods_without_loan() {
        let periods = canonical_periods(0, false);
        assert_eq!(periods.len(), 10);
        assert_eq!(periods[0].months, 12);
        assert_eq!(periods[9].label, "10y");
        assert!(periods.iter().all(|p| !p.loan_term));
    }

    #[test]
    fn test_extended_periods() {
        let periods = canonical_periods(0, true);
        assert_eq!(
            labels(&periods)[10..],
            ["15y", "20y", "30y"]
        );
        assert_eq!(periods.last().unwrap().months, 360);
    }

    #[test]
    fn test_loan_term_replaces_matching_period() {
        let periods = canonical_periods(360, true);
        assert_eq!(periods.len(), 13);
        let last = periods.last().unwrap();
        assert_eq!(last.label, "X 30y");
        assert!(last.loan_term);
    }

    #[test]
    fn test_loan_term_inserted_in_order() {
        let periods = canonical_periods(66, false);
        assert_eq!(
            labels(&periods)[..7],
            ["1y", "2y", "3y", "4y", "5y", "X 5y6m", "6y"]
        );
        assert_eq!(periods.len(), 11);
    }

    #[test]
    fn test_long_loan_goes_last() {
        let periods = canonical_periods(360, false);
        assert_eq!(periods.len(), 11);
        assert_eq!(periods[10].label, "X 30y");

        let periods = canonical_periods(480, true);
        assert_eq!(periods.last().unwrap().label, "X 40y");
    }

    #[test]
    fn test_short_loan_goes_first() {
        let periods = canonical_periods(6, false);
        assert_eq!(periods[0].label, "X 0y6m");
        assert_eq!(periods[1].label, "1y");
    }
}
