//! Piecewise-compounded asset appreciation

use crate::scenario::YearSchedule;

/// Value of `base` after `months` of appreciation
///
/// Whole years compound one at a time at that year's rate; a trailing
/// partial year applies `(1 + rate)^(months/12)` at the following year's rate.
pub fn value_at(base: f64, rates: &YearSchedule, months: u32) -> f64 {
    let years = (months / 12) as usize;
    let remaining_months = months % 12;

    let mut value = base;
    for year in 0..years {
        value *= 1.0 + rates.for_year(year) / 100.0;
    }

    if remaining_months > 0 {
        let partial = (1.0 + rates.for_year(years) / 100.0).powf(remaining_months as f64 / 12.0);
        value *= partial;
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_rate_matches_closed_form() {
        let rates = YearSchedule::flat(4.0);
        for k in 0..=30u32 {
            let expected = 350_000.0 * 1.04_f64.powi(k as i32);
            let value = value_at(350_000.0, &rates, 12 * k);
            assert_relative_eq!(value, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_rates_apply_year_by_year() {
        let rates = YearSchedule::new(vec![-20.0, -10.0, 5.0]).unwrap();

        assert_relative_eq!(value_at(100.0, &rates, 12), 80.0, max_relative = 1e-12);
        assert_relative_eq!(value_at(100.0, &rates, 24), 72.0, max_relative = 1e-12);
        assert_relative_eq!(value_at(100.0, &rates, 36), 75.6, max_relative = 1e-12);
        // Last rate repeats
        assert_relative_eq!(value_at(100.0, &rates, 48), 75.6 * 1.05, max_relative = 1e-12);
    }

    #[test]
    fn test_partial_year_uses_next_years_rate() {
        let rates = YearSchedule::new(vec![10.0, 21.0]).unwrap();
        // One full year at 10%, then six months at 21% => sqrt(1.21) = 1.1
        assert_relative_eq!(value_at(100.0, &rates, 18), 121.0, max_relative = 1e-12);
        // Six months into year one
        let half_year = value_at(100.0, &rates, 6);
        assert_relative_eq!(half_year, 100.0 * 1.1_f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_month_zero_is_base() {
        assert_eq!(value_at(2_200_000.0, &YearSchedule::flat(7.0), 0), 2_200_000.0);
    }
}
