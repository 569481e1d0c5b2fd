//! Fixed-payment loan amortization

use crate::error::{ProjectionError, Result};

/// Fixed monthly payment that retires `principal` over `months`
///
/// Standard annuity formula: M = P * [r(1+r)^n] / [(1+r)^n - 1]
/// A zero rate degrades to straight-line repayment. A rate that overflows
/// the formula is a domain error.
pub fn monthly_payment(principal: f64, monthly_rate: f64, months: u32) -> Result<f64> {
    if months == 0 {
        return Err(ProjectionError::NonPositiveDuration {
            field: "loan.term_months",
        });
    }

    let n = months as f64;
    let factor = (1.0 + monthly_rate).powf(n);

    // Rates too small to move (1 + r) off 1.0 are treated as zero
    if monthly_rate == 0.0 || factor - 1.0 == 0.0 {
        return Ok(principal / n);
    }

    let payment = principal * (monthly_rate * factor) / (factor - 1.0);
    if !payment.is_finite() {
        return Err(ProjectionError::NonFiniteResult {
            field: "loan.annual_rate",
        });
    }
    Ok(payment)
}

/// Month-by-month loan position over a projection horizon
///
/// Index `i` holds the position after the payment at the end of month `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationSchedule {
    pub principal: f64,
    pub payment: f64,
    pub term_months: u32,
    pub remaining_balance: Vec<f64>,
    pub cumulative_principal: Vec<f64>,
    pub cumulative_interest: Vec<f64>,
}

impl AmortizationSchedule {
    /// Walk the loan for `horizon_months`
    ///
    /// The final payment may leave the balance a hair below zero; it is kept
    /// as computed. Months past the term carry a zero balance and frozen totals.
    pub fn build(
        principal: f64,
        monthly_rate: f64,
        payment: f64,
        term_months: u32,
        horizon_months: u32,
    ) -> Self {
        let horizon = horizon_months as usize;
        let mut remaining_balance = Vec::with_capacity(horizon);
        let mut cumulative_principal = Vec::with_capacity(horizon);
        let mut cumulative_interest = Vec::with_capacity(horizon);

        let mut balance = principal;
        let mut total_principal = 0.0;
        let mut total_interest = 0.0;

        for month in 0..horizon {
            if month < term_months as usize {
                let interest = balance * monthly_rate;
                let principal_part = payment - interest;
                balance -= principal_part;

                total_principal += principal_part;
                total_interest += interest;

                remaining_balance.push(balance);
            } else {
                remaining_balance.push(0.0);
            }
            cumulative_principal.push(total_principal);
            cumulative_interest.push(total_interest);
        }

        Self {
            principal,
            payment,
            term_months,
            remaining_balance,
            cumulative_principal,
            cumulative_interest,
        }
    }

    /// Schedule for an asset held without a loan
    pub fn none(horizon_months: u32) -> Self {
        Self::build(0.0, 0.0, 0.0, 0, horizon_months)
    }

    /// Balance outstanding after `month` payments, clamped to the horizon
    ///
    /// Month 0 is before the first payment, so the full principal is owed.
    pub fn balance_after(&self, month: u32) -> f64 {
        if month == 0 || self.remaining_balance.is_empty() {
            return if self.term_months > 0 { self.principal } else { 0.0 };
        }
        let idx = (month as usize - 1).min(self.remaining_balance.len() - 1);
        self.remaining_balance[idx]
    }

    /// Cumulative (principal, interest) paid after `month` payments
    pub fn paid_after(&self, month: u32) -> (f64, f64) {
        if month == 0 || self.cumulative_principal.is_empty() {
            return (0.0, 0.0);
        }
        let idx = (month as usize - 1).min(self.cumulative_principal.len() - 1);
        (self.cumulative_principal[idx], self.cumulative_interest[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_payment_30_year_mortgage() {
        // 400k at 6.5% over 30 years
        let payment = monthly_payment(400_000.0, 0.065 / 12.0, 360).unwrap();
        assert_abs_diff_eq!(payment, 2528.27, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = monthly_payment(120_000.0, 0.0, 120).unwrap();
        assert_eq!(payment, 1_000.0);
    }

    #[test]
    fn test_negligible_rate_is_straight_line() {
        let payment = monthly_payment(400_000.0, 1e-14 / 100.0 / 12.0, 360).unwrap();
        assert!(payment.is_finite());
        assert_relative_eq!(payment, 400_000.0 / 360.0, max_relative = 1e-9);
    }

    #[test]
    fn test_overflowing_rate_is_domain_error() {
        assert_eq!(
            monthly_payment(100_000.0, 1e6, 360),
            Err(ProjectionError::NonFiniteResult { field: "loan.annual_rate" })
        );
    }

    #[test]
    fn test_zero_term_is_domain_error() {
        assert_eq!(
            monthly_payment(100_000.0, 0.005, 0),
            Err(ProjectionError::NonPositiveDuration { field: "loan.term_months" })
        );
    }

    #[test]
    fn test_schedule_closes_the_loan() {
        for (principal, annual, months) in [
            (400_000.0, 6.5, 360u32),
            (250_000.0, 3.0, 180),
            (50_000.0, 12.0, 61),
            (1_000_000.0, 0.25, 24),
        ] {
            let rate = annual / 100.0 / 12.0;
            let payment = monthly_payment(principal, rate, months).unwrap();
            let schedule = AmortizationSchedule::build(principal, rate, payment, months, 360);

            let last = months as usize - 1;
            assert_relative_eq!(
                schedule.cumulative_principal[last],
                principal,
                max_relative = 1e-9
            );
            assert_abs_diff_eq!(schedule.remaining_balance[last], 0.0, epsilon = 1e-5);

            // Interest is whatever was paid beyond principal
            let total_paid = payment * months as f64;
            assert_relative_eq!(
                schedule.cumulative_interest[last],
                total_paid - principal,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_after_term_balance_is_zero_and_totals_frozen() {
        let rate = 0.05 / 12.0;
        let payment = monthly_payment(100_000.0, rate, 60).unwrap();
        let schedule = AmortizationSchedule::build(100_000.0, rate, payment, 60, 360);

        assert_eq!(schedule.remaining_balance.len(), 360);
        assert_eq!(schedule.remaining_balance[60], 0.0);
        assert_eq!(schedule.remaining_balance[359], 0.0);
        assert_eq!(schedule.cumulative_principal[59], schedule.cumulative_principal[359]);
        assert_eq!(schedule.cumulative_interest[59], schedule.cumulative_interest[359]);
    }

    #[test]
    fn test_first_month_split() {
        let rate = 0.06 / 12.0;
        let payment = monthly_payment(200_000.0, rate, 360).unwrap();
        let schedule = AmortizationSchedule::build(200_000.0, rate, payment, 360, 360);

        // First payment is mostly interest
        assert_abs_diff_eq!(schedule.cumulative_interest[0], 1_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            schedule.remaining_balance[0],
            200_000.0 - (payment - 1_000.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_balance_lookup_clamps() {
        let rate = 0.04 / 12.0;
        let payment = monthly_payment(300_000.0, rate, 360).unwrap();
        let schedule = AmortizationSchedule::build(300_000.0, rate, payment, 360, 360);

        assert_eq!(schedule.balance_after(0), 300_000.0);
        assert_eq!(schedule.balance_after(12), schedule.remaining_balance[11]);
        assert_eq!(schedule.balance_after(360), schedule.remaining_balance[359]);
        assert_eq!(schedule.balance_after(1_000), schedule.remaining_balance[359]);
        assert_eq!(schedule.paid_after(1_000).0, schedule.cumulative_principal[359]);
    }

    #[test]
    fn test_final_balance_is_not_clamped() {
        let (principal, rate, months) = (50_000.0, 0.12 / 12.0, 61u32);
        let payment = monthly_payment(principal, rate, months).unwrap();
        let schedule = AmortizationSchedule::build(principal, rate, payment, months, 72);

        let mut balance: f64 = principal;
        for _ in 0..months {
            balance -= payment - balance * rate;
        }
        // Whatever residue the walk leaves, sign included, is kept as is
        assert_eq!(schedule.remaining_balance[months as usize - 1], balance);
        assert_eq!(schedule.balance_after(months), balance);
        assert_eq!(schedule.remaining_balance[months as usize], 0.0);
    }

    #[test]
    fn test_no_loan_schedule() {
        let schedule = AmortizationSchedule::none(360);
        assert_eq!(schedule.balance_after(0), 0.0);
        assert!(schedule.remaining_balance.iter().all(|b| *b == 0.0));
        assert!(schedule.cumulative_interest.iter().all(|b| *b == 0.0));
    }
}
