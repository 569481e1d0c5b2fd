//! Monthly buying and renting cost series

use super::amortization::AmortizationSchedule;

/// Inputs to the cost projection, already reduced to monthly figures
#[derive(Debug, Clone, Copy)]
pub struct CostInputs {
    pub loan_payment: f64,
    pub loan_term_months: u32,
    /// Recurring holding cost for month one (excludes the loan payment)
    pub recurring_baseline: f64,
    /// Renting cost for month one
    pub renting_baseline: f64,
    /// Annual inflation (percent)
    pub inflation_rate: f64,
}

/// Cost and loan series for one projection run
///
/// Every vector has `horizon_months` entries; index `i` is month `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    pub buying_cost: Vec<f64>,
    pub renting_cost: Vec<f64>,
    pub loan: AmortizationSchedule,
}

impl MonthlySeries {
    /// Build cost series over the horizon
    ///
    /// Inflation steps once a year: at every 12th month boundary both running
    /// baselines are multiplied by (1 + inflation). The loan payment is not
    /// inflated and stops after the term.
    pub fn project(inputs: CostInputs, loan: AmortizationSchedule, horizon_months: u32) -> Self {
        let horizon = horizon_months as usize;
        let inflation_factor = 1.0 + inputs.inflation_rate / 100.0;

        let mut buying_cost = Vec::with_capacity(horizon);
        let mut renting_cost = Vec::with_capacity(horizon);

        let mut recurring = inputs.recurring_baseline;
        let mut renting = inputs.renting_baseline;

        for month in 0..horizon {
            if month > 0 && month % 12 == 0 {
                recurring *= inflation_factor;
                renting *= inflation_factor;
            }

            renting_cost.push(renting);

            if month < inputs.loan_term_months as usize {
                buying_cost.push(inputs.loan_payment + recurring);
            } else {
                buying_cost.push(recurring);
            }
        }

        Self {
            buying_cost,
            renting_cost,
            loan,
        }
    }

    pub fn horizon_months(&self) -> u32 {
        self.buying_cost.len() as u32
    }

    /// Sum of buying costs over the first `months` months (clamped)
    pub fn total_buying_cost(&self, months: u32) -> f64 {
        let n = (months as usize).min(self.buying_cost.len());
        self.buying_cost[..n].iter().sum()
    }

    /// Sum of renting costs over the first `months` months (clamped)
    pub fn total_renting_cost(&self, months: u32) -> f64 {
        let n = (months as usize).min(self.renting_cost.len());
        self.renting_cost[..n].iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::amortization::monthly_payment;
    use approx::assert_relative_eq;

    fn inputs(inflation_rate: f64) -> CostInputs {
        CostInputs {
            loan_payment: 2_000.0,
            loan_term_months: 24,
            recurring_baseline: 500.0,
            renting_baseline: 2_500.0,
            inflation_rate,
        }
    }

    #[test]
    fn test_inflation_is_a_yearly_step() {
        let series = MonthlySeries::project(inputs(10.0), AmortizationSchedule::none(360), 360);

        assert_eq!(series.renting_cost[0], 2_500.0);
        assert_eq!(series.renting_cost[11], 2_500.0);
        assert_relative_eq!(series.renting_cost[12], 2_750.0, max_relative = 1e-12);
        assert_relative_eq!(series.renting_cost[23], 2_750.0, max_relative = 1e-12);
        assert_relative_eq!(series.renting_cost[24], 3_025.0, max_relative = 1e-12);
    }

    #[test]
    fn test_loan_payment_stops_after_term() {
        let series = MonthlySeries::project(inputs(0.0), AmortizationSchedule::none(360), 360);

        assert_eq!(series.buying_cost[0], 2_500.0);
        assert_eq!(series.buying_cost[23], 2_500.0);
        assert_eq!(series.buying_cost[24], 500.0);
        assert_eq!(series.buying_cost[359], 500.0);
    }

    #[test]
    fn test_loan_payment_not_inflated() {
        let series = MonthlySeries::project(inputs(10.0), AmortizationSchedule::none(360), 360);
        // Year two: payment unchanged, recurring inflated
        assert_relative_eq!(series.buying_cost[12], 2_000.0 + 550.0, max_relative = 1e-12);
    }

    #[test]
    fn test_series_cover_full_horizon() {
        let rate = 0.065 / 12.0;
        let payment = monthly_payment(400_000.0, rate, 120).unwrap();
        let loan = AmortizationSchedule::build(400_000.0, rate, payment, 120, 360);
        let series = MonthlySeries::project(
            CostInputs { loan_payment: payment, loan_term_months: 120, ..inputs(2.0) },
            loan,
            360,
        );

        assert_eq!(series.horizon_months(), 360);
        assert_eq!(series.renting_cost.len(), 360);
        assert_eq!(series.loan.remaining_balance.len(), 360);
    }

    #[test]
    fn test_totals_clamp_to_horizon() {
        let series = MonthlySeries::project(inputs(0.0), AmortizationSchedule::none(36), 36);
        assert_eq!(series.total_renting_cost(12), 30_000.0);
        assert_eq!(series.total_renting_cost(1_000), 90_000.0);
        assert_eq!(series.total_buying_cost(36), 24.0 * 2_500.0 + 12.0 * 500.0);
    }
}
