//! Sale proceeds and capital-gains tax at a point in time

use serde::Serialize;

use super::amortization::AmortizationSchedule;
use super::appreciation::value_at;
use crate::scenario::{SellingTerms, YearSchedule};

/// Breakdown of selling the asset at a given month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SaleOutcome {
    pub sale_price: f64,
    pub selling_costs: f64,
    pub loan_payoff: f64,
    pub capital_gain: f64,
    pub tax: f64,
    pub net_proceeds: f64,
}

/// Index into the tax-free limit schedule for a sale after `months`
///
/// Completed years minus one, floored at zero: months 0..=23 use the first
/// entry, month 24 the second, and so on.
pub fn exemption_year(months: u32) -> usize {
    ((months / 12) as usize).saturating_sub(1)
}

/// Everything needed to price a sale at an arbitrary month
#[derive(Debug, Clone, Copy)]
pub struct SaleCalculator<'a> {
    /// Value the appreciation schedule compounds from
    pub sale_base: f64,
    /// Original purchase price
    pub cost_basis: f64,
    pub appreciation: &'a YearSchedule,
    pub selling: &'a SellingTerms,
    pub loan: &'a AmortizationSchedule,
}

impl SaleCalculator<'_> {
    pub fn outcome_at(&self, months: u32) -> SaleOutcome {
        let sale_price = value_at(self.sale_base, self.appreciation, months);

        let agent_fee = sale_price * (self.selling.agent_commission / 100.0);
        let selling_costs = agent_fee + self.selling.staging_costs;

        let loan_payoff = self.loan.balance_after(months);

        // Selling costs reduce the realized gain
        let capital_gain = sale_price - self.cost_basis - selling_costs;

        let exemption = self.selling.tax_free_limits.for_year(exemption_year(months));
        let taxable_gain = (capital_gain - exemption).max(0.0);
        let tax = taxable_gain * (self.selling.capital_gains_tax / 100.0);

        let net_proceeds = sale_price - selling_costs - loan_payoff - tax;

        SaleOutcome {
            sale_price,
            selling_costs,
            loan_payoff,
            capital_gain,
            tax,
            net_proceeds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::amortization::monthly_payment;
    use approx::assert_abs_diff_eq;

    fn selling(limits: Vec<f64>) -> SellingTerms {
        SellingTerms {
            agent_commission: 6.0,
            staging_costs: 10_000.0,
            capital_gains_tax: 20.0,
            tax_free_limits: YearSchedule::new(limits).unwrap(),
        }
    }

    #[test]
    fn test_exemption_year_index() {
        assert_eq!(exemption_year(0), 0);
        assert_eq!(exemption_year(11), 0);
        assert_eq!(exemption_year(12), 0);
        assert_eq!(exemption_year(23), 0);
        assert_eq!(exemption_year(24), 1);
        assert_eq!(exemption_year(360), 29);
    }

    #[test]
    fn test_sell_today_hand_computed() {
        // Owned asset worth 2.2M, bought for 800k, 300k still owed
        let terms = selling(vec![250_000.0]);
        let appreciation = YearSchedule::flat(5.0);
        let rate = 0.03 / 12.0;
        let payment = monthly_payment(300_000.0, rate, 240).unwrap();
        let loan = AmortizationSchedule::build(300_000.0, rate, payment, 240, 360);

        let calc = SaleCalculator {
            sale_base: 2_200_000.0,
            cost_basis: 800_000.0,
            appreciation: &appreciation,
            selling: &terms,
            loan: &loan,
        };
        let outcome = calc.outcome_at(0);

        assert_eq!(outcome.sale_price, 2_200_000.0);
        assert_abs_diff_eq!(outcome.selling_costs, 142_000.0, epsilon = 1e-6);
        assert_eq!(outcome.loan_payoff, 300_000.0);
        // 2.2M - 800k - 142k = 1.258M gain, 1.008M taxable, 201.6k tax
        assert_abs_diff_eq!(outcome.capital_gain, 1_258_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(outcome.tax, 201_600.0, epsilon = 1e-6);
        assert_abs_diff_eq!(outcome.net_proceeds, 1_556_400.0, epsilon = 1e-6);
    }

    #[test]
    fn test_gain_below_exemption_is_untaxed() {
        let terms = selling(vec![250_000.0]);
        let appreciation = YearSchedule::flat(3.0);
        let loan = AmortizationSchedule::none(360);
        let calc = SaleCalculator {
            sale_base: 500_000.0,
            cost_basis: 500_000.0,
            appreciation: &appreciation,
            selling: &terms,
            loan: &loan,
        };

        let outcome = calc.outcome_at(60);
        assert!(outcome.capital_gain < 250_000.0);
        assert_eq!(outcome.tax, 0.0);
        assert_abs_diff_eq!(
            outcome.net_proceeds,
            outcome.sale_price - outcome.selling_costs,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_loss_is_untaxed() {
        let terms = selling(vec![0.0]);
        let appreciation = YearSchedule::flat(-5.0);
        let loan = AmortizationSchedule::none(360);
        let calc = SaleCalculator {
            sale_base: 500_000.0,
            cost_basis: 500_000.0,
            appreciation: &appreciation,
            selling: &terms,
            loan: &loan,
        };
        let outcome = calc.outcome_at(36);
        assert!(outcome.capital_gain < 0.0);
        assert_eq!(outcome.tax, 0.0);
    }

    #[test]
    fn test_larger_exemption_never_raises_tax() {
        let appreciation = YearSchedule::flat(8.0);
        let loan = AmortizationSchedule::none(360);

        for months in [12u32, 60, 120, 240, 360] {
            let mut previous_tax = f64::INFINITY;
            for limit in [0.0, 50_000.0, 250_000.0, 500_000.0, 5_000_000.0] {
                let terms = selling(vec![limit]);
                let calc = SaleCalculator {
                    sale_base: 400_000.0,
                    cost_basis: 400_000.0,
                    appreciation: &appreciation,
                    selling: &terms,
                    loan: &loan,
                };
                let tax = calc.outcome_at(months).tax;
                assert!(tax <= previous_tax);
                previous_tax = tax;
            }
        }
    }

    #[test]
    fn test_exemption_schedule_by_sale_year() {
        // Year-one limit 0, later years fully exempt
        let terms = selling(vec![0.0, 10_000_000.0]);
        let appreciation = YearSchedule::flat(10.0);
        let loan = AmortizationSchedule::none(360);
        let calc = SaleCalculator {
            sale_base: 1_000_000.0,
            cost_basis: 1_000_000.0,
            appreciation: &appreciation,
            selling: &terms,
            loan: &loan,
        };

        assert!(calc.outcome_at(12).tax > 0.0);
        assert!(calc.outcome_at(23).tax > 0.0);
        assert_eq!(calc.outcome_at(24).tax, 0.0);
    }

    #[test]
    fn test_payoff_clamps_past_horizon() {
        let terms = selling(vec![0.0]);
        let appreciation = YearSchedule::flat(0.0);
        let rate = 0.05 / 12.0;
        let payment = monthly_payment(100_000.0, rate, 480).unwrap();
        // 40-year loan on a 30-year horizon
        let loan = AmortizationSchedule::build(100_000.0, rate, payment, 480, 360);
        let calc = SaleCalculator {
            sale_base: 200_000.0,
            cost_basis: 200_000.0,
            appreciation: &appreciation,
            selling: &terms,
            loan: &loan,
        };

        let payoff = calc.outcome_at(400).loan_payoff;
        assert_eq!(payoff, loan.remaining_balance[359]);
        assert!(payoff > 0.0);
    }
}
