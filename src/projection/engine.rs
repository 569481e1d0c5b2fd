//! Projection engine: builds every series for one scenario run

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::amortization::{monthly_payment, AmortizationSchedule};
use super::appreciation::value_at;
use super::costs::{CostInputs, MonthlySeries};
use super::investment::{dollar_cost_average, SurplusSeries};
use super::net_worth::{
    buy_vs_rent_at, post_sale_deposit, sell_today, sell_vs_keep_at, NetWorthSnapshot,
};
use super::sale::{SaleCalculator, SaleOutcome};
use super::{DEFAULT_HORIZON_MONTHS, MAX_HORIZON_MONTHS};
use crate::error::{ProjectionError, Result};
use crate::scenario::{LoanTerms, ScenarioConfig};

/// Settings that apply to a run rather than to a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Number of months every series covers
    #[serde(default = "default_horizon")]
    pub horizon_months: u32,
}

fn default_horizon() -> u32 {
    DEFAULT_HORIZON_MONTHS
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_months: DEFAULT_HORIZON_MONTHS,
        }
    }
}

/// Stateless engine; each call to `project` produces an independent result
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

/// Investment series specific to each comparison
#[derive(Debug, Clone, PartialEq)]
pub enum ArmSeries {
    BuyVsRent {
        /// Renting arm: down payment less deposit plus monthly savings
        renting_investment: Vec<f64>,
    },
    SellVsKeep {
        sell_today: SaleOutcome,
        /// Sell arm: today's proceeds less any rent deposit, net of rent paid
        sell_investment: Vec<f64>,
        keep: SurplusSeries,
    },
}

/// Everything computed for one scenario run
///
/// Built once by `ProjectionEngine::project` and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    scenario: ScenarioConfig,
    series: MonthlySeries,
    arms: ArmSeries,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Validate the scenario and build all of its series
    pub fn project(&self, scenario: &ScenarioConfig) -> Result<Projection> {
        scenario.validate()?;

        let horizon = self.config.horizon_months;
        if horizon == 0 {
            return Err(ProjectionError::NonPositiveDuration {
                field: "horizon_months",
            });
        }
        if horizon > MAX_HORIZON_MONTHS {
            return Err(ProjectionError::ExcessiveDuration {
                field: "horizon_months",
                value: horizon,
                max: MAX_HORIZON_MONTHS,
            });
        }

        debug!(
            "Projecting {} over {} months",
            scenario.name(),
            horizon
        );

        let loan = scenario.loan();
        let (payment, schedule) = amortize(loan, horizon)?;
        if loan.has_loan() && loan.term_months > horizon {
            warn!(
                "Loan term of {} months runs past the {} month horizon; balance still owed",
                loan.term_months, horizon
            );
        }

        let (recurring_baseline, renting_baseline) = match scenario {
            ScenarioConfig::BuyVsRent(s) => {
                (s.holding.monthly_baseline(), s.renting.monthly_baseline())
            }
            ScenarioConfig::SellVsKeep(s) => (
                s.holding.monthly_baseline(),
                s.renting_after_sale
                    .as_ref()
                    .map(|r| r.monthly_baseline())
                    .unwrap_or(0.0),
            ),
        };

        let inputs = CostInputs {
            loan_payment: payment,
            loan_term_months: schedule.term_months,
            recurring_baseline,
            renting_baseline,
            inflation_rate: scenario.economics().inflation_rate,
        };
        let series = MonthlySeries::project(inputs, schedule, horizon);

        let arms = match scenario {
            ScenarioConfig::BuyVsRent(s) => {
                let savings = series
                    .buying_cost
                    .iter()
                    .zip(&series.renting_cost)
                    .map(|(buy, rent)| buy - rent);
                let initial = s.down_payment() - s.renting.deposit;
                ArmSeries::BuyVsRent {
                    renting_investment: dollar_cost_average(
                        initial,
                        savings,
                        s.investment_return_rate,
                    ),
                }
            }
            ScenarioConfig::SellVsKeep(s) => {
                let proceeds = sell_today(s, &series);
                let initial = proceeds.net_proceeds - post_sale_deposit(s);
                let rent_paid = series.renting_cost.iter().map(|rent| -rent);
                ArmSeries::SellVsKeep {
                    sell_today: proceeds,
                    sell_investment: dollar_cost_average(
                        initial,
                        rent_paid,
                        s.investment_return_rate,
                    ),
                    keep: SurplusSeries::simulate(&series.buying_cost, s.investment_return_rate),
                }
            }
        };

        debug!(
            "Projection complete: monthly payment {:.2}, final loan balance {:.2}",
            payment,
            series.loan.balance_after(horizon)
        );

        Ok(Projection {
            scenario: scenario.clone(),
            series,
            arms,
        })
    }
}

/// Payment and schedule for the scenario's loan; no loan means no payment
fn amortize(loan: &LoanTerms, horizon: u32) -> Result<(f64, AmortizationSchedule)> {
    if !loan.has_loan() {
        return Ok((0.0, AmortizationSchedule::none(horizon)));
    }

    let rate = loan.monthly_rate();
    let payment = monthly_payment(loan.amount, rate, loan.term_months)?;
    let schedule =
        AmortizationSchedule::build(loan.amount, rate, payment, loan.term_months, horizon);
    Ok((payment, schedule))
}

impl Projection {
    pub fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }

    pub fn series(&self) -> &MonthlySeries {
        &self.series
    }

    pub fn arms(&self) -> &ArmSeries {
        &self.arms
    }

    pub fn horizon_months(&self) -> u32 {
        self.series.horizon_months()
    }

    pub fn monthly_payment(&self) -> f64 {
        self.series.loan.payment
    }

    /// Clamp a requested month into the projected horizon
    pub fn clamp_month(&self, month: u32) -> u32 {
        let horizon = self.horizon_months();
        if month > horizon {
            warn!(
                "Requested month {} is beyond the {} month horizon; using month {}",
                month, horizon, horizon
            );
            return horizon;
        }
        month
    }

    /// Appreciated value of the asset after `month` months
    pub fn asset_value_at(&self, month: u32) -> f64 {
        let month = self.clamp_month(month);
        match &self.scenario {
            ScenarioConfig::BuyVsRent(s) => value_at(s.purchase_price, &s.appreciation, month),
            ScenarioConfig::SellVsKeep(s) => {
                value_at(s.current_market_value, &s.appreciation, month)
            }
        }
    }

    /// Outcome of selling after `month` months, if selling is modeled
    pub fn sale_outcome_at(&self, month: u32) -> Option<SaleOutcome> {
        let month = self.clamp_month(month);
        match &self.scenario {
            ScenarioConfig::BuyVsRent(s) => s.selling.as_ref().map(|selling| {
                SaleCalculator {
                    sale_base: s.purchase_price,
                    cost_basis: s.purchase_price,
                    appreciation: &s.appreciation,
                    selling,
                    loan: &self.series.loan,
                }
                .outcome_at(month)
            }),
            ScenarioConfig::SellVsKeep(s) => Some(
                SaleCalculator {
                    sale_base: s.current_market_value,
                    cost_basis: s.purchase_price,
                    appreciation: &s.appreciation,
                    selling: &s.selling,
                    loan: &self.series.loan,
                }
                .outcome_at(month),
            ),
        }
    }

    /// Net worth of both arms after `month` months
    pub fn net_worth_at(&self, month: u32) -> NetWorthSnapshot {
        let month = self.clamp_month(month);
        match (&self.scenario, &self.arms) {
            (ScenarioConfig::BuyVsRent(s), ArmSeries::BuyVsRent { renting_investment }) => {
                NetWorthSnapshot::BuyVsRent(buy_vs_rent_at(
                    s,
                    &self.series,
                    renting_investment,
                    month,
                ))
            }
            (
                ScenarioConfig::SellVsKeep(s),
                ArmSeries::SellVsKeep {
                    sell_today,
                    sell_investment,
                    keep,
                },
            ) => NetWorthSnapshot::SellVsKeep(sell_vs_keep_at(
                s,
                &self.series,
                sell_today.net_proceeds,
                sell_investment,
                keep,
                month,
            )),
            _ => unreachable!("projection arms always match the scenario kind"),
        }
    }

    /// Month-end value of the investment held by the arm without the asset
    pub fn alternative_investment(&self) -> &[f64] {
        match &self.arms {
            ArmSeries::BuyVsRent { renting_investment } => renting_investment,
            ArmSeries::SellVsKeep { sell_investment, .. } => sell_investment,
        }
    }

    pub fn keep_series(&self) -> Option<&SurplusSeries> {
        match &self.arms {
            ArmSeries::SellVsKeep { keep, .. } => Some(keep),
            ArmSeries::BuyVsRent { .. } => None,
        }
    }
}
