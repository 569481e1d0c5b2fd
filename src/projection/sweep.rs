//! Sensitivity sweep over investment return rates
//!
//! Each rate gets its own projection; runs share nothing, so they fan out
//! across the rayon pool.

use rayon::prelude::*;
use serde::Serialize;

use super::engine::ProjectionEngine;
use crate::error::Result;
use crate::scenario::ScenarioConfig;

/// Net worth of both arms at one month for one return rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub month: u32,
    pub owning_net_worth: f64,
    pub alternative_net_worth: f64,
    /// Alternative minus owning
    pub gap: f64,
}

/// All requested months for one return rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub investment_return_rate: f64,
    pub points: Vec<SweepPoint>,
}

/// Project `scenario` once per return rate and sample the requested months
///
/// Rows come back in the order of `rates`.
pub fn sweep_investment_returns(
    engine: &ProjectionEngine,
    scenario: &ScenarioConfig,
    rates: &[f64],
    months: &[u32],
) -> Result<Vec<SweepRow>> {
    rates
        .par_iter()
        .map(|&rate| {
            let projection = engine.project(&scenario.with_investment_return_rate(rate))?;
            let points = months
                .iter()
                .map(|&month| {
                    let snapshot = projection.net_worth_at(month);
                    SweepPoint {
                        month: snapshot.month(),
                        owning_net_worth: snapshot.owning_net_worth(),
                        alternative_net_worth: snapshot.alternative_net_worth(),
                        gap: snapshot.gap(),
                    }
                })
                .collect();
            Ok(SweepRow {
                investment_return_rate: rate,
                points,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjectionError;
    use crate::scenario::{
        BuyVsRent, Economics, HoldingCosts, LoanTerms, RentingTerms, YearSchedule,
    };

    fn scenario() -> ScenarioConfig {
        ScenarioConfig::BuyVsRent(BuyVsRent {
            economics: Economics { inflation_rate: 2.5, extended_periods: false },
            purchase_price: 450_000.0,
            loan: LoanTerms { amount: 360_000.0, annual_rate: 6.0, term_months: 360 },
            holding: HoldingCosts {
                annual_insurance_and_tax: 6_000.0,
                ..Default::default()
            },
            appreciation: YearSchedule::flat(3.0),
            renting: RentingTerms { monthly_rent: 2_200.0, ..Default::default() },
            investment_return_rate: 5.0,
            selling: None,
        })
    }

    #[test]
    fn test_rows_follow_rate_order() {
        let rates = [2.0, 4.0, 6.0, 8.0, 10.0];
        let engine = ProjectionEngine::default();
        let rows = sweep_investment_returns(&engine, &scenario(), &rates, &[60, 120]).unwrap();

        let got: Vec<f64> = rows.iter().map(|r| r.investment_return_rate).collect();
        assert_eq!(got, rates.to_vec());
        assert!(rows.iter().all(|r| r.points.len() == 2));
    }

    #[test]
    fn test_higher_return_helps_renting() {
        let rows = sweep_investment_returns(
            &ProjectionEngine::default(),
            &scenario(),
            &[3.0, 9.0],
            &[120],
        )
        .unwrap();

        let low = rows[0].points[0];
        let high = rows[1].points[0];
        // Buying side does not depend on the investment rate
        assert_eq!(low.owning_net_worth, high.owning_net_worth);
        assert!(high.alternative_net_worth > low.alternative_net_worth);
        assert!(high.gap > low.gap);
    }

    #[test]
    fn test_sweep_matches_single_projection() {
        let engine = ProjectionEngine::default();
        let rows = sweep_investment_returns(&engine, &scenario(), &[7.0], &[36]).unwrap();
        let single = engine
            .project(&scenario().with_investment_return_rate(7.0))
            .unwrap()
            .net_worth_at(36);
        assert_eq!(rows[0].points[0].gap, single.gap());
    }

    #[test]
    fn test_invalid_scenario_fails_whole_sweep() {
        let ScenarioConfig::BuyVsRent(mut inner) = scenario() else {
            unreachable!()
        };
        inner.purchase_price = -1.0;
        let err = sweep_investment_returns(
            &ProjectionEngine::default(),
            &ScenarioConfig::BuyVsRent(inner),
            &[4.0, 6.0],
            &[12],
        )
        .unwrap_err();
        assert!(matches!(err, ProjectionError::NonPositivePrice { .. }));
    }
}
