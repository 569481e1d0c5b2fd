//! Period tables and exports built from a finished projection
//!
//! The engine works in months; reports sample it at the canonical periods
//! (1 to 10 years, optionally 15/20/30, plus the loan term).

mod export;
mod format;
mod periods;

use log::debug;
use serde::Serialize;

use crate::projection::{NetWorthSnapshot, Projection};

pub use export::{write_monthly_csv, MonthlyRow};
pub use format::{format_currency, NumberStyle};
pub use periods::{canonical_periods, Period};

/// Net worth of both arms at one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRow {
    pub period: String,
    pub loan_term: bool,
    #[serde(flatten)]
    pub net_worth: NetWorthSnapshot,
}

/// Loan progress at one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationRow {
    pub months: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub balance: f64,
}

/// Everything the summary tables show for one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub scenario: &'static str,
    pub horizon_months: u32,
    pub monthly_payment: f64,
    pub rows: Vec<PeriodRow>,
    /// Empty when there is no loan
    pub amortization: Vec<(String, AmortizationRow)>,
}

impl PeriodReport {
    /// Sample `projection` at its canonical periods
    ///
    /// Periods past the projection horizon are left out.
    pub fn build(projection: &Projection) -> Self {
        let scenario = projection.scenario();
        let loan = scenario.loan();
        let loan_term = if loan.has_loan() { loan.term_months } else { 0 };
        let horizon = projection.horizon_months();

        let extended = scenario.economics().extended_periods;
        let periods: Vec<Period> = canonical_periods(loan_term, extended)
            .into_iter()
            .filter(|p| {
                let within = p.months <= horizon;
                if !within {
                    debug!("Dropping period {} beyond the {} month horizon", p.label, horizon);
                }
                within
            })
            .collect();

        let rows = periods
            .iter()
            .map(|p| PeriodRow {
                period: p.label.clone(),
                loan_term: p.loan_term,
                net_worth: projection.net_worth_at(p.months),
            })
            .collect();

        let amortization = if loan.has_loan() {
            let schedule = &projection.series().loan;
            periods
                .iter()
                .map(|p| {
                    let (principal_paid, interest_paid) = schedule.paid_after(p.months);
                    (
                        p.label.clone(),
                        AmortizationRow {
                            months: p.months,
                            principal_paid,
                            interest_paid,
                            balance: schedule.balance_after(p.months),
                        },
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            scenario: scenario.name(),
            horizon_months: horizon,
            monthly_payment: projection.monthly_payment(),
            rows,
            amortization,
        }
    }
}
