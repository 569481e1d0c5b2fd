//! Month-by-month CSV export

use std::io::Write;

use serde::Serialize;

use crate::projection::{NetWorthSnapshot, Projection};

/// One exported month; keep-arm columns are blank for buy-vs-rent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    pub month: u32,
    pub buying_cost: f64,
    pub renting_cost: f64,
    pub loan_balance: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub asset_value: f64,
    pub alternative_investment: f64,
    pub keep_invested: Option<f64>,
    pub keep_real_cost: Option<f64>,
    pub owning_net_worth: f64,
    pub alternative_net_worth: f64,
    pub gap: f64,
}

impl MonthlyRow {
    fn at(projection: &Projection, month: u32) -> Self {
        let series = projection.series();
        let idx = month as usize - 1;
        let (principal_paid, interest_paid) = series.loan.paid_after(month);
        let snapshot = projection.net_worth_at(month);

        let (keep_invested, keep_real_cost) = match &snapshot {
            NetWorthSnapshot::SellVsKeep(s) => (Some(s.keep_invested), Some(s.keep_real_cost)),
            NetWorthSnapshot::BuyVsRent(_) => (None, None),
        };

        Self {
            month,
            buying_cost: series.buying_cost[idx],
            renting_cost: series.renting_cost[idx],
            loan_balance: series.loan.balance_after(month),
            principal_paid,
            interest_paid,
            asset_value: projection.asset_value_at(month),
            alternative_investment: projection.alternative_investment()[idx],
            keep_invested,
            keep_real_cost,
            owning_net_worth: snapshot.owning_net_worth(),
            alternative_net_worth: snapshot.alternative_net_worth(),
            gap: snapshot.gap(),
        }
    }
}

/// Write one row per projected month, with a header
pub fn write_monthly_csv<W: Write>(projection: &Projection, writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for month in 1..=projection.horizon_months() {
        csv_writer.serialize(MonthlyRow::at(projection, month))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectionConfig, ProjectionEngine};
    use crate::scenario::{
        BuyVsRent, Economics, HoldingCosts, LoanTerms, RentingTerms, ScenarioConfig,
        SellVsKeep, SellingTerms, YearSchedule,
    };

    fn engine() -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig { horizon_months: 24 })
    }

    #[test]
    fn test_buy_vs_rent_export() {
        let scenario = ScenarioConfig::BuyVsRent(BuyVsRent {
            economics: Economics::default(),
            purchase_price: 300_000.0,
            loan: LoanTerms { amount: 240_000.0, annual_rate: 5.0, term_months: 180 },
            holding: HoldingCosts::default(),
            appreciation: YearSchedule::flat(2.0),
            renting: RentingTerms { monthly_rent: 1_800.0, ..Default::default() },
            investment_return_rate: 5.0,
            selling: None,
        });
        let projection = engine().project(&scenario).unwrap();

        let mut out = Vec::new();
        write_monthly_csv(&projection, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 25);
        assert!(lines[0].starts_with("month,buying_cost,renting_cost,loan_balance"));
        assert!(lines[1].starts_with("1,"));
        // Keep-arm columns are empty
        assert!(lines[1].contains(",,,"));
    }

    #[test]
    fn test_sell_vs_keep_export_reads_back() {
        let scenario = ScenarioConfig::SellVsKeep(SellVsKeep {
            economics: Economics::default(),
            purchase_price: 400_000.0,
            current_market_value: 900_000.0,
            loan: LoanTerms::default(),
            holding: HoldingCosts { monthly_income: 3_000.0, ..Default::default() },
            appreciation: YearSchedule::flat(3.0),
            renting_after_sale: None,
            investment_return_rate: 4.0,
            selling: SellingTerms::default(),
        });
        let projection = engine().project(&scenario).unwrap();

        let mut out = Vec::new();
        write_monthly_csv(&projection, &mut out).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let records: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 24);

        let keep_invested: f64 = records[11][8].parse().unwrap();
        assert!(keep_invested > 36_000.0);
        let month: u32 = records[23][0].parse().unwrap();
        assert_eq!(month, 24);
    }
}
