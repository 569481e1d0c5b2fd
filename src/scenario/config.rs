//! Scenario parameter records
//!
//! Each comparison has its own payload behind the `scenario` tag, so no field
//! changes meaning depending on which comparison is being run.

use serde::{Deserialize, Serialize};

use super::YearSchedule;
use crate::error::{ProjectionError, Result};

/// Economy-wide assumptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Economics {
    /// Annual inflation applied to recurring costs and rent (percent)
    #[serde(default)]
    pub inflation_rate: f64,

    /// Report 15y/20y/30y periods in addition to 1y..10y
    #[serde(default)]
    pub extended_periods: bool,
}

/// Fixed-rate amortizing loan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Principal (or remaining balance for an owned asset)
    #[serde(default)]
    pub amount: f64,

    /// Annual interest rate (percent)
    #[serde(default)]
    pub annual_rate: f64,

    /// Term (or remaining term) in months
    #[serde(default)]
    pub term_months: u32,
}

impl LoanTerms {
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 100.0 / 12.0
    }

    pub fn has_loan(&self) -> bool {
        self.amount > 0.0
    }

    fn validate(&self) -> Result<()> {
        if self.has_loan() && self.term_months == 0 {
            return Err(ProjectionError::NonPositiveDuration {
                field: "loan.term_months",
            });
        }
        Ok(())
    }
}

/// Recurring costs of holding the asset, excluding the loan payment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingCosts {
    #[serde(default)]
    pub annual_insurance_and_tax: f64,

    /// HOA, maintenance and similar yearly costs
    #[serde(default)]
    pub other_annual_costs: f64,

    #[serde(default)]
    pub monthly_expenses: f64,

    /// Rental or other income produced by the asset; offsets the costs above
    #[serde(default)]
    pub monthly_income: f64,
}

impl HoldingCosts {
    /// Month-one recurring cost before any inflation step
    pub fn monthly_baseline(&self) -> f64 {
        (self.annual_insurance_and_tax + self.other_annual_costs) / 12.0 + self.monthly_expenses
            - self.monthly_income
    }
}

/// Costs of renting a comparable home
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RentingTerms {
    #[serde(default)]
    pub deposit: f64,

    #[serde(default)]
    pub monthly_rent: f64,

    /// Yearly rental-related costs (renter's insurance, fees)
    #[serde(default)]
    pub annual_rent_costs: f64,

    #[serde(default)]
    pub other_annual_costs: f64,
}

impl RentingTerms {
    /// Month-one renting cost before any inflation step
    pub fn monthly_baseline(&self) -> f64 {
        self.monthly_rent + (self.annual_rent_costs + self.other_annual_costs) / 12.0
    }
}

/// Costs and taxes incurred when the asset is sold
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellingTerms {
    /// Agent commission as percent of sale price
    #[serde(default)]
    pub agent_commission: f64,

    /// Fixed staging and closing costs
    #[serde(default)]
    pub staging_costs: f64,

    /// Flat capital-gains tax rate (percent)
    #[serde(default)]
    pub capital_gains_tax: f64,

    /// Gain exempt from tax, by sale year
    #[serde(default)]
    pub tax_free_limits: YearSchedule,
}

/// Buy an asset with a loan, or rent and invest the difference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyVsRent {
    #[serde(default)]
    pub economics: Economics,

    pub purchase_price: f64,

    #[serde(default)]
    pub loan: LoanTerms,

    #[serde(default)]
    pub holding: HoldingCosts,

    /// Annual appreciation by year (percent)
    #[serde(default)]
    pub appreciation: YearSchedule,

    #[serde(default)]
    pub renting: RentingTerms,

    /// Annual return on invested savings (percent)
    #[serde(default)]
    pub investment_return_rate: f64,

    /// When present, buying net worth is measured as proceeds of a sale
    #[serde(default)]
    pub selling: Option<SellingTerms>,
}

impl BuyVsRent {
    pub fn down_payment(&self) -> f64 {
        self.purchase_price - self.loan.amount
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.purchase_price > 0.0) {
            return Err(ProjectionError::NonPositivePrice {
                field: "purchase_price",
                value: self.purchase_price,
            });
        }
        self.loan.validate()
    }
}

/// Sell an owned asset today and invest the proceeds, or keep holding it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellVsKeep {
    #[serde(default)]
    pub economics: Economics,

    /// Original purchase price; the cost basis for capital gains
    #[serde(default)]
    pub purchase_price: f64,

    pub current_market_value: f64,

    /// Outstanding loan: remaining balance, rate and remaining term
    #[serde(default)]
    pub loan: LoanTerms,

    #[serde(default)]
    pub holding: HoldingCosts,

    /// Annual appreciation by year from today (percent)
    #[serde(default)]
    pub appreciation: YearSchedule,

    /// Housing costs paid after selling, if the seller goes on to rent
    #[serde(default)]
    pub renting_after_sale: Option<RentingTerms>,

    /// Annual return on invested proceeds and surpluses (percent)
    #[serde(default)]
    pub investment_return_rate: f64,

    pub selling: SellingTerms,
}

impl SellVsKeep {
    pub fn validate(&self) -> Result<()> {
        if !(self.current_market_value > 0.0) {
            return Err(ProjectionError::NonPositivePrice {
                field: "current_market_value",
                value: self.current_market_value,
            });
        }
        self.loan.validate()
    }
}

/// Which comparison to run and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum ScenarioConfig {
    BuyVsRent(BuyVsRent),
    SellVsKeep(SellVsKeep),
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<()> {
        match self {
            ScenarioConfig::BuyVsRent(s) => s.validate(),
            ScenarioConfig::SellVsKeep(s) => s.validate(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioConfig::BuyVsRent(_) => "buy_vs_rent",
            ScenarioConfig::SellVsKeep(_) => "sell_vs_keep",
        }
    }

    pub fn economics(&self) -> &Economics {
        match self {
            ScenarioConfig::BuyVsRent(s) => &s.economics,
            ScenarioConfig::SellVsKeep(s) => &s.economics,
        }
    }

    pub fn loan(&self) -> &LoanTerms {
        match self {
            ScenarioConfig::BuyVsRent(s) => &s.loan,
            ScenarioConfig::SellVsKeep(s) => &s.loan,
        }
    }

    pub fn investment_return_rate(&self) -> f64 {
        match self {
            ScenarioConfig::BuyVsRent(s) => s.investment_return_rate,
            ScenarioConfig::SellVsKeep(s) => s.investment_return_rate,
        }
    }

    /// Copy of this scenario with a different investment return rate
    pub fn with_investment_return_rate(&self, rate: f64) -> Self {
        let mut scenario = self.clone();
        match &mut scenario {
            ScenarioConfig::BuyVsRent(s) => s.investment_return_rate = rate,
            ScenarioConfig::SellVsKeep(s) => s.investment_return_rate = rate,
        }
        scenario
    }
}
