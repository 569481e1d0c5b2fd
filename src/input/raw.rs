//! Saved field-entry inputs and their conversion into a scenario
//!
//! Inputs are kept exactly as typed (`"purchase_price": "500K"`), the same
//! key → text map the interactive form writes out. Parsing happens here so
//! the engine only ever sees numbers.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::parse::{parse_amount, parse_duration, parse_rate_list, parse_toggle, ParseError};
use crate::scenario::{
    BuyVsRent, Economics, HoldingCosts, LoanTerms, RentingTerms, ScenarioConfig, SellVsKeep,
    SellingTerms, YearSchedule,
};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read inputs: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed inputs file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field}: {source}")]
    Field {
        field: String,
        #[source]
        source: ParseError,
    },

    #[error("unknown scenario '{0}': expected buy_vs_rent or sell_vs_keep")]
    UnknownScenario(String),
}

/// Field key → entered text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInputs {
    values: BTreeMap<String, String>,
}

impl RawInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a saved inputs file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InputError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Entered text for `key`; missing keys read as empty
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn amount(&self, key: &str) -> Result<f64, InputError> {
        parse_amount(self.get(key)).map_err(|source| field_error(key, source))
    }

    fn duration(&self, key: &str) -> Result<u32, InputError> {
        parse_duration(self.get(key)).map_err(|source| field_error(key, source))
    }

    fn schedule(&self, key: &str) -> Result<YearSchedule, InputError> {
        parse_rate_list(self.get(key)).map_err(|source| field_error(key, source))
    }

    fn toggle(&self, key: &str) -> bool {
        parse_toggle(self.get(key))
    }

    /// Build the scenario selected by the `scenario` key (default buy-vs-rent)
    pub fn to_scenario(&self) -> Result<ScenarioConfig, InputError> {
        match self.get("scenario").trim() {
            "" | "buy_vs_rent" => Ok(ScenarioConfig::BuyVsRent(self.buy_vs_rent()?)),
            "sell_vs_keep" => Ok(ScenarioConfig::SellVsKeep(self.sell_vs_keep()?)),
            other => Err(InputError::UnknownScenario(other.to_string())),
        }
    }

    fn buy_vs_rent(&self) -> Result<BuyVsRent, InputError> {
        let selling = if self.toggle("include_selling") {
            Some(self.selling()?)
        } else {
            None
        };

        Ok(BuyVsRent {
            economics: self.economics()?,
            purchase_price: self.amount("purchase_price")?,
            loan: self.loan()?,
            holding: self.holding()?,
            appreciation: self.schedule("appreciation_rate")?,
            renting: self.renting()?,
            investment_return_rate: self.amount("investment_return_rate")?,
            selling,
        })
    }

    fn sell_vs_keep(&self) -> Result<SellVsKeep, InputError> {
        let renting_after_sale = if self.toggle("rent_after_sale") {
            Some(self.renting()?)
        } else {
            None
        };

        Ok(SellVsKeep {
            economics: self.economics()?,
            purchase_price: self.amount("purchase_price")?,
            current_market_value: self.amount("current_market_value")?,
            loan: self.loan()?,
            holding: self.holding()?,
            appreciation: self.schedule("appreciation_rate")?,
            renting_after_sale,
            investment_return_rate: self.amount("investment_return_rate")?,
            selling: self.selling()?,
        })
    }

    fn economics(&self) -> Result<Economics, InputError> {
        Ok(Economics {
            inflation_rate: self.amount("inflation_rate")?,
            extended_periods: self.toggle("include_30year"),
        })
    }

    /// Rate and duration are only read when there is a loan to amortize
    fn loan(&self) -> Result<LoanTerms, InputError> {
        let amount = self.amount("loan_amount")?;
        if amount <= 0.0 {
            return Ok(LoanTerms { amount, annual_rate: 0.0, term_months: 0 });
        }

        Ok(LoanTerms {
            amount,
            annual_rate: self.amount("loan_rate")?,
            term_months: self.duration("loan_duration")?,
        })
    }

    fn holding(&self) -> Result<HoldingCosts, InputError> {
        Ok(HoldingCosts {
            annual_insurance_and_tax: self.amount("annual_insurance")?,
            other_annual_costs: self.amount("annual_taxes")?,
            monthly_expenses: self.amount("monthly_expenses")?,
            monthly_income: self.amount("monthly_income")?,
        })
    }

    fn renting(&self) -> Result<RentingTerms, InputError> {
        Ok(RentingTerms {
            deposit: self.amount("rent_deposit")?,
            monthly_rent: self.amount("monthly_rent")?,
            annual_rent_costs: self.amount("annual_rent_costs")?,
            other_annual_costs: self.amount("other_annual_costs")?,
        })
    }

    fn selling(&self) -> Result<SellingTerms, InputError> {
        Ok(SellingTerms {
            agent_commission: self.amount("agent_commission")?,
            staging_costs: self.amount("staging_costs")?,
            capital_gains_tax: self.amount("capital_gains_tax")?,
            tax_free_limits: self.schedule("tax_free_limit")?,
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut inputs = Self::new();
        for (key, value) in iter {
            inputs.insert(key, value);
        }
        inputs
    }
}

fn field_error(key: &str, source: ParseError) -> InputError {
    InputError::Field {
        field: key.to_string(),
        source,
    }
}
