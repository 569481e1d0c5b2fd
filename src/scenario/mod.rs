//! Scenario definitions: the validated parameter records a projection consumes

mod config;
mod schedule;

pub use config::{
    BuyVsRent, Economics, HoldingCosts, LoanTerms, RentingTerms, ScenarioConfig, SellVsKeep,
    SellingTerms,
};
pub use schedule::YearSchedule;
