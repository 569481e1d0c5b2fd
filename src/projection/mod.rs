//! Projection engine for buy-vs-rent and sell-vs-keep comparisons

pub mod amortization;
pub mod appreciation;
mod costs;
mod engine;
pub mod investment;
mod net_worth;
pub mod sale;
pub mod sweep;

pub use costs::{CostInputs, MonthlySeries};
pub use engine::{ArmSeries, Projection, ProjectionConfig, ProjectionEngine};
pub use investment::SurplusSeries;
pub use net_worth::{BuyVsRentSnapshot, NetWorthSnapshot, SellVsKeepSnapshot};
pub use sale::SaleOutcome;
pub use sweep::{sweep_investment_returns, SweepPoint, SweepRow};

// ============================================================================
// Projection Constants
// ============================================================================
// Every series covers the same horizon so any report period up to 30 years
// can be read straight from the arrays, whatever the loan term.

/// Default projection horizon (30 years of months)
pub const DEFAULT_HORIZON_MONTHS: u32 = 360;

/// Longest horizon a run may request (100 years of months)
pub const MAX_HORIZON_MONTHS: u32 = 1_200;

/// Share of a rent deposit assumed to come back at move-out (75%)
pub const RECOVERABLE_DEPOSIT_FRACTION: f64 = 0.75;
