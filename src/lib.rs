//! Rent or Buy - month-by-month projections for housing decisions
//!
//! This library provides:
//! - Buy-vs-rent and sell-vs-keep comparisons over a fixed horizon
//! - Loan amortization, appreciation schedules and inflating costs
//! - Sale outcomes with selling costs and capital gains exemptions
//! - Dollar-cost averaged investment of savings and surpluses
//! - Period reports, CSV export and return-rate sensitivity sweeps
//! - Historical market returns for reference

pub mod error;
pub mod input;
pub mod market;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use input::RawInputs;
pub use projection::{NetWorthSnapshot, Projection, ProjectionConfig, ProjectionEngine, SaleOutcome};
pub use report::PeriodReport;
pub use scenario::{ScenarioConfig, YearSchedule};
