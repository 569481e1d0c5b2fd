//! Domain errors raised by the projection engine

use thiserror::Error;

/// Errors that abort a projection run
///
/// Degenerate but valid inputs (zero rates, zero loans, negative costs) never
/// produce one of these; they yield well-defined series instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// A duration that feeds a denominator was zero
    #[error("{field} must be greater than zero months")]
    NonPositiveDuration { field: &'static str },

    /// The anchor price of a scenario was zero, negative or not a number
    #[error("{field} must be strictly positive (got {value})")]
    NonPositivePrice { field: &'static str, value: f64 },

    /// A duration longer than the engine will allocate series for
    #[error("{field} must be at most {max} months (got {value})")]
    ExcessiveDuration {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// A closed-form calculation overflowed for the given input
    #[error("{field} is outside the range the loan formula can evaluate")]
    NonFiniteResult { field: &'static str },

    /// A year-indexed schedule had no entries
    #[error("{field} schedule must contain at least one entry")]
    EmptySchedule { field: &'static str },
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
