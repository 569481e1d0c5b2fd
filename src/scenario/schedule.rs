//! Year-indexed schedules where the last entry carries forward

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};

/// Values by projection year (0-based), e.g. annual appreciation rates in
/// percent or tax-free gain limits in currency
///
/// Years past the end of the list reuse the last entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct YearSchedule {
    values: Vec<f64>,
}

impl YearSchedule {
    /// Create from explicit per-year values; at least one is required
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(ProjectionError::EmptySchedule { field: "year" });
        }
        Ok(Self { values })
    }

    /// Schedule with the same value for every year
    pub fn flat(value: f64) -> Self {
        Self { values: vec![value] }
    }

    /// Value applying to a 0-based projection year
    pub fn for_year(&self, year: usize) -> f64 {
        let idx = year.min(self.values.len() - 1);
        self.values[idx]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Never true once constructed
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for YearSchedule {
    fn default() -> Self {
        Self::flat(0.0)
    }
}

impl TryFrom<Vec<f64>> for YearSchedule {
    type Error = ProjectionError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<YearSchedule> for Vec<f64> {
    fn from(schedule: YearSchedule) -> Self {
        schedule.values
    }
}
