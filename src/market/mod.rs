//! Historical market returns shown next to the investment-return input
//!
//! Purely informational: nothing in the projection engine reads this data,
//! and an empty history is always a valid state.

mod prices;

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use prices::annual_returns_from_prices;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("market data I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed market data cache: {0}")]
    Json(#[from] serde_json::Error),

    #[error("price CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("price history has no usable rows")]
    InsufficientData,

    #[error("unknown instrument '{0}'")]
    UnknownInstrument(String),
}

/// Reference instruments tracked in the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    /// S&P 500
    Voo,
    /// Nasdaq 100
    Qqq,
    /// Total stock market
    Vti,
    /// Total bond market
    Bnd,
}

impl Instrument {
    pub const ALL: [Instrument; 4] = [
        Instrument::Voo,
        Instrument::Qqq,
        Instrument::Vti,
        Instrument::Bnd,
    ];

    pub fn ticker(self) -> &'static str {
        match self {
            Instrument::Voo => "VOO",
            Instrument::Qqq => "QQQ",
            Instrument::Vti => "VTI",
            Instrument::Bnd => "BND",
        }
    }

    pub fn from_ticker(ticker: &str) -> Result<Self, MarketDataError> {
        Self::ALL
            .into_iter()
            .find(|i| i.ticker().eq_ignore_ascii_case(ticker.trim()))
            .ok_or_else(|| MarketDataError::UnknownInstrument(ticker.to_string()))
    }
}

/// Annual returns (percent) by calendar year, per instrument
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketHistory {
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
    #[serde(default)]
    pub voo: BTreeMap<i32, f64>,
    #[serde(default)]
    pub qqq: BTreeMap<i32, f64>,
    #[serde(default)]
    pub vti: BTreeMap<i32, f64>,
    #[serde(default)]
    pub bnd: BTreeMap<i32, f64>,
}

/// Mean annual returns over the trailing complete years
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketAverages {
    pub years: usize,
    pub voo: f64,
    pub qqq: f64,
    pub vti: f64,
    pub bnd: f64,
    /// 60% VTI / 40% BND
    pub mix_60_40: f64,
}

/// Trailing window used for averages
pub const AVERAGE_WINDOW_YEARS: i32 = 10;

impl MarketHistory {
    /// Load the cache; a missing file is an empty history
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MarketDataError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MarketDataError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        Instrument::ALL.iter().all(|i| self.returns(*i).is_empty())
    }

    pub fn returns(&self, instrument: Instrument) -> &BTreeMap<i32, f64> {
        match instrument {
            Instrument::Voo => &self.voo,
            Instrument::Qqq => &self.qqq,
            Instrument::Vti => &self.vti,
            Instrument::Bnd => &self.bnd,
        }
    }

    fn returns_mut(&mut self, instrument: Instrument) -> &mut BTreeMap<i32, f64> {
        match instrument {
            Instrument::Voo => &mut self.voo,
            Instrument::Qqq => &mut self.qqq,
            Instrument::Vti => &mut self.vti,
            Instrument::Bnd => &mut self.bnd,
        }
    }

    /// Overwrite years present in `returns` and stamp the update date
    pub fn merge_returns(
        &mut self,
        instrument: Instrument,
        returns: &BTreeMap<i32, f64>,
        today: NaiveDate,
    ) {
        let target = self.returns_mut(instrument);
        for (year, ret) in returns {
            target.insert(*year, *ret);
        }
        self.last_updated = Some(today);
    }

    /// Whether the cache needs a refresh: never updated, last updated before
    /// today, or missing the current year
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        let Some(last) = self.last_updated else {
            return true;
        };
        if (today - last).num_days() >= 1 {
            return true;
        }
        !self.voo.contains_key(&today.year())
    }

    /// Averages over complete years in the trailing window that every
    /// instrument has data for; `None` when no year qualifies
    pub fn averages(&self, current_year: i32) -> Option<MarketAverages> {
        let window = (current_year - AVERAGE_WINDOW_YEARS)..current_year;

        let mut sums = [0.0; 4];
        let mut count = 0usize;

        for (year, voo) in self.voo.range(window) {
            let (Some(qqq), Some(vti), Some(bnd)) =
                (self.qqq.get(year), self.vti.get(year), self.bnd.get(year))
            else {
                continue;
            };
            sums[0] += voo;
            sums[1] += qqq;
            sums[2] += vti;
            sums[3] += bnd;
            count += 1;
        }

        if count == 0 {
            return None;
        }

        let n = count as f64;
        let (voo, qqq, vti, bnd) = (sums[0] / n, sums[1] / n, sums[2] / n, sums[3] / n);
        Some(MarketAverages {
            years: count,
            voo,
            qqq,
            vti,
            bnd,
            mix_60_40: vti * 0.6 + bnd * 0.4,
        })
    }
}
