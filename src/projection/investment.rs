//! Month-by-month investment growth
//!
//! Both simulators step through the already-built cost series one month at a
//! time. Contributions change every month (inflation, loan payoff), so there
//! is no closed form to fall back on.

/// Monthly growth factor for an annual return given in percent
pub fn monthly_growth(annual_return_pct: f64) -> f64 {
    1.0 + annual_return_pct / 100.0 / 12.0
}

/// Dollar-cost averaged portfolio value after each month
///
/// Each month's contribution is added before that month's growth, so money
/// invested late in a year compounds for less than a full year and the
/// effective multi-year return sits below the nominal rate.
pub fn dollar_cost_average<I>(initial: f64, contributions: I, annual_return_pct: f64) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let growth = monthly_growth(annual_return_pct);
    let mut value = initial;

    contributions
        .into_iter()
        .map(|contribution| {
            value += contribution;
            value *= growth;
            value
        })
        .collect()
}

/// Keep-arm investment position over the horizon
///
/// Index `i` is the position at the end of month `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurplusSeries {
    /// Value of surpluses invested so far
    pub invested: Vec<f64>,
    /// Out-of-pocket cost not covered by the invested surplus
    pub real_cost: Vec<f64>,
    /// `invested - real_cost`
    pub net_position: Vec<f64>,
}

impl SurplusSeries {
    /// Track surpluses and deficits of a monthly cost series
    ///
    /// Negative cost (net income) is invested. Positive cost is drawn from the
    /// invested balance first; only the uncovered remainder is a real cost.
    /// The invested balance compounds every month regardless.
    pub fn simulate(monthly_costs: &[f64], annual_return_pct: f64) -> Self {
        let growth = monthly_growth(annual_return_pct);
        let n = monthly_costs.len();

        let mut invested_series = Vec::with_capacity(n);
        let mut real_cost_series = Vec::with_capacity(n);
        let mut net_series = Vec::with_capacity(n);

        let mut invested = 0.0;
        let mut real_cost = 0.0;

        for &cost in monthly_costs {
            if cost < 0.0 {
                invested += -cost;
            } else if cost > 0.0 {
                let drawn = cost.min(invested);
                invested -= drawn;
                real_cost += cost - drawn;
            }

            invested *= growth;

            invested_series.push(invested);
            real_cost_series.push(real_cost);
            net_series.push(invested - real_cost);
        }

        Self {
            invested: invested_series,
            real_cost: real_cost_series,
            net_position: net_series,
        }
    }

    /// Net position after `month` months, clamped to the horizon
    pub fn net_position_after(&self, month: u32) -> f64 {
        lookup(&self.net_position, month, 0.0)
    }

    pub fn invested_after(&self, month: u32) -> f64 {
        lookup(&self.invested, month, 0.0)
    }

    pub fn real_cost_after(&self, month: u32) -> f64 {
        lookup(&self.real_cost, month, 0.0)
    }
}

/// Value of a month-end series after `month` months
///
/// Month 0 returns `initial`; months past the end clamp to the last entry.
pub fn lookup(series: &[f64], month: u32, initial: f64) -> f64 {
    if month == 0 || series.is_empty() {
        return initial;
    }
    let idx = (month as usize - 1).min(series.len() - 1);
    series[idx]
}
