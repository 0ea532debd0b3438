//! Daily-compounded money market fund returns

use log::debug;
use serde::{Deserialize, Serialize};

/// Day-count basis for the daily rate; no leap-year adjustment
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Outcome of an MMF holding-period projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MmfResult {
    /// Amount invested on day zero
    pub principal: f64,

    /// Length of the holding period in days
    pub days_invested: i32,

    /// Annual rate as a percentage (6.0 = 6%)
    pub annual_rate_percent: f64,

    /// Annual rate divided by 365, still in percent
    pub daily_rate_percent: f64,

    pub interest_earned: f64,

    /// Value at the end of the holding period
    pub final_amount: f64,
}

impl MmfResult {
    /// Interest as a percentage of the amount invested
    pub fn return_percent(&self) -> Option<f64> {
        super::return_percent(self.interest_earned, self.principal)
    }
}

/// Compound `principal` daily for `days_invested` days.
///
/// `final = principal * (1 + rate / 100 / 365) ^ days`, evaluated in closed
/// form. Zero days returns the principal unchanged. Negative days are not
/// rejected here and discount the principal instead (inverse compounding).
pub fn compute_mmf(principal: f64, days_invested: i32, annual_rate_percent: f64) -> MmfResult {
    let daily_rate = annual_rate_percent / DAYS_PER_YEAR / 100.0;
    let final_amount = principal * (1.0 + daily_rate).powi(days_invested);
    let interest_earned = final_amount - principal;

    debug!(
        "mmf: principal={} days={} rate={}% -> final={}",
        principal, days_invested, annual_rate_percent, final_amount
    );

    MmfResult {
        principal,
        days_invested,
        annual_rate_percent,
        daily_rate_percent: daily_rate * 100.0,
        interest_earned,
        final_amount,
    }
}
