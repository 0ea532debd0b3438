//! One-year simple interest on a principal plus monthly contributions

use log::debug;
use serde::{Deserialize, Serialize};

/// Contribution months in the fixed one-year horizon
pub const MONTHS_PER_YEAR: u32 = 12;

/// Outcome of a SACCO projection over one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaccoResult {
    /// Opening balance
    pub principal: f64,

    /// Amount paid in each month
    pub monthly_contribution: f64,

    /// Principal plus twelve monthly contributions
    pub total_contributions: f64,

    /// Annual rate as a percentage (8.0 = 8%)
    pub annual_rate_percent: f64,

    pub interest_earned: f64,

    /// Balance after one year
    pub final_amount: f64,
}

impl SaccoResult {
    /// Twelve months of contributions, excluding the principal
    pub fn annual_contributions(&self) -> f64 {
        self.monthly_contribution * MONTHS_PER_YEAR as f64
    }

    /// Interest as a percentage of total contributions
    pub fn return_percent(&self) -> Option<f64> {
        super::return_percent(self.interest_earned, self.total_contributions)
    }
}

/// Project a SACCO balance one year forward.
///
/// Interest is simple and applied once to the full-year total of
/// contributions, so a contribution made in month 12 earns the same as the
/// opening principal. Inputs are not range checked.
pub fn compute_sacco(principal: f64, monthly_contribution: f64, annual_rate_percent: f64) -> SaccoResult {
    let total_contributions = principal + monthly_contribution * MONTHS_PER_YEAR as f64;
    let interest_earned = total_contributions * (annual_rate_percent / 100.0);
    let final_amount = total_contributions + interest_earned;

    debug!(
        "sacco: principal={} monthly={} rate={}% -> final={}",
        principal, monthly_contribution, annual_rate_percent, final_amount
    );

    SaccoResult {
        principal,
        monthly_contribution,
        total_contributions,
        annual_rate_percent,
        interest_earned,
        final_amount,
    }
}
