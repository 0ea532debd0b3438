//! Pure return calculators for SACCO savings and money market fund holdings
//!
//! Both calculators are total functions of their inputs: no validation, no I/O,
//! no shared state. Range checks belong to [`crate::input`].

mod sacco;
mod mmf;

pub use sacco::{compute_sacco, SaccoResult, MONTHS_PER_YEAR};
pub use mmf::{compute_mmf, MmfResult, DAYS_PER_YEAR};

/// Interest as a percentage of the starting amount, or `None` for a zero base
pub(crate) fn return_percent(interest_earned: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        None
    } else {
        Some(interest_earned / base * 100.0)
    }
}
