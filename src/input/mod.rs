//! Validated calculation requests
//!
//! Every surface builds one of these requests, validates it, and only then calls
//! into [`crate::calculator`]. Defaults mirror the web form's starting values.

mod parse;

pub use parse::{parse_amount, parse_days, parse_rate};

use crate::calculator::{compute_mmf, compute_sacco, MmfResult, SaccoResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound accepted for a SACCO annual rate, in percent
pub const SACCO_MAX_RATE_PERCENT: f64 = 100.0;

/// Upper bound accepted for an MMF annual rate, in percent
pub const MMF_MAX_RATE_PERCENT: f64 = 50.0;

/// Input rejected before it reaches a calculator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be between 0 and {max}% (got {value})")]
    RateOutOfRange { field: &'static str, value: f64, max: f64 },

    #[error("days invested must be greater than 0 (got {0})")]
    NonPositiveDays(i64),

    #[error("days invested must be at most {max} (got {value})")]
    DaysOutOfRange { value: i64, max: i64 },

    #[error("projected {0} is too large to represent")]
    ResultOverflow(&'static str),

    #[error("invalid {field}: '{input}' is not a valid {expected}")]
    Parse {
        field: &'static str,
        input: String,
        expected: &'static str,
    },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub(crate) fn check_amount(field: &'static str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

pub(crate) fn check_rate(field: &'static str, value: f64, max: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if !(0.0..=max).contains(&value) {
        return Err(ValidationError::RateOutOfRange { field, value, max });
    }
    Ok(value)
}

pub(crate) fn check_days(value: i64) -> ValidationResult<i32> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveDays(value));
    }
    i32::try_from(value).map_err(|_| ValidationError::DaysOutOfRange {
        value,
        max: i64::from(i32::MAX),
    })
}

/// Reject results whose inputs were in range but whose growth left `f64`
pub(crate) fn check_result(field: &'static str, value: f64) -> ValidationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::ResultOverflow(field))
    }
}

/// Inputs for a one-year SACCO projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaccoRequest {
    #[serde(default = "default_sacco_principal")]
    pub principal: f64,

    #[serde(default = "default_monthly_contribution")]
    pub monthly_contribution: f64,

    #[serde(default = "default_sacco_rate")]
    pub annual_rate_percent: f64,
}

fn default_sacco_principal() -> f64 { 50_000.0 }
fn default_monthly_contribution() -> f64 { 5_000.0 }
fn default_sacco_rate() -> f64 { 8.0 }

impl Default for SaccoRequest {
    fn default() -> Self {
        Self {
            principal: default_sacco_principal(),
            monthly_contribution: default_monthly_contribution(),
            annual_rate_percent: default_sacco_rate(),
        }
    }
}

impl SaccoRequest {
    pub fn new(principal: f64, monthly_contribution: f64, annual_rate_percent: f64) -> Self {
        Self { principal, monthly_contribution, annual_rate_percent }
    }

    /// Check fields in order, reporting the first failure
    pub fn validate(&self) -> ValidationResult<()> {
        check_amount("principal", self.principal)?;
        check_amount("monthly contribution", self.monthly_contribution)?;
        check_rate("annual interest rate", self.annual_rate_percent, SACCO_MAX_RATE_PERCENT)?;
        Ok(())
    }

    /// Validate, then run the SACCO calculator
    pub fn calculate(&self) -> ValidationResult<SaccoResult> {
        self.validate()?;
        let result = compute_sacco(self.principal, self.monthly_contribution, self.annual_rate_percent);
        check_result("final amount", result.final_amount)?;
        Ok(result)
    }
}

/// Inputs for an MMF holding-period projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MmfRequest {
    #[serde(default = "default_mmf_principal")]
    pub principal: f64,

    /// Signed so that zero and negative counts reach validation instead of
    /// failing deserialization with a less useful message
    #[serde(default = "default_days")]
    pub days_invested: i64,

    #[serde(default = "default_mmf_rate")]
    pub annual_rate_percent: f64,
}

fn default_mmf_principal() -> f64 { 100_000.0 }
fn default_days() -> i64 { 90 }
fn default_mmf_rate() -> f64 { 6.0 }

impl Default for MmfRequest {
    fn default() -> Self {
        Self {
            principal: default_mmf_principal(),
            days_invested: default_days(),
            annual_rate_percent: default_mmf_rate(),
        }
    }
}

impl MmfRequest {
    pub fn new(principal: f64, days_invested: i64, annual_rate_percent: f64) -> Self {
        Self { principal, days_invested, annual_rate_percent }
    }

    /// Check fields in order, handing back the day count in calculator form
    fn checked_days(&self) -> ValidationResult<i32> {
        check_amount("investment amount", self.principal)?;
        let days = check_days(self.days_invested)?;
        check_rate("MMF annual rate", self.annual_rate_percent, MMF_MAX_RATE_PERCENT)?;
        Ok(days)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        self.checked_days().map(|_| ())
    }

    /// Validate, then run the MMF calculator.
    ///
    /// Long holdings at high rates can compound past `f64::MAX`; those are
    /// reported as [`ValidationError::ResultOverflow`].
    pub fn calculate(&self) -> ValidationResult<MmfResult> {
        let days = self.checked_days()?;
        let result = compute_mmf(self.principal, days, self.annual_rate_percent);
        check_result("final value", result.final_amount)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_match_form() {
        let sacco = SaccoRequest::default();
        assert_eq!((sacco.principal, sacco.monthly_contribution, sacco.annual_rate_percent), (50_000.0, 5_000.0, 8.0));

        let mmf = MmfRequest::default();
        assert_eq!((mmf.principal, mmf.days_invested, mmf.annual_rate_percent), (100_000.0, 90, 6.0));
    }

    #[test]
    fn test_sacco_calculate() {
        let result = SaccoRequest::new(50_000.0, 5_000.0, 8.0).calculate().unwrap();
        assert_relative_eq!(result.final_amount, 118_800.0, max_relative = 1e-12);
    }

    #[test]
    fn test_sacco_rejects_negative_principal() {
        let err = SaccoRequest::new(-1.0, 0.0, 5.0).validate().unwrap_err();
        assert_eq!(err, ValidationError::Negative { field: "principal", value: -1.0 });
    }

    #[test]
    fn test_sacco_first_failure_wins() {
        let err = SaccoRequest::new(10.0, -5.0, 250.0).validate().unwrap_err();
        assert!(matches!(err, ValidationError::Negative { field: "monthly contribution", .. }));
    }

    #[test]
    fn test_sacco_rate_bounds() {
        assert!(SaccoRequest::new(1.0, 1.0, 0.0).validate().is_ok());
        assert!(SaccoRequest::new(1.0, 1.0, 100.0).validate().is_ok());
        assert!(matches!(
            SaccoRequest::new(1.0, 1.0, 100.5).validate(),
            Err(ValidationError::RateOutOfRange { max, .. }) if max == 100.0
        ));
        assert!(SaccoRequest::new(1.0, 1.0, -0.1).validate().is_err());
    }

    #[test]
    fn test_rejects_nan() {
        assert_eq!(
            SaccoRequest::new(f64::NAN, 0.0, 5.0).validate(),
            Err(ValidationError::NotFinite { field: "principal" })
        );
        assert!(MmfRequest::new(1.0, 10, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_mmf_days_must_be_positive() {
        assert_eq!(MmfRequest::new(1_000.0, 0, 6.0).validate(), Err(ValidationError::NonPositiveDays(0)));
        assert_eq!(MmfRequest::new(1_000.0, -3, 6.0).validate(), Err(ValidationError::NonPositiveDays(-3)));
        assert!(MmfRequest::new(1_000.0, 1, 6.0).validate().is_ok());
    }

    #[test]
    fn test_mmf_rate_cap() {
        assert!(MmfRequest::new(1_000.0, 30, 50.0).validate().is_ok());
        assert!(MmfRequest::new(1_000.0, 30, 50.01).validate().is_err());
    }

    #[test]
    fn test_mmf_calculate() {
        let result = MmfRequest::default().calculate().unwrap();
        assert_eq!(result.days_invested, 90);
        assert!((result.final_amount - 101_490.33).abs() < 0.01);
    }

    #[test]
    fn test_mmf_overflowing_growth_rejected() {
        let err = MmfRequest::new(1_000.0, 1_000_000, 50.0).calculate().unwrap_err();
        assert_eq!(err, ValidationError::ResultOverflow("final value"));
        assert_eq!(err.to_string(), "projected final value is too large to represent");
        assert!(MmfRequest::new(1_000.0, 1_000_000, 50.0).validate().is_ok());
    }

    #[test]
    fn test_sacco_overflowing_total_rejected() {
        let err = SaccoRequest::new(f64::MAX, f64::MAX, 100.0).calculate().unwrap_err();
        assert_eq!(err, ValidationError::ResultOverflow("final amount"));
    }

    #[test]
    fn test_mmf_days_beyond_i32() {
        assert_eq!(
            MmfRequest::new(1_000.0, 3_000_000_000, 6.0).validate(),
            Err(ValidationError::DaysOutOfRange { value: 3_000_000_000, max: 2_147_483_647 })
        );
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let req: MmfRequest = serde_json::from_str(r#"{"principal": 2500}"#).unwrap();
        assert_eq!(req.principal, 2_500.0);
        assert_eq!(req.days_invested, 90);
        assert_eq!(req.annual_rate_percent, 6.0);
    }

    #[test]
    fn test_error_messages() {
        let err = MmfRequest::new(1_000.0, 30, 75.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "MMF annual rate must be between 0 and 50% (got 75)");
    }
}
