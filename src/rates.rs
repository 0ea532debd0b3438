//! MMF rate lookup
//!
//! A [`RateSource`] either yields an annual rate or a clear failure. Callers
//! go through [`resolve_rate`], which falls back to a manually supplied rate
//! whenever the lookup fails.

use crate::input::MMF_MAX_RATE_PERCENT;
use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateLookupError {
    #[error("{source_name} does not publish a machine-readable MMF rate")]
    Unavailable { source_name: String },

    #[error("{source_name} returned an implausible rate of {rate}%")]
    Implausible { source_name: String, rate: f64 },
}

/// Something that can quote a current MMF annual rate, in percent
pub trait RateSource {
    fn name(&self) -> &str;

    fn fetch_annual_rate(&self) -> Result<f64, RateLookupError>;
}

/// A fund provider whose published rate is not parsed.
///
/// Always reports [`RateLookupError::Unavailable`], so the caller is sent to
/// manual entry.
#[derive(Debug, Clone)]
pub struct UnpublishedRateSource {
    name: String,
}

impl UnpublishedRateSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for UnpublishedRateSource {
    fn default() -> Self {
        Self::new("Cytonn")
    }
}

impl RateSource for UnpublishedRateSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_annual_rate(&self) -> Result<f64, RateLookupError> {
        Err(RateLookupError::Unavailable { source_name: self.name.clone() })
    }
}

/// A rate known up front, e.g. from the command line
#[derive(Debug, Clone, Copy)]
pub struct FixedRateSource(pub f64);

impl RateSource for FixedRateSource {
    fn name(&self) -> &str {
        "fixed"
    }

    fn fetch_annual_rate(&self) -> Result<f64, RateLookupError> {
        Ok(self.0)
    }
}

/// A user-supplied rate if there is one, otherwise the provider lookup
pub fn source_for(rate: Option<f64>) -> Box<dyn RateSource> {
    match rate {
        Some(r) => Box::new(FixedRateSource(r)),
        None => Box::new(UnpublishedRateSource::default()),
    }
}

/// Fetch a rate from `source`, checking it against the MMF bounds
pub fn lookup_rate(source: &dyn RateSource) -> Result<f64, RateLookupError> {
    let rate = source.fetch_annual_rate()?;
    if !rate.is_finite() || !(0.0..=MMF_MAX_RATE_PERCENT).contains(&rate) {
        return Err(RateLookupError::Implausible {
            source_name: source.name().to_string(),
            rate,
        });
    }
    Ok(rate)
}

/// Try `source` first; on any failure ask `manual` for the rate instead
pub fn resolve_rate<F, E>(source: &dyn RateSource, manual: F) -> Result<f64, E>
where
    F: FnOnce() -> Result<f64, E>,
{
    match lookup_rate(source) {
        Ok(rate) => {
            info!("using {}% MMF rate from {}", rate, source.name());
            Ok(rate)
        }
        Err(e) => {
            warn!("unable to fetch MMF rate: {}", e);
            manual()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpublished_source_fails() {
        let source = UnpublishedRateSource::default();
        assert_eq!(
            source.fetch_annual_rate(),
            Err(RateLookupError::Unavailable { source_name: "Cytonn".to_string() })
        );
    }

    #[test]
    fn test_resolve_falls_back_to_manual() {
        let rate: Result<f64, ()> = resolve_rate(&UnpublishedRateSource::default(), || Ok(11.5));
        assert_eq!(rate, Ok(11.5));
    }

    #[test]
    fn test_resolve_uses_fetched_rate() {
        let rate: Result<f64, ()> = resolve_rate(&FixedRateSource(9.25), || panic!("manual entry not expected"));
        assert_eq!(rate, Ok(9.25));
    }

    #[test]
    fn test_given_rate_goes_through_lookup() {
        let given: Result<f64, ()> = resolve_rate(source_for(Some(6.5)).as_ref(), || Ok(1.0));
        assert_eq!(given, Ok(6.5));

        // Out-of-range values fall back to manual entry like any failed lookup
        let capped: Result<f64, ()> = resolve_rate(source_for(Some(80.0)).as_ref(), || Ok(12.0));
        assert_eq!(capped, Ok(12.0));

        assert_eq!(source_for(None).name(), "Cytonn");
    }

    #[test]
    fn test_implausible_rate_is_a_failure() {
        assert!(matches!(lookup_rate(&FixedRateSource(75.0)), Err(RateLookupError::Implausible { .. })));
        assert_eq!(resolve_rate::<_, ()>(&FixedRateSource(-1.0), || Ok(7.0)), Ok(7.0));
    }

    #[test]
    fn test_manual_failure_propagates() {
        let rate = resolve_rate(&UnpublishedRateSource::default(), || Err("stdin closed"));
        assert_eq!(rate, Err("stdin closed"));
    }
}
