//! SACCO Calculator - return projections for SACCO members
//!
//! This library provides:
//! - One-year simple interest on a SACCO principal plus monthly contributions
//! - Daily-compounded money market fund (MMF) returns over a holding period
//! - Input validation, rate lookup with manual fallback, and report formatting
//! - Parallel batch evaluation of CSV scenario files

pub mod calculator;
pub mod input;
pub mod rates;
pub mod report;
pub mod batch;
pub mod web;

// Re-export commonly used types
pub use calculator::{compute_mmf, compute_sacco, MmfResult, SaccoResult};
pub use input::{MmfRequest, SaccoRequest, ValidationError};
pub use rates::{RateSource, RateLookupError};
pub use report::ReportConfig;
