// crates/forecast-scenarios-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and estimator fixtures for scenario tests.
// ============================================================================
//! ## Overview
//! Shared test helpers for consistent Result-based assertions, plus small
//! estimator descriptors used across matcher and registry tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::error::Error;
use std::fmt;

use forecast_scenarios_core::EstimatorClass;
use forecast_scenarios_core::EstimatorFamily;
use forecast_scenarios_core::REQUIRES_FH_IN_FIT_TAG;
use forecast_scenarios_core::TARGET_ARITY_TAG;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across scenario integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl TestError {
    /// Creates a new test error with the provided message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition { Ok(()) } else { Err(Box::new(TestError::new(message))) }
}

// ========================================================================
// Estimator Fixtures
// ========================================================================

/// Forecaster class declaring a target arity and the fit-time horizon flag.
pub fn forecaster(arity: &str, requires_fh_in_fit: bool) -> EstimatorClass {
    EstimatorClass::new("TestForecaster", EstimatorFamily::Forecaster)
        .with_tag(TARGET_ARITY_TAG, arity)
        .with_tag(REQUIRES_FH_IN_FIT_TAG, requires_fh_in_fit)
}

/// Forecaster class declaring no capabilities.
pub fn bare_forecaster() -> EstimatorClass {
    EstimatorClass::new("BareForecaster", EstimatorFamily::Forecaster)
}

/// Transformer class with forecaster-like capabilities.
pub fn transformer() -> EstimatorClass {
    EstimatorClass::new("TestTransformer", EstimatorFamily::Transformer)
        .with_tag(TARGET_ARITY_TAG, "both")
        .with_tag(REQUIRES_FH_IN_FIT_TAG, false)
}
