// crates/forecast-scenarios-core/src/lib.rs
// ============================================================================
// Module: Forecast Scenarios Core Library
// Description: Public API surface for forecaster test scenarios.
// Purpose: Expose scenario types, the applicability matcher, and the registry.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! Forecast scenarios describe fixed, reproducible fit/predict call sequences
//! for exercising forecasting estimators. A scenario declares what it
//! supplies through tags; an estimator declares what it accepts through
//! capabilities; the matcher decides whether the pair is meaningful. The
//! registry enumerates the standard scenarios in named suites, built from
//! seeded fixtures so every run sees identical data.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod runtime;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use runtime::APPLICABILITY_RULES;
pub use runtime::Applicability;
pub use runtime::ApplicabilityRule;
pub use runtime::ApplicabilityTrace;
pub use runtime::ManifestEntry;
pub use runtime::MatchPolicy;
pub use runtime::NoopTrace;
pub use runtime::RAND_SEED;
pub use runtime::REQUIRED_FAMILY;
pub use runtime::RegistryError;
pub use runtime::RegistryManifest;
pub use runtime::RejectionReason;
pub use runtime::RuleOutcome;
pub use runtime::ScenarioFilter;
pub use runtime::ScenarioMatcher;
pub use runtime::ScenarioRegistry;
pub use runtime::ScenarioSuite;
pub use runtime::SuiteManifest;
pub use runtime::SuiteName;
pub use runtime::ids;
pub use runtime::is_applicable;
pub use runtime::retrieve_scenarios;
