// crates/forecast-scenarios-core/src/runtime/mod.rs
// ============================================================================
// Module: Scenario Runtime
// Description: Applicability matching, scenario registry, and retrieval.
// Purpose: Turn static scenario data into per-estimator test parametrization.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Runtime components consume core scenario types. The matcher is pure and
//! stateless; the registry is built once and read concurrently afterwards.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod applicability;
pub mod getter;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use applicability::APPLICABILITY_RULES;
pub use applicability::Applicability;
pub use applicability::ApplicabilityRule;
pub use applicability::ApplicabilityTrace;
pub use applicability::MatchPolicy;
pub use applicability::NoopTrace;
pub use applicability::REQUIRED_FAMILY;
pub use applicability::RejectionReason;
pub use applicability::RuleOutcome;
pub use applicability::ScenarioMatcher;
pub use applicability::is_applicable;
pub use getter::ScenarioFilter;
pub use getter::retrieve_scenarios;
pub use registry::ManifestEntry;
pub use registry::RAND_SEED;
pub use registry::RegistryError;
pub use registry::RegistryManifest;
pub use registry::ScenarioRegistry;
pub use registry::ScenarioSuite;
pub use registry::SuiteManifest;
pub use registry::SuiteName;
pub use registry::ids;
