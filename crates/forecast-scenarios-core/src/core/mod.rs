// crates/forecast-scenarios-core/src/core/mod.rs
// ============================================================================
// Module: Scenario Core Types
// Description: Scenario data model, fixtures, and capability interface.
// Purpose: Provide immutable, serializable types shared by matcher and registry.
// Dependencies: rand, serde, serde_json, time
// ============================================================================

//! ## Overview
//! Core types describe what a scenario supplies (tags, arguments, call
//! order) and what an estimator declares (capabilities). They hold no
//! decision logic beyond small accessors.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod args;
pub mod capability;
pub mod fixtures;
pub mod hashing;
pub mod identifiers;
pub mod scenario;
pub mod tags;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use args::ARG_FH;
pub use args::ARG_X;
pub use args::ARG_Y;
pub use args::ArgValue;
pub use args::ForecastHorizon;
pub use args::Method;
pub use args::MethodArgs;
pub use capability::CapabilityQuery;
pub use capability::CapabilityReading;
pub use capability::EstimatorClass;
pub use capability::EstimatorFamily;
pub use capability::EstimatorInstance;
pub use capability::REQUIRES_FH_IN_FIT_TAG;
pub use capability::TARGET_ARITY_TAG;
pub use capability::TargetArity;
pub use fixtures::FixtureError;
pub use fixtures::SeriesGenerator;
pub use fixtures::SeriesTable;
pub use fixtures::StandardNormalGenerator;
pub use fixtures::make_series;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::EstimatorName;
pub use identifiers::ScenarioId;
pub use scenario::Scenario;
pub use scenario::ScenarioBuilder;
pub use scenario::ScenarioCall;
pub use scenario::ScenarioError;
pub use tags::ScenarioTag;
pub use tags::ScenarioTags;
