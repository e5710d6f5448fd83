// crates/forecast-scenarios-config/src/lib.rs
// ============================================================================
// Module: Forecast Scenarios Config Library
// Description: Config model, validation, and canonical example for the engine.
// Purpose: Single source of truth for forecast-scenarios.toml semantics.
// Dependencies: forecast-scenarios-core, serde, toml
// ============================================================================

//! ## Overview
//! `forecast-scenarios-config` defines the configuration model for the
//! forecast scenario engine. It provides strict, fail-closed validation and
//! a deterministic example configuration.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
