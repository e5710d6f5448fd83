// crates/forecast-scenarios-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for scenario engine configuration. Output is
//! deterministic and always passes validation.

/// Returns a canonical example `forecast-scenarios.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[fixtures]
seed = 42

[matching]
# "permissive" treats undeclared capabilities as unconstrained.
policy = "permissive"

[suites]
default_suite = "default"

[suites.required_tags]
# univariate_y = true
# fh_passed_in_fit = true
# "pre-refactor" = false
"#,
    )
}
