// crates/forecast-scenarios-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for forecast-scenarios-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::io::Write;

use forecast_scenarios_config::ConfigError;
use forecast_scenarios_config::ScenarioEngineConfig;
use tempfile::NamedTempFile;

/// Standard result type for config tests.
pub type TestResult = Result<(), String>;

/// Parses a TOML string into a `ScenarioEngineConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<ScenarioEngineConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<ScenarioEngineConfig, toml::de::Error> {
    config_from_toml("")
}

/// Writes `contents` to a temporary file and returns its handle.
pub fn write_config(contents: &[u8]) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(contents).map_err(|err| err.to_string())?;
    file.flush().map_err(|err| err.to_string())?;
    Ok(file)
}

/// Asserts that a result is an error whose message contains `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
