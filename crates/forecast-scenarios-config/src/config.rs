// crates/forecast-scenarios-config/src/config.rs
// ============================================================================
// Module: Forecast Scenarios Configuration
// Description: Configuration loading and validation for the scenario engine.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: forecast-scenarios-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! It selects the fixture seed, the matcher policy for undeclared
//! capabilities, and which suite and tag filter a harness should enumerate.
//! Every section is optional; an empty file yields the standard setup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use forecast_scenarios_core::MatchPolicy;
use forecast_scenarios_core::RAND_SEED;
use forecast_scenarios_core::RegistryError;
use forecast_scenarios_core::ScenarioFilter;
use forecast_scenarios_core::ScenarioMatcher;
use forecast_scenarios_core::ScenarioRegistry;
use forecast_scenarios_core::ScenarioSuite;
use forecast_scenarios_core::ScenarioTag;
use forecast_scenarios_core::ScenarioTags;
use forecast_scenarios_core::StandardNormalGenerator;
use forecast_scenarios_core::SuiteName;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "forecast-scenarios.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "FORECAST_SCENARIOS_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of required tag filters.
pub(crate) const MAX_REQUIRED_TAGS: usize = 16;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Scenario engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioEngineConfig {
    /// Fixture generation settings.
    #[serde(default)]
    pub fixtures: FixtureConfig,
    /// Applicability matcher settings.
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Suite selection settings.
    #[serde(default)]
    pub suites: SuiteConfig,
}

impl ScenarioEngineConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.suites.validate()
    }

    /// Builds the scenario registry from the configured seed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when fixtures cannot be generated.
    pub fn build_registry(&self) -> Result<ScenarioRegistry, RegistryError> {
        ScenarioRegistry::build(&StandardNormalGenerator, self.fixtures.seed)
    }

    /// Returns a matcher using the configured policy.
    #[must_use]
    pub const fn matcher(&self) -> ScenarioMatcher {
        ScenarioMatcher::new(self.matching.policy)
    }

    /// Returns the configured default suite from `registry`.
    #[must_use]
    pub const fn default_suite<'r>(&self, registry: &'r ScenarioRegistry) -> &'r ScenarioSuite {
        registry.suite(self.suites.default_suite)
    }

    /// Returns the configured tag filter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required tag name is not recognized.
    pub fn scenario_filter(&self) -> Result<ScenarioFilter, ConfigError> {
        self.suites.required_tags().map(ScenarioFilter::from_tags)
    }
}

/// Fixture generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// Seed for every generated fixture.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

/// Applicability matcher settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchingConfig {
    /// Treatment of capabilities a candidate does not declare.
    #[serde(default)]
    pub policy: MatchPolicy,
}

/// Suite selection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Suite a harness enumerates when none is named.
    #[serde(default = "default_suite")]
    pub default_suite: SuiteName,
    /// Scenario tag values every enumerated scenario must declare.
    #[serde(default)]
    pub required_tags: BTreeMap<String, bool>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            default_suite: default_suite(),
            required_tags: BTreeMap::new(),
        }
    }
}

impl SuiteConfig {
    /// Validates suite selection settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.required_tags.len() > MAX_REQUIRED_TAGS {
            return Err(ConfigError::Invalid(format!(
                "suites.required_tags exceeds max of {MAX_REQUIRED_TAGS}"
            )));
        }
        self.required_tags()?;
        Ok(())
    }

    /// Parses required tag names into typed tags.
    fn required_tags(&self) -> Result<ScenarioTags, ConfigError> {
        let mut tags = ScenarioTags::new();
        for (name, value) in &self.required_tags {
            let tag: ScenarioTag = name.parse().map_err(|_| {
                ConfigError::Invalid(format!("suites.required_tags: unknown scenario tag `{name}`"))
            })?;
            tags.insert(tag, *value);
        }
        Ok(tags)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default fixture seed.
pub(crate) const fn default_seed() -> u64 {
    RAND_SEED
}

/// Default suite selection.
pub(crate) const fn default_suite() -> SuiteName {
    SuiteName::Default
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from an explicit argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    #[test]
    fn explicit_path_wins_over_default() {
        let resolved = resolve_path(Some(Path::new("custom.toml"))).unwrap();
        assert_eq!(resolved, PathBuf::from("custom.toml"));
    }

    #[test]
    fn validate_path_accepts_component_at_max() {
        let path = PathBuf::from("a".repeat(MAX_PATH_COMPONENT_LENGTH));
        assert!(validate_path(&path).is_ok(), "component at max should pass");
    }

    #[test]
    fn validate_path_rejects_component_too_long() {
        let path = PathBuf::from("a".repeat(MAX_PATH_COMPONENT_LENGTH + 1));
        let err = validate_path(&path).unwrap_err();
        assert!(err.to_string().contains("component too long"));
    }

    #[test]
    fn validate_path_rejects_total_length() {
        let component = "a".repeat(100);
        let path: PathBuf = std::iter::repeat_n(component.as_str(), 41).collect();
        let err = validate_path(&path).unwrap_err();
        assert!(err.to_string().contains("exceeds max length"));
    }

    #[test]
    fn required_tags_accept_every_recognized_name() {
        let config = SuiteConfig {
            default_suite: SuiteName::Simple,
            required_tags: ScenarioTag::ALL.iter().map(|tag| (tag.as_str().to_string(), true)).collect(),
        };
        let tags = config.required_tags().unwrap();
        assert_eq!(tags.len(), ScenarioTag::ALL.len());
    }
}
