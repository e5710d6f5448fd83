// crates/forecast-scenarios-core/src/runtime/registry.rs
// ============================================================================
// Module: Forecasting Scenario Registry
// Description: Concrete forecasting scenarios grouped into named suites.
// Purpose: Enumerate fixed fit/predict scenarios for test parametrization.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The registry defines every forecasting scenario once, from fixtures
//! generated with a fixed seed, and groups them into ordered suites:
//!
//! - `simple`: one univariate scenario without exogenous input and one
//!   multivariate scenario with exogenous input, for fast smoke tests.
//! - `extended`: every shape combination exercised by forecaster tests.
//! - `default`: alias of `extended`.
//!
//! Suites share scenario instances through [`Arc`]. No applicability
//! filtering happens here; callers filter with
//! [`ScenarioMatcher`](crate::runtime::ScenarioMatcher).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::OnceLock;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ARG_FH;
use crate::core::ARG_X;
use crate::core::ARG_Y;
use crate::core::EstimatorFamily;
use crate::core::FixtureError;
use crate::core::ForecastHorizon;
use crate::core::HashDigest;
use crate::core::HashError;
use crate::core::Method;
use crate::core::MethodArgs;
use crate::core::Scenario;
use crate::core::ScenarioError;
use crate::core::ScenarioId;
use crate::core::ScenarioTag;
use crate::core::SeriesGenerator;
use crate::core::SeriesTable;
use crate::core::StandardNormalGenerator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Seed used for every standard fixture.
pub const RAND_SEED: u64 = 42;

/// Rows in every target series passed to `fit`.
const FIT_TIMEPOINTS: usize = 20;
/// Rows in the exogenous table that train and test windows are cut from.
const EXOGENOUS_TIMEPOINTS: usize = 30;
/// Columns in multivariate targets and exogenous tables.
const MULTIVARIATE_COLUMNS: usize = 2;

/// Identifiers of the standard forecasting scenarios.
pub mod ids {
    /// Univariate y, no X, horizon passed to fit and predict.
    pub const UNIVARIATE_NO_X: &str = "forecaster_fit_predict_univariate_no_x";
    /// Univariate y, no X, horizon passed to fit only.
    pub const UNIVARIATE_NO_X_EARLY_FH: &str = "forecaster_fit_predict_univariate_no_x_early_fh";
    /// Univariate y, no X, horizon passed to predict only.
    pub const UNIVARIATE_NO_X_LATE_FH: &str = "forecaster_fit_predict_univariate_no_x_late_fh";
    /// Univariate y, no X, three-step horizon.
    pub const UNIVARIATE_NO_X_LONG_FH: &str = "forecaster_fit_predict_univariate_no_x_long_fh";
    /// Univariate y with X.
    pub const UNIVARIATE_WITH_X: &str = "forecaster_fit_predict_univariate_with_x";
    /// Univariate y with X, three-step horizon.
    pub const UNIVARIATE_WITH_X_LONG_FH: &str = "forecaster_fit_predict_univariate_with_x_long_fh";
    /// Multivariate y, no X.
    pub const MULTIVARIATE_NO_X: &str = "forecaster_fit_predict_multivariate_no_x";
    /// Multivariate y with X, three-step horizon.
    pub const MULTIVARIATE_WITH_X: &str = "forecaster_fit_predict_multivariate_with_x";
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building the registry.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Fixture generation failed.
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    /// Scenario definition failed.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

// ============================================================================
// SECTION: Suites
// ============================================================================

/// Named scenario collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteName {
    /// Minimal smoke-test pair.
    Simple,
    /// Every exercised shape combination.
    Extended,
    /// Alias of [`SuiteName::Extended`].
    Default,
}

impl SuiteName {
    /// All suite names.
    pub const ALL: [Self; 3] = [Self::Simple, Self::Extended, Self::Default];

    /// Returns the stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Extended => "extended",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for SuiteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuiteName {
    type Err = ScenarioError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|suite| suite.as_str() == name)
            .ok_or_else(|| ScenarioError::UnknownSuite(name.to_string()))
    }
}

/// Ordered group of shared scenarios.
///
/// # Invariants
/// - Order is stable for deterministic enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSuite {
    /// Suite name.
    name: SuiteName,
    /// Scenarios in enumeration order.
    scenarios: Vec<Arc<Scenario>>,
}

impl ScenarioSuite {
    /// Returns the suite name.
    #[must_use]
    pub const fn name(&self) -> SuiteName {
        self.name
    }

    /// Returns the scenarios in order.
    #[must_use]
    pub fn scenarios(&self) -> &[Arc<Scenario>] {
        &self.scenarios
    }

    /// Iterates the scenarios in order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Scenario>> {
        self.scenarios.iter()
    }

    /// Returns the scenario with identifier `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<Scenario>> {
        self.scenarios.iter().find(|scenario| scenario.id().as_str() == id)
    }

    /// Returns true when the suite holds a scenario with identifier `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Returns true when the suite is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

// ============================================================================
// SECTION: Manifest
// ============================================================================

/// Fingerprints of every registered scenario, per suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryManifest {
    /// Seed the fixtures were generated from.
    pub seed: u64,
    /// One entry per suite name, in [`SuiteName::ALL`] order.
    pub suites: Vec<SuiteManifest>,
}

/// Fingerprints of one suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteManifest {
    /// Suite name.
    pub name: SuiteName,
    /// Entries in suite order.
    pub scenarios: Vec<ManifestEntry>,
}

/// Fingerprint of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Scenario identifier.
    pub scenario_id: ScenarioId,
    /// Canonical fingerprint of the scenario and its fixtures.
    pub fingerprint: HashDigest,
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Forecasting scenarios grouped into suites.
///
/// # Invariants
/// - Read-only after construction; safe to share across threads.
/// - Every scenario in `simple` is also in `extended` (same instance).
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRegistry {
    /// Seed the fixtures were generated from.
    seed: u64,
    /// Smoke-test suite.
    simple: ScenarioSuite,
    /// Full suite.
    extended: ScenarioSuite,
}

impl ScenarioRegistry {
    /// Builds the registry from fixtures produced by `generator` with `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when fixture generation or scenario
    /// definition fails.
    pub fn build<G: SeriesGenerator + ?Sized>(
        generator: &G,
        seed: u64,
    ) -> Result<Self, RegistryError> {
        let fixtures = ForecastingFixtures::generate(generator, seed)?;

        let univariate_no_x = Arc::new(univariate_no_x(&fixtures)?);
        let multivariate_with_x = Arc::new(multivariate_with_x(&fixtures)?);

        let simple = ScenarioSuite {
            name: SuiteName::Simple,
            scenarios: vec![Arc::clone(&univariate_no_x), Arc::clone(&multivariate_with_x)],
        };
        let extended = ScenarioSuite {
            name: SuiteName::Extended,
            scenarios: vec![
                univariate_no_x,
                Arc::new(univariate_no_x_early_fh(&fixtures)?),
                Arc::new(univariate_no_x_late_fh(&fixtures)?),
                Arc::new(univariate_no_x_long_fh(&fixtures)?),
                Arc::new(univariate_with_x(&fixtures)?),
                Arc::new(univariate_with_x_long_fh(&fixtures)?),
                Arc::new(multivariate_no_x(&fixtures)?),
                multivariate_with_x,
            ],
        };
        Ok(Self {
            seed,
            simple,
            extended,
        })
    }

    /// Builds the registry with the standard generator and [`RAND_SEED`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the standard fixtures cannot be built.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::build(&StandardNormalGenerator, RAND_SEED)
    }

    /// Returns the process-wide standard registry, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the standard fixtures cannot be built.
    pub fn shared() -> Result<&'static Self, RegistryError> {
        static REGISTRY: OnceLock<Result<ScenarioRegistry, RegistryError>> = OnceLock::new();
        REGISTRY.get_or_init(Self::standard).as_ref().map_err(Clone::clone)
    }

    /// Returns the seed the fixtures were generated from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the suite registered under `name`.
    #[must_use]
    pub const fn suite(&self, name: SuiteName) -> &ScenarioSuite {
        match name {
            SuiteName::Simple => &self.simple,
            SuiteName::Extended | SuiteName::Default => &self.extended,
        }
    }

    /// Returns the scenario with identifier `id`.
    #[must_use]
    pub fn scenario(&self, id: &str) -> Option<&Arc<Scenario>> {
        self.extended.get(id)
    }

    /// Returns the suite used for estimators of `family`, if any.
    #[must_use]
    pub const fn for_family(&self, family: EstimatorFamily) -> Option<&ScenarioSuite> {
        match family {
            EstimatorFamily::Forecaster => Some(self.suite(SuiteName::Default)),
            EstimatorFamily::Transformer
            | EstimatorFamily::Classifier
            | EstimatorFamily::Regressor
            | EstimatorFamily::Clusterer => None,
        }
    }

    /// Fingerprints every scenario of every suite.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when a fixture cannot be canonicalized.
    pub fn manifest(&self) -> Result<RegistryManifest, HashError> {
        let mut suites = Vec::with_capacity(SuiteName::ALL.len());
        for name in SuiteName::ALL {
            let mut scenarios = Vec::with_capacity(self.suite(name).len());
            for scenario in self.suite(name).iter() {
                scenarios.push(ManifestEntry {
                    scenario_id: scenario.id().clone(),
                    fingerprint: scenario.fingerprint()?,
                });
            }
            suites.push(SuiteManifest {
                name,
                scenarios,
            });
        }
        Ok(RegistryManifest {
            seed: self.seed,
            suites,
        })
    }
}

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Fixture tables shared by the standard scenarios.
struct ForecastingFixtures {
    /// Univariate target, 20 rows.
    y: SeriesTable,
    /// Bivariate target, 20 rows.
    y_multivariate: SeriesTable,
    /// Exogenous rows 0..20, aligned with the targets.
    x_fit: SeriesTable,
    /// Exogenous rows 20..23, for a three-step horizon.
    x_test: SeriesTable,
    /// Exogenous row 20, for a one-step horizon.
    x_test_short: SeriesTable,
}

impl ForecastingFixtures {
    /// Generates all tables from one seed.
    fn generate<G: SeriesGenerator + ?Sized>(
        generator: &G,
        seed: u64,
    ) -> Result<Self, FixtureError> {
        let long_x = generator.make_series(EXOGENOUS_TIMEPOINTS, MULTIVARIATE_COLUMNS, seed)?;
        Ok(Self {
            y: generator.make_series(FIT_TIMEPOINTS, 1, seed)?,
            y_multivariate: generator.make_series(FIT_TIMEPOINTS, MULTIVARIATE_COLUMNS, seed)?,
            x_fit: long_x.slice(0 .. FIT_TIMEPOINTS)?,
            x_test: long_x.slice(FIT_TIMEPOINTS .. FIT_TIMEPOINTS + 3)?,
            x_test_short: long_x.slice(FIT_TIMEPOINTS .. FIT_TIMEPOINTS + 1)?,
        })
    }
}

/// One-step horizon.
const fn one_step() -> ForecastHorizon {
    ForecastHorizon::Step(1)
}

/// Three-step horizon.
fn three_steps() -> ForecastHorizon {
    ForecastHorizon::Steps(vec![1, 2, 3])
}

// ============================================================================
// SECTION: Scenario Definitions
// ============================================================================

/// Fit/predict, univariate y, no X.
fn univariate_no_x(fixtures: &ForecastingFixtures) -> Result<Scenario, ScenarioError> {
    Scenario::builder(ids::UNIVARIATE_NO_X)
        .description("Fit/predict only, univariate y, no X.")
        .tag(ScenarioTag::UnivariateY, true)
        .tag(ScenarioTag::FhPassedInFit, true)
        .tag(ScenarioTag::PreRefactor, true)
        .args(
            Method::Fit,
            MethodArgs::new().with(ARG_Y, fixtures.y.clone()).with(ARG_FH, one_step()),
        )
        .args(Method::Predict, MethodArgs::new().with(ARG_FH, one_step()))
        .sequence([Method::Fit, Method::Predict])
        .build()
}

/// Fit/predict, univariate y, no X, horizon only at fit.
fn univariate_no_x_early_fh(fixtures: &ForecastingFixtures) -> Result<Scenario, ScenarioError> {
    Scenario::builder(ids::UNIVARIATE_NO_X_EARLY_FH)
        .description("Fit/predict only, univariate y, no X, no fh in predict.")
        .tag(ScenarioTag::UnivariateY, true)
        .tag(ScenarioTag::FhPassedInFit, true)
        .args(
            Method::Fit,
            MethodArgs::new().with(ARG_Y, fixtures.y.clone()).with(ARG_FH, one_step()),
        )
        .args(Method::Predict, MethodArgs::new())
        .sequence([Method::Fit, Method::Predict])
        .build()
}

/// Fit/predict, univariate y, no X, horizon only at predict.
fn univariate_no_x_late_fh(fixtures: &ForecastingFixtures) -> Result<Scenario, ScenarioError> {
    Scenario::builder(ids::UNIVARIATE_NO_X_LATE_FH)
        .description("Fit/predict only, univariate y, no X, fh only in predict.")
        .tag(ScenarioTag::UnivariateY, true)
        .tag(ScenarioTag::FhPassedInFit, false)
        .args(Method::Fit, MethodArgs::new().with(ARG_Y, fixtures.y.clone()))
        .args(Method::Predict, MethodArgs::new().with(ARG_FH, one_step()))
        .sequence([Method::Fit, Method::Predict])
        .build()
}

/// Fit/predict, univariate y, no X, three-step horizon.
fn univariate_no_x_long_fh(fixtures: &ForecastingFixtures) -> Result<Scenario, ScenarioError> {
    Scenario::builder(ids::UNIVARIATE_NO_X_LONG_FH)
        .description("Fit/predict only, univariate y, no X, longer fh.")
        .tag(ScenarioTag::UnivariateY, true)
        .tag(ScenarioTag::FhPassedInFit, true)
        .args(
            Method::Fit,
            MethodArgs::new().with(ARG_Y, fixtures.y.clone()).with(ARG_FH, three_steps()),
        )
        .args(Method::Predict, MethodArgs::new())
        .sequence([Method::Fit, Method::Predict])
        .build()
}

/// Fit/predict, univariate y, with X.
fn univariate_with_x(fixtures: &ForecastingFixtures) -> Result<Scenario, ScenarioError> {
    Scenario::builder(ids::UNIVARIATE_WITH_X)
        .description("Fit/predict only, univariate y, with X.")
        .tag(ScenarioTag::UnivariateY, true)
        .tag(ScenarioTag::FhPassedInFit, true)
        .args(
            Method::Fit,
            MethodArgs::new()
                .with(ARG_Y, fixtures.y.clone())
                .with(ARG_X, fixtures.x_fit.clone())
                .with(ARG_FH, one_step()),
        )
        .args(Method::Predict, MethodArgs::new().with(ARG_X, fixtures.x_test_short.clone()))
        .sequence([Method::Fit, Method::Predict])
        .build()
}

/// Fit/predict, univariate y, with X, three-step horizon.
fn univariate_with_x_long_fh(fixtures: &ForecastingFixtures) -> Result<Scenario, ScenarioError> {
    Scenario::builder(ids::UNIVARIATE_WITH_X_LONG_FH)
        .description("Fit/predict only, univariate y, with X, and longer fh.")
        .tag(ScenarioTag::UnivariateY, true)
        .tag(ScenarioTag::FhPassedInFit, true)
        .args(
            Method::Fit,
            MethodArgs::new()
                .with(ARG_Y, fixtures.y.clone())
                .with(ARG_X, fixtures.x_fit.clone())
                .with(ARG_FH, three_steps()),
        )
        .args(Method::Predict, MethodArgs::new().with(ARG_X, fixtures.x_test.clone()))
        .sequence([Method::Fit, Method::Predict])
        .build()
}

/// Fit/predict, multivariate y, no X.
fn multivariate_no_x(fixtures: &ForecastingFixtures) -> Result<Scenario, ScenarioError> {
    Scenario::builder(ids::MULTIVARIATE_NO_X)
        .description("Fit/predict only, multivariate y, no X.")
        .tag(ScenarioTag::UnivariateY, false)
        .tag(ScenarioTag::FhPassedInFit, true)
        .tag(ScenarioTag::PreRefactor, true)
        .args(
            Method::Fit,
            MethodArgs::new()
                .with(ARG_Y, fixtures.y_multivariate.clone())
                .with(ARG_FH, one_step()),
        )
        .args(Method::Predict, MethodArgs::new())
        .sequence([Method::Fit, Method::Predict])
        .build()
}

/// Fit/predict, multivariate y, with X, three-step horizon.
fn multivariate_with_x(fixtures: &ForecastingFixtures) -> Result<Scenario, ScenarioError> {
    Scenario::builder(ids::MULTIVARIATE_WITH_X)
        .description("Fit/predict only, multivariate y, with X, and longer fh.")
        .tag(ScenarioTag::UnivariateY, false)
        .tag(ScenarioTag::FhPassedInFit, true)
        .args(
            Method::Fit,
            MethodArgs::new()
                .with(ARG_Y, fixtures.y_multivariate.clone())
                .with(ARG_X, fixtures.x_fit.clone())
                .with(ARG_FH, three_steps()),
        )
        .args(Method::Predict, MethodArgs::new().with(ARG_X, fixtures.x_test.clone()))
        .sequence([Method::Fit, Method::Predict])
        .build()
}
