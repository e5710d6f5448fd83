// crates/forecast-scenarios-core/src/core/args.rs
// ============================================================================
// Module: Method Arguments
// Description: Estimator method names and their concrete argument values.
// Purpose: Hold the fixed keyword arguments a scenario passes per method call.
// Dependencies: crate::core::fixtures, serde
// ============================================================================

//! ## Overview
//! A scenario passes keyword arguments to each forecaster method it calls.
//! Values are fixture tables, forecast horizons, or plain scalars, all built
//! once at definition time and never mutated afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::slice;
use std::str::FromStr;

use serde::Serialize;

use crate::core::fixtures::SeriesTable;
use crate::core::scenario::ScenarioError;

// ============================================================================
// SECTION: Argument Names
// ============================================================================

/// Target series argument.
pub const ARG_Y: &str = "y";
/// Exogenous input argument.
pub const ARG_X: &str = "X";
/// Forecast horizon argument.
pub const ARG_FH: &str = "fh";

// ============================================================================
// SECTION: Methods
// ============================================================================

/// Forecaster method a scenario may call.
///
/// # Invariants
/// - Wire names are stable and match [`Method::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Fit the forecaster to a target series.
    Fit,
    /// Predict at the forecast horizon.
    Predict,
    /// Update a fitted forecaster with new observations.
    Update,
}

impl Method {
    /// All recognized methods.
    pub const ALL: [Self; 3] = [Self::Fit, Self::Predict, Self::Update];

    /// Returns the stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Predict => "predict",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ScenarioError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == name)
            .ok_or_else(|| ScenarioError::UnknownMethod(name.to_string()))
    }
}

// ============================================================================
// SECTION: Values
// ============================================================================

/// Forecast horizon specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ForecastHorizon {
    /// Single step ahead, written as a bare integer.
    Step(u32),
    /// Several steps ahead, written as a list.
    Steps(Vec<u32>),
}

impl ForecastHorizon {
    /// Returns the horizon steps as a slice.
    #[must_use]
    pub fn steps(&self) -> &[u32] {
        match self {
            Self::Step(step) => slice::from_ref(step),
            Self::Steps(steps) => steps,
        }
    }
}

/// Concrete argument value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArgValue {
    /// Time-indexed numeric table.
    Series(SeriesTable),
    /// Forecast horizon.
    Horizon(ForecastHorizon),
    /// Plain numeric scalar.
    Scalar(f64),
}

impl ArgValue {
    /// Returns the table when the value is a series.
    #[must_use]
    pub const fn as_series(&self) -> Option<&SeriesTable> {
        match self {
            Self::Series(table) => Some(table),
            Self::Horizon(_) | Self::Scalar(_) => None,
        }
    }

    /// Returns the horizon when the value is a horizon.
    #[must_use]
    pub const fn as_horizon(&self) -> Option<&ForecastHorizon> {
        match self {
            Self::Horizon(horizon) => Some(horizon),
            Self::Series(_) | Self::Scalar(_) => None,
        }
    }

    /// Returns the scalar when the value is a scalar.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::Series(_) | Self::Horizon(_) => None,
        }
    }
}

impl From<SeriesTable> for ArgValue {
    fn from(table: SeriesTable) -> Self {
        Self::Series(table)
    }
}

impl From<ForecastHorizon> for ArgValue {
    fn from(horizon: ForecastHorizon) -> Self {
        Self::Horizon(horizon)
    }
}

// ============================================================================
// SECTION: Argument Map
// ============================================================================

/// Keyword arguments for one method call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MethodArgs(BTreeMap<String, ArgValue>);

impl MethodArgs {
    /// Creates an empty argument map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the map with `name` bound to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0.get(name)
    }

    /// Returns the series bound to `name`.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&SeriesTable> {
        self.get(name).and_then(ArgValue::as_series)
    }

    /// Returns the forecast horizon, if one is passed.
    #[must_use]
    pub fn horizon(&self) -> Option<&ForecastHorizon> {
        self.get(ARG_FH).and_then(ArgValue::as_horizon)
    }

    /// Iterates arguments in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no argument is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
