// crates/forecast-scenarios-core/src/core/tags.rs
// ============================================================================
// Module: Scenario Tags
// Description: Closed set of scenario condition tags with boolean values.
// Purpose: Describe what input shape and call timing a scenario provides.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Scenario tags state what a fixture supplies (univariate or multivariate
//! targets, horizon passed at fit or only at predict). Tag names form a
//! closed enum: an unrecognized name is an explicit [`ScenarioError`] rather
//! than a key that silently never matches.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::core::scenario::ScenarioError;

// ============================================================================
// SECTION: Tag Keys
// ============================================================================

/// Recognized scenario condition names.
///
/// # Invariants
/// - Wire names are stable and match [`ScenarioTag::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScenarioTag {
    /// Target series passed to `fit` has a single column.
    #[serde(rename = "univariate_y")]
    UnivariateY,
    /// Forecast horizon is passed to `fit` rather than only to `predict`.
    #[serde(rename = "fh_passed_in_fit")]
    FhPassedInFit,
    /// Scenario exercised the legacy forecaster interface.
    #[serde(rename = "pre-refactor")]
    PreRefactor,
}

impl ScenarioTag {
    /// All recognized tags in canonical order.
    pub const ALL: [Self; 3] = [Self::UnivariateY, Self::FhPassedInFit, Self::PreRefactor];

    /// Returns the stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnivariateY => "univariate_y",
            Self::FhPassedInFit => "fh_passed_in_fit",
            Self::PreRefactor => "pre-refactor",
        }
    }
}

impl fmt::Display for ScenarioTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioTag {
    type Err = ScenarioError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == name)
            .ok_or_else(|| ScenarioError::UnknownTag(name.to_string()))
    }
}

// ============================================================================
// SECTION: Tag Set
// ============================================================================

/// Boolean values declared by a scenario, keyed by tag.
///
/// # Invariants
/// - Absent tags mean the scenario states nothing about that condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioTags(BTreeMap<ScenarioTag, bool>);

impl ScenarioTags {
    /// Creates an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the set with `tag` set to `value`.
    #[must_use]
    pub fn with(mut self, tag: ScenarioTag, value: bool) -> Self {
        self.0.insert(tag, value);
        self
    }

    /// Sets `tag` to `value`, replacing any previous value.
    pub fn insert(&mut self, tag: ScenarioTag, value: bool) {
        self.0.insert(tag, value);
    }

    /// Parses string-keyed tag values.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::UnknownTag`] for the first unrecognized name.
    pub fn from_named<'a, I>(pairs: I) -> Result<Self, ScenarioError>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut tags = Self::new();
        for (name, value) in pairs {
            tags.insert(name.parse()?, value);
        }
        Ok(tags)
    }

    /// Returns the declared value for `tag`.
    #[must_use]
    pub fn get(&self, tag: ScenarioTag) -> Option<bool> {
        self.0.get(&tag).copied()
    }

    /// Returns true when every tag in `required` is declared here with the same value.
    #[must_use]
    pub fn satisfies(&self, required: &Self) -> bool {
        required.iter().all(|(tag, value)| self.get(tag) == Some(value))
    }

    /// Iterates declared tags in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ScenarioTag, bool)> + '_ {
        self.0.iter().map(|(tag, value)| (*tag, *value))
    }

    /// Returns the number of declared tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no tag is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
