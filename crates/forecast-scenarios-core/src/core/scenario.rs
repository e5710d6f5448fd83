// crates/forecast-scenarios-core/src/core/scenario.rs
// ============================================================================
// Module: Scenario Data Model
// Description: Immutable bundle of tags, per-method arguments, and call order.
// Purpose: Represent one fixed, reproducible forecaster test case.
// Dependencies: crate::core::{args, hashing, identifiers, tags}, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Scenario`] reads as "call method A with args X, then method B with
//! args Y". It is inert data: it never calls an estimator and never carries
//! estimator state, so one instance can be shared by every trial in a
//! process. Applicability is decided elsewhere, by
//! [`crate::runtime::applicability`].
//!
//! Construction checks that the method sequence is non-empty and that scalar
//! arguments are finite. A method in the sequence without an argument entry
//! is called with no arguments.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::core::args::Method;
use crate::core::args::MethodArgs;
use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;
use crate::core::identifiers::ScenarioId;
use crate::core::tags::ScenarioTag;
use crate::core::tags::ScenarioTags;

/// Shared fallback for methods without an argument entry.
static EMPTY_ARGS: MethodArgs = MethodArgs::new();

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while defining or naming scenarios.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// Scenario declares no method calls.
    #[error("scenario {0} has an empty method sequence")]
    EmptyMethodSequence(ScenarioId),
    /// Tag name is not a recognized scenario tag.
    #[error("unknown scenario tag: {0}")]
    UnknownTag(String),
    /// Method name is not a recognized forecaster method.
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    /// Suite name is not a registered suite.
    #[error("unknown scenario suite: {0}")]
    UnknownSuite(String),
    /// Scalar argument is NaN or infinite.
    #[error("scenario {scenario} passes a non-finite scalar `{argument}` to {method}")]
    NonFiniteScalar {
        /// Scenario identifier.
        scenario: ScenarioId,
        /// Method receiving the argument.
        method: Method,
        /// Argument name.
        argument: String,
    },
}

// ============================================================================
// SECTION: Scenario
// ============================================================================

/// One fixed, reproducible test case.
///
/// # Invariants
/// - `method_sequence` is non-empty.
/// - Scalar arguments are finite, so a scenario always equals its clone.
/// - Every method in `method_sequence` has an entry in `args`.
/// - No field changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    /// Scenario identifier.
    id: ScenarioId,
    /// One-line description.
    description: String,
    /// Declared condition tags.
    tags: ScenarioTags,
    /// Keyword arguments per method.
    args: BTreeMap<Method, MethodArgs>,
    /// Ordered method calls.
    method_sequence: Vec<Method>,
}

impl Scenario {
    /// Starts building a scenario with the given identifier.
    #[must_use]
    pub fn builder(id: impl Into<ScenarioId>) -> ScenarioBuilder {
        ScenarioBuilder {
            id: id.into(),
            description: String::new(),
            tags: ScenarioTags::new(),
            args: BTreeMap::new(),
            method_sequence: Vec::new(),
        }
    }

    /// Returns the scenario identifier.
    #[must_use]
    pub const fn id(&self) -> &ScenarioId {
        &self.id
    }

    /// Returns the one-line description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the declared tags.
    #[must_use]
    pub const fn tags(&self) -> &ScenarioTags {
        &self.tags
    }

    /// Returns the declared value of one tag.
    #[must_use]
    pub fn tag(&self, tag: ScenarioTag) -> Option<bool> {
        self.tags.get(tag)
    }

    /// Returns the arguments for `method`, empty when none were given.
    #[must_use]
    pub fn args(&self, method: Method) -> &MethodArgs {
        self.args.get(&method).unwrap_or(&EMPTY_ARGS)
    }

    /// Returns the ordered method sequence.
    #[must_use]
    pub fn method_sequence(&self) -> &[Method] {
        &self.method_sequence
    }

    /// Iterates the calls in sequence order.
    pub fn calls(&self) -> impl Iterator<Item = ScenarioCall<'_>> {
        self.method_sequence.iter().map(|method| ScenarioCall {
            method: *method,
            args: self.args(*method),
        })
    }

    /// Returns the canonical fingerprint of the scenario, fixtures included.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when a fixture value cannot be canonicalized.
    pub fn fingerprint(&self) -> Result<HashDigest, HashError> {
        hash_canonical_json(DEFAULT_HASH_ALGORITHM, self)
    }
}

/// One method call in a scenario sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioCall<'a> {
    /// Method to call.
    pub method: Method,
    /// Keyword arguments for the call.
    pub args: &'a MethodArgs,
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`Scenario`].
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    /// Scenario identifier.
    id: ScenarioId,
    /// One-line description.
    description: String,
    /// Declared condition tags.
    tags: ScenarioTags,
    /// Keyword arguments per method.
    args: BTreeMap<Method, MethodArgs>,
    /// Ordered method calls.
    method_sequence: Vec<Method>,
}

impl ScenarioBuilder {
    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets one condition tag.
    #[must_use]
    pub fn tag(mut self, tag: ScenarioTag, value: bool) -> Self {
        self.tags.insert(tag, value);
        self
    }

    /// Replaces all condition tags.
    #[must_use]
    pub fn tags(mut self, tags: ScenarioTags) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the arguments for `method`.
    #[must_use]
    pub fn args(mut self, method: Method, args: MethodArgs) -> Self {
        self.args.insert(method, args);
        self
    }

    /// Sets the method call order.
    #[must_use]
    pub fn sequence(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.method_sequence = methods.into_iter().collect();
        self
    }

    /// Finishes the scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::EmptyMethodSequence`] when no method call was
    /// set, and [`ScenarioError::NonFiniteScalar`] when a scalar argument is
    /// NaN or infinite.
    pub fn build(mut self) -> Result<Scenario, ScenarioError> {
        if self.method_sequence.is_empty() {
            return Err(ScenarioError::EmptyMethodSequence(self.id));
        }
        for (method, args) in &self.args {
            let non_finite = args
                .iter()
                .find(|(_, value)| value.as_scalar().is_some_and(|scalar| !scalar.is_finite()));
            if let Some((argument, _)) = non_finite {
                return Err(ScenarioError::NonFiniteScalar {
                    scenario: self.id,
                    method: *method,
                    argument: argument.to_string(),
                });
            }
        }
        for method in &self.method_sequence {
            self.args.entry(*method).or_default();
        }
        Ok(Scenario {
            id: self.id,
            description: self.description,
            tags: self.tags,
            args: self.args,
            method_sequence: self.method_sequence,
        })
    }
}
