// crates/forecast-scenarios-core/src/core/capability.rs
// ============================================================================
// Module: Estimator Capabilities
// Description: Capability query interface for estimator classes and instances.
// Purpose: Give the matcher one lookup surface regardless of query site.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Estimators declare capabilities as string-keyed tags. A tag may be set on
//! the class (static capability) or overridden on an instance. The matcher
//! only sees [`CapabilityQuery`], so it never branches on whether it holds a
//! class descriptor or a live instance.
//!
//! Raw tag values are loosely typed JSON. The two keys the matcher reads are
//! decoded into [`CapabilityReading`] so that absent and malformed values
//! stay distinguishable from declared ones.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::EstimatorName;

// ============================================================================
// SECTION: Capability Keys
// ============================================================================

/// Tag naming which target arity an estimator accepts.
pub const TARGET_ARITY_TAG: &str = "scitype:y";

/// Tag stating that the forecast horizon must be passed to `fit`.
pub const REQUIRES_FH_IN_FIT_TAG: &str = "requires-fh-in-fit";

// ============================================================================
// SECTION: Families
// ============================================================================

/// Estimator family used by the type gate.
///
/// # Invariants
/// - Wire names are stable and match [`EstimatorFamily::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorFamily {
    /// Learns from a series and predicts future time points.
    Forecaster,
    /// Transforms series or panels.
    Transformer,
    /// Predicts class labels.
    Classifier,
    /// Predicts continuous targets from panels.
    Regressor,
    /// Groups series into clusters.
    Clusterer,
}

impl EstimatorFamily {
    /// All families in canonical order.
    pub const ALL: [Self; 5] =
        [Self::Forecaster, Self::Transformer, Self::Classifier, Self::Regressor, Self::Clusterer];

    /// Returns the stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forecaster => "forecaster",
            Self::Transformer => "transformer",
            Self::Classifier => "classifier",
            Self::Regressor => "regressor",
            Self::Clusterer => "clusterer",
        }
    }
}

impl fmt::Display for EstimatorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Typed Readings
// ============================================================================

/// Target arity an estimator declares it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetArity {
    /// Only single-column targets.
    Univariate,
    /// Only multi-column targets.
    Multivariate,
    /// Either shape.
    Both,
}

impl TargetArity {
    /// Returns the stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Univariate => "univariate",
            Self::Multivariate => "multivariate",
            Self::Both => "both",
        }
    }

    /// Parses a wire name, returning `None` for anything unrecognized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "univariate" => Some(Self::Univariate),
            "multivariate" => Some(Self::Multivariate),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Result of reading one capability from a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityReading<T> {
    /// The key is set to a recognized value.
    Declared(T),
    /// The key is not set.
    Undeclared,
    /// The key is set but its value cannot be decoded.
    Malformed(Value),
}

impl<T> CapabilityReading<T> {
    /// Returns the declared value, if any.
    #[must_use]
    pub const fn declared(&self) -> Option<&T> {
        match self {
            Self::Declared(value) => Some(value),
            Self::Undeclared | Self::Malformed(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Query Interface
// ============================================================================

/// Capability lookup shared by estimator classes and instances.
pub trait CapabilityQuery {
    /// Returns true when the estimator is of, or inherits from, `family`.
    fn belongs_to(&self, family: EstimatorFamily) -> bool;

    /// Returns the raw value of a capability tag, or `None` when unset.
    fn tag(&self, name: &str) -> Option<&Value>;

    /// Reads the declared target arity.
    fn target_arity(&self) -> CapabilityReading<TargetArity> {
        match self.tag(TARGET_ARITY_TAG) {
            None | Some(Value::Null) => CapabilityReading::Undeclared,
            Some(Value::String(raw)) => TargetArity::parse(raw).map_or_else(
                || CapabilityReading::Malformed(Value::String(raw.clone())),
                CapabilityReading::Declared,
            ),
            Some(other) => CapabilityReading::Malformed(other.clone()),
        }
    }

    /// Reads whether the horizon must be supplied at fit time.
    ///
    /// Any non-null value is declared and read by truthiness: zero, empty
    /// strings, empty arrays and empty objects are false.
    fn requires_fh_in_fit(&self) -> CapabilityReading<bool> {
        match self.tag(REQUIRES_FH_IN_FIT_TAG) {
            None | Some(Value::Null) => CapabilityReading::Undeclared,
            Some(value) => CapabilityReading::Declared(is_truthy(value)),
        }
    }
}

/// Returns the truthiness of a raw tag value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_none_or(|raw| raw != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

impl<T: CapabilityQuery + ?Sized> CapabilityQuery for &T {
    fn belongs_to(&self, family: EstimatorFamily) -> bool {
        (**self).belongs_to(family)
    }

    fn tag(&self, name: &str) -> Option<&Value> {
        (**self).tag(name)
    }
}

// ============================================================================
// SECTION: Class Descriptor
// ============================================================================

/// Static estimator class descriptor.
///
/// # Invariants
/// - `lineage` lists the class's own family first, then inherited families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorClass {
    /// Class name.
    name: EstimatorName,
    /// Families the class belongs to.
    lineage: Vec<EstimatorFamily>,
    /// Class-level capability tags.
    tags: BTreeMap<String, Value>,
}

impl EstimatorClass {
    /// Creates a class descriptor belonging to `family`, with no tags.
    #[must_use]
    pub fn new(name: impl Into<EstimatorName>, family: EstimatorFamily) -> Self {
        Self {
            name: name.into(),
            lineage: vec![family],
            tags: BTreeMap::new(),
        }
    }

    /// Adds an inherited family.
    #[must_use]
    pub fn inherits(mut self, family: EstimatorFamily) -> Self {
        if !self.lineage.contains(&family) {
            self.lineage.push(family);
        }
        self
    }

    /// Sets a class-level capability tag.
    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    /// Returns the class name.
    #[must_use]
    pub const fn name(&self) -> &EstimatorName {
        &self.name
    }

    /// Returns the families the class belongs to.
    #[must_use]
    pub fn lineage(&self) -> &[EstimatorFamily] {
        &self.lineage
    }

    /// Returns a class-level capability tag.
    #[must_use]
    pub fn class_tag(&self, name: &str) -> Option<&Value> {
        self.tags.get(name)
    }
}

impl CapabilityQuery for EstimatorClass {
    fn belongs_to(&self, family: EstimatorFamily) -> bool {
        self.lineage.contains(&family)
    }

    fn tag(&self, name: &str) -> Option<&Value> {
        self.class_tag(name)
    }
}

// ============================================================================
// SECTION: Instance
// ============================================================================

/// Estimator instance with optional per-instance tag overrides.
///
/// # Invariants
/// - Overrides shadow class tags; unset overrides fall back to the class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorInstance {
    /// Shared class descriptor.
    class: Arc<EstimatorClass>,
    /// Instance-level tag overrides.
    overrides: BTreeMap<String, Value>,
}

impl EstimatorInstance {
    /// Creates an instance of `class` with no overrides.
    #[must_use]
    pub const fn new(class: Arc<EstimatorClass>) -> Self {
        Self {
            class,
            overrides: BTreeMap::new(),
        }
    }

    /// Returns the instance with a tag override set.
    #[must_use]
    pub fn with_tag_override(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_tag(name, value);
        self
    }

    /// Sets a tag override, replacing any previous override.
    pub fn set_tag(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.overrides.insert(name.into(), value.into());
    }

    /// Returns the class descriptor.
    #[must_use]
    pub fn class(&self) -> &EstimatorClass {
        &self.class
    }
}

impl CapabilityQuery for EstimatorInstance {
    fn belongs_to(&self, family: EstimatorFamily) -> bool {
        self.class.belongs_to(family)
    }

    fn tag(&self, name: &str) -> Option<&Value> {
        self.overrides.get(name).or_else(|| self.class.class_tag(name))
    }
}
