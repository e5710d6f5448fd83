// crates/forecast-scenarios-core/src/runtime/getter.rs
// ============================================================================
// Module: Scenario Retrieval
// Description: Registry lookup filtered by applicability and required tags.
// Purpose: Return the scenarios a test harness should run for one estimator.
// Dependencies: crate::core, crate::runtime::{applicability, registry}
// ============================================================================

//! ## Overview
//! Retrieval resolves the candidate's family to a suite, keeps scenarios
//! that declare every required tag value, then keeps scenarios the matcher
//! finds applicable. Suite order is preserved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::CapabilityQuery;
use crate::core::EstimatorFamily;
use crate::core::Scenario;
use crate::core::ScenarioTag;
use crate::core::ScenarioTags;
use crate::runtime::applicability::ScenarioMatcher;
use crate::runtime::registry::ScenarioRegistry;

// ============================================================================
// SECTION: Filter
// ============================================================================

/// Required tag values a scenario must declare to be retrieved.
///
/// # Invariants
/// - An empty filter keeps every scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioFilter {
    /// Tag values that must match exactly.
    required: ScenarioTags,
}

impl ScenarioFilter {
    /// Creates a filter that keeps every scenario.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            required: ScenarioTags::new(),
        }
    }

    /// Returns the filter with `tag` required to equal `value`.
    #[must_use]
    pub fn require(mut self, tag: ScenarioTag, value: bool) -> Self {
        self.required.insert(tag, value);
        self
    }

    /// Creates a filter from a full tag set.
    #[must_use]
    pub const fn from_tags(required: ScenarioTags) -> Self {
        Self {
            required,
        }
    }

    /// Returns the required tag values.
    #[must_use]
    pub const fn required(&self) -> &ScenarioTags {
        &self.required
    }

    /// Returns true when `scenario` declares every required value.
    #[must_use]
    pub fn matches(&self, scenario: &Scenario) -> bool {
        scenario.tags().satisfies(&self.required)
    }
}

// ============================================================================
// SECTION: Retrieval
// ============================================================================

/// Returns the registered scenarios to run against `candidate`.
///
/// The candidate's family is the first entry of [`EstimatorFamily::ALL`] it
/// belongs to that has a registered suite. Candidates without such a family
/// get no scenarios.
#[must_use]
pub fn retrieve_scenarios<'r, C: CapabilityQuery + ?Sized>(
    registry: &'r ScenarioRegistry,
    candidate: &C,
    filter: &ScenarioFilter,
    matcher: &ScenarioMatcher,
) -> Vec<&'r Arc<Scenario>> {
    let Some(suite) = EstimatorFamily::ALL
        .into_iter()
        .filter(|family| candidate.belongs_to(*family))
        .find_map(|family| registry.for_family(family))
    else {
        return Vec::new();
    };
    suite
        .iter()
        .filter(|scenario| filter.matches(scenario))
        .filter(|scenario| matcher.is_applicable(scenario, candidate))
        .collect()
}
