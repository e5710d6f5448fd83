// crates/forecast-scenarios-core/src/runtime/applicability.rs
// ============================================================================
// Module: Scenario Applicability
// Description: Tag-based compatibility check between scenarios and estimators.
// Purpose: Decide whether running a scenario against a candidate is meaningful.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A scenario is applicable to a candidate when every rule in
//! [`APPLICABILITY_RULES`] passes. Rules are pure predicates evaluated in
//! order and combined by AND; the first rejecting rule ends evaluation.
//!
//! 1. **Estimator family**: the candidate must be, or inherit from, a
//!    forecaster.
//! 2. **Variate arity**: a univariate scenario is rejected by a candidate that
//!    accepts only multivariate targets, and a multivariate scenario by one
//!    that accepts only univariate targets. `"both"` accepts either.
//! 3. **Horizon timing**: a scenario that passes the horizon only at predict
//!    time is rejected by a candidate that requires it at fit time.
//!
//! Evaluation never fails. Under [`MatchPolicy::Permissive`] an undeclared or
//! malformed capability imposes no constraint; under
//! [`MatchPolicy::RequireDeclared`] it rejects the rule that needed it.
//! The horizon flag is read by truthiness, so any non-null value is declared.
//!
//! A scenario that omits the tag a rule reads skips that rule. A missing tag
//! is never read as `false`; this departs from treating an absent scenario
//! condition as falsy, which would let an untagged scenario reject
//! univariate-only or fit-horizon candidates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::CapabilityQuery;
use crate::core::CapabilityReading;
use crate::core::EstimatorFamily;
use crate::core::REQUIRES_FH_IN_FIT_TAG;
use crate::core::Scenario;
use crate::core::ScenarioTag;
use crate::core::TARGET_ARITY_TAG;
use crate::core::TargetArity;

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Family every candidate must belong to.
pub const REQUIRED_FAMILY: EstimatorFamily = EstimatorFamily::Forecaster;

/// Treatment of capabilities a candidate does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Undeclared or malformed capabilities impose no constraint.
    #[default]
    Permissive,
    /// Undeclared or malformed capabilities reject the rule that reads them.
    RequireDeclared,
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// One necessary compatibility condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicabilityRule {
    /// Candidate must belong to [`REQUIRED_FAMILY`].
    EstimatorFamily,
    /// Target arity the scenario provides must be accepted.
    VariateArity,
    /// Horizon must not arrive later than the candidate needs it.
    HorizonTiming,
}

/// Rules in evaluation order.
pub const APPLICABILITY_RULES: [ApplicabilityRule; 3] = [
    ApplicabilityRule::EstimatorFamily,
    ApplicabilityRule::VariateArity,
    ApplicabilityRule::HorizonTiming,
];

impl ApplicabilityRule {
    /// Returns the stable rule name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EstimatorFamily => "estimator_family",
            Self::VariateArity => "variate_arity",
            Self::HorizonTiming => "horizon_timing",
        }
    }

    /// Evaluates this rule for one scenario and candidate.
    #[must_use]
    pub fn check<C: CapabilityQuery + ?Sized>(
        self,
        scenario: &Scenario,
        candidate: &C,
        policy: MatchPolicy,
    ) -> RuleOutcome {
        match self {
            Self::EstimatorFamily => check_family(candidate),
            Self::VariateArity => check_arity(scenario, candidate, policy),
            Self::HorizonTiming => check_horizon(scenario, candidate, policy),
        }
    }
}

impl fmt::Display for ApplicabilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Why a rule rejected a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Candidate is not part of the required estimator family.
    WrongFamily {
        /// Family the scenario needs.
        required: EstimatorFamily,
    },
    /// Candidate exclusively accepts the other target arity.
    ArityMismatch {
        /// Whether the scenario provides a univariate target.
        univariate_y: bool,
        /// Arity the candidate declares.
        accepts: TargetArity,
    },
    /// Candidate requires the horizon at fit but the scenario passes it later.
    HorizonRequiredInFit,
    /// Candidate does not declare a capability the rule needs.
    UndeclaredCapability {
        /// Capability tag name.
        tag: &'static str,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongFamily {
                required,
            } => write!(f, "candidate is not a {required}"),
            Self::ArityMismatch {
                univariate_y,
                accepts,
            } => {
                let provided = if *univariate_y { "univariate" } else { "multivariate" };
                write!(f, "scenario provides {provided} y, candidate accepts {}", accepts.as_str())
            }
            Self::HorizonRequiredInFit => {
                write!(f, "candidate requires fh in fit, scenario passes it at predict")
            }
            Self::UndeclaredCapability {
                tag,
            } => write!(f, "candidate does not declare `{tag}`"),
        }
    }
}

/// Result of one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Rule passed.
    Pass,
    /// Rule rejected the candidate.
    Reject(RejectionReason),
}

impl RuleOutcome {
    /// Returns true when the rule passed.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Overall applicability decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applicability {
    /// Every rule passed.
    Applicable,
    /// A rule rejected the candidate.
    NotApplicable {
        /// First rejecting rule.
        rule: ApplicabilityRule,
        /// Reason reported by that rule.
        reason: RejectionReason,
    },
}

impl Applicability {
    /// Returns true when the scenario is applicable.
    #[must_use]
    pub const fn is_applicable(&self) -> bool {
        matches!(self, Self::Applicable)
    }
}

// ============================================================================
// SECTION: Trace Hooks
// ============================================================================

/// Trace hook for rule evaluation.
pub trait ApplicabilityTrace {
    /// Called after each rule is evaluated.
    fn on_rule_evaluated(&mut self, rule: ApplicabilityRule, outcome: &RuleOutcome);
}

/// No-op trace hook for fast paths.
///
/// # Invariants
/// - Zero-sized marker type; carries no state.
#[derive(Debug, Default)]
pub struct NoopTrace;

impl ApplicabilityTrace for NoopTrace {
    fn on_rule_evaluated(&mut self, _rule: ApplicabilityRule, _outcome: &RuleOutcome) {}
}

// ============================================================================
// SECTION: Matcher
// ============================================================================

/// Stateless matcher parameterized by a [`MatchPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScenarioMatcher {
    /// Treatment of undeclared capabilities.
    policy: MatchPolicy,
}

impl ScenarioMatcher {
    /// Creates a matcher with the given policy.
    #[must_use]
    pub const fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
        }
    }

    /// Returns the configured policy.
    #[must_use]
    pub const fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Returns true when `scenario` is applicable to `candidate`.
    #[must_use]
    pub fn is_applicable<C: CapabilityQuery + ?Sized>(
        &self,
        scenario: &Scenario,
        candidate: &C,
    ) -> bool {
        self.evaluate(scenario, candidate).is_applicable()
    }

    /// Evaluates all rules and reports the first rejection.
    #[must_use]
    pub fn evaluate<C: CapabilityQuery + ?Sized>(
        &self,
        scenario: &Scenario,
        candidate: &C,
    ) -> Applicability {
        self.evaluate_traced(scenario, candidate, &mut NoopTrace)
    }

    /// Evaluates rules in order, reporting each outcome to `trace`.
    pub fn evaluate_traced<C, T>(
        &self,
        scenario: &Scenario,
        candidate: &C,
        trace: &mut T,
    ) -> Applicability
    where
        C: CapabilityQuery + ?Sized,
        T: ApplicabilityTrace + ?Sized,
    {
        for rule in APPLICABILITY_RULES {
            let outcome = rule.check(scenario, candidate, self.policy);
            trace.on_rule_evaluated(rule, &outcome);
            if let RuleOutcome::Reject(reason) = outcome {
                return Applicability::NotApplicable {
                    rule,
                    reason,
                };
            }
        }
        Applicability::Applicable
    }
}

/// Returns true when `scenario` is applicable to `candidate` under the
/// permissive policy.
#[must_use]
pub fn is_applicable<C: CapabilityQuery + ?Sized>(scenario: &Scenario, candidate: &C) -> bool {
    ScenarioMatcher::default().is_applicable(scenario, candidate)
}

// ============================================================================
// SECTION: Rule Predicates
// ============================================================================

/// Type gate: candidate must be a forecaster.
fn check_family<C: CapabilityQuery + ?Sized>(candidate: &C) -> RuleOutcome {
    if candidate.belongs_to(REQUIRED_FAMILY) {
        RuleOutcome::Pass
    } else {
        RuleOutcome::Reject(RejectionReason::WrongFamily {
            required: REQUIRED_FAMILY,
        })
    }
}

/// Variate arity: the scenario's target shape must not be excluded.
fn check_arity<C: CapabilityQuery + ?Sized>(
    scenario: &Scenario,
    candidate: &C,
    policy: MatchPolicy,
) -> RuleOutcome {
    let Some(univariate_y) = scenario.tag(ScenarioTag::UnivariateY) else {
        return RuleOutcome::Pass;
    };
    match candidate.target_arity() {
        CapabilityReading::Declared(accepts) => {
            let excluded = match accepts {
                TargetArity::Multivariate => univariate_y,
                TargetArity::Univariate => !univariate_y,
                TargetArity::Both => false,
            };
            if excluded {
                RuleOutcome::Reject(RejectionReason::ArityMismatch {
                    univariate_y,
                    accepts,
                })
            } else {
                RuleOutcome::Pass
            }
        }
        CapabilityReading::Undeclared | CapabilityReading::Malformed(_) => {
            undeclared(policy, TARGET_ARITY_TAG)
        }
    }
}

/// Horizon timing: a late horizon is incompatible with a fit-time requirement.
fn check_horizon<C: CapabilityQuery + ?Sized>(
    scenario: &Scenario,
    candidate: &C,
    policy: MatchPolicy,
) -> RuleOutcome {
    // Only a late horizon can conflict with the candidate.
    if scenario.tag(ScenarioTag::FhPassedInFit) != Some(false) {
        return RuleOutcome::Pass;
    }
    match candidate.requires_fh_in_fit() {
        CapabilityReading::Declared(true) => {
            RuleOutcome::Reject(RejectionReason::HorizonRequiredInFit)
        }
        CapabilityReading::Declared(false) => RuleOutcome::Pass,
        CapabilityReading::Undeclared | CapabilityReading::Malformed(_) => {
            undeclared(policy, REQUIRES_FH_IN_FIT_TAG)
        }
    }
}

/// Applies the policy to a capability the rule could not read.
const fn undeclared(policy: MatchPolicy, tag: &'static str) -> RuleOutcome {
    match policy {
        MatchPolicy::Permissive => RuleOutcome::Pass,
        MatchPolicy::RequireDeclared => RuleOutcome::Reject(RejectionReason::UndeclaredCapability {
            tag,
        }),
    }
}
