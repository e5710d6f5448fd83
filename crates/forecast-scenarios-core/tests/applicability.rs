// crates/forecast-scenarios-core/tests/applicability.rs
// ============================================================================
// Module: Applicability Tests
// Description: Tests for the type gate, tag rules, policies, and trace hooks.
// ============================================================================
//! ## Overview
//! Validates that the matcher combines rules conjunctively, reads capabilities
//! uniformly from classes and instances, and reports the first rejection.

mod support;

use std::sync::Arc;

use forecast_scenarios_core::Applicability;
use forecast_scenarios_core::ApplicabilityRule;
use forecast_scenarios_core::ApplicabilityTrace;
use forecast_scenarios_core::ArgValue;
use forecast_scenarios_core::CapabilityQuery;
use forecast_scenarios_core::EstimatorClass;
use forecast_scenarios_core::EstimatorFamily;
use forecast_scenarios_core::EstimatorInstance;
use forecast_scenarios_core::ForecastHorizon;
use forecast_scenarios_core::MatchPolicy;
use forecast_scenarios_core::Method;
use forecast_scenarios_core::REQUIRES_FH_IN_FIT_TAG;
use forecast_scenarios_core::RejectionReason;
use forecast_scenarios_core::RuleOutcome;
use forecast_scenarios_core::Scenario;
use forecast_scenarios_core::ScenarioMatcher;
use forecast_scenarios_core::ScenarioRegistry;
use forecast_scenarios_core::ScenarioTag;
use forecast_scenarios_core::TARGET_ARITY_TAG;
use forecast_scenarios_core::TargetArity;
use forecast_scenarios_core::ids;
use forecast_scenarios_core::is_applicable;
use serde_json::Value;
use serde_json::json;
use support::TestResult;
use support::bare_forecaster;
use support::ensure;
use support::forecaster;
use support::transformer;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a tag-only scenario with a fit/predict sequence.
fn tagged(univariate_y: Option<bool>, fh_passed_in_fit: Option<bool>) -> TestResult<Scenario> {
    let mut builder = Scenario::builder("tagged").sequence([Method::Fit, Method::Predict]);
    if let Some(value) = univariate_y {
        builder = builder.tag(ScenarioTag::UnivariateY, value);
    }
    if let Some(value) = fh_passed_in_fit {
        builder = builder.tag(ScenarioTag::FhPassedInFit, value);
    }
    Ok(builder.build()?)
}

/// Captures rule outcomes for trace verification.
#[derive(Default)]
struct Trace {
    /// Ordered rule evaluation records.
    entries: Vec<(ApplicabilityRule, bool)>,
}

impl ApplicabilityTrace for Trace {
    fn on_rule_evaluated(&mut self, rule: ApplicabilityRule, outcome: &RuleOutcome) {
        self.entries.push((rule, outcome.is_pass()));
    }
}

// ============================================================================
// SECTION: Type Gate
// ============================================================================

#[test]
fn test_type_gate_rejects_non_forecasters_regardless_of_tags() -> TestResult {
    let candidate = transformer();
    for univariate_y in [None, Some(true), Some(false)] {
        for fh_passed_in_fit in [None, Some(true), Some(false)] {
            let scenario = tagged(univariate_y, fh_passed_in_fit)?;
            ensure(
                !is_applicable(&scenario, &candidate),
                "Expected transformer to be rejected by the type gate",
            )?;
        }
    }
    Ok(())
}

#[test]
fn test_type_gate_accepts_inherited_forecaster_family() -> TestResult {
    let candidate = EstimatorClass::new("Pipeline", EstimatorFamily::Transformer)
        .inherits(EstimatorFamily::Forecaster);
    let scenario = tagged(Some(true), Some(true))?;
    ensure(is_applicable(&scenario, &candidate), "Expected inherited forecaster to pass")?;
    Ok(())
}

#[test]
fn test_type_gate_reports_wrong_family() -> TestResult {
    let scenario = tagged(Some(true), Some(true))?;
    let decision = ScenarioMatcher::default().evaluate(&scenario, &transformer());
    ensure(
        decision
            == Applicability::NotApplicable {
                rule: ApplicabilityRule::EstimatorFamily,
                reason: RejectionReason::WrongFamily {
                    required: EstimatorFamily::Forecaster,
                },
            },
        "Expected the estimator family rule to report the rejection",
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Variate Arity
// ============================================================================

#[test]
fn test_univariate_scenario_against_arities() -> TestResult {
    let scenario = tagged(Some(true), Some(true))?;
    ensure(
        !is_applicable(&scenario, &forecaster("multivariate", false)),
        "Expected univariate scenario to be rejected by a multivariate-only candidate",
    )?;
    ensure(
        is_applicable(&scenario, &forecaster("univariate", false)),
        "Expected univariate scenario to pass a univariate candidate",
    )?;
    ensure(
        is_applicable(&scenario, &forecaster("both", false)),
        "Expected univariate scenario to pass a candidate accepting both",
    )?;
    Ok(())
}

#[test]
fn test_multivariate_scenario_against_arities() -> TestResult {
    let scenario = tagged(Some(false), Some(true))?;
    ensure(
        !is_applicable(&scenario, &forecaster("univariate", false)),
        "Expected multivariate scenario to be rejected by a univariate-only candidate",
    )?;
    ensure(
        is_applicable(&scenario, &forecaster("multivariate", false)),
        "Expected multivariate scenario to pass a multivariate candidate",
    )?;
    ensure(
        is_applicable(&scenario, &forecaster("both", false)),
        "Expected multivariate scenario to pass a candidate accepting both",
    )?;
    Ok(())
}

#[test]
fn test_arity_rule_skipped_when_scenario_omits_tag() -> TestResult {
    let scenario = tagged(None, Some(true))?;
    ensure(
        is_applicable(&scenario, &forecaster("multivariate", false)),
        "Expected untagged scenario to skip the arity rule",
    )?;
    ensure(
        ScenarioMatcher::new(MatchPolicy::RequireDeclared).is_applicable(&scenario, &bare_forecaster()),
        "Expected a skipped rule not to require declared capabilities",
    )?;
    Ok(())
}

#[test]
fn test_unrecognized_arity_value_is_not_excluding() -> TestResult {
    let scenario = tagged(Some(true), Some(true))?;
    ensure(
        is_applicable(&scenario, &forecaster("panel", false)),
        "Expected an unrecognized arity to impose no constraint",
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Horizon Timing
// ============================================================================

#[test]
fn test_late_horizon_rejected_when_fit_requires_it() -> TestResult {
    let scenario = tagged(Some(true), Some(false))?;
    ensure(
        !is_applicable(&scenario, &forecaster("univariate", true)),
        "Expected late-horizon scenario to be rejected",
    )?;
    ensure(
        is_applicable(&scenario, &forecaster("univariate", false)),
        "Expected late-horizon scenario to pass when fit does not need fh",
    )?;
    Ok(())
}

#[test]
fn test_early_horizon_passes_strict_candidates() -> TestResult {
    let scenario = tagged(Some(true), Some(true))?;
    ensure(
        is_applicable(&scenario, &forecaster("univariate", true)),
        "Expected fit-time horizon to satisfy a strict candidate",
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Conjunction
// ============================================================================

#[test]
fn test_either_rule_failing_rejects_overall() -> TestResult {
    let matcher = ScenarioMatcher::default();

    let arity_only = tagged(Some(true), Some(true))?;
    let decision = matcher.evaluate(&arity_only, &forecaster("multivariate", true));
    ensure(
        matches!(decision, Applicability::NotApplicable {
            rule: ApplicabilityRule::VariateArity,
            reason: RejectionReason::ArityMismatch {
                univariate_y: true,
                accepts: TargetArity::Multivariate,
            },
        }),
        "Expected arity-only failure to reject",
    )?;

    let horizon_only = tagged(Some(true), Some(false))?;
    let decision = matcher.evaluate(&horizon_only, &forecaster("univariate", true));
    ensure(
        decision
            == Applicability::NotApplicable {
                rule: ApplicabilityRule::HorizonTiming,
                reason: RejectionReason::HorizonRequiredInFit,
            },
        "Expected horizon-only failure to reject",
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Class and Instance Queries
// ============================================================================

#[test]
fn test_instance_override_shadows_class_tag() -> TestResult {
    let scenario = tagged(Some(true), Some(true))?;
    let class = Arc::new(forecaster("univariate", false));

    let plain = EstimatorInstance::new(Arc::clone(&class));
    ensure(is_applicable(&scenario, &plain), "Expected instance to inherit class tags")?;

    let overridden = EstimatorInstance::new(class).with_tag_override(TARGET_ARITY_TAG, "multivariate");
    ensure(
        !is_applicable(&scenario, &overridden),
        "Expected instance override to take precedence over the class tag",
    )?;
    ensure(
        is_applicable(&scenario, overridden.class()),
        "Expected the class itself to keep its own tag",
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Policies
// ============================================================================

#[test]
fn test_permissive_policy_treats_missing_capabilities_as_neutral() -> TestResult {
    let scenario = tagged(Some(false), Some(false))?;
    ensure(
        is_applicable(&scenario, &bare_forecaster()),
        "Expected undeclared capabilities to impose no constraint",
    )?;
    Ok(())
}

#[test]
fn test_require_declared_policy_rejects_missing_capabilities() -> TestResult {
    let matcher = ScenarioMatcher::new(MatchPolicy::RequireDeclared);
    let scenario = tagged(Some(true), Some(false))?;

    let decision = matcher.evaluate(&scenario, &bare_forecaster());
    ensure(
        decision
            == Applicability::NotApplicable {
                rule: ApplicabilityRule::VariateArity,
                reason: RejectionReason::UndeclaredCapability {
                    tag: TARGET_ARITY_TAG,
                },
            },
        "Expected missing arity to be rejected first",
    )?;

    let arity_only = EstimatorClass::new("ArityOnly", EstimatorFamily::Forecaster)
        .with_tag(TARGET_ARITY_TAG, "both");
    let decision = matcher.evaluate(&scenario, &arity_only);
    ensure(
        decision
            == Applicability::NotApplicable {
                rule: ApplicabilityRule::HorizonTiming,
                reason: RejectionReason::UndeclaredCapability {
                    tag: REQUIRES_FH_IN_FIT_TAG,
                },
            },
        "Expected missing horizon flag to be rejected",
    )?;
    Ok(())
}

#[test]
fn test_require_declared_policy_rejects_malformed_arity() -> TestResult {
    let matcher = ScenarioMatcher::new(MatchPolicy::RequireDeclared);
    let scenario = tagged(Some(true), Some(true))?;
    let malformed = EstimatorClass::new("Malformed", EstimatorFamily::Forecaster)
        .with_tag(TARGET_ARITY_TAG, 3)
        .with_tag(REQUIRES_FH_IN_FIT_TAG, false);
    ensure(
        !matcher.is_applicable(&scenario, &malformed),
        "Expected a non-string arity to count as undeclared",
    )?;
    ensure(
        ScenarioMatcher::default().is_applicable(&scenario, &malformed),
        "Expected permissive policy to ignore the malformed arity",
    )?;
    Ok(())
}

#[test]
fn test_horizon_flag_is_read_by_truthiness() -> TestResult {
    let scenario = tagged(Some(true), Some(false))?;
    let with_flag = |value: Value| {
        EstimatorClass::new("Truthy", EstimatorFamily::Forecaster)
            .with_tag(TARGET_ARITY_TAG, "both")
            .with_tag(REQUIRES_FH_IN_FIT_TAG, value)
    };
    for policy in [MatchPolicy::Permissive, MatchPolicy::RequireDeclared] {
        let matcher = ScenarioMatcher::new(policy);
        for truthy in [json!(1), json!(-0.5), json!("yes"), json!([1]), json!({"at": "fit"})] {
            ensure(
                !matcher.is_applicable(&scenario, &with_flag(truthy.clone())),
                format!("Expected {truthy} to require fh in fit"),
            )?;
        }
        for falsy in [json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            ensure(
                matcher.is_applicable(&scenario, &with_flag(falsy.clone())),
                format!("Expected {falsy} not to require fh in fit"),
            )?;
        }
    }
    Ok(())
}

#[test]
fn test_numeric_horizon_flag_rejects_registered_late_fh_scenario() -> TestResult {
    let registry = ScenarioRegistry::standard()?;
    let scenario = registry
        .scenario(ids::UNIVARIATE_NO_X_LATE_FH)
        .ok_or("late fh scenario missing")?;
    let candidate = EstimatorClass::new("NumericFlag", EstimatorFamily::Forecaster)
        .with_tag(TARGET_ARITY_TAG, "univariate")
        .with_tag(REQUIRES_FH_IN_FIT_TAG, 1);
    ensure(
        ScenarioMatcher::default().evaluate(scenario.as_ref(), &candidate)
            == Applicability::NotApplicable {
                rule: ApplicabilityRule::HorizonTiming,
                reason: RejectionReason::HorizonRequiredInFit,
            },
        "Expected a numeric fit-horizon flag to reject the late fh scenario",
    )?;
    ensure(
        candidate.requires_fh_in_fit().declared() == Some(&true),
        "Expected the numeric flag to read as declared true",
    )?;
    ensure(
        candidate.target_arity().declared() == Some(&TargetArity::Univariate),
        "Expected the arity to read as declared univariate",
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Trace Hooks
// ============================================================================

#[test]
fn test_trace_records_rules_until_first_rejection() -> TestResult {
    let scenario = tagged(Some(true), Some(true))?;
    let matcher = ScenarioMatcher::default();

    let mut trace = Trace::default();
    let decision = matcher.evaluate_traced(&scenario, &forecaster("multivariate", false), &mut trace);
    ensure(!decision.is_applicable(), "Expected arity rejection")?;
    ensure(
        trace.entries
            == vec![(ApplicabilityRule::EstimatorFamily, true), (ApplicabilityRule::VariateArity, false)],
        "Expected evaluation to stop after the arity rule",
    )?;

    let mut trace = Trace::default();
    let decision = matcher.evaluate_traced(&scenario, &forecaster("both", false), &mut trace);
    ensure(decision.is_applicable(), "Expected applicable decision")?;
    ensure(trace.entries.len() == 3, "Expected every rule to be traced")?;
    Ok(())
}

// ============================================================================
// SECTION: Registered Scenario Examples
// ============================================================================

#[test]
fn test_univariate_no_x_end_to_end() -> TestResult {
    let registry = ScenarioRegistry::standard()?;
    let scenario = registry
        .scenario(ids::UNIVARIATE_NO_X)
        .ok_or("univariate no-X scenario missing")?;
    ensure(
        is_applicable(scenario.as_ref(), &forecaster("univariate", false)),
        "Expected univariate candidate to accept the scenario",
    )?;
    ensure(
        scenario.method_sequence() == [Method::Fit, Method::Predict],
        "Expected fit followed by predict",
    )?;

    let fit = scenario.args(Method::Fit);
    let y = fit.series("y").ok_or("fit y missing")?;
    ensure(y.n_timepoints() == 20 && y.is_univariate(), "Expected 20-point univariate y")?;
    ensure(fit.horizon() == Some(&ForecastHorizon::Step(1)), "Expected fit fh of 1")?;

    let predict = scenario.args(Method::Predict);
    ensure(predict.len() == 1, "Expected predict to receive only fh")?;
    ensure(
        predict.get("fh") == Some(&ArgValue::Horizon(ForecastHorizon::Step(1))),
        "Expected predict fh of 1",
    )?;
    Ok(())
}

#[test]
fn test_univariate_no_x_rejected_by_multivariate_candidate() -> TestResult {
    let registry = ScenarioRegistry::standard()?;
    let scenario = registry
        .scenario(ids::UNIVARIATE_NO_X)
        .ok_or("univariate no-X scenario missing")?;
    ensure(
        !is_applicable(scenario.as_ref(), &forecaster("multivariate", false)),
        "Expected multivariate candidate to reject the scenario",
    )?;
    Ok(())
}
