use apiseq_core::expressions::extract;
use apiseq_core::model::{Comparator, Condition, NodeCheck};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::compare::{loose_number, loose_string, NumericOp};
use super::context::ExecutionContext;
use super::eval::{Scope, Substituter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionOutcome {
    pub passed: bool,
    pub reason: String,
}

impl ConditionOutcome {
    fn pass(reason: impl Into<String>) -> Self {
        Self { passed: true, reason: reason.into() }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self { passed: false, reason: reason.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateDecision {
    pub should_execute: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
}

/// All conditions must pass; evaluation stops at the first failure.
pub fn evaluate_all(conditions: &[Condition], ctx: ExecutionContext<'_>) -> GateDecision {
    for condition in conditions {
        let outcome = evaluate(condition, ctx);
        if !outcome.passed {
            return GateDecision {
                should_execute: false,
                skip_reason: Some(format!("Condition not met: {}", outcome.reason)),
            };
        }
    }
    GateDecision { should_execute: true, skip_reason: None }
}

/// Never errors: anything that cannot be evaluated is a failed condition with a reason.
pub fn evaluate(condition: &Condition, ctx: ExecutionContext<'_>) -> ConditionOutcome {
    match condition {
        Condition::Node { node, check } => {
            let Some(response) = ctx.response(node) else {
                return ConditionOutcome::fail(format!(
                    "node '{node}' not found in previous responses"
                ));
            };
            match check {
                NodeCheck::StatusCode(expected) => {
                    let expected = resolve_operand(expected, ctx);
                    let actual = response.status.to_string();
                    let expected = loose_string(&expected);
                    if actual == expected {
                        ConditionOutcome::pass(format!("node '{node}' status is {actual}"))
                    } else {
                        ConditionOutcome::fail(format!(
                            "node '{node}' status is {actual}, expected {expected}"
                        ))
                    }
                }
                NodeCheck::Field { path, comparator } => {
                    let actual = extract(&response.body, path);
                    let subject = format!("node '{node}' field {path}");
                    compare(&subject, actual.as_ref(), comparator, ctx)
                }
            }
        }
        Condition::Variable { name, comparator } => {
            let actual = ctx.variables.get(name).filter(|v| !v.is_null());
            compare(&format!("variable '{name}'"), actual, comparator, ctx)
        }
        Condition::Input { name, comparator } => {
            let actual = ctx.user_input.get(name).cloned().map(JsonValue::String);
            compare(&format!("input '{name}'"), actual.as_ref(), comparator, ctx)
        }
    }
}

fn resolve_operand(operand: &JsonValue, ctx: ExecutionContext<'_>) -> JsonValue {
    // Response placeholders are out of scope here, so resolution cannot fail.
    Substituter::new(ctx, Scope::WithoutResponses)
        .value(operand)
        .unwrap_or_else(|_| operand.clone())
}

fn compare(
    subject: &str,
    actual: Option<&JsonValue>,
    comparator: &Comparator,
    ctx: ExecutionContext<'_>,
) -> ConditionOutcome {
    let expected = comparator.operand().map(|op| resolve_operand(op, ctx));

    match (comparator, expected) {
        (Comparator::Exists(want), _) => match (actual.is_some(), *want) {
            (true, true) => ConditionOutcome::pass(format!("{subject} exists")),
            (false, false) => ConditionOutcome::pass(format!("{subject} does not exist")),
            (false, true) => ConditionOutcome::fail(format!("{subject} does not exist")),
            (true, false) => ConditionOutcome::fail(format!("{subject} exists")),
        },
        (Comparator::Equals(_), Some(expected)) => {
            let expected = loose_string(&expected);
            match actual.map(loose_string) {
                Some(a) if a == expected => {
                    ConditionOutcome::pass(format!("{subject} equals '{expected}'"))
                }
                Some(a) => ConditionOutcome::fail(format!(
                    "{subject} is '{a}', expected '{expected}'"
                )),
                None => ConditionOutcome::fail(format!(
                    "{subject} is undefined, expected '{expected}'"
                )),
            }
        }
        (Comparator::NotEquals(_), Some(expected)) => {
            let expected = loose_string(&expected);
            match actual.map(loose_string) {
                Some(a) if a == expected => {
                    ConditionOutcome::fail(format!("{subject} equals '{expected}'"))
                }
                Some(a) => ConditionOutcome::pass(format!(
                    "{subject} is '{a}', not '{expected}'"
                )),
                None => ConditionOutcome::pass(format!("{subject} is undefined")),
            }
        }
        (numeric, Some(expected)) => {
            let op = match numeric {
                Comparator::GreaterThan(_) => NumericOp::GreaterThan,
                Comparator::LessThan(_) => NumericOp::LessThan,
                Comparator::GreaterThanOrEqual(_) => NumericOp::GreaterThanOrEqual,
                _ => NumericOp::LessThanOrEqual,
            };
            compare_numeric(subject, actual, &expected, op)
        }
        (_, None) => ConditionOutcome::fail(format!("{subject}: comparator has no operand")),
    }
}

fn compare_numeric(
    subject: &str,
    actual: Option<&JsonValue>,
    expected: &JsonValue,
    op: NumericOp,
) -> ConditionOutcome {
    let Some(actual_value) = actual else {
        return ConditionOutcome::fail(format!("{subject} is undefined, cannot compare numerically"));
    };
    let Some(a) = loose_number(actual_value) else {
        return ConditionOutcome::fail(format!(
            "{subject}: type mismatch, '{}' is not a number",
            loose_string(actual_value)
        ));
    };
    let Some(e) = loose_number(expected) else {
        return ConditionOutcome::fail(format!(
            "{subject}: type mismatch, operand '{}' is not a number",
            loose_string(expected)
        ));
    };

    if op.apply(a, e) {
        ConditionOutcome::pass(format!("{subject} ({a}) is {} {e}", op.phrase()))
    } else {
        ConditionOutcome::fail(format!("{subject} ({a}) is not {} {e}", op.phrase()))
    }
}
