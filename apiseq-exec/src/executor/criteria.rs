use apiseq_core::expressions::extract;
use apiseq_core::model::{Comparator, ValidationRule};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::compare::{loose_number, loose_string, NumericOp};
use super::http::HttpResponse;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub rule: String,
    pub passed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("validation failed: {message}")]
pub struct ValidationFailure {
    pub message: String,
    /// Every result computed before stopping, the failing one last.
    pub results: Vec<ValidationResult>,
}

/// Check `rules` in order and stop at the first failure. No rules means the response must
/// be a `200`.
pub fn validate(
    response: &HttpResponse,
    rules: &[ValidationRule],
) -> Result<Vec<ValidationResult>, ValidationFailure> {
    let implicit = [ValidationRule::Status(200)];
    let rules = if rules.is_empty() { &implicit[..] } else { rules };

    let mut results = Vec::with_capacity(rules.len());
    for rule in rules {
        let result = check_rule(response, rule);
        let failed = !result.passed;
        let message = result.message.clone();
        results.push(result);
        if failed {
            return Err(ValidationFailure { message, results });
        }
    }
    Ok(results)
}

fn check_rule(response: &HttpResponse, rule: &ValidationRule) -> ValidationResult {
    match rule {
        ValidationRule::Status(expected) => {
            let passed = response.status == *expected;
            ValidationResult {
                rule: rule.describe(),
                passed,
                message: if passed {
                    format!("Status is {expected}")
                } else {
                    format!("Expected status {expected}, got {}", response.status)
                },
                actual: Some(JsonValue::from(response.status)),
            }
        }
        ValidationRule::Jsonpath { path, checks } => {
            let actual = extract(&response.body, path);
            let implicit = [Comparator::Exists(true)];
            let checks = if checks.is_empty() { &implicit[..] } else { &checks[..] };

            let failure = checks
                .iter()
                .find_map(|check| check_value(path, actual.as_ref(), check).err());
            ValidationResult {
                rule: rule.describe(),
                passed: failure.is_none(),
                message: failure.unwrap_or_else(|| format!("{path} passed all checks")),
                actual,
            }
        }
    }
}

fn check_value(path: &str, actual: Option<&JsonValue>, check: &Comparator) -> Result<(), String> {
    let shown = actual.map(loose_string);
    let got = || match &shown {
        Some(v) => format!("'{v}'"),
        None => "no value".to_string(),
    };

    match check {
        Comparator::Exists(true) if actual.is_none() => Err(format!("Expected {path} to exist")),
        Comparator::Exists(false) if actual.is_some() => {
            Err(format!("Expected {path} not to exist, got {}", got()))
        }
        Comparator::Exists(_) => Ok(()),
        Comparator::Equals(expected) => {
            let expected = loose_string(expected);
            if shown.as_deref() == Some(expected.as_str()) {
                Ok(())
            } else {
                Err(format!("Expected {path} to equal '{expected}', got {}", got()))
            }
        }
        Comparator::NotEquals(expected) => {
            let expected = loose_string(expected);
            if shown.as_deref() == Some(expected.as_str()) {
                Err(format!("Expected {path} not to equal '{expected}'"))
            } else {
                Ok(())
            }
        }
        Comparator::GreaterThan(expected)
        | Comparator::LessThan(expected)
        | Comparator::GreaterThanOrEqual(expected)
        | Comparator::LessThanOrEqual(expected) => {
            let op = match check {
                Comparator::GreaterThan(_) => NumericOp::GreaterThan,
                Comparator::LessThan(_) => NumericOp::LessThan,
                Comparator::GreaterThanOrEqual(_) => NumericOp::GreaterThanOrEqual,
                _ => NumericOp::LessThanOrEqual,
            };
            let bound = loose_number(expected);
            match (actual.and_then(loose_number), bound) {
                (Some(a), Some(b)) if op.apply(a, b) => Ok(()),
                (Some(a), Some(b)) => Err(format!(
                    "Expected {path} to be {} {b}, got {a}",
                    op.phrase()
                )),
                (None, _) => Err(format!(
                    "Expected {path} to be a number {} {}, got {}",
                    op.phrase(),
                    loose_string(expected),
                    got()
                )),
                (Some(_), None) => Err(format!(
                    "Cannot compare {path}: operand '{}' is not a number",
                    loose_string(expected)
                )),
            }
        }
    }
}
