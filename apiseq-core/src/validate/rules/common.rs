use std::time::Duration;

use serde_json::Value as JsonValue;

use crate::model::Comparator;
use crate::validate::validator::Validator;

pub(crate) fn timeout(v: &mut Validator, path: &str, seconds: Option<f64>) -> Option<Duration> {
    let secs = seconds?;
    if !secs.is_finite() || secs <= 0.0 {
        v.push(path, "must be a positive number of seconds");
        return None;
    }
    match Duration::try_from_secs_f64(secs) {
        Ok(d) => Some(d),
        Err(_) => {
            v.push(path, "must be a positive number of seconds within range");
            None
        }
    }
}

/// Comparators present on a condition or validation object, in evaluation order.
pub(crate) fn collect_comparators(
    exists: Option<bool>,
    operands: [(fn(JsonValue) -> Comparator, &Option<JsonValue>); 6],
) -> Vec<Comparator> {
    let mut out = Vec::new();
    if let Some(expected) = exists {
        out.push(Comparator::Exists(expected));
    }
    for (make, operand) in operands {
        if let Some(value) = operand {
            out.push(make(value.clone()));
        }
    }
    out
}
