use crate::model::{Comparator, ValidationRule};
use crate::types::ValidationSpec;
use crate::validate::rules::common::collect_comparators;
use crate::validate::validator::Validator;

pub(crate) fn build_rule(v: &mut Validator, spec: &ValidationSpec, path: &str) -> Option<ValidationRule> {
    let checks = collect_comparators(
        spec.exists,
        [
            (Comparator::Equals, &spec.equals),
            (Comparator::NotEquals, &spec.not_equals),
            (Comparator::GreaterThan, &spec.greater_than),
            (Comparator::LessThan, &spec.less_than),
            (Comparator::GreaterThanOrEqual, &spec.greater_than_or_equal),
            (Comparator::LessThanOrEqual, &spec.less_than_or_equal),
        ],
    );

    match (spec.http_status_code, &spec.jsonpath) {
        (Some(_), Some(_)) => {
            v.push(path, "only one of httpStatusCode, jsonpath may be provided");
            None
        }
        (None, None) => {
            v.push(path, "one of httpStatusCode, jsonpath must be provided");
            None
        }
        (Some(code), None) => {
            if !checks.is_empty() {
                v.push(path, "comparators are only valid on jsonpath rules");
                return None;
            }
            if !(100..=599).contains(&code) {
                v.push(format!("{path}.httpStatusCode"), "must be between 100 and 599");
                return None;
            }
            Some(ValidationRule::Status(code as u16))
        }
        (None, Some(jsonpath)) => {
            if !v.check_value_path(&format!("{path}.jsonpath"), jsonpath) {
                return None;
            }
            Some(ValidationRule::Jsonpath {
                path: jsonpath.trim().to_string(),
                checks,
            })
        }
    }
}
