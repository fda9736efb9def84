use crate::model::{Comparator, Condition, NodeCheck};
use crate::types::ConditionSpec;
use crate::validate::rules::common::collect_comparators;
use crate::validate::validator::Validator;

const COMPARATOR_NAMES: &str =
    "equals, notEquals, exists, greaterThan, lessThan, greaterThanOrEqual, lessThanOrEqual";

pub(crate) fn build_condition(v: &mut Validator, spec: &ConditionSpec, path: &str) -> Option<Condition> {
    let sources = [&spec.node, &spec.variable, &spec.input]
        .into_iter()
        .filter(|s| s.is_some())
        .count();
    if sources != 1 {
        v.push(path, "exactly one of node, variable, input must be provided");
        return None;
    }

    let comparators = collect_comparators(
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

    if let Some(node) = &spec.node {
        if node.trim().is_empty() {
            v.push(format!("{path}.node"), "must not be empty");
            return None;
        }
        return build_node_condition(v, spec, node, comparators, path);
    }

    if spec.status_code.is_some() {
        v.push(format!("{path}.statusCode"), "only valid on node conditions");
    }
    if spec.field.is_some() {
        v.push(format!("{path}.field"), "only valid on node conditions");
    }
    let comparator = single_comparator(v, path, comparators)?;

    match (&spec.variable, &spec.input) {
        (Some(name), _) => Some(Condition::Variable {
            name: name.clone(),
            comparator,
        }),
        (_, Some(name)) => Some(Condition::Input {
            name: name.clone(),
            comparator,
        }),
        _ => None,
    }
}

fn build_node_condition(
    v: &mut Validator,
    spec: &ConditionSpec,
    node: &str,
    comparators: Vec<Comparator>,
    path: &str,
) -> Option<Condition> {
    if let Some(code) = &spec.status_code {
        if !comparators.is_empty() {
            v.push(path, "statusCode cannot be combined with other comparators");
            return None;
        }
        return Some(Condition::Node {
            node: node.to_string(),
            check: NodeCheck::StatusCode(code.clone()),
        });
    }

    let comparator = single_comparator(v, path, comparators)?;
    let Some(field) = &spec.field else {
        v.push(
            format!("{path}.field"),
            "required on node conditions that do not compare statusCode",
        );
        return None;
    };
    if !v.check_value_path(&format!("{path}.field"), field) {
        return None;
    }

    Some(Condition::Node {
        node: node.to_string(),
        check: NodeCheck::Field {
            path: field.trim().to_string(),
            comparator,
        },
    })
}

fn single_comparator(v: &mut Validator, path: &str, mut comparators: Vec<Comparator>) -> Option<Comparator> {
    match comparators.len() {
        0 => {
            v.push(path, format!("must declare one comparator ({COMPARATOR_NAMES})"));
            None
        }
        1 => comparators.pop(),
        _ => {
            let names: Vec<&str> = comparators.iter().map(Comparator::name).collect();
            v.push(
                path,
                format!("declares {} comparators ({}); exactly one is allowed", names.len(), names.join(", ")),
            );
            None
        }
    }
}
