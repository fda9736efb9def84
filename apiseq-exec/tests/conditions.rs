use std::collections::BTreeMap;

use apiseq_core::{Comparator, Condition, NodeCheck};
use apiseq_exec::executor::{evaluate, evaluate_all, ExecutionContext, StoredResponse, UserInput};
use serde_json::{json, Value as JsonValue};

struct Fixture {
    variables: BTreeMap<String, JsonValue>,
    responses: Vec<StoredResponse>,
    input: UserInput,
}

impl Fixture {
    fn new() -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("env".to_string(), json!("prod"));
        variables.insert("limit".to_string(), json!("10"));
        variables.insert("expected_role".to_string(), json!("admin"));

        Self {
            variables,
            responses: vec![
                StoredResponse {
                    id: Some("login".to_string()),
                    status: 200,
                    body: json!({"role": "admin", "count": 4, "label": "n/a", "items": [1, 2]}),
                },
                StoredResponse::skipped(Some("optional".to_string())),
            ],
            input: UserInput::new(),
        }
    }

    fn ctx(&self) -> ExecutionContext<'_> {
        ExecutionContext {
            variables: &self.variables,
            responses: &self.responses,
            user_input: &self.input,
        }
    }
}

fn field(node: &str, path: &str, comparator: Comparator) -> Condition {
    Condition::Node {
        node: node.to_string(),
        check: NodeCheck::Field { path: path.to_string(), comparator },
    }
}

fn variable(name: &str, comparator: Comparator) -> Condition {
    Condition::Variable { name: name.to_string(), comparator }
}

#[test]
fn no_conditions_means_execute() {
    let f = Fixture::new();
    let gate = evaluate_all(&[], f.ctx());
    assert!(gate.should_execute);
    assert_eq!(gate.skip_reason, None);
}

#[test]
fn status_code_compares_recorded_status() {
    let f = Fixture::new();
    let ok = Condition::Node { node: "login".to_string(), check: NodeCheck::StatusCode(json!(200)) };
    let skipped = Condition::Node { node: "optional".to_string(), check: NodeCheck::StatusCode(json!("200")) };
    assert!(evaluate(&ok, f.ctx()).passed);
    let outcome = evaluate(&skipped, f.ctx());
    assert!(!outcome.passed);
    assert!(outcome.reason.contains("status is 0"));
}

#[test]
fn unknown_node_fails_with_reason() {
    let f = Fixture::new();
    let outcome = evaluate(&field("ghost", ".x", Comparator::Exists(true)), f.ctx());
    assert!(!outcome.passed);
    assert!(outcome.reason.contains("not found"));
}

#[test]
fn equality_is_loose_and_operands_are_substituted() {
    let f = Fixture::new();
    assert!(evaluate(&field("login", ".count", Comparator::Equals(json!("4"))), f.ctx()).passed);
    assert!(evaluate(&field("login", ".role", Comparator::Equals(json!("{{ .vars.expected_role }}"))), f.ctx()).passed);
    assert!(!evaluate(&field("login", ".role", Comparator::NotEquals(json!("admin"))), f.ctx()).passed);
    assert!(evaluate(&field("login", ".missing", Comparator::NotEquals(json!("admin"))), f.ctx()).passed);
    assert!(!evaluate(&field("login", ".missing", Comparator::Equals(json!("admin"))), f.ctx()).passed);
}

#[test]
fn exists_and_its_inverse() {
    let f = Fixture::new();
    assert!(evaluate(&field("login", ".role", Comparator::Exists(true)), f.ctx()).passed);
    assert!(evaluate(&field("optional", ".role", Comparator::Exists(false)), f.ctx()).passed);
    assert!(!evaluate(&field("login", ".role", Comparator::Exists(false)), f.ctx()).passed);
    assert!(evaluate(&variable("env", Comparator::Exists(true)), f.ctx()).passed);
    assert!(!evaluate(&variable("unset", Comparator::Exists(true)), f.ctx()).passed);
}

#[test]
fn numeric_comparators_parse_loosely() {
    let f = Fixture::new();
    assert!(evaluate(&variable("limit", Comparator::GreaterThan(json!(9))), f.ctx()).passed);
    assert!(evaluate(&variable("limit", Comparator::LessThanOrEqual(json!("10"))), f.ctx()).passed);
    assert!(evaluate(&field("login", ".items | length", Comparator::GreaterThanOrEqual(json!(2))), f.ctx()).passed);
    assert!(!evaluate(&field("login", ".count", Comparator::LessThan(json!(4))), f.ctx()).passed);
}

#[test]
fn numeric_type_mismatch_fails_quietly() {
    let f = Fixture::new();
    let outcome = evaluate(&field("login", ".label", Comparator::GreaterThan(json!(1))), f.ctx());
    assert!(!outcome.passed);
    assert!(outcome.reason.contains("type mismatch"));
}

#[test]
fn input_source_reads_current_step_input() {
    let mut f = Fixture::new();
    let cond = Condition::Input { name: "answer".to_string(), comparator: Comparator::Equals(json!("yes")) };
    assert!(!evaluate(&cond, f.ctx()).passed);

    f.input.insert("answer".to_string(), "yes".to_string());
    assert!(evaluate(&cond, f.ctx()).passed);
}

#[test]
fn first_failure_short_circuits() {
    let f = Fixture::new();
    let conditions = vec![
        variable("env", Comparator::Equals(json!("prod"))),
        variable("env", Comparator::Equals(json!("staging"))),
        field("ghost", ".x", Comparator::Exists(true)),
    ];
    let gate = evaluate_all(&conditions, f.ctx());
    assert!(!gate.should_execute);
    let reason = gate.skip_reason.unwrap();
    assert!(reason.starts_with("Condition not met:"));
    assert!(reason.contains("staging"));
}
