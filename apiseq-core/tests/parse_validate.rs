use std::time::Duration;

use apiseq_core::{
    build_sequence, load_sequence, parse_document_str, validate_document, Comparator, Condition,
    ConfigError, DocumentFormat, NodeCheck, ValidationRule,
};
use serde_json::json;

fn minimal_valid_json() -> &'static str {
    r#"
{
  "variables": { "user": "alice", "retries": 3 },
  "defaults": {
    "baseUrl": "https://api.example.com",
    "timeout": 10,
    "headers": { "Accept": "application/json" },
    "validations": [ { "httpStatusCode": 200 } ]
  },
  "nodes": [
    { "id": "login", "name": "Login", "method": "post", "url": "/login",
      "body": { "user": "{{ .vars.user }}" } },
    { "name": "Profile", "url": "/me",
      "conditions": [ { "node": "login", "statusCode": 200 } ],
      "validations": [ { "jsonpath": ".name", "exists": true, "equals": "alice" } ] }
  ]
}
"#
}

fn minimal_valid_yaml() -> &'static str {
    r#"
enableDebug: true
nodes:
  - id: ping
    url: https://example.com/ping
    userPrompts:
      otp: "Enter the code"
"#
}

#[test]
fn parse_json_and_validate_ok() {
    let parsed = parse_document_str(minimal_valid_json(), DocumentFormat::Json).unwrap();
    validate_document(&parsed.document).unwrap();
}

#[test]
fn parse_auto_detects_json() {
    let parsed = parse_document_str(minimal_valid_json(), DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Json);
}

#[test]
fn parse_auto_detects_yaml() {
    let parsed = parse_document_str(minimal_valid_yaml(), DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Yaml);
    assert!(parsed.document.enable_debug);
}

#[test]
fn parse_garbage_is_rejected() {
    let err = parse_document_str("nodes: [unclosed", DocumentFormat::Auto).unwrap_err();
    assert!(format!("{err}").contains("YAML"));
}

#[test]
fn built_sequence_carries_defaults_and_normalised_nodes() {
    let seq = load_sequence(minimal_valid_json(), DocumentFormat::Auto).unwrap();

    assert_eq!(seq.defaults.base_url.as_deref(), Some("https://api.example.com"));
    assert_eq!(seq.defaults.timeout, Some(Duration::from_secs(10)));
    assert_eq!(seq.defaults.validations, vec![ValidationRule::Status(200)]);
    assert_eq!(seq.variables.get("retries"), Some(&json!(3)));

    let login = &seq.nodes[0];
    assert_eq!(login.method, "POST");
    assert_eq!(login.label(), "login");

    let profile = &seq.nodes[1];
    assert_eq!(profile.method, "GET");
    assert_eq!(profile.id, None);
    assert_eq!(
        profile.conditions,
        vec![Condition::Node {
            node: "login".to_string(),
            check: NodeCheck::StatusCode(json!(200)),
        }]
    );
    assert_eq!(
        profile.validations,
        vec![ValidationRule::Jsonpath {
            path: ".name".to_string(),
            checks: vec![Comparator::Exists(true), Comparator::Equals(json!("alice"))],
        }]
    );
}

#[test]
fn unnamed_nodes_get_positional_names() {
    let seq = load_sequence(r#"{"nodes":[{"url":"/a"},{"url":"/b"}]}"#, DocumentFormat::Json).unwrap();
    assert_eq!(seq.nodes[0].name, "Step 1");
    assert_eq!(seq.nodes[1].name, "Step 2");
}

#[test]
fn validation_comparators_keep_fixed_order() {
    let doc = r#"{"nodes":[{"url":"/a","validations":[
        {"jsonpath":".n","lessThanOrEqual":9,"greaterThan":1,"exists":true,"notEquals":"5"}
    ]}]}"#;
    let seq = load_sequence(doc, DocumentFormat::Json).unwrap();
    let ValidationRule::Jsonpath { checks, .. } = &seq.nodes[0].validations[0] else {
        panic!("expected a jsonpath rule");
    };
    let names: Vec<&str> = checks.iter().map(Comparator::name).collect();
    assert_eq!(names, vec!["exists", "notEquals", "greaterThan", "lessThanOrEqual"]);
}

#[test]
fn empty_nodes_are_rejected() {
    let parsed = parse_document_str(r#"{"nodes": []}"#, DocumentFormat::Json).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err.violations.iter().any(|v| v.path == "$.nodes"));
}

#[test]
fn missing_nodes_key_is_a_parse_error() {
    let err = load_sequence(r#"{"variables": {}}"#, DocumentFormat::Json).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn out_of_range_timeout_is_a_validation_error() {
    let err = load_sequence(
        r#"{"nodes":[{"url":"/a","timeout":1e30}]}"#,
        DocumentFormat::Json,
    )
    .unwrap_err();
    let ConfigError::Validation(err) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert!(err.violations.iter().any(|v| v.path == "$.nodes[0].timeout"));
    assert!(err.describe().contains("within range"));
}

#[test]
fn duplicate_and_malformed_ids_are_rejected() {
    let doc = r#"{"nodes":[{"id":"a","url":"/1"},{"id":"a","url":"/2"},{"id":"has space","url":"/3"}]}"#;
    let parsed = parse_document_str(doc, DocumentFormat::Json).unwrap();
    let err = build_sequence(&parsed.document).unwrap_err();
    let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
    assert!(paths.contains(&"$.nodes[1].id"));
    assert!(paths.contains(&"$.nodes[2].id"));
}

#[test]
fn every_violation_is_reported_at_once() {
    let doc = r#"{
      "variables": { "nested": { "a": 1 } },
      "defaults": { "timeout": -1 },
      "nodes": [
        { "url": "", "method": "G E T" },
        { "url": "/x", "conditions": [ { "variable": "v" } ] },
        { "url": "/y", "conditions": [ { "node": "a", "variable": "b", "equals": 1 } ] },
        { "url": "/z", "conditions": [ { "node": "a", "equals": 1 } ] },
        { "url": "/w", "validations": [ { "httpStatusCode": 42 }, { "jsonpath": "token" } ] }
      ]
    }"#;
    let parsed = parse_document_str(doc, DocumentFormat::Json).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();

    assert!(paths.contains(&"$.variables.nested"));
    assert!(paths.contains(&"$.defaults.timeout"));
    assert!(paths.contains(&"$.nodes[0].url"));
    assert!(paths.contains(&"$.nodes[0].method"));
    assert!(paths.contains(&"$.nodes[1].conditions[0]"));
    assert!(paths.contains(&"$.nodes[2].conditions[0]"));
    assert!(paths.contains(&"$.nodes[3].conditions[0].field"));
    assert!(paths.contains(&"$.nodes[4].validations[0].httpStatusCode"));
    assert!(paths.contains(&"$.nodes[4].validations[1].jsonpath"));
    assert!(err.describe().contains("$.nodes[0].url: must not be empty"));
}

#[test]
fn conditions_accept_exactly_one_comparator() {
    let doc = r#"{"nodes":[{"url":"/a","conditions":[{"input":"x","equals":"1","exists":true}]}]}"#;
    let parsed = parse_document_str(doc, DocumentFormat::Json).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err.violations[0].message.contains("exactly one is allowed"));
}

#[test]
fn templated_method_is_left_for_runtime() {
    let doc = r#"{"nodes":[{"url":"/a","method":"{{ .vars.verb }}"}]}"#;
    let seq = load_sequence(doc, DocumentFormat::Json).unwrap();
    assert_eq!(seq.nodes[0].method, "{{ .vars.verb }}");
}
