use std::time::Duration;

use apiseq_core::{load_sequence, DocumentFormat, ValidationRule};
use apiseq_exec::executor::{merge, ValidationPolicy};

fn sequence(json: &str) -> apiseq_core::Sequence {
    load_sequence(json, DocumentFormat::Json).unwrap()
}

#[test]
fn base_url_is_prefixed_only_for_relative_paths() {
    let seq = sequence(
        r#"{"defaults":{"baseUrl":"https://api.test"},
            "nodes":[{"url":"/a"},{"url":"https://other.test/b"},{"url":"c"}]}"#,
    );
    let urls: Vec<String> = seq
        .nodes
        .iter()
        .map(|n| merge(n, &seq.defaults).url)
        .collect();
    assert_eq!(urls, vec!["https://api.test/a", "https://other.test/b", "c"]);
}

#[test]
fn node_headers_override_defaults() {
    let seq = sequence(
        r#"{"defaults":{"headers":{"X":"1"}},
            "nodes":[{"url":"/a","headers":{"X":"2","Y":"3"},"skipDefaultHeaders":true}]}"#,
    );
    let effective = merge(&seq.nodes[0], &seq.defaults);
    let pairs: Vec<(&str, &str)> = effective
        .headers
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(pairs, vec![("X", "2"), ("Y", "3")]);
}

#[test]
fn timeout_prefers_node_then_defaults() {
    let seq = sequence(r#"{"defaults":{"timeout":5},"nodes":[{"url":"/a","timeout":1.5},{"url":"/b"}]}"#);
    assert_eq!(merge(&seq.nodes[0], &seq.defaults).timeout, Some(Duration::from_millis(1500)));
    assert_eq!(merge(&seq.nodes[1], &seq.defaults).timeout, Some(Duration::from_secs(5)));

    let bare = sequence(r#"{"nodes":[{"url":"/a"}]}"#);
    assert_eq!(merge(&bare.nodes[0], &bare.defaults).timeout, None);
}

#[test]
fn validations_concatenate_unless_skipped() {
    let seq = sequence(
        r#"{"defaults":{"validations":[{"httpStatusCode":200}]},
            "nodes":[
              {"url":"/a","validations":[{"jsonpath":".ok"}]},
              {"url":"/b","skipDefaultValidations":true,"validations":[{"httpStatusCode":201}]},
              {"url":"/c","skipDefaultValidations":true}
            ]}"#,
    );
    let policies: Vec<ValidationPolicy> = seq
        .nodes
        .iter()
        .map(|n| merge(n, &seq.defaults).validations)
        .collect();

    assert_eq!(
        policies[0],
        ValidationPolicy::Rules(vec![
            ValidationRule::Status(200),
            ValidationRule::Jsonpath { path: ".ok".to_string(), checks: vec![] },
        ])
    );
    assert_eq!(policies[1], ValidationPolicy::Rules(vec![ValidationRule::Status(201)]));
    assert_eq!(policies[2], ValidationPolicy::Disabled);
}
