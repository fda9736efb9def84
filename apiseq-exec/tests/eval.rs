use std::collections::BTreeMap;

use apiseq_exec::executor::{
    ExecutionContext, Scope, StoredResponse, SubstitutionError, Substituter, UserInput,
};
use serde_json::{json, Value as JsonValue};

struct Fixture {
    variables: BTreeMap<String, JsonValue>,
    responses: Vec<StoredResponse>,
    input: UserInput,
}

impl Fixture {
    fn new() -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("host".to_string(), json!("api.example.com"));
        variables.insert("count".to_string(), json!(3));
        variables.insert("tricky".to_string(), json!("{{ .vars.host }}"));

        let mut input = UserInput::new();
        input.insert("otp".to_string(), "123456".to_string());

        let responses = vec![
            StoredResponse {
                id: Some("login".to_string()),
                status: 201,
                body: json!({"token": "t-1", "user": {"id": 7, "tags": ["a", "b"]}}),
            },
            StoredResponse {
                id: Some("empty".to_string()),
                status: 204,
                body: JsonValue::Null,
            },
            StoredResponse::skipped(Some("later".to_string())),
        ];

        Self { variables, responses, input }
    }

    fn ctx(&self) -> ExecutionContext<'_> {
        ExecutionContext {
            variables: &self.variables,
            responses: &self.responses,
            user_input: &self.input,
        }
    }
}

#[test]
fn literal_strings_pass_through_without_records() {
    let f = Fixture::new();
    let mut sub = Substituter::new(f.ctx(), Scope::Full);
    assert_eq!(sub.string("no placeholders").unwrap(), "no placeholders");
    assert!(sub.records().is_empty());
}

#[test]
fn variables_inputs_and_responses_resolve() {
    let f = Fixture::new();
    let mut sub = Substituter::new(f.ctx(), Scope::Full);
    let out = sub
        .string("https://{{ .vars.host }}/u/{{ .responses.login.user.id }}?n={{.vars.count}}&otp={{ .input.otp }}")
        .unwrap();
    assert_eq!(out, "https://api.example.com/u/7?n=3&otp=123456");

    let kinds: Vec<&str> = sub.records().iter().map(|r| r.kind.as_str()).collect();
    assert_eq!(kinds, vec!["variable", "variable", "input", "response"]);
}

#[test]
fn objects_and_arrays_are_stringified_as_json() {
    let f = Fixture::new();
    let mut sub = Substituter::new(f.ctx(), Scope::Full);
    assert_eq!(sub.string("{{ .responses.login.user.tags }}").unwrap(), r#"["a","b"]"#);
    assert_eq!(sub.string("{{ .responses.login.user.tags | length }}").unwrap(), "2");
}

#[test]
fn unresolved_vars_and_inputs_stay_literal() {
    let f = Fixture::new();
    let mut sub = Substituter::new(f.ctx(), Scope::Full);
    assert_eq!(
        sub.string("{{ .vars.nope }}/{{ .input.missing }}").unwrap(),
        "{{ .vars.nope }}/{{ .input.missing }}"
    );
}

#[test]
fn substituted_text_is_not_rescanned() {
    let f = Fixture::new();
    let mut sub = Substituter::new(f.ctx(), Scope::Full);
    assert_eq!(sub.string("{{ .vars.tricky }}").unwrap(), "{{ .vars.host }}");
}

#[test]
fn guids_differ_and_timestamps_match() {
    let f = Fixture::new();
    let mut sub = Substituter::new(f.ctx(), Scope::Full);
    let out = sub.string("{{ $guid }} {{ $guid }}").unwrap();
    let (a, b) = out.split_once(' ').unwrap();
    assert_ne!(a, b);
    assert_eq!(a.len(), 36);

    let out = sub
        .value(&json!({"a": "{{ $timestamp }}", "b": ["{{$timestamp}}"]}))
        .unwrap();
    assert_eq!(out["a"], out["b"][0]);
    assert!(out["a"].as_str().unwrap().parse::<i64>().is_ok());
}

#[test]
fn values_are_walked_structurally() {
    let f = Fixture::new();
    let mut sub = Substituter::new(f.ctx(), Scope::Full);
    let body = json!({
        "token": "{{ .responses.login.token }}",
        "{{ .vars.host }}": 1,
        "flags": [true, null, 2.5, "{{ .input.otp }}"]
    });
    let out = sub.value(&body).unwrap();
    assert_eq!(
        out,
        json!({
            "token": "t-1",
            "{{ .vars.host }}": 1,
            "flags": [true, null, 2.5, "123456"]
        })
    );
}

#[test]
fn status_falls_back_to_recorded_http_status() {
    let f = Fixture::new();
    let mut sub = Substituter::new(f.ctx(), Scope::Full);
    assert_eq!(sub.string("/echo/{{ .responses.login.status }}").unwrap(), "/echo/201");
    assert_eq!(sub.string("{{ .responses.empty.status }}").unwrap(), "204");
}

#[test]
fn response_reference_errors() {
    let f = Fixture::new();
    let mut sub = Substituter::new(f.ctx(), Scope::Full);

    assert!(matches!(
        sub.string("{{ .responses.ghost.id }}"),
        Err(SubstitutionError::UnknownResponse { ref id, .. }) if id == "ghost"
    ));
    assert!(matches!(
        sub.string("{{ .responses.empty.token }}"),
        Err(SubstitutionError::MissingBody { .. })
    ));
    assert!(matches!(
        sub.string("{{ .responses.later.token }}"),
        Err(SubstitutionError::MissingValue { ref path, .. }) if path == ".token"
    ));
}

#[test]
fn reduced_scope_leaves_responses_alone() {
    let f = Fixture::new();
    let mut sub = Substituter::new(f.ctx(), Scope::WithoutResponses);
    assert_eq!(
        sub.string("{{ .vars.host }} {{ .responses.ghost.id }}").unwrap(),
        "api.example.com {{ .responses.ghost.id }}"
    );
}
