use std::collections::HashSet;

use crate::model::{Defaults, Sequence};
use crate::types::{ConfigDocument, DefaultsSpec};
use crate::validate::rules::{common, node, validation};
use crate::validate::validator::Validator;

pub(crate) fn build_document(v: &mut Validator, doc: &ConfigDocument) -> Sequence {
    for (name, value) in &doc.variables {
        if value.is_array() || value.is_object() {
            v.push(
                format!("$.variables.{name}"),
                "must be a string, number, boolean or null",
            );
        }
    }

    let defaults = doc
        .defaults
        .as_ref()
        .map(|d| build_defaults(v, d))
        .unwrap_or_default();

    if doc.nodes.is_empty() {
        v.push("$.nodes", "must have at least one entry");
    }

    let mut ids = HashSet::<&str>::new();
    let mut nodes = Vec::with_capacity(doc.nodes.len());
    for (idx, spec) in doc.nodes.iter().enumerate() {
        let path = format!("$.nodes[{idx}]");
        if let Some(id) = spec.id.as_deref() {
            if !ids.insert(id) {
                v.push(format!("{path}.id"), "must be unique");
            }
        }
        nodes.push(node::build_node(v, spec, idx, &path));
    }

    Sequence {
        enable_debug: doc.enable_debug,
        variables: doc.variables.clone(),
        defaults,
        nodes,
    }
}

fn build_defaults(v: &mut Validator, spec: &DefaultsSpec) -> Defaults {
    let base_url = spec.base_url.as_deref().map(str::trim);
    if base_url == Some("") {
        v.push("$.defaults.baseUrl", "must not be empty when provided");
    }

    let validations = spec
        .validations
        .iter()
        .enumerate()
        .filter_map(|(idx, r)| {
            validation::build_rule(v, r, &format!("$.defaults.validations[{idx}]"))
        })
        .collect();

    Defaults {
        base_url: base_url.filter(|u| !u.is_empty()).map(String::from),
        timeout: common::timeout(v, "$.defaults.timeout", spec.timeout),
        headers: spec.headers.clone(),
        validations,
    }
}
