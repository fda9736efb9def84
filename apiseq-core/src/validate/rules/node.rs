use crate::model::Node;
use crate::types::NodeSpec;
use crate::validate::rules::{common, condition, validation};
use crate::validate::validator::{Validator, ID_RE, METHOD_RE};

pub(crate) fn build_node(v: &mut Validator, spec: &NodeSpec, index: usize, path: &str) -> Node {
    if let Some(id) = &spec.id {
        if !ID_RE.is_match(id) {
            v.push(format!("{path}.id"), "must match regex [A-Za-z0-9_\\-]+");
        }
    }

    let name = spec
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .unwrap_or_else(|| format!("Step {}", index + 1));

    let method = spec.method.as_deref().unwrap_or("GET").trim().to_string();
    let method = if method.contains("{{") {
        method
    } else {
        if !METHOD_RE.is_match(&method) {
            v.push(format!("{path}.method"), "must be an HTTP method token");
        }
        method.to_ascii_uppercase()
    };

    if spec.url.trim().is_empty() {
        v.push(format!("{path}.url"), "must not be empty");
    }

    let timeout = common::timeout(v, &format!("{path}.timeout"), spec.timeout);

    let conditions = spec
        .conditions
        .iter()
        .enumerate()
        .filter_map(|(idx, c)| condition::build_condition(v, c, &format!("{path}.conditions[{idx}]")))
        .collect();

    let validations = spec
        .validations
        .iter()
        .enumerate()
        .filter_map(|(idx, r)| validation::build_rule(v, r, &format!("{path}.validations[{idx}]")))
        .collect();

    for key in spec.user_prompts.keys() {
        if !ID_RE.is_match(key) {
            v.push(
                format!("{path}.userPrompts.{key}"),
                "prompt key must match regex [A-Za-z0-9_\\-]+",
            );
        }
    }

    if let Some(target) = &spec.launch_browser {
        v.check_value_path(&format!("{path}.launchBrowser"), target);
    }

    Node {
        id: spec.id.clone(),
        name,
        method,
        url: spec.url.trim().to_string(),
        headers: spec.headers.clone(),
        body: spec.body.clone(),
        timeout,
        skip_default_headers: spec.skip_default_headers,
        skip_default_validations: spec.skip_default_validations,
        conditions,
        validations,
        user_prompts: spec.user_prompts.clone(),
        launch_browser: spec.launch_browser.as_ref().map(|s| s.trim().to_string()),
    }
}
