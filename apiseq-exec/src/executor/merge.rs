use std::time::Duration;

use apiseq_core::model::{Defaults, Node, ValidationRule};
use apiseq_core::types::Headers;
use tracing::debug;

/// A node with sequence defaults folded in. Placeholders are still unresolved.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveNode<'a> {
    pub node: &'a Node,
    pub url: String,
    /// `None` leaves the choice to the executor's configured default.
    pub timeout: Option<Duration>,
    pub headers: Headers,
    pub validations: ValidationPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationPolicy {
    /// Rules to check, in order. Empty means the implicit `200` status rule.
    Rules(Vec<ValidationRule>),
    /// No checks at all.
    Disabled,
}

pub fn merge<'a>(node: &'a Node, defaults: &Defaults) -> EffectiveNode<'a> {
    let url = match &defaults.base_url {
        Some(base) if node.url.starts_with('/') => format!("{base}{}", node.url),
        _ => node.url.clone(),
    };

    if node.skip_default_headers {
        debug!(node = node.label(), "skipDefaultHeaders is ignored; default headers are merged");
    }
    let mut headers = defaults.headers.clone();
    headers.extend(node.headers.iter().map(|(k, v)| (k.clone(), v.clone())));

    let validations = if node.skip_default_validations {
        if node.validations.is_empty() {
            ValidationPolicy::Disabled
        } else {
            ValidationPolicy::Rules(node.validations.clone())
        }
    } else {
        ValidationPolicy::Rules(
            defaults
                .validations
                .iter()
                .chain(&node.validations)
                .cloned()
                .collect(),
        )
    };

    EffectiveNode {
        node,
        url,
        timeout: node.timeout.or(defaults.timeout),
        headers,
        validations,
    }
}
