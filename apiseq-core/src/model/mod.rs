//! The validated, strongly-typed form of a sequence config.
//!
//! Built from a [`crate::types::ConfigDocument`] by [`crate::validate::build_sequence`];
//! the executor only ever sees these types.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value as JsonValue;

use crate::types::{Headers, Variables};

#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub enable_debug: bool,
    pub variables: Variables,
    pub defaults: Defaults,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Defaults {
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub headers: Headers,
    pub validations: Vec<ValidationRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: Option<String>,
    pub name: String,
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: Option<JsonValue>,
    pub timeout: Option<Duration>,
    /// Accepted for compatibility; default headers are always merged.
    pub skip_default_headers: bool,
    pub skip_default_validations: bool,
    pub conditions: Vec<Condition>,
    pub validations: Vec<ValidationRule>,
    pub user_prompts: BTreeMap<String, String>,
    pub launch_browser: Option<String>,
}

impl Node {
    /// `id` when present, otherwise the display name. Used in log lines and events.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}

/// Gate deciding whether a node runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Node { node: String, check: NodeCheck },
    Variable { name: String, comparator: Comparator },
    Input { name: String, comparator: Comparator },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeCheck {
    /// Compare the stored HTTP status of the referenced response.
    StatusCode(JsonValue),
    /// Compare a value extracted from the referenced response body.
    Field { path: String, comparator: Comparator },
}

/// One comparison. Operands may still contain placeholders; they are resolved at
/// evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparator {
    Exists(bool),
    Equals(JsonValue),
    NotEquals(JsonValue),
    GreaterThan(JsonValue),
    LessThan(JsonValue),
    GreaterThanOrEqual(JsonValue),
    LessThanOrEqual(JsonValue),
}

impl Comparator {
    pub fn name(&self) -> &'static str {
        match self {
            Comparator::Exists(_) => "exists",
            Comparator::Equals(_) => "equals",
            Comparator::NotEquals(_) => "notEquals",
            Comparator::GreaterThan(_) => "greaterThan",
            Comparator::LessThan(_) => "lessThan",
            Comparator::GreaterThanOrEqual(_) => "greaterThanOrEqual",
            Comparator::LessThanOrEqual(_) => "lessThanOrEqual",
        }
    }

    pub fn operand(&self) -> Option<&JsonValue> {
        match self {
            Comparator::Exists(_) => None,
            Comparator::Equals(v)
            | Comparator::NotEquals(v)
            | Comparator::GreaterThan(v)
            | Comparator::LessThan(v)
            | Comparator::GreaterThanOrEqual(v)
            | Comparator::LessThanOrEqual(v) => Some(v),
        }
    }

    pub fn with_operand(&self, operand: JsonValue) -> Comparator {
        match self {
            Comparator::Exists(b) => Comparator::Exists(*b),
            Comparator::Equals(_) => Comparator::Equals(operand),
            Comparator::NotEquals(_) => Comparator::NotEquals(operand),
            Comparator::GreaterThan(_) => Comparator::GreaterThan(operand),
            Comparator::LessThan(_) => Comparator::LessThan(operand),
            Comparator::GreaterThanOrEqual(_) => Comparator::GreaterThanOrEqual(operand),
            Comparator::LessThanOrEqual(_) => Comparator::LessThanOrEqual(operand),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationRule {
    Status(u16),
    /// `checks` are stored in evaluation order; empty means an implicit existence check.
    Jsonpath { path: String, checks: Vec<Comparator> },
}

impl ValidationRule {
    pub fn describe(&self) -> String {
        match self {
            ValidationRule::Status(code) => format!("httpStatusCode {code}"),
            ValidationRule::Jsonpath { path, checks } if checks.is_empty() => {
                format!("{path} exists")
            }
            ValidationRule::Jsonpath { path, checks } => {
                let names: Vec<&str> = checks.iter().map(Comparator::name).collect();
                format!("{path} {}", names.join(", "))
            }
        }
    }
}
