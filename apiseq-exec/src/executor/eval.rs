//! Placeholder substitution.
//!
//! Each string is parsed once into segments; placeholders are then resolved phase by phase
//! (`$guid`, `$timestamp`, `.vars`, `.input`, `.responses`). Resolved text is spliced in and
//! never rescanned, so a variable whose value looks like a placeholder stays as written.

use apiseq_core::expressions::{extract, parse_template, PlaceholderKind, Segment};
use apiseq_core::model::{Comparator, ValidationRule};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use super::compare::loose_string;
use super::context::ExecutionContext;

const STATUS_PATH: &str = ".status";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstitutionRecord {
    pub original: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Which placeholder kinds a [`Substituter`] resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Full,
    /// Response references are left untouched. Used for condition operands.
    WithoutResponses,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubstitutionError {
    #[error("{placeholder}: no response with id '{id}' has been recorded")]
    UnknownResponse { id: String, placeholder: String },
    #[error("{placeholder}: response '{id}' has no body")]
    MissingBody { id: String, placeholder: String },
    #[error("{placeholder}: path '{path}' not found in response '{id}'")]
    MissingValue {
        id: String,
        path: String,
        placeholder: String,
    },
}

pub struct Substituter<'a> {
    ctx: ExecutionContext<'a>,
    scope: Scope,
    timestamp: i64,
    records: Vec<SubstitutionRecord>,
}

impl<'a> Substituter<'a> {
    pub fn new(ctx: ExecutionContext<'a>, scope: Scope) -> Self {
        Self {
            ctx,
            scope,
            timestamp: chrono::Utc::now().timestamp(),
            records: Vec::new(),
        }
    }

    /// Records made so far, in the order they were applied.
    pub fn records(&self) -> &[SubstitutionRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SubstitutionRecord> {
        self.records
    }

    /// Deep copy of `value` with every string rewritten. Keys are left alone.
    pub fn value(&mut self, value: &JsonValue) -> Result<JsonValue, SubstitutionError> {
        match value {
            JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) => Ok(value.clone()),
            JsonValue::String(s) => self.string(s).map(JsonValue::String),
            JsonValue::Array(arr) => arr
                .iter()
                .map(|v| self.value(v))
                .collect::<Result<Vec<_>, _>>()
                .map(JsonValue::Array),
            JsonValue::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), self.value(v)?);
                }
                Ok(JsonValue::Object(out))
            }
        }
    }

    pub fn string(&mut self, input: &str) -> Result<String, SubstitutionError> {
        let template = parse_template(input);
        if template.is_literal() {
            return Ok(input.to_string());
        }

        let mut resolved: Vec<Option<String>> = vec![None; template.segments.len()];
        for phase in 0..PHASES {
            for (idx, segment) in template.segments.iter().enumerate() {
                let Segment::Placeholder(placeholder) = segment else {
                    continue;
                };
                if phase_of(&placeholder.kind) != phase {
                    continue;
                }
                if let Some(value) = self.resolve(&placeholder.kind, &placeholder.raw)? {
                    self.records.push(SubstitutionRecord {
                        original: placeholder.raw.clone(),
                        value: value.clone(),
                        kind: placeholder.kind.label().to_string(),
                    });
                    resolved[idx] = Some(value);
                }
            }
        }

        let mut out = String::with_capacity(input.len());
        for (segment, value) in template.segments.iter().zip(resolved) {
            match (segment, value) {
                (_, Some(value)) => out.push_str(&value),
                (Segment::Literal(text), None) => out.push_str(text),
                (Segment::Placeholder(p), None) => out.push_str(&p.raw),
            }
        }
        Ok(out)
    }

    pub fn comparator(&mut self, comparator: &Comparator) -> Result<Comparator, SubstitutionError> {
        match comparator.operand() {
            Some(operand) => Ok(comparator.with_operand(self.value(operand)?)),
            None => Ok(comparator.clone()),
        }
    }

    pub fn rule(&mut self, rule: &ValidationRule) -> Result<ValidationRule, SubstitutionError> {
        match rule {
            ValidationRule::Status(_) => Ok(rule.clone()),
            ValidationRule::Jsonpath { path, checks } => Ok(ValidationRule::Jsonpath {
                path: path.clone(),
                checks: checks
                    .iter()
                    .map(|c| self.comparator(c))
                    .collect::<Result<_, _>>()?,
            }),
        }
    }

    /// `Ok(None)` leaves the placeholder as written.
    fn resolve(&self, kind: &PlaceholderKind, raw: &str) -> Result<Option<String>, SubstitutionError> {
        match kind {
            PlaceholderKind::Guid => Ok(Some(uuid::Uuid::new_v4().to_string())),
            PlaceholderKind::Timestamp => Ok(Some(self.timestamp.to_string())),
            PlaceholderKind::Var(name) => {
                let value = self.ctx.variables.get(name).map(loose_string);
                if value.is_none() {
                    warn!(placeholder = raw, "unresolved variable left as written");
                }
                Ok(value)
            }
            PlaceholderKind::Input(name) => {
                let value = self.ctx.user_input.get(name).cloned();
                if value.is_none() {
                    warn!(placeholder = raw, "unresolved input left as written");
                }
                Ok(value)
            }
            PlaceholderKind::Response { .. } if self.scope == Scope::WithoutResponses => Ok(None),
            PlaceholderKind::Response { id, path } => self.response_value(id, path, raw).map(Some),
        }
    }

    fn response_value(&self, id: &str, path: &str, raw: &str) -> Result<String, SubstitutionError> {
        let response = self
            .ctx
            .response(id)
            .ok_or_else(|| SubstitutionError::UnknownResponse {
                id: id.to_string(),
                placeholder: raw.to_string(),
            })?;

        let from_body = if response.body.is_null() {
            None
        } else {
            extract(&response.body, path)
        };

        // `.status` falls back to the recorded HTTP status when the body has no such field.
        let value = match from_body {
            Some(v) => v,
            None if path == STATUS_PATH => JsonValue::from(response.status),
            None if response.body.is_null() => {
                return Err(SubstitutionError::MissingBody {
                    id: id.to_string(),
                    placeholder: raw.to_string(),
                })
            }
            None => {
                return Err(SubstitutionError::MissingValue {
                    id: id.to_string(),
                    path: path.to_string(),
                    placeholder: raw.to_string(),
                })
            }
        };

        Ok(loose_string(&value))
    }
}

const PHASES: u8 = 5;

fn phase_of(kind: &PlaceholderKind) -> u8 {
    match kind {
        PlaceholderKind::Guid => 0,
        PlaceholderKind::Timestamp => 1,
        PlaceholderKind::Var(_) => 2,
        PlaceholderKind::Input(_) => 3,
        PlaceholderKind::Response { .. } => 4,
    }
}
