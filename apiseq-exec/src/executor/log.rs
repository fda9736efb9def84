use apiseq_core::model::Node;
use apiseq_core::types::Headers;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::context::UserInput;
use super::criteria::ValidationResult;
use super::eval::SubstitutionRecord;
use super::http::{HttpRequest, HttpResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseLog {
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    pub body: JsonValue,
    pub duration_ms: u64,
}

impl From<&HttpResponse> for ResponseLog {
    fn from(resp: &HttpResponse) -> Self {
        Self {
            status: resp.status,
            status_text: resp.status_text.clone(),
            headers: resp.headers.clone(),
            body: resp.body.clone(),
            duration_ms: millis(resp.duration),
        }
    }
}

/// One entry per attempted or skipped node, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLogEntry {
    pub step: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    pub node_name: String,
    pub status: StepStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<HttpRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseLog>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<ValidationResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub substitutions: Vec<SubstitutionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_input: Option<UserInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionLogEntry {
    pub fn new(step: usize, node: &Node, status: StepStatus) -> Self {
        Self {
            step,
            node_id: node.id.clone(),
            node_name: node.name.clone(),
            status,
            timestamp: Utc::now(),
            reason: None,
            request: None,
            response: None,
            validations: Vec::new(),
            substitutions: Vec::new(),
            user_input: None,
            duration_ms: None,
            error: None,
        }
    }

    pub fn skipped(step: usize, node: &Node, reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::new(step, node, StepStatus::Skipped)
        }
    }
}

pub(crate) fn millis(d: std::time::Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
