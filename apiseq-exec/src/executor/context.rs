use std::collections::BTreeMap;

use apiseq_core::types::Variables;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Answers collected for the current step, keyed by prompt name.
pub type UserInput = BTreeMap<String, String>;

/// What later nodes can see of an earlier one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredResponse {
    pub id: Option<String>,
    pub status: u16,
    pub body: JsonValue,
}

impl StoredResponse {
    /// Stand-in recorded for a node that did not run.
    pub fn skipped(id: Option<String>) -> Self {
        Self {
            id,
            status: 0,
            body: JsonValue::Object(serde_json::Map::new()),
        }
    }
}

#[derive(Clone, Copy)]
pub struct ExecutionContext<'a> {
    pub variables: &'a Variables,
    pub responses: &'a [StoredResponse],
    pub user_input: &'a UserInput,
}

impl<'a> ExecutionContext<'a> {
    /// First recorded response carrying `id`.
    pub fn response(&self, id: &str) -> Option<&'a StoredResponse> {
        self.responses
            .iter()
            .find(|r| r.id.as_deref() == Some(id))
    }
}
