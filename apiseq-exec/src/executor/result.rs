use serde::Serialize;
use uuid::Uuid;

use super::criteria::ValidationFailure;
use super::eval::SubstitutionError;
use super::http::HttpError;
use super::input::InputError;
use super::log::{ExecutionLogEntry, StepStatus};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceResult {
    pub execution_id: Uuid,
    pub success: bool,
    pub steps_executed: usize,
    pub steps_skipped: usize,
    pub steps_failed: usize,
    pub execution_log: Vec<ExecutionLogEntry>,
}

impl SequenceResult {
    /// The entry that aborted the run, if any.
    pub fn failure(&self) -> Option<&ExecutionLogEntry> {
        self.execution_log
            .iter()
            .find(|e| e.status == StepStatus::Failed)
    }
}

/// Everything that aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("reference error: {0}")]
    Reference(#[from] SubstitutionError),
    #[error("request failed after {duration_ms} ms: {source}")]
    Transport { source: HttpError, duration_ms: u64 },
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error("input collection failed: {0}")]
    Input(#[from] InputError),
}
