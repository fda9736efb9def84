//! Collecting answers for a node's `userPrompts`.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::oneshot;
use uuid::Uuid;

use super::context::UserInput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRequest {
    pub execution_id: Uuid,
    pub step: usize,
    pub node_name: String,
    /// Prompt name to the text shown to the user.
    pub prompts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("no answer for prompt '{0}'")]
    MissingAnswer(String),
    #[error("input stream closed before prompt '{0}' was answered")]
    Closed(String),
    #[error("input request for step {step} of execution {execution_id} was cancelled")]
    Cancelled { execution_id: Uuid, step: usize },
    #[error("no pending input request for step {step} of execution {execution_id}")]
    NotPending { execution_id: Uuid, step: usize },
    #[error("io error: {0}")]
    Io(String),
}

#[async_trait]
pub trait InputCollector: Send + Sync {
    /// One answer per key of `request.prompts`.
    async fn collect(&self, request: &InputRequest) -> Result<UserInput, InputError>;
}

/// Prompts on stderr and reads one line per prompt from stdin.
pub struct StdinInputCollector {
    lines: tokio::sync::Mutex<Lines<BufReader<Stdin>>>,
}

impl Default for StdinInputCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl StdinInputCollector {
    pub fn new() -> Self {
        Self {
            lines: tokio::sync::Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

#[async_trait]
impl InputCollector for StdinInputCollector {
    async fn collect(&self, request: &InputRequest) -> Result<UserInput, InputError> {
        let mut lines = self.lines.lock().await;
        let mut stderr = tokio::io::stderr();
        let mut answers = UserInput::new();

        for (name, prompt) in &request.prompts {
            let text = format!("[{}] {prompt}: ", request.node_name);
            stderr
                .write_all(text.as_bytes())
                .await
                .map_err(|e| InputError::Io(e.to_string()))?;
            stderr.flush().await.map_err(|e| InputError::Io(e.to_string()))?;

            let line = lines
                .next_line()
                .await
                .map_err(|e| InputError::Io(e.to_string()))?
                .ok_or_else(|| InputError::Closed(name.clone()))?;
            answers.insert(name.clone(), line.trim_end_matches('\r').to_string());
        }
        Ok(answers)
    }
}

/// Answers fixed up front, e.g. from `--input KEY=VALUE`.
#[derive(Debug, Clone, Default)]
pub struct StaticInputCollector {
    answers: UserInput,
}

impl StaticInputCollector {
    pub fn new(answers: UserInput) -> Self {
        Self { answers }
    }
}

#[async_trait]
impl InputCollector for StaticInputCollector {
    async fn collect(&self, request: &InputRequest) -> Result<UserInput, InputError> {
        request
            .prompts
            .keys()
            .map(|name| {
                self.answers
                    .get(name)
                    .map(|v| (name.clone(), v.clone()))
                    .ok_or_else(|| InputError::MissingAnswer(name.clone()))
            })
            .collect()
    }
}

struct PendingInput {
    request: InputRequest,
    reply: oneshot::Sender<UserInput>,
}

/// Clears a parked request once its waiter goes away, answered or not.
struct PendingGuard<'a> {
    pending: &'a Mutex<HashMap<(Uuid, usize), PendingInput>>,
    key: (Uuid, usize),
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Parks each request until the host answers it with [`ChannelInputCollector::resolve`].
#[derive(Default)]
pub struct ChannelInputCollector {
    pending: Mutex<HashMap<(Uuid, usize), PendingInput>>,
}

impl ChannelInputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests still waiting for an answer, oldest step first.
    pub fn pending_requests(&self) -> Vec<InputRequest> {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let mut requests: Vec<InputRequest> =
            pending.values().map(|p| p.request.clone()).collect();
        requests.sort_by_key(|r| (r.execution_id, r.step));
        requests
    }

    pub fn resolve(
        &self,
        execution_id: Uuid,
        step: usize,
        answers: UserInput,
    ) -> Result<(), InputError> {
        let entry = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(execution_id, step))
            .ok_or(InputError::NotPending { execution_id, step })?;
        entry
            .reply
            .send(answers)
            .map_err(|_| InputError::Cancelled { execution_id, step })
    }

    /// Drop every pending request of one execution. Returns how many were dropped.
    pub fn cancel(&self, execution_id: Uuid) -> usize {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let before = pending.len();
        pending.retain(|(id, _), _| *id != execution_id);
        before - pending.len()
    }
}

#[async_trait]
impl InputCollector for ChannelInputCollector {
    async fn collect(&self, request: &InputRequest) -> Result<UserInput, InputError> {
        let (tx, rx) = oneshot::channel();
        let key = (request.execution_id, request.step);
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, PendingInput { request: request.clone(), reply: tx });
        let _guard = PendingGuard {
            pending: &self.pending,
            key,
        };

        rx.await.map_err(|_| InputError::Cancelled {
            execution_id: request.execution_id,
            step: request.step,
        })
    }
}
