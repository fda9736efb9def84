use std::sync::Arc;
use std::time::Instant;

use apiseq_core::expressions::extract;
use apiseq_core::model::{Node, Sequence};
use serde_json::Value as JsonValue;
use tracing::{error, info, warn};

use super::browser::{BrowserLauncher, NoOpBrowserLauncher};
use super::conditions::evaluate_all;
use super::context::{ExecutionContext, StoredResponse, UserInput};
use super::events::{Event, EventSink, NoOpEventSink};
use super::http::HttpClient;
use super::input::{InputCollector, StaticInputCollector};
use super::log::{millis, ExecutionLogEntry, ResponseLog, StepStatus};
use super::merge::merge;
use super::result::SequenceResult;
use super::types::{ExecutorConfig, RunOptions};
use super::worker::NodeRun;

pub const START_OFFSET_REASON: &str = "Skipped due to start step offset";

/// Runs a [`Sequence`] node by node. One executor may serve several runs; each run keeps
/// its own responses and log.
pub struct Executor {
    pub(super) config: ExecutorConfig,
    pub(super) http: Arc<dyn HttpClient>,
    pub(super) input: Arc<dyn InputCollector>,
    pub(super) browser: Arc<dyn BrowserLauncher>,
    pub(super) event_sink: Arc<dyn EventSink>,
}

#[derive(Default)]
struct RunState {
    responses: Vec<StoredResponse>,
    log: Vec<ExecutionLogEntry>,
    executed: usize,
    skipped: usize,
    failed: usize,
}

impl Executor {
    /// Prompts fail without answers, browser launches and events are dropped until
    /// replaced with the `with_*` methods.
    pub fn new(config: ExecutorConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http,
            input: Arc::new(StaticInputCollector::default()),
            browser: Arc::new(NoOpBrowserLauncher),
            event_sink: Arc::new(NoOpEventSink),
        }
    }

    pub fn with_input(mut self, input: Arc<dyn InputCollector>) -> Self {
        self.input = input;
        self
    }

    pub fn with_browser(mut self, browser: Arc<dyn BrowserLauncher>) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    pub async fn execute(&self, sequence: &Sequence, options: RunOptions) -> SequenceResult {
        let execution_id = options.execution_id;
        let debug = options.debug || sequence.enable_debug;
        let mut state = RunState::default();

        info!(%execution_id, nodes = sequence.nodes.len(), start_step = options.start_step, "run started");
        self.event_sink
            .emit(Event::RunStarted {
                execution_id,
                total_nodes: sequence.nodes.len(),
                start_step: options.start_step,
            })
            .await;

        for (step, node) in sequence.nodes.iter().enumerate() {
            if step < options.start_step {
                self.skip(&mut state, &options, step, node, START_OFFSET_REASON.to_string())
                    .await;
                continue;
            }

            let effective = merge(node, &sequence.defaults);

            let no_input = UserInput::new();
            let gate = evaluate_all(
                &node.conditions,
                ExecutionContext {
                    variables: &sequence.variables,
                    responses: &state.responses,
                    user_input: &no_input,
                },
            );
            if !gate.should_execute {
                let reason = gate.skip_reason.unwrap_or_default();
                self.skip(&mut state, &options, step, node, reason).await;
                continue;
            }

            self.event_sink
                .emit(Event::StepStarted {
                    execution_id,
                    step,
                    node: node.label().to_string(),
                })
                .await;

            let started = Instant::now();
            let attempt = self
                .attempt(
                    &effective,
                    NodeRun {
                        execution_id,
                        step,
                        sequence,
                        responses: &state.responses,
                        debug,
                    },
                )
                .await;
            let duration_ms = millis(started.elapsed());

            let mut entry = ExecutionLogEntry::new(step, node, StepStatus::Completed);
            entry.request = attempt.request;
            entry.response = attempt.response.as_ref().map(ResponseLog::from);
            entry.validations = attempt.validations;
            entry.substitutions = attempt.substitutions;
            entry.user_input = attempt.user_input;
            entry.duration_ms = Some(duration_ms);

            // A response that failed validation is still visible to the log and context.
            if let Some(response) = &attempt.response {
                state.responses.push(StoredResponse {
                    id: node.id.clone(),
                    status: response.status,
                    body: response.body.clone(),
                });
            }

            match attempt.error {
                None => {
                    let status = attempt.response.as_ref().map(|r| r.status).unwrap_or_default();
                    if let Some(response) = &attempt.response {
                        self.launch_browser(node, &response.body);
                    }
                    info!(%execution_id, step, node = node.label(), status, duration_ms, "step completed");
                    state.executed += 1;
                    state.log.push(entry);
                    self.event_sink
                        .emit(Event::StepSucceeded {
                            execution_id,
                            step,
                            node: node.label().to_string(),
                            status,
                            duration_ms,
                        })
                        .await;
                }
                Some(err) => {
                    let message = err.to_string();
                    error!(%execution_id, step, node = node.label(), error = %message, "step failed");
                    entry.status = StepStatus::Failed;
                    entry.error = Some(message.clone());
                    state.failed += 1;
                    state.log.push(entry);
                    self.event_sink
                        .emit(Event::StepFailed {
                            execution_id,
                            step,
                            node: node.label().to_string(),
                            error: message,
                        })
                        .await;
                    break;
                }
            }
        }

        let success = state.failed == 0;
        info!(
            %execution_id,
            success,
            executed = state.executed,
            skipped = state.skipped,
            failed = state.failed,
            "run finished"
        );
        self.event_sink
            .emit(Event::RunFinished { execution_id, success })
            .await;

        SequenceResult {
            execution_id,
            success,
            steps_executed: state.executed,
            steps_skipped: state.skipped,
            steps_failed: state.failed,
            execution_log: state.log,
        }
    }

    async fn skip(
        &self,
        state: &mut RunState,
        options: &RunOptions,
        step: usize,
        node: &Node,
        reason: String,
    ) {
        info!(execution_id = %options.execution_id, step, node = node.label(), %reason, "step skipped");
        state.responses.push(StoredResponse::skipped(node.id.clone()));
        state.log.push(ExecutionLogEntry::skipped(step, node, reason.clone()));
        state.skipped += 1;
        self.event_sink
            .emit(Event::StepSkipped {
                execution_id: options.execution_id,
                step,
                node: node.label().to_string(),
                reason,
            })
            .await;
    }

    fn launch_browser(&self, node: &Node, body: &JsonValue) {
        let Some(path) = &node.launch_browser else {
            return;
        };
        match extract(body, path) {
            Some(JsonValue::String(target)) if !target.trim().is_empty() => {
                if let Err(e) = self.browser.launch(&target) {
                    warn!(node = node.label(), error = %e, "browser launch failed");
                }
            }
            _ => warn!(node = node.label(), %path, "launchBrowser path did not resolve to a URL"),
        }
    }
}
