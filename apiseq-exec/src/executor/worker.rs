use std::time::Instant;

use apiseq_core::model::{Sequence, ValidationRule};
use apiseq_core::types::Headers;
use tracing::{debug, info};
use uuid::Uuid;

use super::context::{ExecutionContext, StoredResponse, UserInput};
use super::criteria::{validate, ValidationResult};
use super::eval::{Scope, SubstitutionError, SubstitutionRecord, Substituter};
use super::events::Event;
use super::http::{HttpRequest, HttpResponse};
use super::input::InputRequest;
use super::log::millis;
use super::merge::{EffectiveNode, ValidationPolicy};
use super::result::StepError;
use super::runner::Executor;

/// What one node produced, kept even when it failed part way.
#[derive(Debug, Default)]
pub(crate) struct Attempt {
    pub request: Option<HttpRequest>,
    pub response: Option<HttpResponse>,
    pub validations: Vec<ValidationResult>,
    pub substitutions: Vec<SubstitutionRecord>,
    pub user_input: Option<UserInput>,
    pub error: Option<StepError>,
}

pub(crate) struct NodeRun<'a> {
    pub execution_id: Uuid,
    pub step: usize,
    pub sequence: &'a Sequence,
    pub responses: &'a [StoredResponse],
    pub debug: bool,
}

impl Executor {
    /// Prompts, substitution, dispatch and validation for one node.
    pub(crate) async fn attempt(&self, effective: &EffectiveNode<'_>, run: NodeRun<'_>) -> Attempt {
        let node = effective.node;
        let mut attempt = Attempt::default();

        let user_input = if node.user_prompts.is_empty() {
            UserInput::new()
        } else {
            self.event_sink
                .emit(Event::InputRequested {
                    execution_id: run.execution_id,
                    step: run.step,
                    node: node.label().to_string(),
                    prompts: node.user_prompts.keys().cloned().collect(),
                })
                .await;
            let request = InputRequest {
                execution_id: run.execution_id,
                step: run.step,
                node_name: node.name.clone(),
                prompts: node.user_prompts.clone(),
            };
            match self.input.collect(&request).await {
                Ok(answers) => {
                    attempt.user_input = Some(answers.clone());
                    answers
                }
                Err(e) => {
                    attempt.error = Some(e.into());
                    return attempt;
                }
            }
        };

        let ctx = ExecutionContext {
            variables: &run.sequence.variables,
            responses: run.responses,
            user_input: &user_input,
        };
        let mut substituter = Substituter::new(ctx, Scope::Full);
        let resolved = resolve_request(&mut substituter, effective);
        attempt.substitutions = substituter.into_records();
        if run.debug {
            for record in &attempt.substitutions {
                info!(
                    node = node.label(),
                    original = %record.original,
                    value = %record.value,
                    kind = %record.kind,
                    "substituted"
                );
            }
        }
        let (request, policy) = match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                attempt.error = Some(e.into());
                return attempt;
            }
        };
        attempt.request = Some(request.clone());

        let timeout = effective.timeout.unwrap_or(self.config.default_timeout);
        if run.debug {
            info!(node = node.label(), method = %request.method, url = %request.url, ?timeout, "dispatching request");
        } else {
            debug!(node = node.label(), method = %request.method, url = %request.url, "dispatching request");
        }
        let started = Instant::now();
        let response = match self.http.send(request, timeout).await {
            Ok(response) => response,
            Err(source) => {
                attempt.error = Some(StepError::Transport {
                    source,
                    duration_ms: millis(started.elapsed()),
                });
                return attempt;
            }
        };
        if run.debug {
            info!(node = node.label(), status = response.status, body = %response.body, "response received");
        }

        match policy {
            ValidationPolicy::Disabled => {}
            ValidationPolicy::Rules(rules) => match validate(&response, &rules) {
                Ok(results) => attempt.validations = results,
                Err(failure) => {
                    attempt.validations = failure.results.clone();
                    attempt.error = Some(failure.into());
                }
            },
        }
        attempt.response = Some(response);
        attempt
    }
}

fn resolve_request(
    substituter: &mut Substituter<'_>,
    effective: &EffectiveNode<'_>,
) -> Result<(HttpRequest, ValidationPolicy), SubstitutionError> {
    let node = effective.node;
    let method = substituter.string(&node.method)?.to_ascii_uppercase();
    let url = substituter.string(&effective.url)?;

    let mut headers = Headers::new();
    for (name, value) in &effective.headers {
        headers.insert(name.clone(), substituter.string(value)?);
    }

    let body = match &node.body {
        Some(body) => Some(substituter.value(body)?),
        None => None,
    };

    let policy = match &effective.validations {
        ValidationPolicy::Disabled => ValidationPolicy::Disabled,
        ValidationPolicy::Rules(rules) => ValidationPolicy::Rules(
            rules
                .iter()
                .map(|r| substituter.rule(r))
                .collect::<Result<Vec<ValidationRule>, _>>()?,
        ),
    };

    Ok((HttpRequest { method, url, headers, body }, policy))
}
