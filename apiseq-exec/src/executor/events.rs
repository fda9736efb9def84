use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RunStarted {
        execution_id: Uuid,
        total_nodes: usize,
        start_step: usize,
    },
    RunFinished {
        execution_id: Uuid,
        success: bool,
    },
    StepStarted {
        execution_id: Uuid,
        step: usize,
        node: String,
    },
    StepSkipped {
        execution_id: Uuid,
        step: usize,
        node: String,
        reason: String,
    },
    InputRequested {
        execution_id: Uuid,
        step: usize,
        node: String,
        prompts: Vec<String>,
    },
    StepSucceeded {
        execution_id: Uuid,
        step: usize,
        node: String,
        status: u16,
        duration_ms: u64,
    },
    StepFailed {
        execution_id: Uuid,
        step: usize,
        node: String,
        error: String,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::RunStarted { .. } => "run.started",
            Event::RunFinished { .. } => "run.finished",
            Event::StepStarted { .. } => "step.started",
            Event::StepSkipped { .. } => "step.skipped",
            Event::InputRequested { .. } => "step.input_requested",
            Event::StepSucceeded { .. } => "step.succeeded",
            Event::StepFailed { .. } => "step.failed",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let kind = self.kind();
        match self {
            Event::RunStarted { execution_id, total_nodes, start_step } => json!({
                "type": kind, "execution_id": execution_id.to_string(),
                "total_nodes": total_nodes, "start_step": start_step
            }),
            Event::RunFinished { execution_id, success } => json!({
                "type": kind, "execution_id": execution_id.to_string(), "success": success
            }),
            Event::StepStarted { execution_id, step, node } => json!({
                "type": kind, "execution_id": execution_id.to_string(), "step": step, "node": node
            }),
            Event::StepSkipped { execution_id, step, node, reason } => json!({
                "type": kind, "execution_id": execution_id.to_string(), "step": step,
                "node": node, "reason": reason
            }),
            Event::InputRequested { execution_id, step, node, prompts } => json!({
                "type": kind, "execution_id": execution_id.to_string(), "step": step,
                "node": node, "prompts": prompts
            }),
            Event::StepSucceeded { execution_id, step, node, status, duration_ms } => json!({
                "type": kind, "execution_id": execution_id.to_string(), "step": step,
                "node": node, "status": status, "duration_ms": duration_ms
            }),
            Event::StepFailed { execution_id, step, node, error } => json!({
                "type": kind, "execution_id": execution_id.to_string(), "step": step,
                "node": node, "error": error
            }),
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// One JSON object per line on stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        println!("{}", event.to_json());
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
