use std::sync::{Arc, Mutex};

use apiseq_exec::executor::{CompositeEventSink, Event, EventSink, NoOpEventSink};
use async_trait::async_trait;
use uuid::Uuid;

struct Collect(Arc<Mutex<Vec<String>>>);

#[async_trait]
impl EventSink for Collect {
    async fn emit(&self, event: Event) {
        self.0.lock().unwrap().push(event.kind().to_string());
    }
}

#[tokio::test]
async fn composite_fans_out_to_every_sink() {
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));
    let mut sink = CompositeEventSink::new();
    sink.add(Box::new(Collect(first.clone())));
    sink.add(Box::new(NoOpEventSink));
    sink.add(Box::new(Collect(second.clone())));

    let execution_id = Uuid::new_v4();
    sink.emit(Event::RunStarted { execution_id, total_nodes: 2, start_step: 0 }).await;
    sink.emit(Event::RunFinished { execution_id, success: true }).await;

    assert_eq!(*first.lock().unwrap(), vec!["run.started", "run.finished"]);
    assert_eq!(*first.lock().unwrap(), *second.lock().unwrap());
}

#[test]
fn events_render_as_json_lines() {
    let execution_id = Uuid::new_v4();
    let json = Event::StepSkipped {
        execution_id,
        step: 2,
        node: "profile".to_string(),
        reason: "Condition not met: x".to_string(),
    }
    .to_json();

    assert_eq!(json["type"], "step.skipped");
    assert_eq!(json["execution_id"], execution_id.to_string());
    assert_eq!(json["step"], 2);
    assert_eq!(json["reason"], "Condition not met: x");
}
