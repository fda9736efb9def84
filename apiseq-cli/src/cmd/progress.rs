use std::sync::atomic::{AtomicUsize, Ordering};

use apiseq_exec::executor::{Event, EventSink};
use async_trait::async_trait;

/// Single-line progress on stderr.
pub struct ProgressEventSink {
    total_nodes: usize,
    completed: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

impl ProgressEventSink {
    pub fn new(total_nodes: usize) -> Self {
        Self {
            total_nodes,
            completed: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    fn update_progress(&self) {
        let completed = self.completed.load(Ordering::Relaxed);
        let skipped = self.skipped.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let total = self.total_nodes;
        let done = completed + skipped + failed;
        let percent = if total > 0 { (done * 100) / total } else { 0 };
        eprint!(
            "\rProgress: [{}/{}] {}% (✓{} ↷{} ✗{})",
            done, total, percent, completed, skipped, failed
        );
    }
}

#[async_trait]
impl EventSink for ProgressEventSink {
    async fn emit(&self, event: Event) {
        let counter = match event {
            Event::StepSucceeded { .. } => &self.completed,
            Event::StepSkipped { .. } => &self.skipped,
            Event::StepFailed { .. } => &self.failed,
            Event::RunFinished { .. } => {
                eprintln!();
                return;
            }
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.update_progress();
    }
}
