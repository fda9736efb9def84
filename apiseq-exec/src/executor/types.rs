use std::time::Duration;

use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Used when neither the node nor the defaults set a timeout.
    pub default_timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(30),
        }
    }
}

/// Per-run knobs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub execution_id: Uuid,
    /// Nodes before this index are skipped without evaluation.
    pub start_step: usize,
    /// Forces debug tracing on even when the sequence does not enable it.
    pub debug: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            start_step: 0,
            debug: false,
        }
    }
}
