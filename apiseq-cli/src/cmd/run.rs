use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use apiseq_exec::executor::{
    BrowserLauncher, CompositeEventSink, InputCollector, NoOpBrowserLauncher, ReqwestHttpClient,
    StaticInputCollector, StdinInputCollector, StdoutEventSink, StepStatus, SystemBrowserLauncher,
};
use apiseq_exec::{Executor, ExecutorConfig, RunOptions, SequenceResult};
use tracing::debug;

use super::config::{apply_variable_overrides, load_sequence_file, parse_pairs};
use super::progress::ProgressEventSink;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{EventsMode, OutputArgs, RunnerArgs, VariableArgs};

pub async fn run_cmd(
    path: &Path,
    start_step: usize,
    variables: VariableArgs,
    runner: RunnerArgs,
    debug: bool,
    output: OutputArgs,
) -> i32 {
    let mut sequence = match load_sequence_file(path, &output) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let (overrides, answers) = match (
        parse_pairs("set", &variables.set_vars),
        parse_pairs("input", &variables.inputs),
    ) {
        (Ok(o), Ok(a)) => (o, a),
        (Err(e), _) | (_, Err(e)) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };
    apply_variable_overrides(&mut sequence, overrides);

    if start_step >= sequence.nodes.len() {
        debug!(start_step, nodes = sequence.nodes.len(), "start step is past the last node");
    }

    let http = match ReqwestHttpClient::new(runner.max_response_bytes) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let input: Arc<dyn InputCollector> = if answers.is_empty() {
        Arc::new(StdinInputCollector::new())
    } else {
        Arc::new(StaticInputCollector::new(answers))
    };
    let browser: Arc<dyn BrowserLauncher> = if runner.no_browser {
        Arc::new(NoOpBrowserLauncher)
    } else {
        Arc::new(SystemBrowserLauncher)
    };

    let mut events = CompositeEventSink::new();
    if output.format == OutputFormat::Text && !output.quiet {
        events.add(Box::new(ProgressEventSink::new(sequence.nodes.len())));
    }
    if runner.events == EventsMode::Stdout {
        events.add(Box::new(StdoutEventSink));
    }

    let config = ExecutorConfig {
        default_timeout: Duration::from_secs(runner.timeout),
    };
    let executor = Executor::new(config, http)
        .with_input(input)
        .with_browser(browser)
        .with_event_sink(Arc::new(events));

    let options = RunOptions {
        start_step,
        debug,
        ..RunOptions::default()
    };
    let result = executor.execute(&sequence, options).await;

    if output.format == OutputFormat::Text && !output.quiet {
        print_summary(&result);
    } else {
        print_result(output.format, output.quiet, &result);
    }

    if result.success {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}

fn print_summary(result: &SequenceResult) {
    for entry in &result.execution_log {
        let label = match &entry.node_id {
            Some(id) => format!("{} ({id})", entry.node_name),
            None => entry.node_name.clone(),
        };
        match entry.status {
            StepStatus::Completed => {
                let status = entry.response.as_ref().map(|r| r.status).unwrap_or_default();
                println!(
                    "[{}] {label}: completed {status} in {} ms",
                    entry.step + 1,
                    entry.duration_ms.unwrap_or_default()
                );
            }
            StepStatus::Skipped => println!(
                "[{}] {label}: skipped ({})",
                entry.step + 1,
                entry.reason.as_deref().unwrap_or_default()
            ),
            StepStatus::Failed => println!(
                "[{}] {label}: failed: {}",
                entry.step + 1,
                entry.error.as_deref().unwrap_or_default()
            ),
        }
    }

    let verdict = if result.success { "succeeded" } else { "failed" };
    println!(
        "Run {} {verdict}: {} executed, {} skipped, {} failed",
        result.execution_id, result.steps_executed, result.steps_skipped, result.steps_failed
    );
}
