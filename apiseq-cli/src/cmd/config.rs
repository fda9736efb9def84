use std::collections::BTreeMap;
use std::path::Path;

use apiseq_core::{load_sequence, ConfigError, DocumentFormat, Sequence};
use serde_json::Value as JsonValue;

use crate::exit_codes;
use crate::output::print_error;
use crate::OutputArgs;

/// Read and validate a sequence file. On failure the problem has already been printed and
/// the exit code is returned.
pub fn load_sequence_file(path: &Path, output: &OutputArgs) -> Result<Sequence, i32> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })?;

    load_sequence(&content, DocumentFormat::Auto).map_err(|e| {
        let message = match &e {
            ConfigError::Parse(p) => p.to_string(),
            ConfigError::Validation(v) => format!("{v}\n{}", v.describe()),
        };
        print_error(output.format, output.quiet, &message);
        exit_codes::VALIDATION_FAILED
    })
}

/// Parse repeated `KEY=VALUE` flags. Later pairs win.
pub fn parse_pairs(flag: &str, pairs: &[String]) -> Result<BTreeMap<String, String>, String> {
    let mut out = BTreeMap::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                out.insert(key.trim().to_string(), value.to_string());
            }
            _ => return Err(format!("--{flag} expects KEY=VALUE, got '{pair}'")),
        }
    }
    Ok(out)
}

pub fn apply_variable_overrides(sequence: &mut Sequence, overrides: BTreeMap<String, String>) {
    for (key, value) in overrides {
        sequence.variables.insert(key, JsonValue::String(value));
    }
}
