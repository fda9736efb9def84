use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, Violation};
use crate::expressions::ValuePath;
use crate::model::Sequence;
use crate::types::ConfigDocument;

use super::rules;

pub(crate) static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid"));
pub(crate) static METHOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").expect("valid"));

pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    pub fn build_document(&mut self, doc: &ConfigDocument) -> Sequence {
        rules::document::build_document(self, doc)
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    /// Returns `false` (and records a violation) when `expr` is not a valid extraction path.
    pub(crate) fn check_value_path(&mut self, path: &str, expr: &str) -> bool {
        match ValuePath::parse(expr) {
            Ok(_) => true,
            Err(e) => {
                self.push(path, format!("invalid path: {e}"));
                false
            }
        }
    }
}
