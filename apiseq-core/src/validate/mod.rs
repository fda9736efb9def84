mod rules;
mod validator;

use crate::error::ValidationError;
use crate::model::Sequence;
use crate::types::ConfigDocument;
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for ConfigDocument {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_document(self)
    }
}

pub fn validate_document(doc: &ConfigDocument) -> Result<(), ValidationError> {
    build_sequence(doc).map(|_| ())
}

/// Check every rule and convert the document into its typed form. All violations are
/// reported together.
pub fn build_sequence(doc: &ConfigDocument) -> Result<Sequence, ValidationError> {
    let mut v = Validator::new();
    let sequence = v.build_document(doc);
    v.finish(sequence)
}
