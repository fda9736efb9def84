#![forbid(unsafe_code)]

pub mod error;
pub mod expressions;
pub mod model;
pub mod parser;
pub mod types;
pub mod validate;

pub use crate::error::{ConfigError, ParseError, ValidationError, Violation};
pub use crate::expressions::{extract, parse_template, PathError, Placeholder, PlaceholderKind, Segment, Template, ValuePath};
pub use crate::model::{Comparator, Condition, Defaults, Node, NodeCheck, Sequence, ValidationRule};
pub use crate::parser::{load_sequence, parse_document_str, DocumentFormat, ParsedDocument};
pub use crate::types::ConfigDocument;
pub use crate::validate::{build_sequence, validate_document, Validate};
