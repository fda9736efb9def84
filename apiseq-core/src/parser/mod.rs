use crate::error::{ConfigError, ParseError};
use crate::model::Sequence;
use crate::types::ConfigDocument;
use crate::validate::build_sequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub document: ConfigDocument,
    pub format: DocumentFormat,
}

pub fn parse_document_str(input: &str, format: DocumentFormat) -> Result<ParsedDocument, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedDocument {
            document: serde_json::from_str::<ConfigDocument>(input)?,
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedDocument {
            document: serde_yaml::from_str::<ConfigDocument>(input)?,
            format,
        }),
        DocumentFormat::Auto => parse_document_auto(input),
    }
}

/// Parse and validate in one go.
pub fn load_sequence(input: &str, format: DocumentFormat) -> Result<Sequence, ConfigError> {
    let parsed = parse_document_str(input, format)?;
    Ok(build_sequence(&parsed.document)?)
}

fn parse_document_auto(input: &str) -> Result<ParsedDocument, ParseError> {
    // JSON always starts with `{` or `[` after trimming; everything else is tried as YAML first.
    let trimmed = input.trim_start();
    let looks_like_json = trimmed.starts_with('{') || trimmed.starts_with('[');

    let json = || serde_json::from_str::<ConfigDocument>(input);
    let yaml = || serde_yaml::from_str::<ConfigDocument>(input);

    if looks_like_json {
        match json() {
            Ok(document) => Ok(ParsedDocument { document, format: DocumentFormat::Json }),
            Err(e) => yaml()
                .map(|document| ParsedDocument { document, format: DocumentFormat::Yaml })
                .map_err(|_| ParseError::Json(e)),
        }
    } else {
        match yaml() {
            Ok(document) => Ok(ParsedDocument { document, format: DocumentFormat::Yaml }),
            Err(e) => json()
                .map(|document| ParsedDocument { document, format: DocumentFormat::Json })
                .map_err(|_| ParseError::Yaml(e)),
        }
    }
}
