use serde_json::Value as JsonValue;

/// A parsed extraction path such as `.data.items[0].id` or `.items | length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePath {
    raw: String,
    steps: Vec<PathStep>,
    pipe: Option<PipeOp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathStep {
    Field(String),
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipeOp {
    Length,
}

impl ValuePath {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn parse(input: &str) -> Result<Self, PathError> {
        let raw = input.trim();
        let (head, pipe) = match raw.split_once('|') {
            Some((head, op)) => (head.trim(), Some(parse_pipe(op.trim())?)),
            None => (raw, None),
        };

        let body = head.strip_prefix('.').ok_or(PathError::MissingLeadingDot)?;
        let mut steps = Vec::new();
        if !body.is_empty() {
            for segment in body.split('.') {
                parse_segment(segment, &mut steps)?;
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            steps,
            pipe,
        })
    }

    /// Walk `value` along this path. JSON `null` anywhere on the way, including as the
    /// final value, resolves to `None`.
    pub fn resolve(&self, value: &JsonValue) -> Option<JsonValue> {
        let mut cur = value;
        for step in &self.steps {
            cur = match (step, cur) {
                (PathStep::Field(name), JsonValue::Object(map)) => map.get(name)?,
                (PathStep::Index(idx), JsonValue::Array(arr)) => arr.get(*idx)?,
                _ => return None,
            };
        }

        match self.pipe {
            Some(PipeOp::Length) => {
                let len = match cur {
                    JsonValue::Array(arr) => arr.len(),
                    JsonValue::String(s) => s.chars().count(),
                    JsonValue::Object(map) => map.len(),
                    _ => return None,
                };
                Some(JsonValue::from(len))
            }
            None if cur.is_null() => None,
            None => Some(cur.clone()),
        }
    }
}

/// Extract the value at `path` from `value`. Malformed paths and missing values both
/// yield `None`.
pub fn extract(value: &JsonValue, path: &str) -> Option<JsonValue> {
    ValuePath::parse(path).ok()?.resolve(value)
}

fn parse_pipe(op: &str) -> Result<PipeOp, PathError> {
    match op {
        "length" => Ok(PipeOp::Length),
        other => Err(PathError::UnsupportedPipe(other.to_string())),
    }
}

fn parse_segment(segment: &str, steps: &mut Vec<PathStep>) -> Result<(), PathError> {
    let (name, mut rest) = match segment.find('[') {
        Some(pos) => (&segment[..pos], &segment[pos..]),
        None => (segment, ""),
    };

    if name.is_empty() && rest.is_empty() {
        return Err(PathError::EmptySegment);
    }
    if name.contains(']') || name.chars().any(char::is_whitespace) {
        return Err(PathError::InvalidSegment(segment.to_string()));
    }
    if !name.is_empty() {
        steps.push(PathStep::Field(name.to_string()));
    }

    while !rest.is_empty() {
        let close = rest
            .find(']')
            .ok_or_else(|| PathError::InvalidSegment(segment.to_string()))?;
        let idx = rest[1..close]
            .trim()
            .parse::<usize>()
            .map_err(|_| PathError::InvalidIndex(rest[1..close].to_string()))?;
        steps.push(PathStep::Index(idx));
        rest = &rest[close + 1..];
        if !rest.is_empty() && !rest.starts_with('[') {
            return Err(PathError::InvalidSegment(segment.to_string()));
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path must start with '.'")]
    MissingLeadingDot,
    #[error("path contains an empty segment")]
    EmptySegment,
    #[error("invalid path segment: {0}")]
    InvalidSegment(String),
    #[error("invalid array index: {0}")]
    InvalidIndex(String),
    #[error("unsupported pipe operation: {0} (only `length` is supported)")]
    UnsupportedPipe(String),
}
