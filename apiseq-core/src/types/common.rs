use std::collections::BTreeMap;

pub type AnyValue = serde_json::Value;

/// Header name to value. Keys keep their original casing.
pub type Headers = BTreeMap<String, String>;

/// Sequence-wide variables, referenced as `{{ .vars.NAME }}`.
pub type Variables = BTreeMap<String, AnyValue>;
