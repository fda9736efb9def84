use crate::types::AnyValue;

/// A validation rule as written: either `httpStatusCode` or `jsonpath` with optional
/// comparator keys.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status_code: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonpath: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal: Option<AnyValue>,
}
