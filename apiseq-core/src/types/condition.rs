use crate::types::AnyValue;

/// A condition as written: one source key (`node`, `variable`, `input`) plus comparator
/// keys. Turned into [`crate::model::Condition`] during validation.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal: Option<AnyValue>,
}
