use std::collections::BTreeMap;

use crate::types::{AnyValue, ConditionSpec, Headers, ValidationSpec};

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default)]
    pub url: String,

    #[serde(default, skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<AnyValue>,

    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,

    #[serde(default, rename = "skipDefaultHeaders")]
    pub skip_default_headers: bool,

    #[serde(default, rename = "skipDefaultValidations")]
    pub skip_default_validations: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<ValidationSpec>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(rename = "userPrompts")]
    pub user_prompts: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "launchBrowser")]
    pub launch_browser: Option<String>,
}
