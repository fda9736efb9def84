use crate::types::{Headers, NodeSpec, ValidationSpec, Variables};

/// The sequence config document as written on disk.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConfigDocument {
    #[serde(default, rename = "enableDebug")]
    pub enable_debug: bool,

    #[serde(default, skip_serializing_if = "Variables::is_empty")]
    pub variables: Variables,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsSpec>,

    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DefaultsSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "baseUrl")]
    pub base_url: Option<String>,

    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,

    #[serde(default, skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<ValidationSpec>,
}
