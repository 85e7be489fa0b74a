use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of what the assistant knows about the current user: scope,
/// latest diagnostic, active plan and goals. Every section is optional and
/// kept as raw JSON; unknown fields are preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssistantContext {
    /// A context body that is not a JSON object is treated as empty.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }
}
