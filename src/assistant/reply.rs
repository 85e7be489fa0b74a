use crate::routing::{Resolution, RouteTable};
use serde::Serialize;
use serde_json::{Map, Value};

const DIRECT_ANSWER_KEYS: &[&str] = &["directAnswer", "direct_answer", "answer"];
const EXPLANATION_KEYS: &[&str] = &["explanation", "explicacao"];
const PLAN_CONNECTION_KEYS: &[&str] = &["planConnection", "plan_connection"];
const ACTIONS_KEYS: &[&str] = &["recommendedActions", "recommended_actions", "actions"];
const MOTIVATION_KEYS: &[&str] = &["motivation", "motivationalNote", "motivational_note"];
const FOLLOW_UP_KEYS: &[&str] = &["followUpQuestion", "follow_up_question", "followUp"];
const ENVELOPE_KEYS: &[&str] = &["reply", "response", "data"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssistantReply {
    Plain { text: String },
    Structured(StructuredReply),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredReply {
    pub direct_answer: Option<String>,
    pub explanation: Option<String>,
    pub plan_connection: Option<String>,
    pub recommended_actions: Vec<RecommendedAction>,
    pub motivation: Option<String>,
    pub follow_up_question: Option<String>,
}

/// One suggested next step. `action` is the raw, untrusted action object; it
/// only becomes a navigation target through [`RecommendedAction::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedAction {
    pub label: String,
    pub action: Value,
}

impl RecommendedAction {
    pub fn resolve(&self, table: &RouteTable) -> Resolution {
        table.resolve_detailed(&self.action)
    }
}

impl AssistantReply {
    pub fn recommended_actions(&self) -> &[RecommendedAction] {
        match self {
            Self::Plain { .. } => &[],
            Self::Structured(reply) => &reply.recommended_actions,
        }
    }
}

/// Interprets a chat response body. A JSON string is a plain reply, an
/// object with any known section is structured, and a `reply`/`response`/
/// `data` envelope is unwrapped. Anything else is rendered as plain text.
pub fn parse_reply(value: Value) -> AssistantReply {
    match value {
        Value::String(text) => AssistantReply::Plain {
            text: text.trim().to_string(),
        },
        Value::Object(object) => {
            if has_structured_section(&object) {
                return AssistantReply::Structured(structured_from_object(&object));
            }
            if let Some(inner) = ENVELOPE_KEYS
                .iter()
                .filter_map(|key| object.get(*key))
                .find(|inner| inner.is_object() || inner.is_string())
            {
                return parse_reply(inner.clone());
            }
            AssistantReply::Plain {
                text: Value::Object(object).to_string(),
            }
        }
        Value::Null => AssistantReply::Plain {
            text: String::new(),
        },
        other => AssistantReply::Plain {
            text: other.to_string(),
        },
    }
}

fn has_structured_section(object: &Map<String, Value>) -> bool {
    [
        DIRECT_ANSWER_KEYS,
        EXPLANATION_KEYS,
        PLAN_CONNECTION_KEYS,
        ACTIONS_KEYS,
        MOTIVATION_KEYS,
        FOLLOW_UP_KEYS,
    ]
    .iter()
    .flat_map(|keys| keys.iter())
    .any(|key| object.contains_key(*key))
}

fn structured_from_object(object: &Map<String, Value>) -> StructuredReply {
    StructuredReply {
        direct_answer: text_field(object, DIRECT_ANSWER_KEYS),
        explanation: text_field(object, EXPLANATION_KEYS),
        plan_connection: text_field(object, PLAN_CONNECTION_KEYS),
        recommended_actions: ACTIONS_KEYS
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_array))
            .map(|entries| entries.iter().filter_map(recommended_action).collect())
            .unwrap_or_default(),
        motivation: text_field(object, MOTIVATION_KEYS),
        follow_up_question: text_field(object, FOLLOW_UP_KEYS),
    }
}

fn recommended_action(entry: &Value) -> Option<RecommendedAction> {
    let object = entry.as_object()?;
    let label = text_field(object, &["label", "title"]).unwrap_or_default();

    // Some replies nest the navigable part under `action`; lift it so the
    // resolver sees the label alongside the target fields.
    let action = match object.get("action").and_then(Value::as_object) {
        Some(nested) => {
            let mut nested = nested.clone();
            if !label.is_empty() {
                nested
                    .entry("label".to_string())
                    .or_insert_with(|| Value::String(label.clone()));
            }
            Value::Object(nested)
        }
        None => entry.clone(),
    };

    Some(RecommendedAction { label, action })
}

fn text_field(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
