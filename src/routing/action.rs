use serde_json::{Map, Value};

/// Explicit target fields, highest priority first.
pub const TARGET_FIELDS: &[&str] = &["route", "url", "path", "href", "routeOrUrl"];

/// Typed view over an untrusted assistant action. Fields that are missing,
/// blank, or of the wrong JSON type are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionLike {
    pub target: Option<String>,
    pub intent: Option<String>,
    pub label: Option<String>,
    pub payload: Option<Map<String, Value>>,
}

impl ActionLike {
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self {
            target: TARGET_FIELDS
                .iter()
                .find_map(|field| non_blank_str(object, field)),
            intent: non_blank_str(object, "intent"),
            label: non_blank_str(object, "label"),
            payload: object.get("payload").and_then(Value::as_object).cloned(),
        }
    }

    /// Identifier for the payload-shape heuristic. Integers are accepted
    /// alongside strings.
    pub fn payload_id(&self, key: &str) -> Option<String> {
        match self.payload.as_ref()?.get(key)? {
            Value::String(raw) => Some(raw.trim().to_string()).filter(|id| !id.is_empty()),
            Value::Number(number) if number.is_u64() || number.is_i64() => {
                Some(number.to_string())
            }
            _ => None,
        }
    }
}

fn non_blank_str(object: &Map<String, Value>, field: &str) -> Option<String> {
    object
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_values_yield_an_empty_action() {
        for value in [json!(null), json!("route"), json!([1, 2]), json!(42)] {
            assert_eq!(ActionLike::from_value(&value), ActionLike::default());
        }
    }

    #[test]
    fn target_takes_first_non_blank_string_in_priority_order() {
        let action = ActionLike::from_value(&json!({
            "route": "   ",
            "url": 7,
            "path": "/conteudos",
            "href": "/dashboard"
        }));
        assert_eq!(action.target.as_deref(), Some("/conteudos"));
    }

    #[test]
    fn array_payload_is_ignored() {
        let action = ActionLike::from_value(&json!({"payload": [{"id": "x"}], "label": 3}));
        assert!(action.payload.is_none());
        assert!(action.label.is_none());
    }

    #[test]
    fn payload_id_accepts_strings_and_integers_only() {
        let action = ActionLike::from_value(&json!({
            "payload": {"id": 12, "planId": " p-1 ", "contentId": 1.5}
        }));
        assert_eq!(action.payload_id("id").as_deref(), Some("12"));
        assert_eq!(action.payload_id("planId").as_deref(), Some("p-1"));
        assert_eq!(action.payload_id("contentId"), None);
        assert_eq!(action.payload_id("missing"), None);
    }
}
