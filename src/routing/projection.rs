use super::target::{compose_route, is_absolute_url, RouteParts};
use serde_json::{Map, Value};

pub const STEP_KEYS: &[&str] = &["step", "etapa", "stepIndex", "currentStep", "moduleStep"];
pub const DIAGNOSTIC_ID_KEYS: &[&str] = &["diagnosticId", "diagnostic_id"];
pub const MODULE_KEYS: &[&str] = &["module", "modulo", "anchor", "section"];

pub const STEP_QUERY_KEY: &str = "step";
pub const DIAGNOSTIC_ID_QUERY_KEY: &str = "diagnosticId";

// 2^53, the largest integer an assistant-side JSON number keeps exactly.
const MAX_EXACT_STEP: f64 = 9_007_199_254_740_992.0;

/// Encodes the recognized payload fields of an action into `route`.
///
/// A value already present in the route always wins over the payload, and
/// each field is decided on its own. External URLs are returned unchanged.
pub fn project_payload(route: &str, payload: &Map<String, Value>) -> String {
    if is_absolute_url(route) {
        return route.to_string();
    }

    let parts = RouteParts::split(route);
    let mut query = parts.query.to_string();

    if let Some(step) = step_from_payload(payload) {
        if !query_has_key(&query, STEP_QUERY_KEY) {
            append_query_pair(&mut query, STEP_QUERY_KEY, &step.to_string());
        }
    }

    if let Some(diagnostic_id) = first_string(payload, DIAGNOSTIC_ID_KEYS) {
        if !query_has_key(&query, DIAGNOSTIC_ID_QUERY_KEY) {
            append_query_pair(&mut query, DIAGNOSTIC_ID_QUERY_KEY, &diagnostic_id);
        }
    }

    let fragment = if parts.fragment.is_empty() {
        module_from_payload(payload).unwrap_or_default()
    } else {
        parts.fragment.to_string()
    };

    compose_route(parts.base, &query, &fragment)
}

/// First step key whose value is a non-negative integer, a whole float, or a
/// string holding one.
pub fn step_from_payload(payload: &Map<String, Value>) -> Option<u64> {
    STEP_KEYS
        .iter()
        .filter_map(|key| payload.get(*key))
        .find_map(coerce_step)
}

pub fn module_from_payload(payload: &Map<String, Value>) -> Option<String> {
    MODULE_KEYS
        .iter()
        .filter_map(|key| payload.get(*key).and_then(Value::as_str))
        .map(|raw| {
            let raw = raw.trim();
            raw.strip_prefix('#').unwrap_or(raw).trim().to_string()
        })
        .find(|module| !module.is_empty())
}

pub(crate) fn first_string(payload: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| payload.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn coerce_step(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(whole_non_negative)),
        Value::String(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            raw.parse::<u64>()
                .ok()
                .or_else(|| raw.parse::<f64>().ok().and_then(whole_non_negative))
        }
        _ => None,
    }
}

fn whole_non_negative(value: f64) -> Option<u64> {
    if value.is_finite() && value.fract() == 0.0 && (0.0..=MAX_EXACT_STEP).contains(&value) {
        Some(value as u64)
    } else {
        None
    }
}

fn query_has_key(query: &str, key: &str) -> bool {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').map(|(name, _)| name).unwrap_or(pair))
        .any(|name| match urlencoding::decode(name) {
            Ok(decoded) => decoded == key,
            Err(_) => name == key,
        })
}

fn append_query_pair(query: &mut String, key: &str, value: &str) {
    if !query.is_empty() && !query.ends_with('&') {
        query.push('&');
    }
    query.push_str(&urlencoding::encode(key));
    query.push('=');
    query.push_str(&urlencoding::encode(value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object payload")
    }

    #[test]
    fn step_is_added_only_when_query_lacks_it() {
        assert_eq!(
            project_payload("/diagnosticos", &payload(json!({"step": 2}))),
            "/diagnosticos?step=2"
        );
        assert_eq!(
            project_payload("/diagnosticos?step=5", &payload(json!({"step": 2}))),
            "/diagnosticos?step=5"
        );
    }

    #[test]
    fn step_coerces_numeric_strings_and_skips_bad_spellings() {
        assert_eq!(
            project_payload("/diagnosticos", &payload(json!({"etapa": " 3 "}))),
            "/diagnosticos?step=3"
        );
        assert_eq!(
            project_payload(
                "/diagnosticos",
                &payload(json!({"step": "abc", "stepIndex": 4.0}))
            ),
            "/diagnosticos?step=4"
        );
        assert_eq!(
            project_payload(
                "/diagnosticos",
                &payload(json!({"step": -1, "currentStep": 1.5, "moduleStep": true}))
            ),
            "/diagnosticos"
        );
    }

    #[test]
    fn diagnostic_id_is_encoded_and_never_clobbers() {
        assert_eq!(
            project_payload(
                "/diagnosticos?step=1",
                &payload(json!({"diagnostic_id": "d 1&x"}))
            ),
            "/diagnosticos?step=1&diagnosticId=d%201%26x"
        );
        assert_eq!(
            project_payload(
                "/diagnosticos?diagnosticId=keep",
                &payload(json!({"diagnosticId": "other", "step": 0}))
            ),
            "/diagnosticos?diagnosticId=keep&step=0"
        );
    }

    #[test]
    fn module_becomes_fragment_without_leading_hash() {
        assert_eq!(
            project_payload("/conteudos", &payload(json!({"modulo": "#financeiro"}))),
            "/conteudos#financeiro"
        );
        assert_eq!(
            project_payload("/conteudos#ja-definido", &payload(json!({"section": "outro"}))),
            "/conteudos#ja-definido"
        );
        assert_eq!(
            project_payload("/conteudos", &payload(json!({"module": "#", "anchor": "metas"}))),
            "/conteudos#metas"
        );
    }

    #[test]
    fn external_urls_are_left_alone() {
        assert_eq!(
            project_payload("https://example.com/x", &payload(json!({"step": 2}))),
            "https://example.com/x"
        );
    }

    #[test]
    fn projection_is_deterministic_and_field_order_independent() {
        let payload = payload(json!({
            "module": "metas",
            "diagnosticId": "d-9",
            "currentStep": "7"
        }));
        let first = project_payload("/planos-acao/abc?step=1", &payload);
        assert_eq!(first, "/planos-acao/abc?step=1&diagnosticId=d-9#metas");
        assert_eq!(project_payload("/planos-acao/abc?step=1", &payload), first);
    }

    #[test]
    fn encoded_existing_key_counts_as_present() {
        assert_eq!(
            project_payload("/diagnosticos?st%65p=9", &payload(json!({"step": 1}))),
            "/diagnosticos?st%65p=9"
        );
    }
}
