use super::action::ActionLike;
use super::label::label_candidates;
use super::projection::project_payload;
use super::table::RouteTable;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Explicit,
    Intent,
    Label,
    PayloadShape,
    Default,
}

impl ResolutionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Intent => "intent",
            Self::Label => "label",
            Self::PayloadShape => "payload_shape",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub route: String,
    pub source: ResolutionSource,
}

impl RouteTable {
    /// Resolves an assistant action to a navigation target. Never fails; an
    /// action with nothing usable lands on the default route.
    pub fn resolve(&self, action: &Value) -> String {
        self.resolve_detailed(action).route
    }

    pub fn resolve_detailed(&self, action: &Value) -> Resolution {
        self.resolve_action(&ActionLike::from_value(action))
    }

    pub fn resolve_action(&self, action: &ActionLike) -> Resolution {
        resolve_explicit(self, action)
            .or_else(|| resolve_intent(self, action))
            .or_else(|| resolve_label(self, action))
            .or_else(|| resolve_payload_shape(self, action))
            .unwrap_or_else(|| Resolution {
                route: self.default_route().to_string(),
                source: ResolutionSource::Default,
            })
    }
}

pub fn resolve_explicit(table: &RouteTable, action: &ActionLike) -> Option<Resolution> {
    let target = action.target.as_deref()?;
    accept(table, action, target, ResolutionSource::Explicit)
}

pub fn resolve_intent(table: &RouteTable, action: &ActionLike) -> Option<Resolution> {
    let intent = action.intent.as_deref()?;
    let route = table.intent_route(intent)?;
    accept(table, action, route, ResolutionSource::Intent)
}

pub fn resolve_label(table: &RouteTable, action: &ActionLike) -> Option<Resolution> {
    let label = action.label.as_deref()?;
    label_candidates(table.label_rules(), label)
        .into_iter()
        .find_map(|route| accept(table, action, route, ResolutionSource::Label))
}

/// Detail route from an identifier field when one validates, otherwise the
/// first valid of plan list, diagnostics, content list.
pub fn resolve_payload_shape(table: &RouteTable, action: &ActionLike) -> Option<Resolution> {
    action.payload.as_ref()?;
    let routes = table.payload_routes();

    let detail = [
        ("planId", routes.plan_list.as_str()),
        ("contentId", routes.content_list.as_str()),
        ("id", routes.plan_list.as_str()),
    ]
    .into_iter()
    .filter_map(|(key, collection)| {
        let id = action.payload_id(key)?;
        Some(format!(
            "{}/{}",
            collection.trim_end_matches('/'),
            urlencoding::encode(&id)
        ))
    })
    .find_map(|route| accept(table, action, &route, ResolutionSource::PayloadShape));
    if detail.is_some() {
        return detail;
    }

    [
        routes.plan_list.as_str(),
        routes.diagnostics.as_str(),
        routes.content_list.as_str(),
    ]
    .into_iter()
    .find_map(|route| accept(table, action, route, ResolutionSource::PayloadShape))
}

fn accept(
    table: &RouteTable,
    action: &ActionLike,
    candidate: &str,
    source: ResolutionSource,
) -> Option<Resolution> {
    let normalized = table.normalize(candidate);
    if normalized.is_empty() || !table.is_valid(&normalized) {
        return None;
    }
    let route = match action.payload.as_ref() {
        Some(payload) => project_payload(&normalized, payload),
        None => normalized,
    };
    Some(Resolution { route, source })
}
