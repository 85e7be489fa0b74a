use super::normalize::normalize_route;
use super::target::{is_absolute_url, RouteParts};
use super::validate::AllowedRoutes;
use crate::config::{registry_paths, LabelRule, PayloadRoutes, RouterSettings};
use std::collections::BTreeMap;

/// Immutable routing configuration shared by every resolution.
///
/// Built once from [`RouterSettings`]; a registry change means building a new
/// table. The table holds no interior mutability and can be shared across
/// threads by reference or `Arc`.
#[derive(Debug, Clone)]
pub struct RouteTable {
    allowed: AllowedRoutes,
    aliases: BTreeMap<String, String>,
    intents: BTreeMap<String, String>,
    label_rules: Vec<LabelRule>,
    payload_routes: PayloadRoutes,
    default_route: String,
}

impl RouteTable {
    pub fn from_settings(settings: &RouterSettings) -> Self {
        let aliases = settings.aliases.clone();
        let paths = registry_paths(&settings.pages, &settings.sidebar)
            .into_iter()
            .filter(|path| !is_absolute_url(path))
            .map(|path| {
                let normalized = normalize_route(&path, &aliases);
                RouteParts::split(&normalized).base.to_string()
            })
            .filter(|base| !base.is_empty())
            .collect::<Vec<_>>();

        Self {
            allowed: AllowedRoutes::new(paths, settings.parametric_collections.iter().cloned()),
            aliases,
            intents: settings.intents.clone(),
            label_rules: settings.label_rules.clone(),
            payload_routes: settings.payload_routes.clone(),
            default_route: settings.default_route.clone(),
        }
    }

    pub fn builtin() -> Self {
        Self::from_settings(&RouterSettings::builtin())
    }

    pub fn normalize(&self, raw: &str) -> String {
        normalize_route(raw, &self.aliases)
    }

    /// External URLs are always valid; the caller opens them outside the app.
    /// In-app routes must hit the allow-list or a parametric pattern.
    pub fn is_valid(&self, route: &str) -> bool {
        if is_absolute_url(route) {
            return true;
        }
        let normalized = self.normalize(route);
        if normalized.is_empty() {
            return false;
        }
        if is_absolute_url(&normalized) {
            return true;
        }
        self.allowed
            .allows_base(RouteParts::split(&normalized).base)
    }

    pub fn allowed(&self) -> &AllowedRoutes {
        &self.allowed
    }

    /// Exact keyword first, then its trimmed lower-case form.
    pub fn intent_route(&self, intent: &str) -> Option<&str> {
        self.intents
            .get(intent)
            .or_else(|| self.intents.get(&intent.trim().to_lowercase()))
            .map(String::as_str)
    }

    pub fn label_rules(&self) -> &[LabelRule] {
        &self.label_rules
    }

    pub fn payload_routes(&self) -> &PayloadRoutes {
        &self.payload_routes
    }

    pub fn default_route(&self) -> &str {
        &self.default_route
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::builtin()
    }
}
