use super::registry::{PageEntry, SidebarEntry};
use super::ConfigError;
use crate::routing::{is_absolute_url, RouteTable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

pub const DEFAULT_LANDING_ROUTE: &str = "/dashboard";
pub const PLAN_LIST_ROUTE: &str = "/planos-acao";
pub const DIAGNOSTICS_ROUTE: &str = "/diagnosticos";
pub const CONTENT_LIST_ROUTE: &str = "/conteudos";

/// Ordered label heuristic: the first rule with a matching substring whose
/// route validates is taken.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LabelRule {
    pub patterns: Vec<String>,
    pub route: String,
}

impl LabelRule {
    fn new(patterns: &[&str], route: &str) -> Self {
        Self {
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            route: route.to_string(),
        }
    }
}

/// Collection routes the payload-shape heuristic synthesizes targets from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PayloadRoutes {
    #[serde(default = "default_plan_list")]
    pub plan_list: String,
    #[serde(default = "default_diagnostics")]
    pub diagnostics: String,
    #[serde(default = "default_content_list")]
    pub content_list: String,
}

impl Default for PayloadRoutes {
    fn default() -> Self {
        Self {
            plan_list: default_plan_list(),
            diagnostics: default_diagnostics(),
            content_list: default_content_list(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouterSettings {
    #[serde(default = "default_landing_route")]
    pub default_route: String,
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
    #[serde(default = "default_intents")]
    pub intents: BTreeMap<String, String>,
    #[serde(default = "default_parametric_collections")]
    pub parametric_collections: Vec<String>,
    #[serde(default = "default_label_rules")]
    pub label_rules: Vec<LabelRule>,
    #[serde(default)]
    pub payload_routes: PayloadRoutes,
    #[serde(default = "default_pages")]
    pub pages: BTreeMap<String, PageEntry>,
    #[serde(default = "default_sidebar")]
    pub sidebar: Vec<SidebarEntry>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RouterSettings {
    pub fn builtin() -> Self {
        Self {
            default_route: default_landing_route(),
            aliases: default_aliases(),
            intents: default_intents(),
            parametric_collections: default_parametric_collections(),
            label_rules: default_label_rules(),
            payload_routes: PayloadRoutes::default(),
            pages: default_pages(),
            sidebar: default_sidebar(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_canonical_base(&self.default_route) {
            return Err(ConfigError::Settings(format!(
                "`default_route` `{}` must be a canonical in-app path",
                self.default_route
            )));
        }

        for (legacy, canonical) in &self.aliases {
            if !is_canonical_base(legacy) {
                return Err(ConfigError::Settings(format!(
                    "alias key `{legacy}` must be a canonical in-app path"
                )));
            }
            if !is_canonical_base(canonical) {
                return Err(ConfigError::Settings(format!(
                    "alias `{legacy}` targets `{canonical}` which is not a canonical in-app path"
                )));
            }
            if self.aliases.contains_key(canonical) {
                return Err(ConfigError::Settings(format!(
                    "alias `{legacy}` targets `{canonical}` which is itself an alias"
                )));
            }
        }

        let mut collections = HashSet::new();
        for collection in &self.parametric_collections {
            let trimmed = collection.trim();
            if trimmed.is_empty() || trimmed.contains('/') || trimmed.contains(':') {
                return Err(ConfigError::Settings(format!(
                    "parametric collection `{collection}` must be a single non-empty path segment"
                )));
            }
            if !collections.insert(trimmed) {
                return Err(ConfigError::Settings(format!(
                    "parametric collection `{collection}` is declared twice"
                )));
            }
        }

        for (index, rule) in self.label_rules.iter().enumerate() {
            if rule.patterns.iter().all(|pattern| pattern.trim().is_empty()) {
                return Err(ConfigError::Settings(format!(
                    "label rule #{index} must declare at least one non-blank pattern"
                )));
            }
        }

        let table = RouteTable::from_settings(self);
        if !table.is_valid(&self.default_route) || is_absolute_url(&self.default_route) {
            return Err(ConfigError::Settings(format!(
                "`default_route` `{}` is not a registered route",
                self.default_route
            )));
        }
        for (intent, route) in &self.intents {
            if intent.trim().is_empty() {
                return Err(ConfigError::Settings(
                    "intent keywords must be non-empty".to_string(),
                ));
            }
            if !table.is_valid(route) {
                return Err(ConfigError::Settings(format!(
                    "intent `{intent}` targets unregistered route `{route}`"
                )));
            }
        }
        for rule in &self.label_rules {
            if !table.is_valid(&rule.route) {
                return Err(ConfigError::Settings(format!(
                    "label rule `{}` targets unregistered route `{}`",
                    rule.patterns.join("|"),
                    rule.route
                )));
            }
        }

        Ok(())
    }
}

fn is_canonical_base(path: &str) -> bool {
    path.starts_with('/')
        && path.trim() == path
        && !path.contains(|c: char| matches!(c, '?' | '#' | ':'))
        && (path == "/" || !path.ends_with('/'))
}

fn default_landing_route() -> String {
    DEFAULT_LANDING_ROUTE.to_string()
}

fn default_plan_list() -> String {
    PLAN_LIST_ROUTE.to_string()
}

fn default_diagnostics() -> String {
    DIAGNOSTICS_ROUTE.to_string()
}

fn default_content_list() -> String {
    CONTENT_LIST_ROUTE.to_string()
}

fn default_aliases() -> BTreeMap<String, String> {
    [
        ("/plano-acao", PLAN_LIST_ROUTE),
        ("/plano-de-acao", PLAN_LIST_ROUTE),
        ("/planos-de-acao", PLAN_LIST_ROUTE),
        ("/planos", PLAN_LIST_ROUTE),
        ("/diagnostico", DIAGNOSTICS_ROUTE),
        ("/conteudo", CONTENT_LIST_ROUTE),
        ("/home", DEFAULT_LANDING_ROUTE),
        ("/inicio", DEFAULT_LANDING_ROUTE),
    ]
    .into_iter()
    .map(|(legacy, canonical)| (legacy.to_string(), canonical.to_string()))
    .collect()
}

fn default_intents() -> BTreeMap<String, String> {
    [
        ("start_diagnostic", DIAGNOSTICS_ROUTE),
        ("iniciar_diagnostico", DIAGNOSTICS_ROUTE),
        ("continue_diagnostic", DIAGNOSTICS_ROUTE),
        ("view_diagnostics", DIAGNOSTICS_ROUTE),
        ("view_plans", PLAN_LIST_ROUTE),
        ("ver_planos", PLAN_LIST_ROUTE),
        ("create_plan", PLAN_LIST_ROUTE),
        ("view_contents", CONTENT_LIST_ROUTE),
        ("ver_conteudos", CONTENT_LIST_ROUTE),
        ("view_reports", "/relatorios"),
        ("open_dashboard", DEFAULT_LANDING_ROUTE),
        ("edit_profile", "/perfil"),
    ]
    .into_iter()
    .map(|(intent, route)| (intent.to_string(), route.to_string()))
    .collect()
}

fn default_parametric_collections() -> Vec<String> {
    vec!["planos-acao".to_string(), "conteudos".to_string()]
}

fn default_label_rules() -> Vec<LabelRule> {
    vec![
        LabelRule::new(&["conteu", "conteú"], CONTENT_LIST_ROUTE),
        LabelRule::new(&["diagn"], DIAGNOSTICS_ROUTE),
        LabelRule::new(&["plano", "plan"], PLAN_LIST_ROUTE),
    ]
}

fn default_pages() -> BTreeMap<String, PageEntry> {
    [
        ("/dashboard", PageEntry::titled("Painel", &["user", "admin", "master"])),
        ("/diagnosticos", PageEntry::titled("Diagnósticos", &["user", "admin"])),
        ("/planos-acao", PageEntry::titled("Planos de ação", &["user", "admin"])),
        ("/planos-acao/:id", PageEntry::titled("Plano de ação", &["user", "admin"])),
        ("/conteudos", PageEntry::titled("Conteúdos", &["user", "admin", "master"])),
        ("/conteudos/:id/editar", PageEntry::titled("Editar conteúdo", &["admin", "master"])),
        ("/relatorios", PageEntry::titled("Relatórios", &["admin", "master"])),
        ("/perfil", PageEntry::titled("Perfil", &["user", "admin", "master"])),
        ("/assistente", PageEntry::titled("Assistente", &["user", "admin"])),
    ]
    .into_iter()
    .map(|(path, entry)| (path.to_string(), entry))
    .collect()
}

fn default_sidebar() -> Vec<SidebarEntry> {
    vec![
        SidebarEntry::link("Painel", "/dashboard", "dashboard.view"),
        SidebarEntry::link("Diagnósticos", "/diagnosticos", "diagnostics.view"),
        SidebarEntry::link("Planos de ação", "/planos-acao", "plans.view"),
        SidebarEntry::link("Conteúdos", "/conteudos", "contents.view"),
        SidebarEntry::group(
            "Administração",
            vec![
                SidebarEntry::link("Usuários", "/usuarios", "users.manage"),
                SidebarEntry::link("Empresas", "/empresas", "companies.manage"),
                SidebarEntry::link("Permissões", "/permissoes", "permissions.manage"),
            ],
        ),
        SidebarEntry::group(
            "Master",
            vec![
                SidebarEntry::link("Empresas", "/master/empresas", "master"),
                SidebarEntry::link("Usuários", "/master/usuarios", "master"),
            ],
        ),
    ]
}
