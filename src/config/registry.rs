use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A page registry entry. Only the key (the path) matters for routing; the
/// remaining fields are carried so a registry dump round-trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

impl PageEntry {
    pub fn titled(title: &str, roles: &[&str]) -> Self {
        Self {
            title: Some(title.to_string()),
            roles: roles.iter().map(|role| role.to_string()).collect(),
        }
    }
}

/// Sidebar/permission registry entry. Group headers usually carry no `url`
/// and nest their links under `children`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SidebarEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarEntry>,
}

impl SidebarEntry {
    pub fn link(label: &str, url: &str, permission: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            url: Some(url.to_string()),
            permission: Some(permission.to_string()),
            children: Vec::new(),
        }
    }

    pub fn group(label: &str, children: Vec<SidebarEntry>) -> Self {
        Self {
            label: Some(label.to_string()),
            url: None,
            permission: None,
            children,
        }
    }
}

/// Every path string declared by either registry, deduplicated, in stable
/// order. Values are returned as written; canonicalization happens when the
/// route table is built.
pub fn registry_paths(pages: &BTreeMap<String, PageEntry>, sidebar: &[SidebarEntry]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    for path in pages.keys() {
        if let Some(path) = registry_path(path) {
            seen.insert(path);
        }
    }

    let mut pending = sidebar.iter().collect::<Vec<_>>();
    while let Some(entry) = pending.pop() {
        if let Some(path) = entry.url.as_deref().and_then(registry_path) {
            seen.insert(path);
        }
        pending.extend(entry.children.iter());
    }

    seen.into_iter().collect()
}

// Registered paths are stored without trailing slashes, matching normalized routes.
fn registry_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stripped = trimmed.trim_end_matches('/');
    if stripped.is_empty() {
        return Some("/".to_string());
    }
    Some(stripped.to_string())
}
