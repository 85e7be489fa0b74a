use std::collections::BTreeSet;

pub const HOME_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";
pub const EDIT_SEGMENT: &str = "editar";

/// Allow-list of canonical base paths plus the collections that accept a
/// per-item identifier segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedRoutes {
    paths: BTreeSet<String>,
    parametric_collections: BTreeSet<String>,
}

impl AllowedRoutes {
    /// Home and login are always allowed. Paths carrying a `:` placeholder
    /// are never navigable as-is and are left out.
    pub fn new<P, C>(paths: P, parametric_collections: C) -> Self
    where
        P: IntoIterator<Item = String>,
        C: IntoIterator<Item = String>,
    {
        let mut allowed = paths
            .into_iter()
            .filter(|path| path.starts_with('/') && !path.contains(':'))
            .collect::<BTreeSet<_>>();
        allowed.insert(HOME_ROUTE.to_string());
        allowed.insert(LOGIN_ROUTE.to_string());

        Self {
            paths: allowed,
            parametric_collections: parametric_collections
                .into_iter()
                .map(|collection| collection.trim().to_string())
                .filter(|collection| !collection.is_empty())
                .collect(),
        }
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn parametric_collections(&self) -> impl Iterator<Item = &str> {
        self.parametric_collections.iter().map(String::as_str)
    }

    /// Decides on an already-normalized base path (no query or fragment).
    pub fn allows_base(&self, base: &str) -> bool {
        if base.is_empty() || base.contains(':') {
            return false;
        }
        self.paths.contains(base) || self.matches_parametric(base)
    }

    /// `/<collection>/<id>` or `/<collection>/<id>/editar`.
    pub fn matches_parametric(&self, base: &str) -> bool {
        let Some(rest) = base.strip_prefix('/') else {
            return false;
        };
        let segments = rest.split('/').collect::<Vec<_>>();
        let (collection, id) = match segments.as_slice() {
            [collection, id] => (*collection, *id),
            [collection, id, EDIT_SEGMENT] => (*collection, *id),
            _ => return false,
        };
        is_item_segment(id) && self.parametric_collections.contains(collection)
    }
}

/// An identifier segment must stay one segment once a browser resolves it:
/// no dot segments, plain or percent-encoded, and no backslashes.
fn is_item_segment(id: &str) -> bool {
    if id.is_empty() || id.contains('\\') {
        return false;
    }
    match urlencoding::decode(id) {
        Ok(decoded) => !matches!(decoded.as_ref(), "." | "..") && !decoded.contains('\\'),
        Err(_) => false,
    }
}
