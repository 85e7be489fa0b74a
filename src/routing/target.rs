/// Absolute `http`/`https` URL with at least one character after `://`.
/// The scheme match is ASCII case-insensitive.
pub fn is_absolute_url(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value.len() > scheme.len()
            && value.is_char_boundary(scheme.len())
            && value[..scheme.len()].eq_ignore_ascii_case(scheme)
    })
}

/// Borrowed view of an in-app route split into its three parts. A missing
/// part is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteParts<'a> {
    pub base: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

impl<'a> RouteParts<'a> {
    /// Splits at the first `?` or `#`. A `?` after the `#` belongs to the
    /// fragment.
    pub fn split(route: &'a str) -> Self {
        let Some(delimiter) = route.find(['?', '#']) else {
            return Self {
                base: route,
                query: "",
                fragment: "",
            };
        };
        let base = &route[..delimiter];
        let rest = &route[delimiter + 1..];
        if route.as_bytes()[delimiter] == b'#' {
            return Self {
                base,
                query: "",
                fragment: rest,
            };
        }
        match rest.split_once('#') {
            Some((query, fragment)) => Self {
                base,
                query,
                fragment,
            },
            None => Self {
                base,
                query: rest,
                fragment: "",
            },
        }
    }

    pub fn compose(&self) -> String {
        compose_route(self.base, self.query, self.fragment)
    }
}

/// Rebuilds `base?query#fragment`, dropping the delimiter of an empty part.
pub fn compose_route(base: &str, query: &str, fragment: &str) -> String {
    let mut route = String::with_capacity(base.len() + query.len() + fragment.len() + 2);
    route.push_str(base);
    if !query.is_empty() {
        route.push('?');
        route.push_str(query);
    }
    if !fragment.is_empty() {
        route.push('#');
        route.push_str(fragment);
    }
    route
}

/// Owned, typed form of a resolved navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    External(String),
    InApp {
        base: String,
        query: String,
        fragment: String,
    },
}

impl RouteTarget {
    pub fn parse(route: &str) -> Self {
        if is_absolute_url(route) {
            return Self::External(route.to_string());
        }
        let parts = RouteParts::split(route);
        Self::InApp {
            base: parts.base.to_string(),
            query: parts.query.to_string(),
            fragment: parts.fragment.to_string(),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// External targets open in a new browsing context.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::External(_) => "external",
            Self::InApp { .. } => "in_app",
        }
    }
}

impl std::fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::External(url) => f.write_str(url),
            Self::InApp {
                base,
                query,
                fragment,
            } => f.write_str(&compose_route(base, query, fragment)),
        }
    }
}
