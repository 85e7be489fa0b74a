use super::target::is_absolute_url;
use std::collections::BTreeMap;

const QUOTE_CHARS: &[char] = &['"', '\'', '`'];

/// Canonicalizes a raw path-like string produced by the assistant.
///
/// Surrounding whitespace and one matching pair of quotes are removed.
/// Absolute URLs come back untouched. In-app paths get a leading `/`, lose
/// trailing slashes on the base, and have the base rewritten through
/// `aliases`. Query and fragment are carried over as written. Blank input
/// yields `""`.
pub fn normalize_route(raw: &str, aliases: &BTreeMap<String, String>) -> String {
    let value = strip_quote_pair(raw.trim());
    if value.is_empty() {
        return String::new();
    }
    if is_absolute_url(value) {
        return value.to_string();
    }

    let split_at = value.find(['?', '#']).unwrap_or(value.len());
    let (base, suffix) = value.split_at(split_at);
    let base = canonical_base(base);
    let base = match aliases.get(&base) {
        Some(canonical) => canonical.clone(),
        None => base,
    };
    format!("{base}{suffix}")
}

fn strip_quote_pair(value: &str) -> &str {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && QUOTE_CHARS.contains(&first) => {
            value[first.len_utf8()..value.len() - last.len_utf8()].trim()
        }
        _ => value,
    }
}

fn canonical_base(base: &str) -> String {
    let mut base = if base.starts_with('/') {
        base.to_string()
    } else {
        format!("/{base}")
    };
    if base.len() > 1 {
        let trimmed = base.trim_end_matches('/').len();
        base.truncate(trimmed.max(1));
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases() -> BTreeMap<String, String> {
        [
            ("/plano-acao", "/planos-acao"),
            ("/plano-de-acao", "/planos-acao"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn strips_quotes_whitespace_and_trailing_slash() {
        let aliases = aliases();
        assert_eq!(normalize_route("  \"/conteudos/\" ", &aliases), "/conteudos");
        assert_eq!(normalize_route("'diagnosticos'", &aliases), "/diagnosticos");
        assert_eq!(normalize_route("`/perfil//`", &aliases), "/perfil");
        assert_eq!(normalize_route("///", &aliases), "/");
    }

    #[test]
    fn unmatched_quote_is_kept_as_part_of_the_path() {
        let aliases = aliases();
        assert_eq!(normalize_route("'/conteudos", &aliases), "/'/conteudos");
    }

    #[test]
    fn blank_input_is_empty() {
        let aliases = aliases();
        assert_eq!(normalize_route("", &aliases), "");
        assert_eq!(normalize_route("   ", &aliases), "");
        assert_eq!(normalize_route("\" \"", &aliases), "");
    }

    #[test]
    fn alias_rewrites_base_and_keeps_suffix() {
        let aliases = aliases();
        assert_eq!(
            normalize_route("/plano-de-acao/?step=3#metas", &aliases),
            "/planos-acao?step=3#metas"
        );
        assert_eq!(normalize_route("plano-acao", &aliases), "/planos-acao");
        assert_eq!(normalize_route("/plano-acao/123", &aliases), "/plano-acao/123");
    }

    #[test]
    fn external_urls_are_returned_unchanged() {
        let aliases = aliases();
        assert_eq!(
            normalize_route(" 'https://example.com/plano-acao/' ", &aliases),
            "https://example.com/plano-acao/"
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let aliases = aliases();
        for raw in [
            "",
            "/",
            "?x=1",
            "#top",
            "\"'/a'\"",
            "'/a",
            "/a\"",
            "conteudos/",
            "/plano-acao//?a=b/#c/",
            "'https://x.com/'",
            "https://x.com'",
            "  \"  /diagnosticos  \"  ",
            "/planos-acao/abc:def",
        ] {
            let once = normalize_route(raw, &aliases);
            assert_eq!(normalize_route(&once, &aliases), once, "input {raw:?}");
        }
    }
}
