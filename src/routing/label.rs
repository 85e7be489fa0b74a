use crate::config::LabelRule;

/// Routes of every rule whose patterns occur in `label`, in rule order.
/// Matching is a plain case-insensitive substring test.
pub fn label_candidates<'a>(rules: &'a [LabelRule], label: &str) -> Vec<&'a str> {
    let label = label.to_lowercase();
    rules
        .iter()
        .filter(|rule| {
            rule.patterns
                .iter()
                .map(|pattern| pattern.trim().to_lowercase())
                .any(|pattern| !pattern.is_empty() && label.contains(&pattern))
        })
        .map(|rule| rule.route.as_str())
        .collect()
}
