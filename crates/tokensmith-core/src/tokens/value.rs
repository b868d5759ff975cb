//! Rendering token values for stylesheet targets.

use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

#[allow(clippy::expect_used, reason = "Static pattern, verified by tests")]
static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}\s]+)\}").expect("reference pattern compiles"));

/// Reference spelling for a target syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// `var(--color-primary)`
    Css,
    /// `$color-primary`
    Scss,
}

/// Kebab-joined identifier for a token path.
pub fn token_name<S: AsRef<str>>(path: &[S]) -> String {
    path.iter().map(|segment| sanitize_segment(segment.as_ref())).collect::<Vec<_>>().join("-")
}

fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

/// If `text` is exactly one reference (`{color.primary}`), the target's token name.
pub fn reference_target(text: &str) -> Option<String> {
    let caps = REFERENCE.captures(text.trim())?;
    let whole = caps.get(0)?;
    if whole.as_str().len() != text.trim().len() {
        return None;
    }
    Some(dotted_to_name(caps.get(1)?.as_str()))
}

fn dotted_to_name(dotted: &str) -> String {
    let segments: Vec<&str> = dotted.split('.').collect();
    token_name(&segments)
}

/// Render a raw token value as a stylesheet value.
pub fn render(value: &Value, syntax: Syntax) -> String {
    match value {
        Value::String(text) => substitute_references(text, syntax),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => {
            items.iter().map(|item| render(item, syntax)).collect::<Vec<_>>().join(", ")
        },
        Value::Object(fields) => fields
            .values()
            .map(|field| render(field, syntax))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn substitute_references(text: &str, syntax: Syntax) -> String {
    REFERENCE
        .replace_all(text, |caps: &Captures<'_>| {
            let name = dotted_to_name(&caps[1]);
            match syntax {
                Syntax::Css => format!("var(--{name})"),
                Syntax::Scss => format!("${name}"),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_name_sanitizes() {
        assert_eq!(token_name(&["color", "brand primary"]), "color-brand-primary");
        assert_eq!(token_name(&["space", "1.5"]), "space-1-5");
    }

    #[test]
    fn test_reference_target_whole_value_only() {
        assert_eq!(reference_target("{color.primary}"), Some("color-primary".to_string()));
        assert_eq!(reference_target(" {bg} "), Some("bg".to_string()));
        assert_eq!(reference_target("1px solid {color.border}"), None);
        assert_eq!(reference_target("#fff"), None);
    }

    #[test]
    fn test_render_references_per_syntax() {
        let value = json!("1px solid {color.border}");
        assert_eq!(render(&value, Syntax::Css), "1px solid var(--color-border)");
        assert_eq!(render(&value, Syntax::Scss), "1px solid $color-border");
    }

    #[test]
    fn test_render_composites() {
        assert_eq!(render(&json!(["Inter", "sans-serif"]), Syntax::Css), "Inter, sans-serif");
        assert_eq!(
            render(&json!({"x": "0", "y": "1px", "blur": "2px", "color": "{shadow.color}"}), Syntax::Css),
            "0 1px 2px var(--shadow-color)"
        );
        assert_eq!(render(&json!(1.5), Syntax::Css), "1.5");
        assert_eq!(render(&json!(null), Syntax::Css), "");
    }
}
