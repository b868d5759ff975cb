//! Flattening a token tree into an ordered, theme-aware token list.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use super::tree::TokenTree;
use super::value::{reference_target, token_name};

/// Depth at which reference chains are assumed to be cyclic.
const MAX_REFERENCE_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Base,
    Dark,
}

impl Theme {
    /// A file contributes dark tokens when a path segment is `dark` or its
    /// stem ends in `.dark` (`colors.dark.json`).
    pub fn for_file(path: &str) -> Self {
        let stem = path.strip_suffix(".json").unwrap_or(path);
        let is_dark = stem.split('/').any(|segment| segment == "dark") || stem.ends_with(".dark");
        if is_dark {
            Self::Dark
        } else {
            Self::Base
        }
    }
}

/// A single design token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Group path, e.g. `["color", "primary"]`
    pub path: Vec<String>,
    /// Kebab-joined path, e.g. `color-primary`
    pub name: String,
    pub value: Value,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub theme: Theme,
    /// Source file the token was read from
    pub source: String,
}

impl Token {
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// Tokens in definition order, unique per `(theme, name)`.
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    tokens: IndexMap<(Theme, String), Token>,
}

impl TokenSet {
    pub fn from_tree(tree: &TokenTree) -> Self {
        let mut set = Self::default();
        for (file, document) in tree.files() {
            if let Value::Object(map) = document {
                let theme = Theme::for_file(file);
                set.walk(map, &mut Vec::new(), None, theme, file);
            }
        }
        set
    }

    fn walk(
        &mut self,
        group: &Map<String, Value>,
        path: &mut Vec<String>,
        inherited_type: Option<&str>,
        theme: Theme,
        source: &str,
    ) {
        let group_type = string_field(group, "type").or(inherited_type);

        for (key, child) in group {
            if key.starts_with('$') {
                continue;
            }
            let Value::Object(child) = child else {
                continue;
            };
            path.push(key.clone());
            if let Some(value) = child.get("$value").or_else(|| child.get("value")) {
                let token = Token {
                    path: path.clone(),
                    name: token_name(path.as_slice()),
                    value: value.clone(),
                    kind: string_field(child, "type").or(group_type).map(str::to_string),
                    description: string_field(child, "description").map(str::to_string),
                    theme,
                    source: source.to_string(),
                };
                // Later definitions replace earlier ones but keep their slot.
                self.tokens.insert((theme, token.name.clone()), token);
            } else {
                self.walk(child, path, group_type, theme, source);
            }
            path.pop();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn theme(&self, theme: Theme) -> impl Iterator<Item = &Token> {
        self.tokens.values().filter(move |t| t.theme == theme)
    }

    pub fn has_theme(&self, theme: Theme) -> bool {
        self.theme(theme).next().is_some()
    }

    /// Look up by kebab name, falling back from `theme` to base.
    pub fn get(&self, theme: Theme, name: &str) -> Option<&Token> {
        self.tokens
            .get(&(theme, name.to_string()))
            .or_else(|| self.tokens.get(&(Theme::Base, name.to_string())))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Replace whole-value references (`"{color.primary}"`) with the target's
    /// resolved value. Unknown or cyclic references are left as written.
    pub fn resolve(&self, value: &Value, theme: Theme) -> Value {
        let mut current = value;
        for _ in 0..MAX_REFERENCE_DEPTH {
            let Some(target) = current.as_str().and_then(reference_target) else {
                return current.clone();
            };
            match self.get(theme, &target) {
                Some(token) => current = &token.value,
                None => return current.clone(),
            }
        }
        value.clone()
    }

    /// Tokens with references resolved, for consumers that cannot follow aliases.
    pub fn resolved(&self) -> Vec<Token> {
        self.iter()
            .map(|token| Token { value: self.resolve(&token.value, token.theme), ..token.clone() })
            .collect()
    }
}

fn string_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(&format!("${key}")).or_else(|| map.get(key)).and_then(Value::as_str)
}
