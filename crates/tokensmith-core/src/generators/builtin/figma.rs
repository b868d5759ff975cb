//! Design-tool variable export: one collection, `light` and `dark` modes.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::generators::{Generator, GeneratorContext};
use crate::tokens::value::reference_target;
use crate::tokens::{Theme, Token, TokenSet};

pub const FIGMA_ARTIFACT: &str = "figma/variables.json";

const COLLECTION_NAME: &str = "Tokens";

pub struct FigmaGenerator;

#[async_trait]
impl Generator for FigmaGenerator {
    fn name(&self) -> &str {
        "figma"
    }

    async fn generate(&self, ctx: &GeneratorContext<'_>) -> Result<(), String> {
        let export = build_export(&TokenSet::from_tree(ctx.tokens));
        let json = serde_json::to_string_pretty(&export).map_err(|e| e.to_string())?;
        ctx.write_artifact(FIGMA_ARTIFACT, &json).await
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct VariableExport {
    collections: Vec<Collection>,
}

#[derive(Debug, Serialize)]
struct Collection {
    name: String,
    modes: Vec<&'static str>,
    variables: Vec<Variable>,
}

#[derive(Debug, Serialize)]
struct Variable {
    /// Slash-separated, the way design tools group variables
    name: String,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    values: IndexMap<&'static str, Value>,
}

pub(crate) fn build_export(set: &TokenSet) -> VariableExport {
    let mut variables: IndexMap<String, Variable> = IndexMap::new();

    for token in set.theme(Theme::Base).chain(set.theme(Theme::Dark)) {
        let entry = variables.entry(token.name.clone()).or_insert_with(|| Variable {
            name: token.path.join("/"),
            kind: variable_type(token),
            description: token.description.clone(),
            values: IndexMap::new(),
        });
        let mode = match token.theme {
            Theme::Base => "light",
            Theme::Dark => "dark",
        };
        entry.values.insert(mode, mode_value(set, token));
    }

    for variable in variables.values_mut() {
        // Modes a token does not override inherit the other mode's value.
        let light = variable.values.get("light").cloned();
        let dark = variable.values.get("dark").cloned();
        if let (None, Some(dark)) = (&light, &dark) {
            variable.values.insert("light", dark.clone());
        }
        if let (Some(light), None) = (light, dark) {
            variable.values.insert("dark", light);
        }
        variable.values.sort_by(|a, _, b, _| mode_rank(a).cmp(&mode_rank(b)));
    }

    VariableExport {
        collections: vec![Collection {
            name: COLLECTION_NAME.to_string(),
            modes: vec!["light", "dark"],
            variables: variables.into_values().collect(),
        }],
    }
}

fn mode_rank(mode: &str) -> u8 {
    u8::from(mode != "light")
}

fn mode_value(set: &TokenSet, token: &Token) -> Value {
    if let Some(target) = token.value.as_str().and_then(reference_target) {
        if let Some(referenced) = set.get(token.theme, &target) {
            return serde_json::json!({ "alias": referenced.path.join("/") });
        }
    }
    token.value.clone()
}

fn variable_type(token: &Token) -> &'static str {
    match token.kind.as_deref() {
        Some("color") => "COLOR",
        Some("dimension" | "number" | "fontWeight" | "duration" | "opacity") => "FLOAT",
        Some("boolean") => "BOOLEAN",
        _ if token.value.is_number() => "FLOAT",
        _ if token.value.is_boolean() => "BOOLEAN",
        _ => "STRING",
    }
}
