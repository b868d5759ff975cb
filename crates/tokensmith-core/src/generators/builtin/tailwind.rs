use async_trait::async_trait;

use super::{custom_property_block, GENERATED_NOTICE};
use crate::generators::{Generator, GeneratorContext};
use crate::tokens::{Theme, TokenSet};

pub const BASE_CSS_ARTIFACT: &str = "tailwind/base.css";
pub const DARK_CSS_ARTIFACT: &str = "tailwind/dark.css";

/// Tailwind theme sheets. This is the generator behind the editor preview,
/// so both files are always written, even when empty.
pub struct TailwindGenerator;

#[async_trait]
impl Generator for TailwindGenerator {
    fn name(&self) -> &str {
        "tailwind"
    }

    async fn generate(&self, ctx: &GeneratorContext<'_>) -> Result<(), String> {
        let set = TokenSet::from_tree(ctx.tokens);
        ctx.write_artifact(BASE_CSS_ARTIFACT, &render_base(&set)).await?;
        ctx.write_artifact(DARK_CSS_ARTIFACT, &render_dark(&set)).await
    }
}

pub(crate) fn render_base(set: &TokenSet) -> String {
    format!("/* {GENERATED_NOTICE} */\n\n{}", custom_property_block("@theme", set.theme(Theme::Base)))
}

pub(crate) fn render_dark(set: &TokenSet) -> String {
    format!("/* {GENERATED_NOTICE} */\n\n{}", custom_property_block(".dark", set.theme(Theme::Dark)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tokens::TokenTree;
    use serde_json::json;

    #[test]
    fn test_base_and_dark_sheets() {
        let tree = TokenTree::from_files(
            [
                ("colors.json".to_string(), json!({"color": {"primary": {"$value": "#0af"}}})),
                ("themes/dark.json".to_string(), json!({"color": {"primary": {"$value": "#08c"}}})),
            ]
            .into_iter()
            .collect(),
        )
        .unwrap();
        let set = TokenSet::from_tree(&tree);

        assert!(render_base(&set).ends_with("@theme {\n  --color-primary: #0af;\n}\n"));
        assert!(render_dark(&set).ends_with(".dark {\n  --color-primary: #08c;\n}\n"));
    }

    #[test]
    fn test_dark_sheet_empty_block_without_dark_tokens() {
        let set = TokenSet::default();
        assert!(render_dark(&set).ends_with(".dark {\n}\n"));
    }
}
