use async_trait::async_trait;

use super::{custom_property_block, GENERATED_NOTICE};
use crate::generators::{Generator, GeneratorContext};
use crate::tokens::{Theme, TokenSet};

pub const CSS_ARTIFACT: &str = "css/variables.css";

/// Plain CSS custom properties on `:root`, dark overrides on `[data-theme="dark"]`.
pub struct CssGenerator;

#[async_trait]
impl Generator for CssGenerator {
    fn name(&self) -> &str {
        "css"
    }

    async fn generate(&self, ctx: &GeneratorContext<'_>) -> Result<(), String> {
        let set = TokenSet::from_tree(ctx.tokens);
        ctx.write_artifact(CSS_ARTIFACT, &render_stylesheet(&set)).await
    }
}

pub(crate) fn render_stylesheet(set: &TokenSet) -> String {
    let mut out = format!("/* {GENERATED_NOTICE} */\n\n");
    out.push_str(&custom_property_block(":root", set.theme(Theme::Base)));
    if set.has_theme(Theme::Dark) {
        out.push('\n');
        out.push_str(&custom_property_block("[data-theme=\"dark\"]", set.theme(Theme::Dark)));
    }
    out
}
