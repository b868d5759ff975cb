use async_trait::async_trait;

use super::GENERATED_NOTICE;
use crate::generators::{Generator, GeneratorContext};
use crate::tokens::value::{render, Syntax};
use crate::tokens::{Theme, TokenSet};

pub const SCSS_ARTIFACT: &str = "scss/_tokens.scss";

/// SCSS variables; dark tokens get a `-dark` suffix.
pub struct ScssGenerator;

#[async_trait]
impl Generator for ScssGenerator {
    fn name(&self) -> &str {
        "scss"
    }

    async fn generate(&self, ctx: &GeneratorContext<'_>) -> Result<(), String> {
        let set = TokenSet::from_tree(ctx.tokens);
        ctx.write_artifact(SCSS_ARTIFACT, &render_partial(&set)).await
    }
}

pub(crate) fn render_partial(set: &TokenSet) -> String {
    let mut out = format!("// {GENERATED_NOTICE}\n\n");
    for token in set.iter() {
        let suffix = match token.theme {
            Theme::Base => "",
            Theme::Dark => "-dark",
        };
        out.push_str(&format!(
            "${}{}: {};\n",
            token.name,
            suffix,
            render(&token.value, Syntax::Scss)
        ));
    }
    out
}
