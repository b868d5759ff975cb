//! Built-in generators, resolved by name from `"<name>": true` entries.

mod css;
mod figma;
mod scss;
mod tailwind;

pub use css::{CssGenerator, CSS_ARTIFACT};
pub use figma::{FigmaGenerator, FIGMA_ARTIFACT};
pub use scss::{ScssGenerator, SCSS_ARTIFACT};
pub use tailwind::{TailwindGenerator, BASE_CSS_ARTIFACT, DARK_CSS_ARTIFACT};

use std::sync::Arc;

use super::Generator;
use crate::tokens::value::{render, Syntax};
use crate::tokens::Token;

const GENERATED_NOTICE: &str = "Generated by tokensmith. Do not edit.";

/// Every built-in generator, in a stable order.
pub fn all() -> Vec<Arc<dyn Generator>> {
    vec![
        Arc::new(CssGenerator),
        Arc::new(ScssGenerator),
        Arc::new(TailwindGenerator),
        Arc::new(FigmaGenerator),
    ]
}

/// `selector { --name: value; ... }`. Empty token lists still produce the block.
fn custom_property_block<'a>(selector: &str, tokens: impl Iterator<Item = &'a Token>) -> String {
    let mut out = format!("{selector} {{\n");
    for token in tokens {
        out.push_str(&format!("  --{}: {};\n", token.name, render(&token.value, Syntax::Css)));
    }
    out.push_str("}\n");
    out
}
