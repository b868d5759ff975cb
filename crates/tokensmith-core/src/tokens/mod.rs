//! Token toolkit: reading token sources, flattening and rendering them.
//!
//! ```text
//! tokens/*.json ──read_dir──▶ TokenTree ──from_tree──▶ TokenSet ──render──▶ generators
//! ```

mod set;
mod tree;
pub mod value;

pub use set::{Theme, Token, TokenSet};
pub use tree::TokenTree;
