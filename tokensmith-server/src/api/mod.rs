//! API Routes
//!
//! HTTP boundary used by the interactive editor.

mod generate;

#[cfg(test)]
mod generate_tests;

use axum::{routing::post, Router};

use crate::state::AppState;

pub use generate::{ErrorBody, GenerateResponse};

pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate::generate))
}
