use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;

use tokensmith_core::generators::builtin::{BASE_CSS_ARTIFACT, DARK_CSS_ARTIFACT};
use tokensmith_core::preview::TokenFiles;
use tokensmith_types::GenerationResult;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// `{ success, baseCSS?, darkCSS?, error? }`.
///
/// A failed generation still carries the last good CSS when there is one.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(rename = "baseCSS", skip_serializing_if = "Option::is_none")]
    pub base_css: Option<String>,
    #[serde(rename = "darkCSS", skip_serializing_if = "Option::is_none")]
    pub dark_css: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: result.success,
            base_css: result.artifact(BASE_CSS_ARTIFACT).map(str::to_string),
            dark_css: result.artifact(DARK_CSS_ARTIFACT).map(str::to_string),
            error: result.error.map(|message| ErrorBody { message }),
        }
    }
}

pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<TokenFiles>, JsonRejection>,
) -> (StatusCode, Json<GenerateResponse>) {
    let Json(files) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected /generate payload");
            let response = GenerateResponse {
                success: false,
                base_css: None,
                dark_css: None,
                error: Some(ErrorBody { message: rejection.body_text() }),
            };
            return (StatusCode::BAD_REQUEST, Json(response));
        },
    };

    tracing::debug!(files = files.len(), "Preview generation requested");
    let result = state.preview().submit(files).await;

    let status = if result.success { StatusCode::OK } else { StatusCode::INTERNAL_SERVER_ERROR };
    (status, Json(result.into()))
}
