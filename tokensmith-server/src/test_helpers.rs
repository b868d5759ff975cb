//! Test helpers for tokensmith-server unit tests.

use tempfile::TempDir;

use tokensmith_core::PreviewOptions;

use crate::state::AppState;

/// Create an `AppState` whose preview scratch dirs live in a fresh temp dir.
///
/// Returns `(AppState, TempDir)`; keep `TempDir` alive for the test duration.
pub fn test_app_state() -> (AppState, TempDir) {
    let scratch = TempDir::new().expect("failed to create temp dir");
    let state = AppState::new(PreviewOptions {
        scratch_root: scratch.path().to_path_buf(),
        ..PreviewOptions::default()
    });
    (state, scratch)
}
