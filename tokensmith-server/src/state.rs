//! Application State
//!
//! Holds the preview worker handle shared by every request.

use std::sync::Arc;

use tokensmith_core::{GenerationEngine, GeneratorRegistry, PreviewOptions, PreviewService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub preview: PreviewService,
}

impl AppState {
    /// Spawn the preview worker with the built-in generators.
    pub fn new(options: PreviewOptions) -> Self {
        let engine = GenerationEngine::new(Arc::new(GeneratorRegistry::with_builtins()));
        Self::with_engine(engine, options)
    }

    pub fn with_engine(engine: GenerationEngine, options: PreviewOptions) -> Self {
        Self { inner: Arc::new(AppStateInner { preview: PreviewService::spawn(engine, options) }) }
    }

    pub fn preview(&self) -> &PreviewService {
        &self.inner.preview
    }
}
