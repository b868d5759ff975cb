//! Generator registry and execution engine.
//!
//! ```text
//! ProducerConfig.generators ──resolve──▶ [Arc<dyn Generator>] ──GenerationEngine──▶ outputDir
//!          │                                   ▲
//!          ├── true   → built-in (css, scss, tailwind, figma)
//!          ├── false  → skipped
//!          └── "path" → ProcessPlugin
//! ```

pub mod builtin;
mod engine;
mod plugin;
mod registry;


pub use engine::{GenerationEngine, GenerationReport, GenerationRequest};
pub use plugin::ProcessPlugin;
pub use registry::GeneratorRegistry;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::Path;

use tokensmith_types::{Artifacts, ProducerConfig};

use crate::tokens::TokenTree;
use crate::utils::fs::write_creating_parents;

/// Everything a generator may read during one run.
pub struct GeneratorContext<'a> {
    pub tokens: &'a TokenTree,
    /// Directory the token tree was read from (or materialized into)
    pub tokens_dir: &'a Path,
    /// Directory generators write into. In dry-run mode this is a scratch dir.
    pub output_dir: &'a Path,
    pub config: &'a ProducerConfig,
    /// Artifacts written through [`GeneratorContext::write_artifact`] during this run
    written: Mutex<Artifacts>,
}

impl<'a> GeneratorContext<'a> {
    pub fn new(
        tokens: &'a TokenTree,
        tokens_dir: &'a Path,
        output_dir: &'a Path,
        config: &'a ProducerConfig,
    ) -> Self {
        Self { tokens, tokens_dir, output_dir, config, written: Mutex::new(Artifacts::new()) }
    }

    /// Write one artifact below the output directory.
    pub async fn write_artifact(&self, relative: &str, content: &str) -> Result<(), String> {
        let path = self.output_dir.join(relative);
        write_creating_parents(&path, content)
            .await
            .map_err(|e| format!("failed to write {}: {}", path.display(), e))?;
        self.written.lock().insert(relative.replace('\\', "/"), content.to_string());
        Ok(())
    }

    pub(crate) fn take_written(&self) -> Artifacts {
        std::mem::take(&mut *self.written.lock())
    }
}

/// A unit that turns a token tree into output files.
///
/// Implementations must not keep mutable state between calls: the same
/// instance serves concurrent producer runs and on-demand requests.
///
/// Plugin-backed implementations execute foreign code with the full
/// privileges of the host process. Nothing here sandboxes them.
#[async_trait]
pub trait Generator: Send + Sync {
    fn name(&self) -> &str;

    /// True when the unit writes files itself instead of going through
    /// [`GeneratorContext::write_artifact`]. The engine then diffs the
    /// output directory to find what the unit produced.
    fn writes_directly(&self) -> bool {
        false
    }

    async fn generate(&self, ctx: &GeneratorContext<'_>) -> Result<(), String>;
}
