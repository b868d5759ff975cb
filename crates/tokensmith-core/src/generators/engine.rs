use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

use serde::Serialize;
use tokensmith_types::{Artifacts, GenerationError, GenerationMode, ProducerConfig};

use super::{Generator, GeneratorContext, GeneratorRegistry};
use crate::tokens::TokenTree;
use crate::utils::fs::{relative_key, walk_files};

/// Inputs for one generation run.
pub struct GenerationRequest<'a> {
    pub tokens: &'a TokenTree,
    pub tokens_dir: &'a Path,
    /// Ignored in dry-run mode
    pub output_dir: &'a Path,
    pub config: &'a ProducerConfig,
    /// Plugin paths resolve against this directory
    pub config_dir: &'a Path,
    pub mode: GenerationMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub mode: GenerationMode,
    /// Generators that ran, in execution order
    pub generators: Vec<String>,
    /// Files this run produced, keyed by path relative to the output directory.
    /// Files already present and left untouched are not reported.
    pub artifacts: Artifacts,
}

/// Runs the enabled generators of a config sequentially, fail-fast.
#[derive(Clone)]
pub struct GenerationEngine {
    registry: Arc<GeneratorRegistry>,
}

impl GenerationEngine {
    pub fn new(registry: Arc<GeneratorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub async fn run(&self, request: GenerationRequest<'_>) -> Result<GenerationReport, GenerationError> {
        let units = self.registry.resolve(request.config, request.config_dir)?;
        Self::execute(&units, &request).await
    }

    /// Run already-resolved units.
    ///
    /// Each unit finishes before the next starts. The first failure stops the
    /// run; output written by earlier units is left in place.
    pub async fn execute(
        units: &[Arc<dyn Generator>],
        request: &GenerationRequest<'_>,
    ) -> Result<GenerationReport, GenerationError> {
        // Dry runs write into a throwaway directory; the real output path is never touched.
        let scratch = match request.mode {
            GenerationMode::Write => None,
            GenerationMode::DryRun => Some(
                tempfile::Builder::new()
                    .prefix("tokensmith-dry-run-")
                    .tempdir()
                    .map_err(|e| GenerationError::from_io_error(&e))?,
            ),
        };
        let output_dir = scratch.as_ref().map_or(request.output_dir, |dir| dir.path());

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| GenerationError::from_io_error(&e))?;

        // A scratch dir starts empty, so everything in it afterwards is ours.
        // A real output dir may hold unrelated files; units that bypass
        // write_artifact are detected by diffing against a snapshot.
        let before = match (&scratch, units.iter().any(|u| u.writes_directly())) {
            (None, true) => Some(snapshot(output_dir).await?),
            _ => None,
        };

        let ctx = GeneratorContext::new(request.tokens, request.tokens_dir, output_dir, request.config);

        let mut generators = Vec::with_capacity(units.len());
        for unit in units {
            let name = unit.name().to_string();
            let started = Instant::now();
            tracing::info!(generator = %name, mode = ?request.mode, "Running generator");

            if let Err(message) = unit.generate(&ctx).await {
                tracing::error!(generator = %name, error = %message, "Generator failed, aborting run");
                return Err(GenerationError::failed(name, message));
            }

            tracing::info!(
                generator = %name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Generator finished"
            );
            generators.push(name);
        }

        let artifacts = match (&scratch, before) {
            (Some(_), _) => collect_artifacts(output_dir).await?,
            (None, Some(before)) => {
                let mut artifacts = ctx.take_written();
                artifacts.extend(collect_changed(output_dir, &before).await?);
                artifacts
            }
            (None, None) => ctx.take_written(),
        };
        Ok(GenerationReport { mode: request.mode, generators, artifacts })
    }
}

type Snapshot = HashMap<String, (u64, Option<SystemTime>)>;

async fn snapshot(dir: &Path) -> Result<Snapshot, GenerationError> {
    let mut entries = Snapshot::new();
    for path in walk_files(dir).await.map_err(|e| GenerationError::from_io_error(&e))? {
        let Some(key) = relative_key(dir, &path) else {
            continue;
        };
        let meta = tokio::fs::metadata(&path).await.map_err(|e| GenerationError::from_io_error(&e))?;
        entries.insert(key, (meta.len(), meta.modified().ok()));
    }
    Ok(entries)
}

/// Read files below `dir` that are new or changed since `before` was taken.
async fn collect_changed(dir: &Path, before: &Snapshot) -> Result<Artifacts, GenerationError> {
    let mut artifacts = Artifacts::new();
    for (key, stamp) in snapshot(dir).await? {
        if before.get(&key) == Some(&stamp) {
            continue;
        }
        let bytes = tokio::fs::read(dir.join(&key)).await.map_err(|e| GenerationError::from_io_error(&e))?;
        artifacts.insert(key, String::from_utf8_lossy(&bytes).into_owned());
    }
    Ok(artifacts)
}

/// Read every file below `dir` keyed by its forward-slash relative path.
pub(crate) async fn collect_artifacts(dir: &Path) -> Result<Artifacts, GenerationError> {
    let mut artifacts = Artifacts::new();
    for path in walk_files(dir).await.map_err(|e| GenerationError::from_io_error(&e))? {
        let Some(key) = relative_key(dir, &path) else {
            continue;
        };
        let bytes = tokio::fs::read(&path).await.map_err(|e| GenerationError::from_io_error(&e))?;
        artifacts.insert(key, String::from_utf8_lossy(&bytes).into_owned());
    }
    Ok(artifacts)
}
