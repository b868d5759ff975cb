use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use tokensmith_types::{Artifacts, GenerationError, GenerationMode, GenerationResult, ProducerConfig};

use crate::generators::{GenerationEngine, GenerationRequest};
use crate::tokens::TokenTree;

/// Relative token file path -> token document, as posted by the editor.
pub type TokenFiles = BTreeMap<String, Value>;

#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Per-request scratch directories are created below this directory
    pub scratch_root: PathBuf,
    /// Generators run for every request
    pub config: ProducerConfig,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self { scratch_root: std::env::temp_dir(), config: ProducerConfig::preview_profile() }
    }
}

struct Ticket {
    files: TokenFiles,
    reply: oneshot::Sender<GenerationResult>,
}

/// Handle to the preview worker. Cheap to clone; all clones feed the same queue.
#[derive(Clone)]
pub struct PreviewService {
    tx: mpsc::UnboundedSender<Ticket>,
}

/// A queued request. Its position in the queue is fixed at enqueue time.
pub struct PendingGeneration {
    rx: oneshot::Receiver<GenerationResult>,
}

impl PendingGeneration {
    pub async fn wait(self) -> GenerationResult {
        self.rx
            .await
            .unwrap_or_else(|_| GenerationResult::failed("preview worker is not running", None))
    }
}

impl PreviewService {
    /// Start the worker on the current tokio runtime.
    pub fn spawn(engine: GenerationEngine, options: PreviewOptions) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(rx, engine, options));
        Self { tx }
    }

    /// Queue `files` behind every earlier request without waiting for it to run.
    pub fn enqueue(&self, files: TokenFiles) -> PendingGeneration {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Ticket { files, reply }).is_err() {
            tracing::error!("Preview worker has stopped, request dropped");
        }
        PendingGeneration { rx }
    }

    pub async fn submit(&self, files: TokenFiles) -> GenerationResult {
        self.enqueue(files).wait().await
    }
}

async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<Ticket>,
    engine: GenerationEngine,
    options: PreviewOptions,
) {
    let options = Arc::new(options);
    let mut last_good: Option<Artifacts> = None;
    let mut seq: u64 = 0;

    while let Some(Ticket { files, reply }) = rx.recv().await {
        seq += 1;
        // Each run gets its own task so a panicking generator fails only its request.
        let run = tokio::spawn(generate(engine.clone(), options.clone(), seq, files));
        let result = match run.await {
            Ok(Ok(artifacts)) => {
                tracing::debug!(seq, artifacts = artifacts.len(), "Preview generated");
                last_good = Some(artifacts.clone());
                GenerationResult::succeeded(artifacts)
            },
            Ok(Err(e)) => {
                tracing::warn!(seq, error = %e, stale = last_good.is_some(), "Preview generation failed");
                GenerationResult::failed(e.to_string(), last_good.as_ref())
            },
            Err(join) => {
                let message = panic_message(join);
                tracing::error!(seq, error = %message, stale = last_good.is_some(), "Preview generation panicked");
                GenerationResult::failed(message, last_good.as_ref())
            },
        };
        // The caller may have stopped waiting; the run still counts.
        let _ = reply.send(result);
    }

    tracing::debug!("Preview worker stopped");
}

fn panic_message(join: tokio::task::JoinError) -> String {
    if !join.is_panic() {
        return format!("generation task was cancelled: {join}");
    }
    let payload = join.into_panic();
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("generator panicked: {detail}")
}

async fn generate(
    engine: GenerationEngine,
    options: Arc<PreviewOptions>,
    seq: u64,
    files: TokenFiles,
) -> Result<Artifacts, GenerationError> {
    let tree = TokenTree::from_files(files)?;

    tokio::fs::create_dir_all(&options.scratch_root)
        .await
        .map_err(|e| GenerationError::from_io_error(&e))?;
    // Removed on drop, on both exit paths.
    let scratch = tempfile::Builder::new()
        .prefix(&format!("tokensmith-preview-{seq}-"))
        .tempdir_in(&options.scratch_root)
        .map_err(|e| GenerationError::from_io_error(&e))?;

    let tokens_dir = scratch.path().join(&options.config.tokens_path);
    let output_dir = scratch.path().join(&options.config.output_path);
    tree.materialize(&tokens_dir).await?;

    let report = engine
        .run(GenerationRequest {
            tokens: &tree,
            tokens_dir: &tokens_dir,
            output_dir: &output_dir,
            config: &options.config,
            config_dir: scratch.path(),
            mode: GenerationMode::Write,
        })
        .await?;

    Ok(report.artifacts)
}
