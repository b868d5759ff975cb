//! External generator plugins.
//!
//! A plugin is an executable referenced from the producer config by path.
//! It receives the generation context as JSON on stdin (the two directories
//! are also exported as `TOKENSMITH_TOKENS_DIR` / `TOKENSMITH_OUTPUT_DIR`)
//! and writes its own files below `outputDir`. A non-zero exit status fails the generator.
//!
//! Plugins run with the full privileges of the host process.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use tokensmith_types::GenerationError;

use super::{Generator, GeneratorContext};
use crate::tokens::TokenSet;

/// Maximum stderr characters carried into the failure message.
const STDERR_EXCERPT_CHARS: usize = 2000;

#[derive(Debug)]
pub struct ProcessPlugin {
    name: String,
    program: PathBuf,
}

impl ProcessPlugin {
    /// Resolve `path` and check it is something we can execute.
    pub fn load(name: &str, path: &Path) -> Result<Self, GenerationError> {
        let load_error = |message: String| GenerationError::PluginLoad {
            name: name.to_string(),
            path: path.display().to_string(),
            message,
        };

        let metadata = std::fs::metadata(path).map_err(|e| load_error(e.to_string()))?;
        if !metadata.is_file() {
            return Err(load_error("not a regular file".to_string()));
        }
        if !is_executable(&metadata) {
            return Err(load_error("file is not executable".to_string()));
        }

        Ok(Self { name: name.to_string(), program: path.to_path_buf() })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}

#[async_trait]
impl Generator for ProcessPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn writes_directly(&self) -> bool {
        true
    }

    async fn generate(&self, ctx: &GeneratorContext<'_>) -> Result<(), String> {
        let payload = serde_json::json!({
            "generator": self.name,
            "tokensDir": ctx.tokens_dir,
            "outputDir": ctx.output_dir,
            "config": ctx.config,
            "tokens": ctx.tokens,
            "flatTokens": TokenSet::from_tree(ctx.tokens).resolved(),
        });
        let input = serde_json::to_vec(&payload).map_err(|e| e.to_string())?;

        let mut child = Command::new(&self.program)
            .env("TOKENSMITH_TOKENS_DIR", ctx.tokens_dir)
            .env("TOKENSMITH_OUTPUT_DIR", ctx.output_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("failed to spawn {}: {}", self.program.display(), e))?;

        // Feed stdin while draining stdout/stderr; a plugin that fills its
        // output pipe before reading all of stdin would otherwise block us both.
        // The writer owns stdin, so the pipe closes as soon as it finishes.
        let stdin = child.stdin.take();
        let send = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(&input).await {
                // A plugin that ignores stdin may exit before we finish writing.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        };
        let (sent, output) = tokio::join!(send, child.wait_with_output());
        let output = output.map_err(|e| e.to_string())?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            tracing::debug!(plugin = %self.name, "{}", line);
        }

        if output.status.success() {
            return sent.map_err(|e| format!("failed to send context: {e}"));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let excerpt: String = stderr.trim().chars().take(STDERR_EXCERPT_CHARS).collect();
        if excerpt.is_empty() {
            Err(format!("plugin exited with {}", output.status))
        } else {
            Err(format!("plugin exited with {}: {}", output.status, excerpt))
        }
    }
}
