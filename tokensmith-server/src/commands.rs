use anyhow::Result;
use colored::Colorize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use tokensmith_core::{
    load_producer_config, GenerationEngine, GenerationReport, GenerationRequest,
    GeneratorRegistry, GitHubReleaseClient, PreviewOptions, SyncEngine, TokenTree,
};
use tokensmith_types::{GenerationMode, PostSyncStatus, SyncOptions, SyncOutcome, TypedError};

use crate::router::build_router;
use crate::state::AppState;

pub async fn handle_build(config: &Path, dry_run: bool, json: bool) -> Result<()> {
    let loaded = load_producer_config(config).await.map_err(TypedError::from)?;
    let tokens_dir = loaded.tokens_dir();
    let output_dir = loaded.output_dir();

    let tree = TokenTree::read_dir(&tokens_dir).await.map_err(TypedError::from)?;
    info!(files = tree.len(), tokens = %tokens_dir.display(), "Token tree loaded");

    let engine = GenerationEngine::new(Arc::new(GeneratorRegistry::with_builtins()));
    let mode = if dry_run { GenerationMode::DryRun } else { GenerationMode::Write };
    let report = engine
        .run(GenerationRequest {
            tokens: &tree,
            tokens_dir: &tokens_dir,
            output_dir: &output_dir,
            config: &loaded.config,
            config_dir: &loaded.base_dir,
            mode,
        })
        .await
        .map_err(TypedError::from)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_build_report(&report, &output_dir);
    }
    Ok(())
}

fn print_build_report(report: &GenerationReport, output_dir: &Path) {
    let heading = match report.mode {
        GenerationMode::Write => format!("Generated into {}", output_dir.display()),
        GenerationMode::DryRun => "Dry run, nothing was written".to_string(),
    };
    println!("{}", heading.cyan().bold());
    println!("  Generators: {}", report.generators.join(", "));
    for (path, content) in &report.artifacts {
        println!("  {} {} ({} bytes)", "•".green(), path, content.len());
    }
}

pub async fn handle_sync(
    config: &Path,
    force: bool,
    dry_run: bool,
    token: Option<String>,
    api_url: &str,
) -> Result<()> {
    let client = GitHubReleaseClient::new(api_url, token).map_err(TypedError::from)?;
    let engine = SyncEngine::new(client);
    let outcome = engine.sync_project(config, SyncOptions { force, dry_run }).await?;
    print_sync_outcome(&outcome);
    Ok(())
}

fn print_sync_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::UpToDate { version } => {
            println!("{} {}", "Already synced to".green(), version.bold());
            println!("  Run with --force to fetch again.");
        },
        SyncOutcome::DryRun { plan } => {
            println!("{} {}@{}", "Would sync".cyan().bold(), plan.repo, plan.version);
            for file in &plan.files {
                println!("  {} -> {}", file.asset, file.path);
            }
        },
        SyncOutcome::Synced { version, written, skipped, post_sync } => {
            println!("{} {}", "Synced".green().bold(), version.bold());
            for path in written {
                println!("  {} {}", "•".green(), path);
            }
            for asset in skipped {
                println!("  {} {} (not in release)", "!".yellow(), asset);
            }
            match post_sync {
                Some(PostSyncStatus::Succeeded) => println!("  postSync: {}", "ok".green()),
                Some(PostSyncStatus::Failed { code }) => {
                    let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                    println!("  postSync: {} (exit {})", "failed".yellow(), code);
                },
                Some(PostSyncStatus::SpawnFailed { message }) => {
                    println!("  postSync: {} ({})", "not started".yellow(), message);
                },
                None => {},
            }
        },
    }
}

/// Startup failures of `serve` the operator can act on.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Bind the preview listener on the loopback interface.
pub async fn bind_listener(port: u16) -> Result<TcpListener, ServeError> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    TcpListener::bind(addr).await.map_err(|source| ServeError::Bind { addr, source })
}

pub async fn handle_serve(port: u16, scratch_dir: Option<PathBuf>) -> Result<()> {
    let mut options = PreviewOptions::default();
    if let Some(dir) = scratch_dir {
        options.scratch_root = dir;
    }
    info!(scratch = %options.scratch_root.display(), "Starting preview worker");

    let app = build_router(AppState::new(options));

    let listener = bind_listener(port).await?;
    let addr = listener.local_addr()?;

    info!("🌐 Server listening on http://{}", addr);
    info!("🎨 Preview endpoint at http://localhost:{}/generate", port);

    axum::serve(listener, app).await?;
    Ok(())
}
