use std::path::Path;
use tokio::process::Command;

use tokensmith_types::PostSyncStatus;

/// Run the post-sync command through the platform shell in `project_root`.
///
/// Never fails: the outcome is logged and returned.
pub async fn run_post_sync(command: &str, project_root: &Path) -> PostSyncStatus {
    tracing::info!(%command, "Running post-sync hook");

    let status = shell(command).current_dir(project_root).status().await;

    let outcome = match status {
        Ok(status) if status.success() => PostSyncStatus::Succeeded,
        Ok(status) => PostSyncStatus::Failed { code: status.code() },
        Err(e) => PostSyncStatus::SpawnFailed { message: e.to_string() },
    };

    match &outcome {
        PostSyncStatus::Succeeded => tracing::info!("Post-sync hook finished"),
        PostSyncStatus::Failed { code } => {
            tracing::warn!(?code, "Post-sync hook failed; sync result is kept");
        },
        PostSyncStatus::SpawnFailed { message } => {
            tracing::warn!(error = %message, "Post-sync hook could not be started");
        },
    }
    outcome
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
