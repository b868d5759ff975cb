use std::path::{Path, PathBuf};

use tokensmith_types::{
    ConsumerConfig, PlannedFile, SyncError, SyncOptions, SyncOutcome, SyncPlan, TypedError,
};

use super::cache::SyncCache;
use super::hook::run_post_sync;
use crate::config::load_consumer_config;
use crate::release::ReleaseStore;
use crate::utils::fs::write_creating_parents;

/// Brings a consumer project's files in line with its pinned release.
pub struct SyncEngine<S> {
    store: S,
}

impl<S: ReleaseStore> SyncEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the consumer config at `config_path` and sync the project it lives in.
    pub async fn sync_project(
        &self,
        config_path: &Path,
        options: SyncOptions,
    ) -> Result<SyncOutcome, TypedError> {
        let loaded = load_consumer_config(config_path).await?;
        Ok(self.sync(&loaded.config, &loaded.base_dir, options).await?)
    }

    /// Sync `config` into `project_root`.
    ///
    /// The cache is written only after every fetched asset is on disk.
    pub async fn sync(
        &self,
        config: &ConsumerConfig,
        project_root: &Path,
        options: SyncOptions,
    ) -> Result<SyncOutcome, SyncError> {
        let plan = plan_for(config);

        if options.dry_run {
            tracing::info!(repo = %plan.repo, version = %plan.version, "Dry run, nothing will be fetched or written");
            for file in &plan.files {
                tracing::info!(asset = %file.asset, path = %file.path, "Would write");
            }
            return Ok(SyncOutcome::DryRun { plan });
        }

        let cache = SyncCache::for_project(project_root);
        if options.force {
            tracing::info!(version = %config.version, "Forced sync, ignoring cache");
        } else if cache.read().await?.as_deref() == Some(config.version.as_str())
            && any_output_exists(config, project_root).await
        {
            tracing::info!(version = %config.version, "Already synced");
            return Ok(SyncOutcome::UpToDate { version: config.version.clone() });
        }

        let release = self.store.fetch_release(&config.repo, &config.version).await?;
        tracing::info!(
            repo = %config.repo,
            tag = %release.tag,
            assets = release.assets.len(),
            "Fetched release metadata"
        );

        // Fetch everything first so a network failure leaves the project untouched.
        let mut fetched: Vec<(PathBuf, &str, String)> = Vec::with_capacity(config.files.len());
        let mut skipped = Vec::new();
        for (asset, local) in &config.files {
            let Some(locator) = release.asset(asset) else {
                tracing::warn!(%asset, version = %config.version, "Asset not in release, skipping");
                skipped.push(asset.clone());
                continue;
            };
            match self.store.fetch_asset(locator).await {
                Ok(content) => fetched.push((project_root.join(local), local.as_str(), content)),
                Err(SyncError::AssetNotFound { .. }) => {
                    tracing::warn!(%asset, "Asset download returned not found, skipping");
                    skipped.push(asset.clone());
                },
                Err(e) => return Err(e),
            }
        }

        let mut written = Vec::with_capacity(fetched.len());
        for (path, local, content) in fetched {
            write_creating_parents(&path, content)
                .await
                .map_err(|e| SyncError::io(&path, &e))?;
            tracing::info!(path = %local, "Wrote asset");
            written.push(local.to_string());
        }

        cache.write(&config.version).await?;

        let post_sync = match &config.post_sync {
            Some(command) => Some(run_post_sync(command, project_root).await),
            None => None,
        };

        tracing::info!(
            version = %config.version,
            written = written.len(),
            skipped = skipped.len(),
            "Sync complete"
        );
        Ok(SyncOutcome::Synced { version: config.version.clone(), written, skipped, post_sync })
    }
}

fn plan_for(config: &ConsumerConfig) -> SyncPlan {
    SyncPlan {
        repo: config.repo.clone(),
        version: config.version.clone(),
        files: config
            .files
            .iter()
            .map(|(asset, path)| PlannedFile { asset: asset.clone(), path: path.clone() })
            .collect(),
    }
}

async fn any_output_exists(config: &ConsumerConfig, project_root: &Path) -> bool {
    for local in config.files.values() {
        if tokio::fs::try_exists(project_root.join(local)).await.unwrap_or(false) {
            return true;
        }
    }
    false
}
