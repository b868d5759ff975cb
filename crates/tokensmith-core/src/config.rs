//! Loading producer and consumer configuration files.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use validator::Validate;

use tokensmith_types::{ConfigError, ConsumerConfig, ProducerConfig};

pub const PRODUCER_CONFIG_FILE: &str = "tokensmith.json";
pub const CONSUMER_CONFIG_FILE: &str = "tokensmith.sync.json";

/// A config together with the directory its relative paths resolve against.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub config: T,
    pub path: PathBuf,
    pub base_dir: PathBuf,
}

impl Loaded<ProducerConfig> {
    pub fn tokens_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.tokens_path)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.output_path)
    }
}

pub async fn load_producer_config(path: &Path) -> Result<Loaded<ProducerConfig>, ConfigError> {
    let loaded: Loaded<ProducerConfig> = load_json(path).await?;
    loaded.config.check().map_err(|message| ConfigError::invalid(path, message))?;
    Ok(loaded)
}

pub async fn load_consumer_config(path: &Path) -> Result<Loaded<ConsumerConfig>, ConfigError> {
    let loaded: Loaded<ConsumerConfig> = load_json(path).await?;
    loaded.config.validate().map_err(|e| ConfigError::invalid(path, e.to_string()))?;
    Ok(loaded)
}

async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Loaded<T>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::not_found(path));
        },
        Err(e) => return Err(ConfigError::invalid(path, e.to_string())),
    };

    let config: T =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(path, &e))?;

    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let base_dir = absolute.parent().map(Path::to_path_buf).unwrap_or_default();

    tracing::debug!(path = %absolute.display(), "Loaded config");
    Ok(Loaded { config, path: absolute, base_dir })
}
