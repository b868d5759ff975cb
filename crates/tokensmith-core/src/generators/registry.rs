use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokensmith_types::{GenerationError, GeneratorSpec, ProducerConfig};

use super::builtin;
use super::plugin::ProcessPlugin;
use super::Generator;

/// Maps generator names to runnable units.
///
/// Built-ins are looked up by name; plugin entries are loaded from disk on
/// every resolve so edits to a plugin are picked up by the next run.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    builtins: HashMap<String, Arc<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Registry with no built-ins. Mostly useful for tests.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for generator in builtin::all() {
            registry.register(generator);
        }
        registry
    }

    /// Add or replace a built-in under its own name.
    pub fn register(&mut self, generator: Arc<dyn Generator>) {
        self.builtins.insert(generator.name().to_string(), generator);
    }

    pub fn builtin_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builtins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve a single entry. `Ok(None)` means the entry is disabled.
    pub fn resolve_entry(
        &self,
        name: &str,
        spec: &GeneratorSpec,
        config_dir: &Path,
    ) -> Result<Option<Arc<dyn Generator>>, GenerationError> {
        match spec {
            GeneratorSpec::Disabled => Ok(None),
            GeneratorSpec::Builtin => self
                .builtins
                .get(name)
                .cloned()
                .map(Some)
                .ok_or_else(|| GenerationError::UnknownBuiltinGenerator { name: name.to_string() }),
            GeneratorSpec::Plugin(path) => {
                let plugin = ProcessPlugin::load(name, &config_dir.join(path))?;
                Ok(Some(Arc::new(plugin)))
            },
        }
    }

    /// Resolve every enabled entry in config order. Fails before anything runs.
    pub fn resolve(
        &self,
        config: &ProducerConfig,
        config_dir: &Path,
    ) -> Result<Vec<Arc<dyn Generator>>, GenerationError> {
        let mut units = Vec::new();
        for (name, spec) in &config.generators {
            if let Some(unit) = self.resolve_entry(name, spec, config_dir)? {
                units.push(unit);
            } else {
                tracing::debug!(generator = %name, "Generator disabled, skipping");
            }
        }
        Ok(units)
    }
}
