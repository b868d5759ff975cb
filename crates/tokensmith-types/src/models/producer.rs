//! Producer configuration (`tokensmith.json`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a single entry in the `generators` map is resolved.
///
/// On disk this is `true`, `false` or a plugin path string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGeneratorSpec", into = "RawGeneratorSpec")]
pub enum GeneratorSpec {
    /// Skipped entirely
    Disabled,
    /// Resolved against the registry's built-in generators by name
    Builtin,
    /// Executable plugin, path relative to the config file's directory
    Plugin(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawGeneratorSpec {
    Toggle(bool),
    Path(String),
}

impl From<RawGeneratorSpec> for GeneratorSpec {
    fn from(raw: RawGeneratorSpec) -> Self {
        match raw {
            RawGeneratorSpec::Toggle(false) => Self::Disabled,
            RawGeneratorSpec::Toggle(true) => Self::Builtin,
            RawGeneratorSpec::Path(path) => Self::Plugin(path),
        }
    }
}

impl From<GeneratorSpec> for RawGeneratorSpec {
    fn from(spec: GeneratorSpec) -> Self {
        match spec {
            GeneratorSpec::Disabled => Self::Toggle(false),
            GeneratorSpec::Builtin => Self::Toggle(true),
            GeneratorSpec::Plugin(path) => Self::Path(path),
        }
    }
}

/// Producer configuration. Immutable for the duration of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerConfig {
    /// Token source directory, relative to the config file
    #[serde(rename = "tokens")]
    pub tokens_path: String,
    /// Artifact output directory, relative to the config file
    #[serde(rename = "output")]
    pub output_path: String,
    /// Generator entries in file order; order only affects logging
    #[serde(default)]
    pub generators: IndexMap<String, GeneratorSpec>,
}

impl ProducerConfig {
    /// Profile used by the interactive editor preview: tailwind only.
    pub fn preview_profile() -> Self {
        let mut generators = IndexMap::new();
        generators.insert("tailwind".to_string(), GeneratorSpec::Builtin);
        Self { tokens_path: "tokens".to_string(), output_path: "out".to_string(), generators }
    }

    /// Check structural rules serde cannot express.
    pub fn check(&self) -> Result<(), String> {
        if self.tokens_path.trim().is_empty() {
            return Err("`tokens` must not be empty".to_string());
        }
        if self.output_path.trim().is_empty() {
            return Err("`output` must not be empty".to_string());
        }
        for (name, spec) in &self.generators {
            if !is_generator_name(name) {
                return Err(format!("generator name '{name}' is not a valid identifier"));
            }
            if matches!(spec, GeneratorSpec::Plugin(path) if path.trim().is_empty()) {
                return Err(format!("generator '{name}' has an empty plugin path"));
            }
        }
        Ok(())
    }
}

/// `^[A-Za-z][A-Za-z0-9_-]*$`
pub fn is_generator_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        },
        _ => false,
    }
}

/// Whether a generation run may touch the caller-visible output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    #[default]
    Write,
    DryRun,
}
