//! # Tokensmith Core
//!
//! Generation, release sync and on-demand preview for design tokens.
//!
//! ```text
//! tokensmith-core/src/
//! ├── tokens/      # TokenTree, flattening, reference rendering
//! ├── generators/  # Generator trait, built-ins, process plugins, engine
//! ├── release/     # ReleaseStore trait + GitHub Releases client
//! ├── sync/        # SyncEngine, SyncCache, post-sync hook
//! ├── preview/     # Single-flight on-demand generation worker
//! ├── config.rs    # tokensmith.json / tokensmith.sync.json loading
//! └── utils/       # Filesystem helpers
//! ```

#![allow(
    clippy::significant_drop_tightening,
    reason = "Mutex guards in tests are held across short assertion blocks"
)]
#![allow(clippy::map_err_ignore, reason = "Error context is provided in the replacement message")]
#![allow(clippy::implicit_clone, reason = "Explicit .clone() vs .to_string() is stylistic")]
// Test-only lints: allow panic!, indexing, etc. in test code
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::indexing_slicing,
        clippy::assertions_on_result_states
    )
)]

pub mod config;
pub mod generators;
pub mod preview;
pub mod release;
pub mod sync;
pub mod tokens;
pub mod utils;

// Re-export commonly used types
pub use config::{load_consumer_config, load_producer_config, Loaded};
pub use generators::{
    Generator, GeneratorContext, GenerationEngine, GenerationReport, GenerationRequest,
    GeneratorRegistry,
};
pub use preview::{PreviewOptions, PreviewService};
pub use release::{GitHubReleaseClient, ReleaseStore};
pub use sync::{SyncCache, SyncEngine};
pub use tokens::{TokenSet, TokenTree};
