//! # Tokensmith Types
//!
//! Core models and error definitions for Tokensmith.
//!
//! - **`error`** - Typed error hierarchy for configuration, generation and sync
//! - **`models`** - Producer/consumer configuration, release metadata, results
//!
//! ## Architecture Role
//!
//! `tokensmith-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!        tokensmith-types (this crate)
//!                │
//!                ▼
//!         tokensmith-core
//!                │
//!                ▼
//!        tokensmith-server
//! ```

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{ConfigError, ErrorReport, GenerationError, Result, SyncError, TypedError};

// Re-export core model types
pub use models::{
    Artifacts, AssetLocator, ConsumerConfig, GenerationMode, GenerationResult, GeneratorSpec,
    PlannedFile, PostSyncStatus, ProducerConfig, ReleaseMetadata, SyncOptions, SyncOutcome,
    SyncPlan,
};
