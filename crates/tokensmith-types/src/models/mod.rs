//! Core domain models for Tokensmith.
//!
//! This module contains all shared data structures used across the Tokensmith workspace.

mod consumer;
mod producer;
mod release;
mod result;
mod sync;

// Re-export all models
pub use consumer::ConsumerConfig;
pub use producer::{is_generator_name, GenerationMode, GeneratorSpec, ProducerConfig};
pub use release::{AssetLocator, ReleaseMetadata};
pub use result::{Artifacts, GenerationResult};
pub use sync::{PlannedFile, PostSyncStatus, SyncOptions, SyncOutcome, SyncPlan};
