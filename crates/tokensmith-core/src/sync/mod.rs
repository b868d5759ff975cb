//! Consumer-side release sync.
//!
//! ```text
//! tokensmith.sync.json ──► SyncEngine ──► ReleaseStore (metadata, assets)
//!                              │
//!                              ├──► consumer files
//!                              ├──► .tokensmith/synced-version (after all writes)
//!                              └──► postSync hook
//! ```

mod cache;
mod engine;
mod hook;

pub use cache::{SyncCache, CACHE_DIR, CACHE_FILE};
pub use engine::SyncEngine;
pub use hook::run_post_sync;
