//! On-demand generation for the interactive editor.
//!
//! Callers hand in token payloads; one worker task runs them strictly in
//! arrival order and remembers the last successful output.
//!
//! ```text
//! submit ─┐
//! submit ─┼─► mpsc (FIFO) ─► worker ─► scratch dir ─► GenerationEngine
//! submit ─┘                    │
//!          ◄── oneshot ────────┘  (last good artifacts on failure)
//! ```

mod service;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;

pub use service::{PendingGeneration, PreviewOptions, PreviewService, TokenFiles};
