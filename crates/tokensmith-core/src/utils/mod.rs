//! Shared filesystem helpers.

pub mod fs;
