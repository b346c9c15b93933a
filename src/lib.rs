//! Language Batch Library
//!
//! Regenerates the cached language resources of a multi-application system:
//! per-application translation files and applet language XMLs, fetched from
//! the language API and written atomically below the system cache directory.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
