//! Prelude module for Language Batch Library
//!
//! This module re-exports the most commonly used items from the library,
//! providing a convenient way to import everything needed for typical usage
//! with a single `use language_batch::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use language_batch::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None).await?;
//!     let api = Arc::new(HttpApiClient::new(&config.api.to_runtime_config())?);
//!     let cache = Arc::new(FileCacheStore::new(config.cache_config()).await?);
//!
//!     LanguageBatch::new(api, cache, Arc::new(config.system))
//!         .generate_applet_language_xml_files()
//!         .await?;
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, BatchError, Result};

// Essential app components
pub use crate::app::{
    ApiClient, ApiResponse, CacheConfig, CacheStore, CaptureOutput, ClientConfig, ConsoleOutput,
    FileCacheStore, HttpApiClient, LanguageBatch, OutputSink,
};

// Configuration
pub use crate::config::{AppConfig, SystemConfig, TranslatedApplications};

// Commonly used constants
pub use crate::constants::{ENV_API_URL, ENV_ROOT, USER_AGENT};

// Standard library re-exports that are commonly needed
pub use std::path::{Path, PathBuf};
pub use std::sync::Arc;

pub use tokio;
