//! Core application logic for Language Batch
//!
//! This module contains the language API client, response validation, the
//! cache store and the batch workflows that tie them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use language_batch::app::{FileCacheStore, HttpApiClient, LanguageBatch};
//! use language_batch::config::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load(None).await?;
//! let api = HttpApiClient::new(&config.api.to_runtime_config())?;
//! let cache = FileCacheStore::new(config.cache_config()).await?;
//!
//! let batch = LanguageBatch::new(Arc::new(api), Arc::new(cache), Arc::new(config.system));
//! batch.generate_language_files().await?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod cache;
pub mod client;
pub mod output;
pub mod registry;
pub mod response;
pub mod validator;

// Re-export main public API
pub use batch::LanguageBatch;
pub use cache::{CacheConfig, CacheStore, FileCacheStore};
pub use client::{ApiClient, ClientConfig, HttpApiClient};
pub use output::{CaptureOutput, ConsoleOutput, OutputSink};
pub use registry::{Applet, APPLETS};
pub use response::ApiResponse;
pub use validator::validate_response;
