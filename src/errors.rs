//! Error types for Language Batch
//!
//! This module defines the error types for every component of the application.
//! The batch workflows only ever surface [`BatchError`]; the lower-level
//! [`ApiError`] and [`CacheError`] values are kept as the error source so the
//! full chain can be reported by the CLI.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the response validator
///
/// These never leave the batch orchestrator on their own; they are always
/// wrapped into a [`BatchError`] carrying the workflow context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response at all, or a response without a status field
    #[error("Error during the API call")]
    CallFailed,

    /// The API answered with a status other than `OK`
    #[error("Wrong response: {details}")]
    WrongResponse { details: String },

    /// The API answered `OK` but without usable content
    #[error("Wrong content!")]
    WrongContent,
}

/// Cache store errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache directory not found or inaccessible
    #[error("Cache directory not accessible: {path}")]
    DirectoryNotAccessible { path: PathBuf },

    /// Cache path is not a valid location inside the cache root
    #[error("Invalid cache path: {path}. {reason}")]
    InvalidPath { path: String, reason: String },

    /// Writing the temporary file failed
    #[error("Failed to write cache file: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic rename of the temporary file failed
    #[error("Atomic file operation failed: could not rename {temp_path} to {final_path}")]
    AtomicOperationFailed {
        temp_path: PathBuf,
        final_path: PathBuf,
    },

    /// A store that is not backed by the local filesystem refused the write
    ///
    /// Such stores have no `io::Error` to report; [`FileCacheStore`] never
    /// returns this variant.
    ///
    /// [`FileCacheStore`]: crate::app::cache::FileCacheStore
    #[error("Cache store rejected write to {path}")]
    Rejected { path: String },
}

/// HTTP client construction errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Building the underlying HTTP client failed
    #[error("HTTP client setup failed")]
    Http(#[from] reqwest::Error),

    /// Invalid API base URL
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read or written
    #[error("Configuration file I/O failed: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Missing required configuration field
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// The platform has no per-user configuration directory
    #[error("Unable to determine the user configuration directory")]
    NoConfigDirectory,

    /// Configuration file already exists and overwrite was not requested
    #[error("Configuration file already exists: {path}. Use --force to overwrite")]
    AlreadyExists { path: PathBuf },
}

/// Stable failure kinds reported by the batch workflows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchErrorKind {
    /// A translation file, or an applet's language list, could not be fetched
    FailRetrievingFile,
    /// The cache store failed to persist a generated file
    FailSavingFile,
    /// An applet's per-language XML could not be fetched
    FailRetrievingLanguageForApplet,
    /// Applet language discovery succeeded but returned nothing
    NoAvailableLanguageForApplet,
}

impl BatchErrorKind {
    /// Stable identifier used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailRetrievingFile => "FAIL_RETRIEVING_FILE",
            Self::FailSavingFile => "FAIL_SAVING_FILE",
            Self::FailRetrievingLanguageForApplet => "FAIL_RETRIEVING_LANGUAGE_FOR_APPLET",
            Self::NoAvailableLanguageForApplet => "NO_AVAILABLE_LANGUAGE_FOR_APPLET",
        }
    }

    /// Stable numeric code
    pub fn code(&self) -> u8 {
        match self {
            Self::FailRetrievingFile => 1,
            Self::FailSavingFile => 2,
            Self::FailRetrievingLanguageForApplet => 3,
            Self::NoAvailableLanguageForApplet => 4,
        }
    }
}

impl fmt::Display for BatchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of the batch workflows
///
/// Each variant carries the unit of work that was being processed and keeps
/// the lower-level error as its source.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Fetching or validating a translation file failed
    #[error(
        "Error during API call when trying to retrieve the translation file for language: {language}"
    )]
    TranslationFile {
        language: String,
        #[source]
        source: ApiError,
    },

    /// Persisting a translation file failed
    #[error("Unable to generate language file: {path}")]
    SaveTranslationFile {
        path: String,
        #[source]
        source: CacheError,
    },

    /// Fetching or validating the language list of an applet failed
    #[error("Getting language for applet: ({applet}) was unsuccessful.")]
    AppletLanguages {
        applet: String,
        #[source]
        source: ApiError,
    },

    /// The applet has no languages to generate
    #[error("There is no available languages for the {applet} applet.")]
    NoAppletLanguages { applet: String },

    /// Fetching or validating one applet language XML failed
    #[error(
        "Getting language xml for applet: ({applet}) on language: ({language}) was unsuccessful."
    )]
    AppletLanguageFile {
        applet: String,
        language: String,
        #[source]
        source: ApiError,
    },

    /// Persisting an applet language XML failed
    #[error("Unable to save applet: ({applet}) language: ({language}) xml ({path})!")]
    SaveAppletFile {
        applet: String,
        language: String,
        path: String,
        #[source]
        source: CacheError,
    },
}

impl BatchError {
    /// Taxonomy kind of this failure
    pub fn kind(&self) -> BatchErrorKind {
        match self {
            BatchError::TranslationFile { .. } | BatchError::AppletLanguages { .. } => {
                BatchErrorKind::FailRetrievingFile
            }
            BatchError::SaveTranslationFile { .. } | BatchError::SaveAppletFile { .. } => {
                BatchErrorKind::FailSavingFile
            }
            BatchError::AppletLanguageFile { .. } => {
                BatchErrorKind::FailRetrievingLanguageForApplet
            }
            BatchError::NoAppletLanguages { .. } => BatchErrorKind::NoAvailableLanguageForApplet,
        }
    }

    /// Numeric taxonomy code of this failure
    pub fn code(&self) -> u8 {
        self.kind().code()
    }

    /// The validation error behind this failure, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            BatchError::TranslationFile { source, .. }
            | BatchError::AppletLanguages { source, .. }
            | BatchError::AppletLanguageFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Batch workflow error
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// Cache error
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// HTTP client error
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Batch(_) => "batch",
            AppError::Cache(_) => "cache",
            AppError::Client(_) => "client",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Validator result type alias
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Batch workflow result type alias
pub type BatchResult<T> = std::result::Result<T, BatchError>;

/// Cache result type alias
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Client result type alias
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
