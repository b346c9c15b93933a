//! Command-line argument parsing for Language Batch
//!
//! This module defines the CLI structure using clap derive macros. The
//! workflow commands regenerate cache files; `config` manages the
//! configuration file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::LoggingConfig;

/// Language Batch - Regenerate cached language files
#[derive(Parser, Debug)]
#[command(
    name = "language_batch",
    version,
    about = "Regenerate cached translation files and applet language XMLs",
    long_about = "Fetches translation files and applet language XMLs from the language API and writes them to the system cache.
Processing stops at the first failure and the process exits with a non-zero status."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// System root directory (files are written to <DIR>/cache)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Language API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the translation file of every configured application
    Languages,

    /// Generate the language XMLs of every registered applet
    Applets,

    /// Generate translation files, then applet language XMLs
    All,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,

        /// Where to write the file (defaults to the user config directory)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,
    },

    /// Print the effective configuration
    Show,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        self.log_level_override().unwrap_or(tracing::Level::WARN)
    }

    /// Logging level forced by a verbosity flag, if any
    pub fn log_level_override(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }

    /// Logging level to run with: verbosity flags first, then the
    /// configured `logging.level`, then the built-in default
    pub fn effective_log_level(&self, configured: Option<&LoggingConfig>) -> tracing::Level {
        self.log_level_override()
            .or_else(|| configured.and_then(|logging| logging.level().ok()))
            .unwrap_or_else(|| self.log_level())
    }
}
