//! Command-line interface components
//!
//! This module contains CLI-specific code for the Language Batch
//! application: argument parsing and command handlers.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigAction, ConfigArgs, GlobalArgs};
pub use commands::{
    build_batch, handle_all, handle_applets, handle_config, handle_languages, load_config,
};
