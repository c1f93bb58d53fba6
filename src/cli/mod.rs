//! Command-line front-end
//!
//! This module handles:
//! - Argument parsing via clap
//! - Interactive credential prompting
//! - Log output setup

mod args;
mod credentials;
mod logging;

pub use args::{Args, LogLevel};
pub use credentials::{resolve_credentials, CredentialSource, Credentials, TerminalCredentials};
pub use logging::{init_logging, LevelPrefix};

/// Normal exit, or `--version`
pub const EXIT_OK: i32 = 0;

/// Invalid server list, forced exit or any other fatal error
pub const EXIT_FAILURE: i32 = 1;

/// CTRL+C while idle or while entering credentials
pub const EXIT_INTERRUPTED: i32 = 130;

/// Message printed when the user quits with CTRL+C
pub const INTERRUPTED_MESSAGE: &str = "You pressed CTRL+C, quit...";
