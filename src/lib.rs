//! siridb-prompt: an interactive prompt for SiriDB
//!
//! The crate is split into:
//! * `connection`: server list parsing, connection parameters and TLS
//! * `client`: the `Client` seam and the HTTP API adapter behind it
//! * `prompt`: the read-dispatch-print loop and its interrupt handling
//! * `cli`: argument parsing, credential prompting and logging setup

#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod connection;
pub mod error;
pub mod metrics;
pub mod prompt;
pub mod version;

pub use client::{Client, HttpClient, Request};
pub use connection::{parse_server_list, ConnectionConfig, Endpoint};
pub use error::{Error, Result};
pub use prompt::{LoopOutcome, PromptLoop};
