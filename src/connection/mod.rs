//! Connection parameters
//!
//! This module handles:
//! * Server list parsing (`host:port`, bracketed IPv6)
//! * Credentials and connection options
//! * TLS configuration

mod config;
mod servers;
mod tls;

pub use config::{ConnectionConfig, ConnectionConfigBuilder};
pub use servers::{parse_server_list, Endpoint, ServerListError, SERVER_LIST_HINT};
pub use tls::{SslMode, TlsConfig, TlsConfigBuilder};
