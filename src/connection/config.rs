//! Connection configuration

use super::servers::Endpoint;
use super::tls::{SslMode, TlsConfig};
use crate::{Error, Result};
use std::time::Duration;

/// Connection configuration
///
/// Stores credentials, the ordered server list and transport options.
/// Use `ConnectionConfig::builder()` to assemble one.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Database name
    pub database: String,
    /// Username
    pub user: String,
    /// Password
    pub password: String,
    /// Servers, tried in order when connecting
    pub servers: Vec<Endpoint>,
    /// TLS mode
    pub sslmode: SslMode,
    /// Path to a custom CA certificate (PEM), used with `SslMode::VerifyFull`
    pub ca_cert_path: Option<String>,
    /// TCP keepalive interval (default: none)
    pub keepalive: Option<Duration>,
}

impl ConnectionConfig {
    /// Create a builder
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let config = ConnectionConfig::builder("iris", "siri", "iris")
    ///     .server(Endpoint::new("localhost", 9020))
    ///     .keepalive(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn builder(
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> ConnectionConfigBuilder {
        ConnectionConfigBuilder {
            database: database.into(),
            user: user.into(),
            password: password.into(),
            servers: Vec::new(),
            sslmode: SslMode::default(),
            ca_cert_path: None,
            keepalive: None,
        }
    }

    /// Build the TLS configuration for verified modes.
    ///
    /// Returns `None` unless `sslmode` is `VerifyFull`.
    pub fn to_tls_config(&self) -> Result<Option<TlsConfig>> {
        if !self.sslmode.requires_verification() {
            return Ok(None);
        }

        let mut builder = TlsConfig::builder();
        if let Some(ref ca_path) = self.ca_cert_path {
            builder = builder.ca_cert_path(ca_path);
        }
        Ok(Some(builder.build()?))
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("servers", &self.servers)
            .field("sslmode", &self.sslmode)
            .field("ca_cert_path", &self.ca_cert_path)
            .field("keepalive", &self.keepalive)
            .finish()
    }
}

/// Builder for creating `ConnectionConfig`
#[derive(Clone)]
pub struct ConnectionConfigBuilder {
    database: String,
    user: String,
    password: String,
    servers: Vec<Endpoint>,
    sslmode: SslMode,
    ca_cert_path: Option<String>,
    keepalive: Option<Duration>,
}

impl ConnectionConfigBuilder {
    /// Append a server
    pub fn server(mut self, endpoint: Endpoint) -> Self {
        self.servers.push(endpoint);
        self
    }

    /// Append several servers, keeping their order
    pub fn servers(mut self, endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        self.servers.extend(endpoints);
        self
    }

    /// Set the TLS mode
    pub fn sslmode(mut self, mode: SslMode) -> Self {
        self.sslmode = mode;
        self
    }

    /// Set a custom CA certificate file
    pub fn ca_cert_path(mut self, path: impl Into<String>) -> Self {
        self.ca_cert_path = Some(path.into());
        self
    }

    /// Set TCP keepalive interval
    pub fn keepalive(mut self, interval: Duration) -> Self {
        self.keepalive = Some(interval);
        self
    }

    /// Build the configuration
    ///
    /// Fails when no server was given or the database name is empty.
    pub fn build(self) -> Result<ConnectionConfig> {
        if self.servers.is_empty() {
            return Err(Error::Config("at least one server is required".into()));
        }
        if self.database.is_empty() {
            return Err(Error::Config("database name is required".into()));
        }
        if self.ca_cert_path.is_some() && !self.sslmode.requires_verification() {
            tracing::warn!("--ca-cert is ignored unless ssl mode is verify-full");
        }

        Ok(ConnectionConfig {
            database: self.database,
            user: self.user,
            password: self.password,
            servers: self.servers,
            sslmode: self.sslmode,
            ca_cert_path: self.ca_cert_path,
            keepalive: self.keepalive,
        })
    }
}
