//! TLS configuration for HTTPS connections to SiriDB.
//!
//! TLS is recommended for all non-local connections to prevent credential
//! interception, since credentials travel with every request.

use crate::{Error, Result};
use rustls::{ClientConfig, RootCertStore};
use rustls_pemfile::Item;
use rustls_pki_types::CertificateDer;
use std::fs;
use std::sync::Arc;

/// TLS mode used for the HTTP API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SslMode {
    /// No TLS (plain `http://`)
    #[default]
    Disable,
    /// TLS required, but the server certificate is not verified
    Require,
    /// TLS required, certificate must chain to a trusted CA and match the hostname
    VerifyFull,
}

impl SslMode {
    /// Whether this mode verifies the server certificate
    pub fn requires_verification(&self) -> bool {
        matches!(self, Self::VerifyFull)
    }

    /// URL scheme for this mode
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Disable => "http",
            Self::Require | Self::VerifyFull => "https",
        }
    }
}

impl std::fmt::Display for SslMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disable => write!(f, "disable"),
            Self::Require => write!(f, "require"),
            Self::VerifyFull => write!(f, "verify-full"),
        }
    }
}

impl std::str::FromStr for SslMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "disable" => Ok(Self::Disable),
            "require" => Ok(Self::Require),
            "verify-full" => Ok(Self::VerifyFull),
            _ => Err(Error::Config(format!(
                "invalid ssl mode '{}': expected disable, require, or verify-full",
                s
            ))),
        }
    }
}

/// TLS configuration for verified connections.
///
/// Server certificates are validated against the system roots, falling back
/// to the bundled webpki roots when the system store is empty, or against a
/// custom CA file.
///
/// # Examples
///
/// ```ignore
/// use siridb_prompt::connection::TlsConfig;
///
/// // System roots
/// let tls = TlsConfig::builder().build()?;
///
/// // Custom CA certificate
/// let tls = TlsConfig::builder()
///     .ca_cert_path("/etc/siridb/ca.pem")
///     .build()?;
/// ```
#[derive(Clone)]
pub struct TlsConfig {
    /// Path to CA certificate file (None = use system roots)
    ca_cert_path: Option<String>,
    /// Compiled rustls ClientConfig
    client_config: Arc<ClientConfig>,
}

impl TlsConfig {
    /// Create a new TLS configuration builder.
    pub fn builder() -> TlsConfigBuilder {
        TlsConfigBuilder::default()
    }

    /// Get the rustls ClientConfig for this TLS configuration.
    pub fn client_config(&self) -> Arc<ClientConfig> {
        self.client_config.clone()
    }

    /// Path of the custom CA file, if any
    pub fn ca_cert_path(&self) -> Option<&str> {
        self.ca_cert_path.as_deref()
    }
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("ca_cert_path", &self.ca_cert_path)
            .field("client_config", &"<ClientConfig>")
            .finish()
    }
}

/// Builder for TLS configuration.
#[derive(Debug, Default)]
pub struct TlsConfigBuilder {
    ca_cert_path: Option<String>,
}

impl TlsConfigBuilder {
    /// Set the path to a custom CA certificate file (PEM format).
    ///
    /// If not set, system root certificates will be used.
    pub fn ca_cert_path(mut self, path: impl Into<String>) -> Self {
        self.ca_cert_path = Some(path.into());
        self
    }

    /// Build the TLS configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - CA certificate file cannot be read
    /// - CA certificate is invalid PEM or contains no certificate
    pub fn build(self) -> Result<TlsConfig> {
        let root_store = match &self.ca_cert_path {
            Some(ca_path) => {
                let mut store = RootCertStore::empty();
                store.add_parsable_certificates(load_pem_certs(ca_path)?);
                store
            }
            None => system_roots(),
        };

        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let client_config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| Error::Config(format!("TLS setup failed: {}", e)))?
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Ok(TlsConfig {
            ca_cert_path: self.ca_cert_path,
            client_config: Arc::new(client_config),
        })
    }
}

/// System root certificates, or the bundled webpki roots if none load.
fn system_roots() -> RootCertStore {
    let result = rustls_native_certs::load_native_certs();

    let mut store = RootCertStore::empty();
    store.add_parsable_certificates(result.certs);

    if store.is_empty() {
        tracing::debug!(
            errors = result.errors.len(),
            "no system root certificates, using bundled roots"
        );
        store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }
    store
}

/// Load every certificate from a PEM file.
fn load_pem_certs(path: &str) -> Result<Vec<CertificateDer<'static>>> {
    let data = fs::read(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read CA certificate file '{}': {}",
            path, e
        ))
    })?;

    let mut reader = std::io::Cursor::new(&data);
    let mut certs = Vec::new();

    loop {
        match rustls_pemfile::read_one(&mut reader) {
            Ok(Some(Item::X509Certificate(cert))) => certs.push(cert),
            // Skip non-certificate items (private keys, etc.)
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(_) => {
                return Err(Error::Config(format!(
                    "Failed to parse CA certificate from '{}'",
                    path
                )));
            }
        }
    }

    if certs.is_empty() {
        return Err(Error::Config(format!(
            "No valid certificates found in '{}'",
            path
        )));
    }
    Ok(certs)
}
