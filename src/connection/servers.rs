//! Server list parsing
//!
//! Accepts one or more endpoints separated by commas and/or whitespace:
//! * `host:port`
//! * `10.0.0.1:9000`
//! * `[::1]:9000`

use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;
use thiserror::Error;

/// Example shown to the user when the server list is rejected
pub const SERVER_LIST_HINT: &str = "server1.local:9000,[::1]:9000 ...";

/// Reason a server list was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerListError {
    /// No endpoint at all
    #[error("no servers given")]
    Empty,

    /// Token has no `:port` suffix
    #[error("missing port in '{0}'")]
    MissingPort(String),

    /// Port is not a number in 1..=65535
    #[error("invalid port in '{0}'")]
    InvalidPort(String),

    /// `[` and `]` do not pair up around an IPv6 literal
    #[error("unbalanced brackets in '{0}'")]
    UnbalancedBrackets(String),

    /// Host part is empty or malformed
    #[error("invalid host in '{0}'")]
    InvalidHost(String),
}

/// A single cluster node to connect to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// DNS name, IPv4 literal or unbracketed IPv6 literal
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl Endpoint {
    /// Create an endpoint without validation
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Whether the host is an IPv6 literal
    pub fn is_ipv6(&self) -> bool {
        self.host.contains(':')
    }

    /// Base URL for this endpoint (`http://host:port`)
    pub fn base_url(&self, scheme: &str) -> String {
        format!("{}://{}", scheme, self)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ipv6() {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = ServerListError;

    fn from_str(token: &str) -> std::result::Result<Self, Self::Err> {
        let (host, port) = if let Some(rest) = token.strip_prefix('[') {
            let (host, after) = rest
                .split_once(']')
                .ok_or_else(|| ServerListError::UnbalancedBrackets(token.to_string()))?;
            if host.contains('[') || after.contains(']') {
                return Err(ServerListError::UnbalancedBrackets(token.to_string()));
            }
            if host.parse::<Ipv6Addr>().is_err() {
                return Err(ServerListError::InvalidHost(token.to_string()));
            }
            let port = match after.strip_prefix(':') {
                Some(port) => port,
                None if after.is_empty() => {
                    return Err(ServerListError::MissingPort(token.to_string()))
                }
                None => return Err(ServerListError::UnbalancedBrackets(token.to_string())),
            };
            (host, port)
        } else {
            if token.contains('[') || token.contains(']') {
                return Err(ServerListError::UnbalancedBrackets(token.to_string()));
            }
            let (host, port) = token
                .rsplit_once(':')
                .ok_or_else(|| ServerListError::MissingPort(token.to_string()))?;
            // A bare IPv6 literal is ambiguous without brackets
            if host.is_empty() || host.contains(':') {
                return Err(ServerListError::InvalidHost(token.to_string()));
            }
            (host, port)
        };

        Ok(Self {
            host: host.to_string(),
            port: parse_port(token, port)?,
        })
    }
}

fn parse_port(token: &str, port: &str) -> std::result::Result<u16, ServerListError> {
    if port.is_empty() {
        return Err(ServerListError::MissingPort(token.to_string()));
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ServerListError::InvalidPort(token.to_string()));
    }
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(ServerListError::InvalidPort(token.to_string())),
        Ok(port) => Ok(port),
    }
}

/// Parse a comma and/or whitespace separated server list.
///
/// The order of the input is preserved. Any malformed token rejects the
/// whole list.
///
/// # Examples
///
/// ```
/// use siridb_prompt::connection::{parse_server_list, Endpoint};
///
/// let servers = parse_server_list("localhost:9000, [::1]:9001").unwrap();
/// assert_eq!(servers, vec![Endpoint::new("localhost", 9000), Endpoint::new("::1", 9001)]);
/// ```
pub fn parse_server_list(s: &str) -> std::result::Result<Vec<Endpoint>, ServerListError> {
    let servers = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(Endpoint::from_str)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if servers.is_empty() {
        return Err(ServerListError::Empty);
    }
    Ok(servers)
}
