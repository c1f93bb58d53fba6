//! Command-line argument definitions.

use clap::{Parser, ValueEnum};

use crate::connection::SslMode;

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Everything, including request tracing
    Debug,
    /// Connection events
    Info,
    /// Warnings only (default)
    Warning,
    /// Errors only
    Error,
    /// Fatal errors only
    Critical,
}

impl LogLevel {
    /// `EnvFilter` directive for this level
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            // tracing has no level above error
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

/// Manage, query or insert data into a SiriDB database.
#[derive(Parser, Debug)]
#[command(name = "siridb-prompt", disable_version_flag = true)]
pub struct Args {
    /// User for login. If user is not given it's asked from the tty.
    #[arg(short = 'u', long, env = "SIRIDB_USER")]
    pub user: Option<String>,

    /// Password to use when connecting to server. If password is not given it's asked from the tty.
    #[arg(short = 'p', long, env = "SIRIDB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database name to connect to. If dbname is not given it's asked from the tty.
    #[arg(short = 'd', long, env = "SIRIDB_DBNAME")]
    pub dbname: Option<String>,

    /// Server(s) to connect to, separated with commas or spaces.
    /// Each server looks like <hostname_or_ipv4_or_[ipv6]>:<port>
    #[arg(
        short = 's',
        long,
        env = "SIRIDB_SERVERS",
        default_value = "localhost:9000"
    )]
    pub servers: String,

    /// Set the log level
    #[arg(short = 'l', long, value_enum, default_value_t = LogLevel::Warning)]
    pub log_level: LogLevel,

    /// TLS mode: disable, require or verify-full
    #[arg(long, env = "SIRIDB_SSL_MODE", default_value_t = SslMode::Disable)]
    pub ssl_mode: SslMode,

    /// CA certificate (PEM) used with --ssl-mode verify-full
    #[arg(long, env = "SIRIDB_CA_CERT", value_name = "FILE")]
    pub ca_cert: Option<String>,

    /// Do not read or write the history file
    #[arg(long)]
    pub no_history: bool,

    /// Print version information and exit
    #[arg(short = 'v', long)]
    pub version: bool,
}
