//! Client for the SiriDB HTTP API

use super::{Client, Request, RequestKind};
use crate::connection::{ConnectionConfig, Endpoint, SslMode};
use crate::{Error, Result};
use futures::future::BoxFuture;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::Instrument;

/// Query used to check that an endpoint is alive and accepts our credentials
const PROBE_QUERY: &str = "show version";

/// SiriDB HTTP API client
///
/// Each request is a `POST` to `/query/<dbname>` or `/insert/<dbname>` on the
/// endpoint selected at connect time, authenticated with HTTP basic auth.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    endpoint: Endpoint,
    database: String,
    user: String,
    password: String,
    closed: bool,
}

impl HttpClient {
    /// Connect to the first endpoint of the server list that answers.
    ///
    /// Endpoints are probed once each, in order. Rejected credentials abort
    /// immediately since every node of a cluster shares them.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> siridb_prompt::Result<()> {
    /// use siridb_prompt::{ConnectionConfig, Endpoint, HttpClient};
    ///
    /// let config = ConnectionConfig::builder("iris", "iris", "siri")
    ///     .server(Endpoint::new("localhost", 9020))
    ///     .build()?;
    /// let client = HttpClient::connect(&config).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let http = build_http_client(config)?;
        let scheme = config.sslmode.scheme();
        let mut failures = Vec::new();

        for endpoint in &config.servers {
            let client = Self {
                http: http.clone(),
                base_url: endpoint.base_url(scheme),
                endpoint: endpoint.clone(),
                database: config.database.clone(),
                user: config.user.clone(),
                password: config.password.clone(),
                closed: false,
            };

            let probe = Request::Query(PROBE_QUERY.to_string());
            match client.send(&probe).await {
                Ok(_) => {
                    crate::metrics::counters::connection_attempt("ok");
                    tracing::info!(%endpoint, database = %config.database, "connected");
                    return Ok(client);
                }
                Err(e @ Error::Auth(_)) => {
                    crate::metrics::counters::connection_attempt("auth");
                    return Err(e);
                }
                Err(e) => {
                    crate::metrics::counters::connection_attempt("error");
                    tracing::warn!(%endpoint, error = %e, "server unavailable");
                    failures.push(format!("{}: {}", endpoint, e));
                }
            }
        }

        Err(Error::Connection(failures.join("; ")))
    }

    /// Endpoint this client is bound to
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Database name
    pub fn database(&self) -> &str {
        &self.database
    }

    fn url(&self, kind: RequestKind) -> String {
        format!("{}/{}/{}", self.base_url, kind.as_str(), self.database)
    }

    async fn send(&self, request: &Request) -> Result<Value> {
        let kind = request.kind();
        let body = match request {
            Request::Query(q) => json!({ "q": q }),
            Request::Insert(document) => document.clone(),
        };

        let started = Instant::now();
        let response = self
            .http
            .post(self.url(kind))
            .basic_auth(&self.user, Some(&self.password))
            .json(&body)
            .send()
            .instrument(tracing::debug_span!("request", %kind, endpoint = %self.endpoint))
            .await?;

        let status = response.status();
        let text = response.text().await?;
        crate::metrics::histograms::request_duration(kind.as_str(), started.elapsed());
        tracing::debug!(%status, bytes = text.len(), "response received");

        match status {
            s if s.is_success() => parse_body(&text),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(Error::Auth(error_message(status, &text)))
            }
            _ => Err(Error::Query(error_message(status, &text))),
        }
    }
}

impl Client for HttpClient {
    fn execute<'a>(&'a mut self, request: &'a Request) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            if self.closed {
                return Err(Error::InvalidState {
                    expected: "open client".into(),
                    actual: "closed".into(),
                });
            }
            self.send(request).await
        })
    }

    fn close(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            // The HTTP API is stateless; pooled sockets go with the client.
            self.closed = true;
            tracing::debug!(endpoint = %self.endpoint, "client closed");
            Ok(())
        })
    }
}

fn build_http_client(config: &ConnectionConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("siridb-prompt/", env!("CARGO_PKG_VERSION")))
        .tcp_keepalive(config.keepalive);

    match config.sslmode {
        SslMode::Disable => {}
        SslMode::Require => {
            builder = builder.danger_accept_invalid_certs(true);
        }
        SslMode::VerifyFull => {
            if let Some(tls) = config.to_tls_config()? {
                builder = builder.use_preconfigured_tls((*tls.client_config()).clone());
            }
        }
    }

    Ok(builder.build()?)
}

fn parse_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

/// Extract a readable message from an error response.
fn error_message(status: StatusCode, text: &str) -> String {
    if let Ok(Value::Object(body)) = serde_json::from_str::<Value>(text) {
        if let Some(Value::String(msg)) = body.get("error_msg") {
            return msg.clone();
        }
    }

    let text = text.trim();
    if text.is_empty() {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string())
    } else {
        text.to_string()
    }
}
