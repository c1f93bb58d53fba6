//! Database client seam
//!
//! The prompt loop talks to the database only through the [`Client`] trait.
//! [`HttpClient`] implements it on top of the SiriDB HTTP API; tests plug in
//! scripted doubles.

mod http;
mod request;

pub use http::HttpClient;
pub use request::{Request, RequestKind};

use crate::Result;
use futures::future::BoxFuture;
use serde_json::Value;

/// A connected database handle
pub trait Client {
    /// Run one request and return the server's response document
    fn execute<'a>(&'a mut self, request: &'a Request) -> BoxFuture<'a, Result<Value>>;

    /// Release the handle. Further `execute` calls fail.
    fn close(&mut self) -> BoxFuture<'_, Result<()>>;
}
