//! Classification of prompt lines into requests

use crate::{Error, Result};
use serde_json::Value;

const INSERT_KEYWORD: &str = "insert";

/// A request ready to be sent to the server
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Query text, sent verbatim
    Query(String),
    /// Insert document: `{"series": [[timestamp, value], ...], ...}`
    Insert(Value),
}

/// Request kind, used for logging and metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Query
    Query,
    /// Insert
    Insert,
}

impl RequestKind {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Insert => "insert",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Request {
    /// Classify a line entered at the prompt.
    ///
    /// `insert <json>` (keyword case-insensitive) becomes an insert; anything
    /// else is a query.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();

        let Some(document) = strip_insert_keyword(line) else {
            return Ok(Request::Query(line.to_string()));
        };

        let document: Value = serde_json::from_str(document)
            .map_err(|e| Error::Request(format!("insert expects a JSON document: {}", e)))?;
        validate_insert(&document)?;
        Ok(Request::Insert(document))
    }

    /// Kind of this request
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::Query(_) => RequestKind::Query,
            Request::Insert(_) => RequestKind::Insert,
        }
    }
}

/// Return the text after a leading `insert` keyword, if present.
fn strip_insert_keyword(line: &str) -> Option<&str> {
    let head = line.get(..INSERT_KEYWORD.len())?;
    if !head.eq_ignore_ascii_case(INSERT_KEYWORD) {
        return None;
    }
    let rest = &line[INSERT_KEYWORD.len()..];
    // "insertion" is not the keyword
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

fn validate_insert(document: &Value) -> Result<()> {
    let series = document
        .as_object()
        .ok_or_else(|| Error::Request("insert document must be a JSON object".into()))?;

    if series.is_empty() {
        return Err(Error::Request("insert document contains no series".into()));
    }

    for (name, points) in series {
        let points = points.as_array().ok_or_else(|| {
            Error::Request(format!("points for series '{}' must be an array", name))
        })?;
        let well_formed = points
            .iter()
            .all(|point| point.as_array().is_some_and(|pair| pair.len() == 2));
        if !well_formed {
            return Err(Error::Request(format!(
                "points for series '{}' must be [timestamp, value] pairs",
                name
            )));
        }
    }
    Ok(())
}
