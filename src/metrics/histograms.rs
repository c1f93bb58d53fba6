//! Histogram helpers

use super::labels;
use std::time::Duration;

/// Record the round-trip time of one request
pub fn request_duration(kind: &'static str, elapsed: Duration) {
    metrics::histogram!(labels::REQUEST_DURATION, "kind" => kind).record(elapsed.as_secs_f64());
}
