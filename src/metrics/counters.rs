//! Counter helpers

use super::labels;

/// Record a finished request; `status` is `ok`, `abandoned` or an error category
pub fn request_completed(kind: &'static str, status: &'static str) {
    metrics::counter!(labels::REQUESTS_TOTAL, "kind" => kind, "status" => status).increment(1);
}

/// Record an interrupt and what the loop did with it
pub fn interrupt_received(state: &'static str, action: &'static str) {
    metrics::counter!(labels::INTERRUPTS_TOTAL, "state" => state, "action" => action)
        .increment(1);
}

/// Record one endpoint probe during connect
pub fn connection_attempt(outcome: &'static str) {
    metrics::counter!(labels::CONNECTION_ATTEMPTS_TOTAL, "outcome" => outcome).increment(1);
}
