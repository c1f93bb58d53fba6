//! Metric names and label values

/// Requests dispatched, by kind and status
pub const REQUESTS_TOTAL: &str = "siridb_prompt_requests_total";
/// Request duration in seconds, by kind
pub const REQUEST_DURATION: &str = "siridb_prompt_request_duration_seconds";
/// Interrupts received, by loop state and action
pub const INTERRUPTS_TOTAL: &str = "siridb_prompt_interrupts_total";
/// Connection attempts, by outcome
pub const CONNECTION_ATTEMPTS_TOTAL: &str = "siridb_prompt_connection_attempts_total";

/// Request succeeded
pub const STATUS_OK: &str = "ok";
/// Request was abandoned by a forced exit
pub const STATUS_ABANDONED: &str = "abandoned";

/// Interrupt while idle
pub const STATE_IDLE: &str = "idle";
/// Interrupt while busy
pub const STATE_BUSY: &str = "busy";
