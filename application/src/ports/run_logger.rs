//! Port for structured run logging.
//!
//! Defines the [`RunLogger`] trait for recording orchestration events
//! (plans, per-agent outcomes, final envelopes) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures each run
//! in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured orchestration event for logging.
pub struct RunEvent {
    /// Event type identifier (e.g., "plan_built", "agent_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RunEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging orchestration events.
///
/// `log` is synchronous and infallible; logging failures must not disturb
/// the request being orchestrated.
pub trait RunLogger: Send + Sync {
    fn log(&self, event: RunEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoRunLogger;

impl RunLogger for NoRunLogger {
    fn log(&self, _event: RunEvent) {}
}
