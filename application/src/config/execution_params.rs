//! Execution parameters for the plan executor.
//!
//! [`ExecutionParams`] groups the static parameters that bound each agent
//! invocation in [`ExecutePlanUseCase`](crate::use_cases::execute_plan::ExecutePlanUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Plan execution control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Upper bound on a single backend call. `None` disables the limit.
    pub agent_timeout: Option<Duration>,
    /// Maximum agents in flight during a concurrent stage. `None` means all.
    pub max_concurrency: Option<usize>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            agent_timeout: Some(Duration::from_secs(60)),
            max_concurrency: None,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_agent_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.agent_timeout = timeout;
        self
    }

    /// A limit of zero is treated as "no limit".
    pub fn with_max_concurrency(mut self, max: Option<usize>) -> Self {
        self.max_concurrency = max.filter(|m| *m > 0);
        self
    }
}
