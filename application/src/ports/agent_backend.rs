//! Agent backend port
//!
//! Defines the single capability the orchestrator needs from an execution
//! backend: run one agent against one query with the shared context.

use async_trait::async_trait;
use conductor_domain::{BackendKind, ContextMap};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running a single agent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Backend not available: {0}")]
    Unavailable(BackendKind),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Agent task aborted: {0}")]
    Aborted(String),
}

/// What a backend returns for one agent run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendOutput {
    pub output: String,
    /// Keys this agent adds to (or overwrites in) the shared context
    pub context_delta: ContextMap,
}

impl BackendOutput {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            context_delta: ContextMap::new(),
        }
    }

    pub fn with_context_delta(mut self, delta: ContextMap) -> Self {
        self.context_delta = delta;
        self
    }
}

/// Executes agents for one [`BackendKind`]
///
/// Implementations (adapters) live in the infrastructure layer. All kinds are
/// interchangeable from the orchestrator's point of view.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// The backend family this implementation serves
    fn kind(&self) -> BackendKind;

    /// Run one agent
    async fn run(
        &self,
        agent_id: &str,
        query: &str,
        context: &ContextMap,
    ) -> Result<BackendOutput, BackendError>;
}

/// The backends wired up for this process, keyed by kind
///
/// A kind with no implementation is not an error until an agent assigned to
/// it actually runs; that agent then fails with [`BackendError::Unavailable`].
#[derive(Clone, Default)]
pub struct BackendSet {
    backends: HashMap<BackendKind, Arc<dyn AgentBackend>>,
}

impl BackendSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend under its own [`AgentBackend::kind`].
    pub fn with_backend(mut self, backend: Arc<dyn AgentBackend>) -> Self {
        self.backends.insert(backend.kind(), backend);
        self
    }

    /// Register a backend under an explicit kind (e.g. one adapter serving all kinds).
    pub fn with_backend_for(mut self, kind: BackendKind, backend: Arc<dyn AgentBackend>) -> Self {
        self.backends.insert(kind, backend);
        self
    }

    pub fn get(&self, kind: BackendKind) -> Result<Arc<dyn AgentBackend>, BackendError> {
        self.backends
            .get(&kind)
            .cloned()
            .ok_or(BackendError::Unavailable(kind))
    }

    pub fn is_available(&self, kind: BackendKind) -> bool {
        self.backends.contains_key(&kind)
    }

    /// Wired kinds in a stable order
    pub fn kinds(&self) -> Vec<BackendKind> {
        BackendKind::ALL
            .into_iter()
            .filter(|k| self.backends.contains_key(k))
            .collect()
    }
}

impl std::fmt::Debug for BackendSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSet")
            .field("kinds", &self.kinds())
            .finish()
    }
}
