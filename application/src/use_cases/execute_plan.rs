//! Execute Plan use case
//!
//! Runs an [`InteractionPlan`] against the wired backends. Every agent
//! invocation is isolated: a backend error or timeout is recorded on that
//! agent's result and execution moves on with the pre-failure context.
//!
//! | Pattern | Execution |
//! |---------|-----------|
//! | Sequential, Consultative, Conversational, Expansion | one by one, threading context |
//! | Parallel, Collaborative | concurrent tasks on a context snapshot |
//! | Hierarchical | coordinator first, then the rest concurrently on the enriched context |
//! | Validation | producer, then validator reviewing the producer's output, then the rest |

use crate::config::ExecutionParams;
use crate::ports::agent_backend::{AgentBackend, BackendError, BackendSet};
use crate::ports::progress::OrchestrationProgress;
use conductor_domain::{
    AgentRunResult, AgentSelection, ContextMap, InteractionPattern, InteractionPlan, merge_context,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Prefix of the query handed to the validator in a validation pair.
pub const VALIDATION_QUERY_PREFIX: &str = "Please review and validate this output: ";

/// Context key holding the coordinator's answer in hierarchical plans.
pub const COORDINATOR_OUTPUT_KEY: &str = "coordinator_output";

/// Internal control flow: the only way a plan stops early.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutePlanError {
    #[error("Operation cancelled")]
    Cancelled,
}

/// Everything produced by executing one plan
#[derive(Debug, Clone, Default)]
pub struct ExecutionOutcome {
    /// One result per executed agent, in the order they ran
    pub results: Vec<AgentRunResult>,
    /// Shared context after every successful delta was merged
    pub context: ContextMap,
    /// `true` when cancellation skipped part of the plan
    pub incomplete: bool,
}

impl ExecutionOutcome {
    fn record(&mut self, result: AgentRunResult) {
        if result.is_success() {
            merge_context(&mut self.context, &result.context_delta);
        }
        self.results.push(result);
    }
}

/// Use case for executing an interaction plan
pub struct ExecutePlanUseCase {
    backends: Arc<BackendSet>,
    params: ExecutionParams,
    cancellation_token: Option<CancellationToken>,
}

impl ExecutePlanUseCase {
    pub fn new(backends: Arc<BackendSet>, params: ExecutionParams) -> Self {
        Self {
            backends,
            params,
            cancellation_token: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the plan. Never fails; cancellation yields a partial outcome
    /// with `incomplete` set.
    pub async fn execute(
        &self,
        plan: &InteractionPlan,
        query: &str,
        context: ContextMap,
        progress: &dyn OrchestrationProgress,
    ) -> ExecutionOutcome {
        info!(
            "Executing {} plan with {} agents",
            plan.pattern,
            plan.agents.len()
        );

        let mut outcome = ExecutionOutcome {
            results: Vec::with_capacity(plan.agents.len()),
            context,
            incomplete: false,
        };

        let finished = match plan.pattern {
            InteractionPattern::Parallel | InteractionPattern::Collaborative => {
                let snapshot = Arc::new(outcome.context.clone());
                self.run_concurrent(plan, &plan.execution_order, query, snapshot, progress, &mut outcome)
                    .await
            }
            InteractionPattern::Hierarchical => {
                self.run_hierarchical(plan, query, progress, &mut outcome).await
            }
            InteractionPattern::Validation => {
                self.run_validation(plan, query, progress, &mut outcome).await
            }
            InteractionPattern::Sequential
            | InteractionPattern::Consultative
            | InteractionPattern::Conversational
            | InteractionPattern::Expansion => {
                self.run_sequential(plan, &plan.execution_order, query, progress, &mut outcome)
                    .await
            }
        };

        if let Err(ExecutePlanError::Cancelled) = finished {
            warn!(
                "Plan cancelled after {}/{} agents",
                outcome.results.len(),
                plan.agents.len()
            );
            outcome.incomplete = true;
        }

        outcome
    }

    /// Run `indices` one after another, each seeing the previous deltas.
    async fn run_sequential(
        &self,
        plan: &InteractionPlan,
        indices: &[usize],
        query: &str,
        progress: &dyn OrchestrationProgress,
        outcome: &mut ExecutionOutcome,
    ) -> Result<(), ExecutePlanError> {
        for &index in indices {
            let agent = &plan.agents[index];
            let result = self.run_step(agent, query, &outcome.context, progress).await?;
            outcome.record(result);
        }
        Ok(())
    }

    async fn run_hierarchical(
        &self,
        plan: &InteractionPlan,
        query: &str,
        progress: &dyn OrchestrationProgress,
        outcome: &mut ExecutionOutcome,
    ) -> Result<(), ExecutePlanError> {
        let Some((&coordinator, rest)) = plan.execution_order.split_first() else {
            return Ok(());
        };

        let result = self
            .run_step(&plan.agents[coordinator], query, &outcome.context, progress)
            .await?;
        if result.is_success() {
            outcome.context.insert(
                COORDINATOR_OUTPUT_KEY.to_string(),
                Value::String(result.output.clone()),
            );
        }
        outcome.record(result);

        let snapshot = Arc::new(outcome.context.clone());
        self.run_concurrent(plan, rest, query, snapshot, progress, outcome)
            .await
    }

    async fn run_validation(
        &self,
        plan: &InteractionPlan,
        query: &str,
        progress: &dyn OrchestrationProgress,
        outcome: &mut ExecutionOutcome,
    ) -> Result<(), ExecutePlanError> {
        let order = &plan.execution_order;
        let Some(&producer) = order.first() else {
            return Ok(());
        };
        let original_context = outcome.context.clone();

        let produced = self
            .run_step(&plan.agents[producer], query, &original_context, progress)
            .await?;
        // A failed producer leaves nothing to review; the validator answers the request itself
        let validation_query = if produced.is_success() {
            format!("{}{}", VALIDATION_QUERY_PREFIX, produced.output)
        } else {
            query.to_string()
        };
        outcome.record(produced);

        if let Some(&validator) = order.get(1) {
            let validated = self
                .run_step(
                    &plan.agents[validator],
                    &validation_query,
                    &original_context,
                    progress,
                )
                .await?;
            outcome.record(validated);
        }

        if order.len() > 2 {
            self.run_sequential(plan, &order[2..], query, progress, outcome)
                .await?;
        }
        Ok(())
    }

    /// Fan `indices` out as concurrent tasks sharing one immutable snapshot.
    ///
    /// Deltas are merged only after the stage completes, in `indices` order,
    /// so the last index wins on key collisions.
    async fn run_concurrent(
        &self,
        plan: &InteractionPlan,
        indices: &[usize],
        query: &str,
        snapshot: Arc<ContextMap>,
        progress: &dyn OrchestrationProgress,
        outcome: &mut ExecutionOutcome,
    ) -> Result<(), ExecutePlanError> {
        if indices.is_empty() {
            return Ok(());
        }
        self.ensure_not_cancelled()?;

        let semaphore = self
            .params
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit)));
        let mut join_set = JoinSet::new();
        let mut positions = HashMap::new();

        for (position, &index) in indices.iter().enumerate() {
            let agent = plan.agents[index].clone();
            progress.on_agent_start(&agent);

            let backend = self.backends.get(agent.backend);
            let query = query.to_string();
            let context = Arc::clone(&snapshot);
            let timeout = self.params.agent_timeout;
            let semaphore = semaphore.clone();

            let handle = join_set.spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                invoke(backend, &agent, &query, &context, timeout).await
            });
            positions.insert(handle.id(), (position, index));
        }

        let mut slots: Vec<Option<AgentRunResult>> = vec![None; indices.len()];
        let mut cancelled = false;

        loop {
            let joined = if let Some(ref token) = self.cancellation_token {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        join_set.abort_all();
                        cancelled = true;
                        break;
                    }
                    joined = join_set.join_next_with_id() => joined,
                }
            } else {
                join_set.join_next_with_id().await
            };

            let Some(joined) = joined else {
                break;
            };

            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(e) => {
                    let id = e.id();
                    let Some(&(_, index)) = positions.get(&id) else {
                        continue;
                    };
                    let agent = &plan.agents[index];
                    warn!("Agent {} task failed: {}", agent.agent_id, e);
                    let error = BackendError::Aborted(e.to_string());
                    (id, AgentRunResult::failure(&agent.agent_id, agent.backend, error.to_string()))
                }
            };

            if let Some(&(position, _)) = positions.get(&id) {
                progress.on_agent_complete(&result);
                slots[position] = Some(result);
            }
        }

        for result in slots.into_iter().flatten() {
            outcome.record(result);
        }

        if cancelled {
            Err(ExecutePlanError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Run one agent, honouring cancellation.
    async fn run_step(
        &self,
        agent: &AgentSelection,
        query: &str,
        context: &ContextMap,
        progress: &dyn OrchestrationProgress,
    ) -> Result<AgentRunResult, ExecutePlanError> {
        self.ensure_not_cancelled()?;
        progress.on_agent_start(agent);

        let backend = self.backends.get(agent.backend);
        let invocation = invoke(backend, agent, query, context, self.params.agent_timeout);

        let result = if let Some(ref token) = self.cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ExecutePlanError::Cancelled),
                result = invocation => result,
            }
        } else {
            invocation.await
        };

        progress.on_agent_complete(&result);
        Ok(result)
    }

    fn ensure_not_cancelled(&self) -> Result<(), ExecutePlanError> {
        match self.cancellation_token {
            Some(ref token) if token.is_cancelled() => Err(ExecutePlanError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Call one backend for one agent, bounded by `timeout`.
async fn invoke(
    backend: Result<Arc<dyn AgentBackend>, BackendError>,
    agent: &AgentSelection,
    query: &str,
    context: &ContextMap,
    timeout: Option<Duration>,
) -> AgentRunResult {
    let started = Instant::now();
    debug!("Running agent {} on {}", agent.agent_id, agent.backend);

    let outcome = match backend {
        Ok(backend) => {
            let run = backend.run(&agent.agent_id, query, context);
            match timeout {
                Some(limit) => tokio::time::timeout(limit, run)
                    .await
                    .unwrap_or(Err(BackendError::Timeout(limit))),
                None => run.await,
            }
        }
        Err(e) => Err(e),
    };
    let elapsed = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(out) => {
            info!("Agent {} responded in {}ms", agent.agent_id, elapsed);
            AgentRunResult::success(&agent.agent_id, agent.backend, out.output, out.context_delta)
                .with_duration_ms(elapsed)
        }
        Err(e) => {
            warn!("Agent {} failed: {}", agent.agent_id, e);
            AgentRunResult::failure(&agent.agent_id, agent.backend, e.to_string())
                .with_duration_ms(elapsed)
        }
    }
}
