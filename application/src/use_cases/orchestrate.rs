//! Orchestrate use case
//!
//! The single produced operation: parse the request, plan it, execute the
//! plan and synthesize one envelope. Planning failures are reported in the
//! envelope's `error` field rather than as an `Err`.

use crate::config::ExecutionParams;
use crate::ports::agent_backend::BackendSet;
use crate::ports::intent_parser::IntentParser;
use crate::ports::progress::{NoProgress, OrchestrationProgress};
use crate::ports::run_logger::{NoRunLogger, RunEvent, RunLogger};
use crate::use_cases::execute_plan::ExecutePlanUseCase;
use conductor_domain::{
    ContextMap, DomainError, InteractionPattern, InteractionPlan, OrchestrationPlanner,
    OrchestrationResult, ParsedIntent, ResultSynthesizer,
};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Input for the Orchestrate use case
#[derive(Debug, Clone)]
pub struct OrchestrateInput {
    pub query: String,
    /// Caller-supplied context handed to the first agents
    pub context: ContextMap,
    /// Force a topology instead of letting the planner choose
    pub pattern: Option<InteractionPattern>,
}

impl OrchestrateInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: ContextMap::new(),
            pattern: None,
        }
    }

    pub fn with_context(mut self, context: ContextMap) -> Self {
        self.context = context;
        self
    }

    pub fn with_pattern(mut self, pattern: InteractionPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }
}

/// A planned (but not executed) request
#[derive(Debug, Clone)]
pub struct PlannedRequest {
    pub intent: ParsedIntent,
    pub plan: Result<InteractionPlan, DomainError>,
}

/// Use case for orchestrating one request end to end
pub struct OrchestrateUseCase {
    planner: Arc<OrchestrationPlanner>,
    intent_parser: Arc<dyn IntentParser>,
    backends: Arc<BackendSet>,
    params: ExecutionParams,
    run_logger: Arc<dyn RunLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl OrchestrateUseCase {
    pub fn new(
        planner: Arc<OrchestrationPlanner>,
        intent_parser: Arc<dyn IntentParser>,
        backends: Arc<BackendSet>,
    ) -> Self {
        Self {
            planner,
            intent_parser,
            backends,
            params: ExecutionParams::default(),
            run_logger: Arc::new(NoRunLogger),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_run_logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.run_logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Parse and plan without executing anything.
    pub async fn plan(&self, input: &OrchestrateInput) -> PlannedRequest {
        let intent = self.intent_parser.parse(&input.query).await;
        debug!(
            "Parsed intent: primary={}, sub_intents={:?}, style={}",
            intent.primary_intent, intent.sub_intents, intent.reasoning_style
        );
        let plan = self.planner.plan_with_pattern(&intent, input.pattern);
        PlannedRequest { intent, plan }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: OrchestrateInput) -> OrchestrationResult {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: OrchestrateInput,
        progress: &dyn OrchestrationProgress,
    ) -> OrchestrationResult {
        let PlannedRequest { intent, plan } = self.plan(&input).await;

        let plan = match plan {
            Ok(plan) => plan,
            Err(e) => {
                warn!("Planning failed for '{}': {}", input.query, e);
                self.run_logger.log(RunEvent::new(
                    "planning_failed",
                    json!({
                        "query": input.query,
                        "sub_intents": intent.sub_intents,
                        "error": e.to_string(),
                    }),
                ));
                let result = OrchestrationResult::planning_failed(input.query, e.to_string());
                progress.on_execution_complete(&result);
                return result;
            }
        };

        info!(
            "Planned {} agents ({}) with pattern {}, estimated {}",
            plan.agents.len(),
            plan.agent_ids().join(", "),
            plan.pattern,
            plan.estimated_duration
        );
        self.run_logger.log(RunEvent::new(
            "plan_built",
            json!({
                "query": input.query,
                "intent": intent,
                "plan": plan,
            }),
        ));
        progress.on_plan_ready(&plan);

        let mut executor = ExecutePlanUseCase::new(Arc::clone(&self.backends), self.params.clone());
        if let Some(ref token) = self.cancellation_token {
            executor = executor.with_cancellation(token.clone());
        }
        let outcome = executor
            .execute(&plan, &input.query, input.context, progress)
            .await;

        for result in &outcome.results {
            self.run_logger.log(RunEvent::new(
                "agent_completed",
                json!({
                    "agent_id": result.agent_id,
                    "backend": result.backend,
                    "success": result.is_success(),
                    "error": result.error,
                    "duration_ms": result.duration_ms,
                }),
            ));
        }

        let result =
            ResultSynthesizer::synthesize(input.query, &plan, outcome.results, outcome.incomplete);

        self.run_logger.log(RunEvent::new(
            "orchestration_finished",
            json!({
                "pattern": result.pattern,
                "agents_used": result.agents_used,
                "succeeded": result.succeeded().count(),
                "failed": result.failed().count(),
                "incomplete": result.incomplete,
            }),
        ));
        progress.on_execution_complete(&result);
        result
    }
}
