//! Planning pipeline: intent → complexity → selection → backends → pattern → plan.

use crate::core::error::DomainError;
use crate::intent::parsed::ParsedIntent;
use crate::orchestration::backend::{AgentSelection, BackendAssigner};
use crate::orchestration::complexity::{ComplexityAnalyzer, ComplexityAssessment};
use crate::orchestration::pattern::{InteractionPattern, PatternDeterminer};
use crate::orchestration::plan::{InteractionPlan, PlanBuilder};
use crate::orchestration::selection::{AgentSelector, SelectionConfig};
use crate::registry::capability_registry::CapabilityRegistry;
use std::sync::Arc;

/// Deterministic planner shared by every request
///
/// Holds only read-only state, so a single instance can serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct OrchestrationPlanner {
    registry: Arc<CapabilityRegistry>,
    selection: SelectionConfig,
    assigner: BackendAssigner,
}

impl OrchestrationPlanner {
    pub fn new(
        registry: Arc<CapabilityRegistry>,
        selection: SelectionConfig,
        assigner: BackendAssigner,
    ) -> Self {
        Self {
            registry,
            selection,
            assigner,
        }
    }

    /// Plan a request, letting the pattern determiner pick the topology.
    pub fn plan(&self, intent: &ParsedIntent) -> Result<InteractionPlan, DomainError> {
        self.plan_with_pattern(intent, None)
    }

    /// Plan a request, optionally forcing the topology.
    pub fn plan_with_pattern(
        &self,
        intent: &ParsedIntent,
        forced: Option<InteractionPattern>,
    ) -> Result<InteractionPlan, DomainError> {
        let complexity = ComplexityAnalyzer::analyze(intent);
        self.plan_with_assessment(intent, &complexity, forced)
    }

    /// Plan against a precomputed assessment.
    pub fn plan_with_assessment(
        &self,
        intent: &ParsedIntent,
        complexity: &ComplexityAssessment,
        forced: Option<InteractionPattern>,
    ) -> Result<InteractionPlan, DomainError> {
        if intent.sub_intents.is_empty() {
            return Err(DomainError::NoSubIntents);
        }

        let agents = self.select_agents(intent)?;
        if agents.is_empty() {
            return Err(DomainError::NoAgentsMatched);
        }

        let pattern = forced.unwrap_or_else(|| PatternDeterminer::determine(complexity, &agents));
        Ok(PlanBuilder::build(pattern, agents, complexity.score))
    }

    /// Selection with backends assigned.
    pub fn select_agents(&self, intent: &ParsedIntent) -> Result<Vec<AgentSelection>, DomainError> {
        AgentSelector::new(&self.registry, &self.selection)
            .select(intent)
            .into_iter()
            .map(|matched| {
                let descriptor = self.registry.lookup(&matched.agent_id)?;
                let backend = self.assigner.assign(descriptor, &intent.reasoning_style);
                Ok(AgentSelection::from_match(matched, backend))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::backend::BackendKind;
    use crate::registry::descriptor::AgentDescriptor;
    use std::collections::{BTreeMap, HashSet};

    fn planner(agents: Vec<AgentDescriptor>) -> OrchestrationPlanner {
        OrchestrationPlanner::new(
            Arc::new(CapabilityRegistry::new(agents).unwrap()),
            SelectionConfig::default(),
            BackendAssigner::new(BTreeMap::new()),
        )
    }

    fn contest_agents() -> Vec<AgentDescriptor> {
        vec![
            AgentDescriptor::new("code_helper")
                .with_capabilities(["code", "notebooks"])
                .with_reasoning_styles(["stepwise"]),
            AgentDescriptor::new("error_checker")
                .with_capabilities(["error_detection", "error"])
                .with_reasoning_styles(["stepwise"]),
            AgentDescriptor::new("timeline_planner")
                .with_capabilities(["timeline_planning", "planning"]),
            AgentDescriptor::new("discussion_guide")
                .with_capabilities(["discussion", "conversational"])
                .with_reasoning_styles(["conversational"]),
        ]
    }

    #[test]
    fn test_scenario_single_error_detection_agent() {
        let planner = planner(vec![
            AgentDescriptor::new("error_checker").with_capabilities(["error_detection"]),
        ]);
        let intent = ParsedIntent::new(["error_detection"]).with_reasoning_style("stepwise");

        let plan = planner.plan(&intent).unwrap();

        assert_eq!(plan.agents.len(), 1);
        assert_eq!(plan.pattern, InteractionPattern::Sequential);
        assert_eq!(plan.execution_order, vec![0]);
    }

    #[test]
    fn test_scenario_three_facets_collaborate() {
        let planner = planner(contest_agents());
        let intent = ParsedIntent::new(["code", "timeline_planning", "discussion"]);
        let complexity = ComplexityAnalyzer::analyze(&intent);

        // "code" asks for validation, which outranks collaboration
        assert_eq!(
            planner.plan(&intent).unwrap().pattern,
            InteractionPattern::Validation
        );

        let plan = planner
            .plan_with_assessment(&intent, &complexity.clone().with_validation(false), None)
            .unwrap();

        assert!(complexity.needs_collaboration);
        assert_eq!(plan.agents.len(), 3);
        assert_eq!(plan.pattern, InteractionPattern::Collaborative);
        assert_eq!(plan.execution_order, vec![0, 1, 2]);
    }

    #[test]
    fn test_scenario_validation_pair() {
        let planner = planner(vec![
            AgentDescriptor::new("code_helper")
                .with_capabilities(["code"])
                .with_reasoning_styles(["default"]),
            AgentDescriptor::new("error_checker")
                .with_capabilities(["error"])
                .with_reasoning_styles(["default"]),
        ]);
        let intent = ParsedIntent::new(["code"]);
        let complexity = ComplexityAnalyzer::analyze(&intent).with_validation(true);

        let plan = planner.plan_with_assessment(&intent, &complexity, None).unwrap();

        assert_eq!(plan.pattern, InteractionPattern::Validation);
        let producer = plan.execution_order[0];
        let validator = plan.execution_order[1];
        assert_ne!(producer, validator);
        assert_eq!(plan.agents[producer].agent_id, "code_helper");
        assert_eq!(plan.agents[validator].agent_id, "error_checker");
    }

    #[test]
    fn test_scenario_empty_sub_intents_fail_planning() {
        let planner = planner(contest_agents());
        let err = planner.plan(&ParsedIntent::fallback()).unwrap_err();
        assert_eq!(err, DomainError::NoSubIntents);
        assert_eq!(err.to_string(), "no agents matched; please rephrase");
    }

    #[test]
    fn test_unmatched_intent_fails_planning() {
        let planner = planner(contest_agents());
        let err = planner.plan(&ParsedIntent::new(["weather"])).unwrap_err();
        assert_eq!(err, DomainError::NoAgentsMatched);
    }

    #[test]
    fn test_backends_are_assigned_per_agent() {
        let planner = planner(contest_agents());
        let agents = planner
            .select_agents(&ParsedIntent::new(["code", "timeline_planning", "discussion"]))
            .unwrap();

        let backends: Vec<BackendKind> = agents.iter().map(|a| a.backend).collect();
        assert_eq!(
            backends,
            vec![
                BackendKind::WorkflowGraph,
                BackendKind::Crew,
                BackendKind::Conversational
            ]
        );
    }

    #[test]
    fn test_planning_is_idempotent_and_unique() {
        let planner = planner(contest_agents());
        let intent = ParsedIntent::new(["code", "error_detection", "code", "discussion"])
            .with_reasoning_style("stepwise");

        let first = planner.plan(&intent).unwrap();
        let second = planner.plan(&intent).unwrap();
        assert_eq!(first, second);

        let unique: HashSet<&str> = first.agents.iter().map(|a| a.agent_id.as_str()).collect();
        assert_eq!(unique.len(), first.agents.len());
    }

    #[test]
    fn test_forced_pattern_is_respected() {
        let planner = planner(contest_agents());
        let intent = ParsedIntent::new(["code", "discussion"]);
        let plan = planner
            .plan_with_pattern(&intent, Some(InteractionPattern::Parallel))
            .unwrap();
        assert_eq!(plan.pattern, InteractionPattern::Parallel);
    }
}
