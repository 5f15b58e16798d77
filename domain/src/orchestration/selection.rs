//! Capability-based agent selection
//!
//! Every registered agent is scored against each sub-intent. The best
//! candidates per sub-intent are kept, skipping duplicates and agents whose
//! capabilities mostly repeat what is already covered.

use crate::intent::parsed::ParsedIntent;
use crate::registry::capability_registry::CapabilityRegistry;
use crate::registry::descriptor::AgentDescriptor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

const SCORE_EPSILON: f64 = 1e-9;

/// Rationale attached to the single agent chosen by the fallback pass.
pub const FALLBACK_RATIONALE: &str = "fallback selection";

/// Tunable scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Added when the sub-intent is one of the agent's capabilities
    pub capability_weight: f64,
    /// Added when the request's reasoning style is one the agent supports
    pub reasoning_weight: f64,
    /// Added when the sub-intent is one of the agent's tags
    pub tag_weight: f64,
    /// Minimum score for a candidate
    pub threshold: f64,
    /// Minimum score in the fallback pass
    pub fallback_threshold: f64,
    /// Candidates kept per sub-intent
    pub max_per_sub_intent: usize,
    /// A candidate sharing more than this many capabilities with the
    /// current selection is skipped
    pub max_capability_overlap: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            capability_weight: 0.6,
            reasoning_weight: 0.3,
            tag_weight: 0.2,
            threshold: 0.3,
            fallback_threshold: 0.1,
            max_per_sub_intent: 2,
            max_capability_overlap: 2,
        }
    }
}

/// An agent chosen for a request, before a backend is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMatch {
    pub agent_id: String,
    pub confidence: f64,
    pub rationale: String,
    pub capabilities: BTreeSet<String>,
}

struct Candidate<'r> {
    agent: &'r AgentDescriptor,
    score: f64,
    reasons: Vec<&'static str>,
}

/// Scores registry agents against a parsed intent
pub struct AgentSelector<'a> {
    registry: &'a CapabilityRegistry,
    config: &'a SelectionConfig,
}

impl<'a> AgentSelector<'a> {
    pub fn new(registry: &'a CapabilityRegistry, config: &'a SelectionConfig) -> Self {
        Self { registry, config }
    }

    /// Select a deduplicated, capability-diverse set of agents.
    ///
    /// Returns an empty list only when the intent has no sub-intents or
    /// nothing clears even the fallback threshold.
    pub fn select(&self, intent: &ParsedIntent) -> Vec<AgentMatch> {
        let mut selected: Vec<AgentMatch> = Vec::new();
        let mut used_capabilities: BTreeSet<String> = BTreeSet::new();

        for sub_intent in &intent.sub_intents {
            let candidates = self.candidates(sub_intent, &intent.reasoning_style, self.config.threshold);

            for candidate in candidates.into_iter().take(self.config.max_per_sub_intent) {
                if selected.iter().any(|s| s.agent_id == candidate.agent.id) {
                    continue;
                }
                let overlap = candidate
                    .agent
                    .capabilities
                    .intersection(&used_capabilities)
                    .count();
                if overlap > self.config.max_capability_overlap {
                    continue;
                }

                used_capabilities.extend(candidate.agent.capabilities.iter().cloned());
                selected.push(AgentMatch {
                    agent_id: candidate.agent.id.clone(),
                    confidence: candidate.score,
                    rationale: format!(
                        "matched {} via {}",
                        sub_intent,
                        candidate.reasons.join(" + ")
                    ),
                    capabilities: candidate.agent.capabilities.clone(),
                });
            }
        }

        if selected.is_empty()
            && let Some(first) = intent.sub_intents.first()
            && let Some(best) = self
                .candidates(first, &intent.reasoning_style, self.config.fallback_threshold)
                .into_iter()
                .next()
        {
            selected.push(AgentMatch {
                agent_id: best.agent.id.clone(),
                confidence: best.score,
                rationale: FALLBACK_RATIONALE.to_string(),
                capabilities: best.agent.capabilities.clone(),
            });
        }

        selected
    }

    /// Agents scoring at least `threshold`, best first. The sort is stable,
    /// so ties keep registry declaration order.
    fn candidates(&self, sub_intent: &str, reasoning_style: &str, threshold: f64) -> Vec<Candidate<'a>> {
        let mut candidates: Vec<Candidate<'a>> = self
            .registry
            .all()
            .iter()
            .map(|agent| self.score(agent, sub_intent, reasoning_style))
            .filter(|c| c.score + SCORE_EPSILON >= threshold)
            .collect();

        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        candidates
    }

    fn score(&self, agent: &'a AgentDescriptor, sub_intent: &str, reasoning_style: &str) -> Candidate<'a> {
        let mut score = 0.0;
        let mut reasons = Vec::new();

        if agent.has_capability(sub_intent) {
            score += self.config.capability_weight;
            reasons.push("capability");
        }
        if agent.has_reasoning_style(reasoning_style) {
            score += self.config.reasoning_weight;
            reasons.push("reasoning style");
        }
        if agent.has_tag(sub_intent) {
            score += self.config.tag_weight;
            reasons.push("tag");
        }

        Candidate {
            agent,
            score,
            reasons,
        }
    }
}
