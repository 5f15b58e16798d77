//! Domain layer for conductor
//!
//! This crate contains the core orchestration logic, entities, and value
//! objects. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Capability Registry
//!
//! A static table of specialized agents, each described by the capabilities
//! it covers, the reasoning styles it prefers and loose topical tags.
//!
//! ## Planning
//!
//! One request flows strictly top to bottom:
//!
//! - **Complexity**: six indicators derived from the parsed intent
//! - **Selection**: capability scoring, deduplication and diversity
//! - **Backends**: one execution backend per selected agent
//! - **Pattern**: the interaction topology (sequential, hierarchical, ...)
//! - **Plan**: execution order and a duration estimate

pub mod core;
pub mod intent;
pub mod orchestration;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{
    context::{ContextMap, merge_context},
    error::{DomainError, NO_AGENTS_MATCHED_MESSAGE, RegistryError},
};
pub use intent::{
    parsed::ParsedIntent,
    rules::{AMBIGUITY_FLAG, IntentRuleSet, KeywordRule, URGENCY_FLAG},
};
pub use orchestration::{
    backend::{AgentSelection, BackendAssigner, BackendKind},
    complexity::{ComplexityAnalyzer, ComplexityAssessment},
    pattern::{InteractionPattern, PatternDeterminer},
    plan::{InteractionPlan, PlanBuilder, format_duration},
    planner::OrchestrationPlanner,
    result::{AgentRunResult, OrchestrationResult, ResultSynthesizer},
    selection::{AgentMatch, AgentSelector, SelectionConfig},
};
pub use registry::{capability_registry::CapabilityRegistry, descriptor::AgentDescriptor};
