//! Complexity analysis
//!
//! Six boolean indicators are derived from a [`ParsedIntent`]; the score is
//! the fraction that fired. The denominator is fixed so an intent with no
//! sub-intents still scores on the remaining indicators.

use crate::intent::parsed::ParsedIntent;
use crate::intent::rules::{AMBIGUITY_FLAG, URGENCY_FLAG};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sub-intents whose output deserves a second opinion.
pub const VALIDATION_SUB_INTENTS: &[&str] = &["code", "model", "analysis"];

const INDICATOR_COUNT: f64 = 6.0;

/// Result of analysing one request (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityAssessment {
    /// Fraction of indicators that fired, in `[0, 1]`
    pub score: f64,
    pub needs_validation: bool,
    pub needs_collaboration: bool,
    pub indicators: BTreeMap<String, bool>,
}

impl ComplexityAssessment {
    pub fn indicator(&self, name: &str) -> bool {
        self.indicators.get(name).copied().unwrap_or(false)
    }

    /// Force the validation signal on or off.
    pub fn with_validation(mut self, needs_validation: bool) -> Self {
        self.needs_validation = needs_validation;
        self
    }
}

/// Stateless analyzer turning an intent into a [`ComplexityAssessment`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexityAnalyzer;

impl ComplexityAnalyzer {
    pub fn analyze(intent: &ParsedIntent) -> ComplexityAssessment {
        let distinct: std::collections::BTreeSet<&str> =
            intent.sub_intents.iter().map(String::as_str).collect();

        let multi_intent = intent.sub_intents.len() > 2;
        let multi_step = intent.reasoning_style.to_lowercase().contains("step");
        let cross_domain = distinct.len() > 1;
        let ambiguous = intent.flag(AMBIGUITY_FLAG);
        let urgent = intent.flag(URGENCY_FLAG);
        let validation_needed = intent
            .sub_intents
            .iter()
            .any(|s| VALIDATION_SUB_INTENTS.iter().any(|v| *v == s.as_str()));

        let indicators: BTreeMap<String, bool> = [
            ("multi_intent", multi_intent),
            ("multi_step", multi_step),
            ("cross_domain", cross_domain),
            ("ambiguous", ambiguous),
            ("urgent", urgent),
            ("validation_needed", validation_needed),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let fired = indicators.values().filter(|v| **v).count() as f64;

        ComplexityAssessment {
            score: fired / INDICATOR_COUNT,
            needs_validation: validation_needed,
            needs_collaboration: multi_intent || cross_domain,
            indicators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_intent_needs_no_collaboration() {
        let intent = ParsedIntent::new(["error_detection"]);
        let assessment = ComplexityAnalyzer::analyze(&intent);
        assert!(!assessment.needs_collaboration);
        assert!(!assessment.needs_validation);
        assert_eq!(assessment.score, 0.0);
    }

    #[test]
    fn test_repeated_sub_intent_is_not_cross_domain() {
        let intent = ParsedIntent::new(["summary", "summary"]);
        let assessment = ComplexityAnalyzer::analyze(&intent);
        assert!(!assessment.indicator("cross_domain"));
        assert!(!assessment.needs_collaboration);
    }

    #[test]
    fn test_multi_intent_drives_collaboration() {
        let intent = ParsedIntent::new(["code", "timeline_planning", "discussion"]);
        let assessment = ComplexityAnalyzer::analyze(&intent);
        assert!(assessment.indicator("multi_intent"));
        assert!(assessment.indicator("cross_domain"));
        assert!(assessment.needs_collaboration);
        assert!(assessment.needs_validation);
        assert!((assessment.score - 3.0 / 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_sub_intents_scores_remaining_indicators() {
        let intent = ParsedIntent::fallback()
            .with_reasoning_style("Stepwise")
            .with_flag("ambiguity", true)
            .with_flag("urgency", true);
        let assessment = ComplexityAnalyzer::analyze(&intent);
        assert!((assessment.score - 3.0 / 6.0).abs() < f64::EPSILON);
        assert!(!assessment.needs_collaboration);
    }

    #[test]
    fn test_all_indicators_fire() {
        let intent = ParsedIntent::new(["code", "model", "analysis"])
            .with_reasoning_style("multi-step")
            .with_flag("ambiguity", true)
            .with_flag("urgency", true);
        let assessment = ComplexityAnalyzer::analyze(&intent);
        assert_eq!(assessment.score, 1.0);
    }
}
