//! Keyword rule tables for intent classification
//!
//! Classification is driven entirely by data: each [`KeywordRule`] maps a
//! list of keywords to a result tag. Rules are matched case-insensitively
//! as substrings of the request, in declaration order.

use crate::intent::parsed::{DEFAULT_REASONING_STYLE, ParsedIntent};
use serde::{Deserialize, Serialize};

/// Metadata flag raised for short or vague requests.
pub const AMBIGUITY_FLAG: &str = "ambiguity";

/// Metadata flag raised for time-sensitive requests.
pub const URGENCY_FLAG: &str = "urgency";

/// One `{keywords, result_tag}` classification rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub result_tag: String,
}

impl KeywordRule {
    pub fn new<I, S>(result_tag: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
            result_tag: result_tag.into(),
        }
    }

    /// `normalized` must already be lowercased.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && normalized.contains(k.to_lowercase().as_str()))
    }
}

/// Complete rule table for turning free text into a [`ParsedIntent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentRuleSet {
    /// Each match contributes one sub-intent
    pub sub_intents: Vec<KeywordRule>,
    /// First match decides the reasoning style
    pub reasoning_styles: Vec<KeywordRule>,
    /// Each match raises a metadata flag named by its tag
    pub flags: Vec<KeywordRule>,
    /// Requests with fewer words than this are flagged ambiguous (0 disables)
    pub min_clear_words: usize,
}

impl Default for IntentRuleSet {
    fn default() -> Self {
        Self {
            sub_intents: Vec::new(),
            reasoning_styles: Vec::new(),
            flags: Vec::new(),
            min_clear_words: 3,
        }
    }
}

impl IntentRuleSet {
    pub fn new(
        sub_intents: Vec<KeywordRule>,
        reasoning_styles: Vec<KeywordRule>,
        flags: Vec<KeywordRule>,
    ) -> Self {
        Self {
            sub_intents,
            reasoning_styles,
            flags,
            ..Default::default()
        }
    }

    pub fn with_min_clear_words(mut self, words: usize) -> Self {
        self.min_clear_words = words;
        self
    }

    /// Classify a request. Never fails: blank input yields
    /// [`ParsedIntent::fallback`].
    pub fn classify(&self, query: &str) -> ParsedIntent {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return ParsedIntent::fallback();
        }

        let mut sub_intents: Vec<String> = Vec::new();
        for rule in &self.sub_intents {
            if rule.matches(&normalized) && !sub_intents.contains(&rule.result_tag) {
                sub_intents.push(rule.result_tag.clone());
            }
        }

        let reasoning_style = self
            .reasoning_styles
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.result_tag.clone())
            .unwrap_or_else(|| DEFAULT_REASONING_STYLE.to_string());

        let mut intent = ParsedIntent::new(sub_intents).with_reasoning_style(reasoning_style);

        for rule in &self.flags {
            if rule.matches(&normalized) {
                intent = intent.with_flag(rule.result_tag.clone(), true);
            }
        }

        if self.min_clear_words > 0 && normalized.split_whitespace().count() < self.min_clear_words
        {
            intent = intent.with_flag(AMBIGUITY_FLAG, true);
        }

        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> IntentRuleSet {
        IntentRuleSet::new(
            vec![
                KeywordRule::new("code", ["code", "notebook"]),
                KeywordRule::new("error_detection", ["error", "traceback", "debug"]),
                KeywordRule::new("timeline_planning", ["deadline", "timeline"]),
            ],
            vec![
                KeywordRule::new("stepwise", ["step by step"]),
                KeywordRule::new("conversational", ["chat", "discuss"]),
            ],
            vec![KeywordRule::new(URGENCY_FLAG, ["urgent", "asap"])],
        )
    }

    #[test]
    fn test_blank_query_yields_fallback() {
        assert_eq!(rules().classify("   "), ParsedIntent::fallback());
    }

    #[test]
    fn test_sub_intents_follow_rule_order_and_dedupe() {
        let intent = rules().classify("Debug this notebook error before the DEADLINE");
        assert_eq!(
            intent.sub_intents,
            vec!["code", "error_detection", "timeline_planning"]
        );
        assert_eq!(intent.primary_intent, "code");
    }

    #[test]
    fn test_first_reasoning_style_wins() {
        let intent = rules().classify("walk me step by step and let's discuss the code");
        assert_eq!(intent.reasoning_style, "stepwise");

        let intent = rules().classify("what should the team work on next");
        assert_eq!(intent.reasoning_style, "default");
    }

    #[test]
    fn test_flags_and_ambiguity() {
        let intent = rules().classify("urgent: fix error in my submission");
        assert!(intent.flag(URGENCY_FLAG));
        assert!(!intent.flag(AMBIGUITY_FLAG));

        let intent = rules().classify("help?");
        assert!(intent.flag(AMBIGUITY_FLAG));
        assert!(intent.sub_intents.is_empty());
        assert_eq!(intent.primary_intent, "general");
    }

    #[test]
    fn test_ambiguity_check_can_be_disabled() {
        let intent = rules().with_min_clear_words(0).classify("help?");
        assert!(!intent.flag(AMBIGUITY_FLAG));
    }
}
