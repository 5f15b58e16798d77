//! Parsed intent value object

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Intent used when nothing could be recognised in a request.
pub const GENERAL_INTENT: &str = "general";

/// Reasoning style used when no style rule matched.
pub const DEFAULT_REASONING_STYLE: &str = "default";

/// Structured interpretation of one user request (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIntent {
    pub primary_intent: String,
    /// Atomic facets of the request, in the order they should be planned
    #[serde(default)]
    pub sub_intents: Vec<String>,
    pub reasoning_style: String,
    #[serde(default)]
    pub metadata_flags: BTreeMap<String, bool>,
}

impl ParsedIntent {
    pub fn new<I, S>(sub_intents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sub_intents: Vec<String> = sub_intents.into_iter().map(Into::into).collect();
        let primary_intent = sub_intents
            .first()
            .cloned()
            .unwrap_or_else(|| GENERAL_INTENT.to_string());
        Self {
            primary_intent,
            sub_intents,
            reasoning_style: DEFAULT_REASONING_STYLE.to_string(),
            metadata_flags: BTreeMap::new(),
        }
    }

    /// Conservative intent returned when parsing fails.
    pub fn fallback() -> Self {
        Self::new(Vec::<String>::new())
    }

    pub fn with_reasoning_style(mut self, style: impl Into<String>) -> Self {
        self.reasoning_style = style.into();
        self
    }

    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.metadata_flags.insert(name.into(), value);
        self
    }

    /// Read a metadata flag; absent flags are `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.metadata_flags.get(name).copied().unwrap_or(false)
    }
}

impl Default for ParsedIntent {
    fn default() -> Self {
        Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_intent() {
        let intent = ParsedIntent::fallback();
        assert_eq!(intent.primary_intent, "general");
        assert!(intent.sub_intents.is_empty());
        assert_eq!(intent.reasoning_style, "default");
        assert!(intent.metadata_flags.is_empty());
    }

    #[test]
    fn test_primary_intent_is_first_sub_intent() {
        let intent = ParsedIntent::new(["code", "analysis"]);
        assert_eq!(intent.primary_intent, "code");
    }

    #[test]
    fn test_missing_flag_defaults_to_false() {
        let intent = ParsedIntent::new(["code"]).with_flag("urgency", true);
        assert!(intent.flag("urgency"));
        assert!(!intent.flag("ambiguity"));
    }
}
