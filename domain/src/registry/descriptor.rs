//! Agent descriptor value object

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Static description of one specialized agent (Value Object)
///
/// Capabilities name the sub-intents an agent can answer, reasoning styles
/// describe how it prefers to work, and tags are looser topical hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub id: String,
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    #[serde(default)]
    pub reasoning_styles: BTreeSet<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl AgentDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            capabilities: BTreeSet::new(),
            reasoning_styles: BTreeSet::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities.extend(capabilities.into_iter().map(Into::into));
        self
    }

    pub fn with_reasoning_styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reasoning_styles.extend(styles.into_iter().map(Into::into));
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn has_any_capability(&self, capabilities: &[&str]) -> bool {
        capabilities.iter().any(|c| self.has_capability(c))
    }

    pub fn has_reasoning_style(&self, style: &str) -> bool {
        self.reasoning_styles.contains(style)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_sets() {
        let agent = AgentDescriptor::new("code_reviewer")
            .with_capabilities(["code", "error"])
            .with_reasoning_styles(["stepwise"])
            .with_tags(["python", "code"]);

        assert!(agent.has_capability("code"));
        assert!(agent.has_any_capability(&["model", "error"]));
        assert!(!agent.has_any_capability(&["planning"]));
        assert!(agent.has_reasoning_style("stepwise"));
        assert!(agent.has_tag("python"));
        assert_eq!(agent.tags.len(), 2);
    }

    #[test]
    fn test_deserialize_with_missing_sets() {
        let agent: AgentDescriptor =
            serde_json::from_str(r#"{"id": "summary", "capabilities": ["overview"]}"#).unwrap();
        assert_eq!(agent.id, "summary");
        assert!(agent.reasoning_styles.is_empty());
        assert!(agent.tags.is_empty());
    }
}
