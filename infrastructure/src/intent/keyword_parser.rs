//! Rule-table intent parser
//!
//! Adapter for the [`IntentParser`] port backed by an [`IntentRuleSet`]
//! loaded from configuration (or the built-in contest rules).

use async_trait::async_trait;
use conductor_application::IntentParser;
use conductor_domain::{IntentRuleSet, ParsedIntent};
use tracing::debug;

pub struct KeywordIntentParser {
    rules: IntentRuleSet,
}

impl KeywordIntentParser {
    pub fn new(rules: IntentRuleSet) -> Self {
        Self { rules }
    }
}

#[async_trait]
impl IntentParser for KeywordIntentParser {
    async fn parse(&self, query: &str) -> ParsedIntent {
        let intent = self.rules.classify(query);
        debug!(
            "Classified {:?} as {:?} ({}), flags {:?}",
            query, intent.sub_intents, intent.reasoning_style, intent.metadata_flags
        );
        intent
    }
}
