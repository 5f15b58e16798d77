//! Intent parser port
//!
//! Turns free text into a [`ParsedIntent`]. The contract is infallible:
//! implementations that fail internally return [`ParsedIntent::fallback`]
//! so downstream planning never special-cases a missing intent.

use async_trait::async_trait;
use conductor_domain::ParsedIntent;

#[async_trait]
pub trait IntentParser: Send + Sync {
    async fn parse(&self, query: &str) -> ParsedIntent;
}

/// Parser that always returns the same intent (tests and scripted runs)
pub struct FixedIntentParser {
    intent: ParsedIntent,
}

impl FixedIntentParser {
    pub fn new(intent: ParsedIntent) -> Self {
        Self { intent }
    }
}

#[async_trait]
impl IntentParser for FixedIntentParser {
    async fn parse(&self, _query: &str) -> ParsedIntent {
        self.intent.clone()
    }
}
