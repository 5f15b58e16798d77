//! Deterministic local backend
//!
//! Answers every agent from the query and context alone, without any network
//! access. Used for `--offline` runs and demos.

use async_trait::async_trait;
use conductor_application::{AgentBackend, BackendError, BackendOutput};
use conductor_domain::{BackendKind, ContextMap};
use serde_json::Value;
use tracing::debug;

/// Context key under which each offline agent leaves a short note.
pub const OFFLINE_NOTE_SUFFIX: &str = "_note";

pub struct OfflineBackend {
    kind: BackendKind,
}

impl OfflineBackend {
    pub fn new(kind: BackendKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl AgentBackend for OfflineBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn run(
        &self,
        agent_id: &str,
        query: &str,
        context: &ContextMap,
    ) -> Result<BackendOutput, BackendError> {
        debug!(
            "Offline {} backend answering for {} ({} context keys)",
            self.kind,
            agent_id,
            context.len()
        );

        let mut output = format!("[{} / {}] {}", agent_id, self.kind, query.trim());
        if !context.is_empty() {
            let keys: Vec<&str> = context.keys().map(String::as_str).collect();
            output.push_str(&format!(" (context: {})", keys.join(", ")));
        }

        let mut delta = ContextMap::new();
        delta.insert(
            format!("{}{}", agent_id, OFFLINE_NOTE_SUFFIX),
            Value::String(format!("{} handled the request", agent_id)),
        );

        Ok(BackendOutput::new(output).with_context_delta(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_output_is_deterministic() {
        let backend = OfflineBackend::new(BackendKind::Crew);
        let context = ContextMap::new();

        let first = backend.run("code_helper", "fix my notebook", &context).await.unwrap();
        let second = backend.run("code_helper", "fix my notebook", &context).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.output, "[code_helper / crew] fix my notebook");
        assert_eq!(
            first.context_delta.get("code_helper_note"),
            Some(&json!("code_helper handled the request"))
        );
    }

    #[tokio::test]
    async fn test_output_lists_visible_context_keys() {
        let backend = OfflineBackend::new(BackendKind::Conversational);
        let mut context = ContextMap::new();
        context.insert("competition".to_string(), json!("titanic"));
        context.insert("coordinator_output".to_string(), json!("plan"));

        let result = backend.run("discussion_guide", "any tips?", &context).await.unwrap();

        assert!(
            result
                .output
                .ends_with("(context: competition, coordinator_output)")
        );
    }
}
