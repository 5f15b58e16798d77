//! HTTP agent backend
//!
//! Forwards each agent run to a remote service as
//! `POST <endpoint> {agent_id, query, context}` and expects
//! `{output, context_delta}` back.

use async_trait::async_trait;
use conductor_application::{AgentBackend, BackendError, BackendOutput};
use conductor_domain::{BackendKind, ContextMap};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    agent_id: &'a str,
    query: &'a str,
    context: &'a ContextMap,
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    output: String,
    #[serde(default)]
    context_delta: ContextMap,
}

/// Remote backend for one [`BackendKind`]
pub struct HttpBackend {
    kind: BackendKind,
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(kind: BackendKind, endpoint: impl Into<String>) -> Self {
        Self {
            kind,
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl AgentBackend for HttpBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn run(
        &self,
        agent_id: &str,
        query: &str,
        context: &ContextMap,
    ) -> Result<BackendOutput, BackendError> {
        debug!("POST {} for agent {}", self.endpoint, agent_id);

        let response = self
            .client
            .post(&self.endpoint)
            .header("User-Agent", concat!("conductor/", env!("CARGO_PKG_VERSION")))
            .json(&RunRequest {
                agent_id,
                query,
                context,
            })
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::RequestFailed(format!(
                "HTTP {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                body.trim()
            )));
        }

        let parsed: RunResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        Ok(BackendOutput::new(parsed.output).with_context_delta(parsed.context_delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let mut context = ContextMap::new();
        context.insert("competition".to_string(), json!("titanic"));

        let body = serde_json::to_value(RunRequest {
            agent_id: "data_analyst",
            query: "which features matter?",
            context: &context,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "agent_id": "data_analyst",
                "query": "which features matter?",
                "context": {"competition": "titanic"},
            })
        );
    }

    #[test]
    fn test_response_without_delta() {
        let parsed: RunResponse = serde_json::from_str(r#"{"output": "Age and Fare"}"#).unwrap();
        assert_eq!(parsed.output, "Age and Fare");
        assert!(parsed.context_delta.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_failure() {
        let backend = HttpBackend::new(BackendKind::Crew, "http://127.0.0.1:9/run");
        let err = backend
            .run("data_analyst", "q", &ContextMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::RequestFailed(_)));
    }
}
