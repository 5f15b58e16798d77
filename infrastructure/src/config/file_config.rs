//! Configuration file data structures
//!
//! Raw TOML shape of `conductor.toml`. Every section carries
//! `#[serde(default)]` so a partial file only overrides what it names.

use super::defaults::{default_agent_backends, default_agents, default_intent_rules};
use conductor_application::ExecutionParams;
use conductor_domain::{
    AgentDescriptor, BackendAssigner, BackendKind, CapabilityRegistry, IntentRuleSet,
    RegistryError, SelectionConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default per-agent timeout in seconds
pub const DEFAULT_AGENT_TIMEOUT_SECONDS: u64 = 60;

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("execution.agent_timeout_seconds must be greater than 0")]
    InvalidTimeout,

    #[error("unknown backend '{name}' in {field} (expected one of: crew, conversational, workflow_graph)")]
    UnknownBackend { field: String, name: String },

    #[error("selection.{field} must be a finite number between 0 and 1, got {value}")]
    InvalidWeight { field: &'static str, value: f64 },

    #[error("backends.agent_defaults names undeclared agent '{0}'")]
    UnknownAgent(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One `[[agents]]` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileAgentConfig {
    pub id: String,
    pub capabilities: Vec<String>,
    pub reasoning_styles: Vec<String>,
    pub tags: Vec<String>,
}

impl FileAgentConfig {
    fn to_descriptor(&self) -> AgentDescriptor {
        AgentDescriptor::new(self.id.trim())
            .with_capabilities(self.capabilities.iter().cloned())
            .with_reasoning_styles(self.reasoning_styles.iter().cloned())
            .with_tags(self.tags.iter().cloned())
    }
}

/// `[backends]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileBackendsConfig {
    /// agent id -> `crew` | `conversational`, layered over the built-in
    /// defaults of whichever built-in agents are still declared
    pub agent_defaults: BTreeMap<String, String>,
    /// backend kind -> base URL of a remote agent service
    pub endpoints: BTreeMap<String, String>,
}

/// `[execution]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    pub agent_timeout_seconds: u64,
    /// Upper bound on concurrently running agents (unset = unbounded)
    pub max_concurrency: Option<usize>,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            agent_timeout_seconds: DEFAULT_AGENT_TIMEOUT_SECONDS,
            max_concurrency: None,
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL run log destination
    pub run_log: Option<PathBuf>,
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub agents: Vec<FileAgentConfig>,
    pub selection: SelectionConfig,
    pub backends: FileBackendsConfig,
    pub execution: FileExecutionConfig,
    pub intent: IntentRuleSet,
    pub logging: FileLoggingConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            agents: default_agents(),
            selection: SelectionConfig::default(),
            backends: FileBackendsConfig::default(),
            execution: FileExecutionConfig::default(),
            intent: default_intent_rules(),
            logging: FileLoggingConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the configuration. Any error here is fatal at startup.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.execution.agent_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        let selection = &self.selection;
        for (field, value) in [
            ("capability_weight", selection.capability_weight),
            ("reasoning_weight", selection.reasoning_weight),
            ("tag_weight", selection.tag_weight),
            ("threshold", selection.threshold),
            ("fallback_threshold", selection.fallback_threshold),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidWeight { field, value });
            }
        }

        let registry = self.build_registry()?;
        self.backend_assigner()?;
        for agent_id in self.backends.agent_defaults.keys() {
            if registry.lookup(agent_id).is_err() {
                return Err(ConfigValidationError::UnknownAgent(agent_id.clone()));
            }
        }
        self.backend_endpoints()?;

        Ok(())
    }

    /// Build the capability registry from `[[agents]]`.
    pub fn build_registry(&self) -> Result<CapabilityRegistry, RegistryError> {
        CapabilityRegistry::new(self.agents.iter().map(|a| a.to_descriptor()).collect())
    }

    pub fn backend_assigner(&self) -> Result<BackendAssigner, ConfigValidationError> {
        let defaults = self
            .effective_agent_defaults()
            .iter()
            .map(|(agent_id, name)| {
                parse_backend("backends.agent_defaults", name).map(|kind| (agent_id.clone(), kind))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(BackendAssigner::new(defaults))
    }

    /// Built-in fallbacks for declared built-in agents, then `[backends.agent_defaults]`.
    pub fn effective_agent_defaults(&self) -> BTreeMap<String, String> {
        let mut defaults: BTreeMap<String, String> = default_agent_backends()
            .into_iter()
            .filter(|(agent_id, _)| self.agents.iter().any(|a| a.id.trim() == agent_id))
            .collect();
        defaults.extend(
            self.backends
                .agent_defaults
                .iter()
                .map(|(agent_id, name)| (agent_id.clone(), name.clone())),
        );
        defaults
    }

    /// Remote endpoints keyed by backend kind.
    pub fn backend_endpoints(&self) -> Result<BTreeMap<BackendKind, String>, ConfigValidationError> {
        self.backends
            .endpoints
            .iter()
            .map(|(name, url)| parse_backend("backends.endpoints", name).map(|kind| (kind, url.clone())))
            .collect()
    }

    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_agent_timeout(Some(Duration::from_secs(self.execution.agent_timeout_seconds)))
            .with_max_concurrency(self.execution.max_concurrency)
    }

    /// Keyword rules, with empty lists falling back to the built-in ones.
    pub fn intent_rules(&self) -> IntentRuleSet {
        let builtin = default_intent_rules();
        let pick = |configured: &Vec<_>, fallback: Vec<_>| {
            if configured.is_empty() {
                fallback
            } else {
                configured.clone()
            }
        };
        IntentRuleSet::new(
            pick(&self.intent.sub_intents, builtin.sub_intents),
            pick(&self.intent.reasoning_styles, builtin.reasoning_styles),
            pick(&self.intent.flags, builtin.flags),
        )
        .with_min_clear_words(self.intent.min_clear_words)
    }
}

fn parse_backend(field: &str, name: &str) -> Result<BackendKind, ConfigValidationError> {
    name.parse()
        .map_err(|_| ConfigValidationError::UnknownBackend {
            field: field.to_string(),
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> FileConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.build_registry().unwrap().len(), 9);
        assert_eq!(
            config.execution_params().agent_timeout,
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn test_agents_table_replaces_builtin() {
        let config = parse(
            r#"
[[agents]]
id = "solo"
capabilities = ["summary"]

[backends]
agent_defaults = { solo = "crew" }
"#,
        );
        assert!(config.validate().is_ok());
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("solo").is_ok());
        assert_eq!(
            config.effective_agent_defaults(),
            BTreeMap::from([("solo".to_string(), "crew".to_string())])
        );
    }

    #[test]
    fn test_custom_agents_drop_builtin_backend_defaults() {
        let config = parse(
            r#"
[[agents]]
id = "rules_expert"
capabilities = ["overview"]
"#,
        );
        assert!(config.validate().is_ok());
        assert!(config.effective_agent_defaults().is_empty());
    }

    #[test]
    fn test_agent_defaults_override_builtin_entries() {
        let config = parse(
            "[backends.agent_defaults]\ncompetition_overview = \"conversational\"\ncode_helper = \"crew\"\n",
        );
        assert!(config.validate().is_ok());
        let defaults = config.effective_agent_defaults();
        assert_eq!(defaults["competition_overview"], "conversational");
        assert_eq!(defaults["code_helper"], "crew");
        assert_eq!(defaults["resource_scout"], "conversational");
        assert_eq!(defaults.len(), 7);
    }

    #[test]
    fn test_duplicate_agent_is_rejected() {
        let config = parse(
            r#"
[[agents]]
id = "a"
capabilities = ["x"]

[[agents]]
id = "a"
capabilities = ["y"]
"#,
        );
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::Registry(RegistryError::DuplicateAgent(
                "a".to_string()
            )))
        );
    }

    #[test]
    fn test_agent_without_capabilities_is_rejected() {
        let config = parse(
            r#"
[[agents]]
id = "empty"
"#,
        );
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::Registry(RegistryError::NoCapabilities(
                "empty".to_string()
            )))
        );
    }

    #[test]
    fn test_explicit_empty_agent_list_is_rejected() {
        let config = parse(
            r#"
agents = []
"#,
        );
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::Registry(RegistryError::Empty))
        );
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = parse("[execution]\nagent_timeout_seconds = 0\n");
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let config = parse("[backends.endpoints]\nlangchain = \"http://localhost:9000\"\n");
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnknownBackend { ref name, .. }) if name == "langchain"
        ));
    }

    #[test]
    fn test_weight_out_of_range_is_rejected() {
        let config = parse("[selection]\ncapability_weight = 1.5\n");
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidWeight {
                field: "capability_weight",
                ..
            })
        ));
    }

    #[test]
    fn test_agent_default_for_undeclared_agent_is_rejected() {
        let config = parse("[backends.agent_defaults]\nghost = \"crew\"\n");
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UnknownAgent("ghost".to_string()))
        );
    }

    #[test]
    fn test_endpoints_are_keyed_by_backend_kind() {
        let config = parse("[backends.endpoints]\ncrew = \"http://localhost:8100\"\n");
        let endpoints = config.backend_endpoints().unwrap();
        assert_eq!(
            endpoints.get(&BackendKind::Crew).map(String::as_str),
            Some("http://localhost:8100")
        );
    }

    #[test]
    fn test_empty_intent_lists_keep_builtin_rules() {
        let config = parse(
            r#"
[intent]
min_clear_words = 2

[[intent.sub_intents]]
result_tag = "overview"
keywords = ["tell me about"]
"#,
        );
        let rules = config.intent_rules();
        assert_eq!(rules.sub_intents.len(), 1);
        assert_eq!(rules.reasoning_styles, default_intent_rules().reasoning_styles);
        assert_eq!(rules.min_clear_words, 2);
    }
}
