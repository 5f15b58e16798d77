//! Built-in agent table and keyword rules
//!
//! Used whenever a configuration file does not override `[[agents]]` or the
//! `[intent]` rule lists. Backend fallbacks follow whichever built-in agents
//! stay declared.

use super::file_config::FileAgentConfig;
use conductor_domain::{AMBIGUITY_FLAG, IntentRuleSet, KeywordRule, URGENCY_FLAG};
use std::collections::BTreeMap;

fn agent(id: &str, capabilities: &[&str], styles: &[&str], tags: &[&str]) -> FileAgentConfig {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    FileAgentConfig {
        id: id.to_string(),
        capabilities: owned(capabilities),
        reasoning_styles: owned(styles),
        tags: owned(tags),
    }
}

/// Specialists for answering questions about one data-science contest.
pub fn default_agents() -> Vec<FileAgentConfig> {
    vec![
        agent(
            "competition_overview",
            &["overview", "rules", "evaluation", "summary"],
            &["default"],
            &["competition", "metric"],
        ),
        agent(
            "leaderboard_analyst",
            &["leaderboard", "ranking", "submissions"],
            &["default"],
            &["scores", "overview"],
        ),
        agent(
            "data_analyst",
            &["analysis", "data", "eda"],
            &["stepwise", "default"],
            &["dataset", "features", "model"],
        ),
        agent(
            "code_helper",
            &["code", "notebooks", "implementation"],
            &["stepwise"],
            &["python", "error_detection"],
        ),
        agent(
            "error_checker",
            &["error_detection", "error", "debugging"],
            &["stepwise"],
            &["code", "traceback"],
        ),
        agent(
            "model_advisor",
            &["model", "modeling", "ensembling"],
            &["multi-hop", "default"],
            &["hyperparameters", "analysis"],
        ),
        agent(
            "timeline_planner",
            &["timeline_planning", "planning", "timeline"],
            &["hierarchical"],
            &["deadline", "strategy"],
        ),
        agent(
            "discussion_guide",
            &["discussion", "community", "conversational"],
            &["conversational"],
            &["forum", "resources"],
        ),
        agent(
            "resource_scout",
            &["resources", "latest_updates"],
            &["default"],
            &["papers", "news", "discussion"],
        ),
    ]
}

/// Fallback backend per built-in agent when no reasoning-style rule applies.
pub fn default_agent_backends() -> BTreeMap<String, String> {
    [
        ("competition_overview", "crew"),
        ("leaderboard_analyst", "crew"),
        ("data_analyst", "crew"),
        ("model_advisor", "crew"),
        ("resource_scout", "conversational"),
        ("discussion_guide", "conversational"),
    ]
    .into_iter()
    .map(|(id, kind)| (id.to_string(), kind.to_string()))
    .collect()
}

/// Keyword rules for contest questions.
pub fn default_intent_rules() -> IntentRuleSet {
    IntentRuleSet::new(
        vec![
            KeywordRule::new(
                "overview",
                ["overview", "about the competition", "rules", "metric", "evaluat"],
            ),
            KeywordRule::new("leaderboard", ["leaderboard", "rank", "public score", "private score"]),
            KeywordRule::new("analysis", ["analy", "exploratory", "explore", "dataset", "feature"]),
            KeywordRule::new("code", ["code", "notebook", "script", "implement", "python"]),
            KeywordRule::new(
                "error_detection",
                ["error", "bug", "traceback", "exception", "debug", "crash"],
            ),
            KeywordRule::new(
                "model",
                ["model", "ensembl", "hyperparameter", "xgboost", "lightgbm", "neural"],
            ),
            KeywordRule::new(
                "timeline_planning",
                ["timeline", "deadline", "schedule", "roadmap", "strategy"],
            ),
            KeywordRule::new("discussion", ["discussion", "forum", "community", "thread"]),
            KeywordRule::new("resources", ["latest", "news", "paper", "resource", "tutorial"]),
        ],
        vec![
            KeywordRule::new("stepwise", ["step by step", "step-by-step", "walk me through"]),
            KeywordRule::new("multi-hop", ["compare", "versus", " vs ", "trade-off"]),
            KeywordRule::new("conversational", ["chat", "talk", "brainstorm"]),
            KeywordRule::new("hierarchical", ["organize", "coordinate", "break down"]),
        ],
        vec![
            KeywordRule::new(
                URGENCY_FLAG,
                ["urgent", "asap", "quickly", "right now", "ends today", "last day"],
            ),
            KeywordRule::new(AMBIGUITY_FLAG, ["something", "stuff", "anything", "not sure"]),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_agents_are_unique_and_capable() {
        let agents = default_agents();
        let ids: HashSet<&str> = agents.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), agents.len());
        assert!(agents.iter().all(|a| !a.capabilities.is_empty()));
    }

    #[test]
    fn test_every_sub_intent_rule_has_a_capable_agent() {
        let agents = default_agents();
        for rule in default_intent_rules().sub_intents {
            assert!(
                agents
                    .iter()
                    .any(|a| a.capabilities.contains(&rule.result_tag)),
                "no agent handles {}",
                rule.result_tag
            );
        }
    }

    #[test]
    fn test_default_rules_classify_contest_question() {
        let intent = default_intent_rules()
            .classify("Walk me through debugging my notebook step by step, the deadline is close");
        assert_eq!(
            intent.sub_intents,
            vec!["code", "error_detection", "timeline_planning"]
        );
        assert_eq!(intent.reasoning_style, "stepwise");
    }
}
