//! Console output formatter for orchestration results

use colored::Colorize;
use conductor_domain::{AgentDescriptor, InteractionPlan, OrchestrationResult, ParsedIntent};

/// Formats orchestration results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete envelope
    pub fn format(result: &OrchestrationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Conductor Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Question:".cyan().bold(), result.query));

        if let Some(error) = &result.error {
            output.push_str(&format!("\n{} {}\n", "Error:".red().bold(), error));
            output.push_str(&Self::footer());
            return output;
        }

        if let Some(pattern) = result.pattern {
            output.push_str(&format!("{} {}\n", "Pattern:".cyan().bold(), pattern));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Agents:".cyan().bold(),
            result.agents_used.join(", ")
        ));
        let backends: Vec<&str> = result.backends_used.iter().map(|b| b.as_str()).collect();
        output.push_str(&format!(
            "{} {}\n",
            "Backends:".cyan().bold(),
            backends.join(", ")
        ));

        output.push_str(&Self::section_header("Answers"));
        for run in &result.per_agent_results {
            let title = format!("── {} ({}, {}ms) ──", run.agent_id, run.backend, run.duration_ms);
            match &run.error {
                None => output.push_str(&format!("\n{}\n{}\n", title.yellow().bold(), run.output)),
                Some(error) => output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    title.red().bold(),
                    error
                )),
            }
        }

        let succeeded = result.succeeded().count();
        output.push_str(&format!(
            "\n{} {}/{} agents answered\n",
            "Summary:".cyan().bold(),
            succeeded,
            result.agent_count
        ));
        if result.incomplete {
            output.push_str(&format!(
                "{}\n",
                "Execution was cancelled; results are incomplete.".yellow()
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &OrchestrationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Only the answers of agents that succeeded (concise output)
    pub fn format_answers(result: &OrchestrationResult) -> String {
        if let Some(error) = &result.error {
            return format!("{} {}\n", "Error:".red().bold(), error);
        }

        let mut output = String::new();
        for run in result.succeeded() {
            output.push_str(&format!("{}\n", format!("[{}]", run.agent_id).bold()));
            output.push_str(&run.output);
            output.push_str("\n\n");
        }
        if !result.has_answer() {
            output.push_str(&format!("{}\n", "No agent produced an answer.".yellow()));
        }
        output
    }

    /// Describe a plan without running it
    pub fn format_plan(intent: &ParsedIntent, plan: &InteractionPlan) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Intent"));
        output.push_str(&format!("  primary:   {}\n", intent.primary_intent));
        output.push_str(&format!("  facets:    {}\n", intent.sub_intents.join(", ")));
        output.push_str(&format!("  reasoning: {}\n", intent.reasoning_style));
        let flags: Vec<&str> = intent
            .metadata_flags
            .iter()
            .filter(|(_, set)| **set)
            .map(|(name, _)| name.as_str())
            .collect();
        if !flags.is_empty() {
            output.push_str(&format!("  flags:     {}\n", flags.join(", ")));
        }

        output.push_str(&Self::section_header("Plan"));
        output.push_str(&format!(
            "  {} {} (complexity {:.2}, estimated {})\n\n",
            "pattern:".bold(),
            plan.pattern,
            plan.complexity_score,
            plan.estimated_duration
        ));
        for (step, agent) in plan.ordered_agents().enumerate() {
            output.push_str(&format!(
                "  {}. {} [{}] {:.2}\n     {}\n",
                step + 1,
                agent.agent_id.yellow(),
                agent.backend,
                agent.confidence,
                agent.rationale.dimmed()
            ));
        }
        output
    }

    /// Table of registered agents
    pub fn format_agents<'a>(agents: impl IntoIterator<Item = &'a AgentDescriptor>) -> String {
        let mut output = Self::section_header("Registered agents");
        for agent in agents {
            output.push_str(&format!("\n  {}\n", agent.id.yellow().bold()));
            output.push_str(&format!(
                "    capabilities: {}\n",
                Self::join(agent.capabilities.iter())
            ));
            if !agent.reasoning_styles.is_empty() {
                output.push_str(&format!(
                    "    reasoning:    {}\n",
                    Self::join(agent.reasoning_styles.iter())
                ));
            }
            if !agent.tags.is_empty() {
                output.push_str(&format!("    tags:         {}\n", Self::join(agent.tags.iter())));
            }
        }
        output
    }

    fn join<'a>(items: impl Iterator<Item = &'a String>) -> String {
        items.map(String::as_str).collect::<Vec<_>>().join(", ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conductor_domain::{
        AgentRunResult, BackendKind, ContextMap, InteractionPattern, OrchestrationResult,
    };
    use std::collections::BTreeSet;

    fn envelope() -> OrchestrationResult {
        OrchestrationResult {
            query: "what is the metric?".to_string(),
            pattern: Some(InteractionPattern::Sequential),
            agents_used: vec!["competition_overview".into(), "leaderboard_analyst".into()],
            backends_used: BTreeSet::from([BackendKind::Crew]),
            per_agent_results: vec![
                AgentRunResult::success(
                    "competition_overview",
                    BackendKind::Crew,
                    "RMSE on the hidden test set",
                    ContextMap::new(),
                ),
                AgentRunResult::failure(
                    "leaderboard_analyst",
                    BackendKind::Crew,
                    "Timed out after 60s",
                ),
            ],
            agent_count: 2,
            incomplete: false,
            plan: None,
            error: None,
        }
    }

    #[test]
    fn test_full_output_lists_answers_and_failures() {
        let text = ConsoleFormatter::format(&envelope());
        assert!(text.contains("RMSE on the hidden test set"));
        assert!(text.contains("Timed out after 60s"));
        assert!(text.contains("competition_overview, leaderboard_analyst"));
    }

    #[test]
    fn test_answers_output_skips_failures() {
        let text = ConsoleFormatter::format_answers(&envelope());
        assert!(text.contains("RMSE on the hidden test set"));
        assert!(!text.contains("Timed out"));
    }

    #[test]
    fn test_planning_error_is_shown() {
        let result = OrchestrationResult::planning_failed("hmm", "no agents matched; please rephrase");
        assert!(ConsoleFormatter::format(&result).contains("no agents matched; please rephrase"));
        assert!(
            ConsoleFormatter::format_answers(&result).contains("no agents matched; please rephrase")
        );
    }

    #[test]
    fn test_json_output_is_the_envelope() {
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&envelope())).unwrap();
        assert_eq!(value["pattern"], "sequential");
        assert_eq!(value["agent_count"], 2);
        assert_eq!(value["per_agent_results"][1]["error"], "Timed out after 60s");
        assert!(value.get("error").is_none());
    }
}
