//! CLI command definitions

use clap::{Parser, ValueEnum};
use conductor_domain::InteractionPattern;
use serde_json::Value;
use std::path::PathBuf;

/// Output format for orchestration results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plan, per-agent answers and failures
    Full,
    /// Only the answers of agents that succeeded
    Answers,
    /// The response envelope as JSON
    Json,
}

/// CLI arguments for conductor
#[derive(Parser, Debug)]
#[command(name = "conductor")]
#[command(author, version, about = "Route one question to a team of specialist agents")]
#[command(long_about = r#"
Conductor answers a question about a data-science competition by routing it
to a small team of specialist agents.

For every question it:
1. Classifies the request into sub-intents and a reasoning style
2. Selects the best-matching agents and assigns each an execution backend
3. Picks an interaction pattern (sequential, parallel, hierarchical, ...)
4. Runs the plan and returns every agent's answer in one envelope

Configuration files are loaded from (in priority order):
1. CONDUCTOR_* environment variables
2. --config <path>        Explicit config file
3. ./conductor.toml       Project-level config
4. ~/.config/conductor/config.toml   Global config

Example:
  conductor "What is the evaluation metric and where am I on the leaderboard?"
  conductor --offline --plan-only "Walk me through debugging my notebook step by step"
  conductor --context competition=titanic --output json "Which features matter most?"
"#)]
pub struct Cli {
    /// The question to answer
    pub question: Option<String>,

    /// Extra context passed to the first agents (repeatable, values may be JSON)
    #[arg(long = "context", value_name = "KEY=VALUE", value_parser = parse_context_pair)]
    pub context: Vec<(String, Value)>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Print the plan without running any agent
    #[arg(long)]
    pub plan_only: bool,

    /// Force an interaction pattern instead of letting the planner choose
    #[arg(long, value_name = "PATTERN")]
    pub pattern: Option<InteractionPattern>,

    /// Answer with the local offline backend instead of remote services
    #[arg(long)]
    pub offline: bool,

    /// Per-agent timeout in seconds (overrides configuration)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum number of agents running at once (overrides configuration)
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// List the registered agents and exit
    #[arg(long)]
    pub list_agents: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Plain line-by-line progress instead of spinners
    #[arg(long, conflicts_with = "quiet")]
    pub plain: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Spinners only make sense on a terminal; fall back to plain lines otherwise.
    pub fn plain_progress(&self, stderr_is_terminal: bool) -> bool {
        self.plain || !stderr_is_terminal
    }
}

/// Parse `key=value`; the value is read as JSON when it parses, else as a string.
pub fn parse_context_pair(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("context key is empty in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_context_pair() {
        assert_eq!(
            parse_context_pair("competition=titanic").unwrap(),
            ("competition".to_string(), json!("titanic"))
        );
        assert_eq!(
            parse_context_pair("rank=42").unwrap(),
            ("rank".to_string(), json!(42))
        );
        assert_eq!(
            parse_context_pair("features=[\"Age\",\"Fare\"]").unwrap().1,
            json!(["Age", "Fare"])
        );
        assert_eq!(
            parse_context_pair("note=a=b").unwrap(),
            ("note".to_string(), json!("a=b"))
        );
        assert!(parse_context_pair("no-separator").is_err());
        assert!(parse_context_pair("=value").is_err());
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "conductor",
            "--context",
            "competition=titanic",
            "--pattern",
            "validation",
            "--output",
            "json",
            "--offline",
            "-vv",
            "check my model code",
        ])
        .unwrap();

        assert_eq!(cli.question.as_deref(), Some("check my model code"));
        assert_eq!(cli.pattern, Some(InteractionPattern::Validation));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.context.len(), 1);
        assert!(cli.offline);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_plain_progress_selection() {
        let cli = Cli::try_parse_from(["conductor", "q"]).unwrap();
        assert!(!cli.plain_progress(true));
        assert!(cli.plain_progress(false));

        let cli = Cli::try_parse_from(["conductor", "--plain", "q"]).unwrap();
        assert!(cli.plain);
        assert!(cli.plain_progress(true));

        assert!(Cli::try_parse_from(["conductor", "--plain", "--quiet", "q"]).is_err());
    }

    #[test]
    fn test_unknown_pattern_is_rejected() {
        assert!(Cli::try_parse_from(["conductor", "--pattern", "round_robin", "q"]).is_err());
    }
}
