//! Progress reporting for plan execution

use colored::Colorize;
use conductor_application::OrchestrationProgress;
use conductor_domain::{AgentRunResult, AgentSelection, InteractionPlan, OrchestrationResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with an indicatif bar, one tick per finished agent
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl OrchestrationProgress for ProgressReporter {
    fn on_plan_ready(&self, plan: &InteractionPlan) {
        let bar = ProgressBar::new(plan.agents.len() as u64);
        bar.set_style(Self::bar_style());
        bar.set_prefix(format!("{} plan", plan.pattern));
        bar.set_message(format!("estimated {}", plan.estimated_duration));
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn on_agent_start(&self, agent: &AgentSelection) {
        self.with_bar(|bar| bar.set_message(format!("running {}", agent.agent_id)));
    }

    fn on_agent_complete(&self, result: &AgentRunResult) {
        self.with_bar(|bar| {
            let status = if result.is_success() {
                format!("{} {}", "v".green(), result.agent_id)
            } else {
                format!("{} {}", "x".red(), result.agent_id)
            };
            bar.set_message(status);
            bar.inc(1);
        });
    }

    fn on_execution_complete(&self, result: &OrchestrationResult) {
        let Ok(mut slot) = self.bar.lock() else {
            return;
        };
        if let Some(bar) = slot.take() {
            if result.incomplete {
                bar.abandon_with_message("cancelled".yellow().to_string());
            } else {
                bar.finish_with_message(format!(
                    "{} {}/{} answered",
                    "done".green(),
                    result.succeeded().count(),
                    result.agent_count
                ));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl OrchestrationProgress for SimpleProgress {
    fn on_plan_ready(&self, plan: &InteractionPlan) {
        eprintln!(
            "{} {} plan with {} agents (estimated {})",
            "->".cyan(),
            plan.pattern.to_string().bold(),
            plan.agents.len(),
            plan.estimated_duration
        );
    }

    fn on_agent_start(&self, agent: &AgentSelection) {
        eprintln!("  {} {} [{}]", "..".dimmed(), agent.agent_id, agent.backend);
    }

    fn on_agent_complete(&self, result: &AgentRunResult) {
        if result.is_success() {
            eprintln!("  {} {} ({}ms)", "v".green(), result.agent_id, result.duration_ms);
        } else {
            eprintln!(
                "  {} {} (failed: {})",
                "x".red(),
                result.agent_id,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    fn on_execution_complete(&self, result: &OrchestrationResult) {
        if result.incomplete {
            eprintln!("{}", "Execution cancelled".yellow());
        }
        eprintln!();
    }
}
