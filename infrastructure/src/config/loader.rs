//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "conductor";
const PROJECT_FILES: [&str; 2] = ["conductor.toml", ".conductor.toml"];
const ENV_PREFIX: &str = "CONDUCTOR_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `CONDUCTOR_EXECUTION__AGENT_TIMEOUT_SECONDS=30`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./conductor.toml` or `./.conductor.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/conductor/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Build the merged figment without extracting it
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/conductor/config.toml if set,
    /// otherwise falls back to ~/.config/conductor/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let marker = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", marker, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./conductor.toml or ./.conductor.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conductor_domain::BackendKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.agents.len(), 9);
        assert_eq!(config.execution.agent_timeout_seconds, 60);
        assert!(config.logging.run_log.is_none());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("conductor"));
    }

    #[test]
    fn test_explicit_file_overrides_only_named_keys() {
        let file = write_config(
            r#"
[execution]
agent_timeout_seconds = 15
max_concurrency = 2

[backends.endpoints]
crew = "http://localhost:8100"
"#,
        );

        let config = ConfigLoader::load(Some(file.path())).unwrap();

        assert_eq!(config.execution.agent_timeout_seconds, 15);
        assert_eq!(config.execution.max_concurrency, Some(2));
        assert_eq!(config.agents.len(), 9);
        assert_eq!(config.selection.threshold, 0.3);
        assert!(config.validate().is_ok());
        assert!(
            config
                .backend_endpoints()
                .unwrap()
                .contains_key(&BackendKind::Crew)
        );
    }

    #[test]
    fn test_explicit_agent_table_replaces_builtin() {
        let file = write_config(
            r#"
[[agents]]
id = "rules_expert"
capabilities = ["overview"]
reasoning_styles = ["default"]

[backends]
agent_defaults = { rules_expert = "crew" }
"#,
        );

        let config = ConfigLoader::load(Some(file.path())).unwrap();

        assert_eq!(config.agents.len(), 1);
        assert_eq!(config.agents[0].id, "rules_expert");
        assert!(config.validate().is_ok());
        assert_eq!(
            config.effective_agent_defaults().keys().collect::<Vec<_>>(),
            vec!["rules_expert"]
        );
    }

    #[test]
    fn test_agent_defaults_layer_over_builtin_table() {
        let file = write_config(
            r#"
[backends.agent_defaults]
timeline_planner = "conversational"
"#,
        );

        let config = ConfigLoader::load(Some(file.path())).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.backends.agent_defaults.len(), 1);
        let defaults = config.effective_agent_defaults();
        assert_eq!(defaults["timeline_planner"], "conversational");
        assert_eq!(defaults["competition_overview"], "crew");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let file = write_config("[execution\nagent_timeout_seconds = ");
        assert!(ConfigLoader::load(Some(file.path())).is_err());
    }
}
