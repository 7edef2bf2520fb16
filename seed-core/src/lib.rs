use anyhow::{Context, Result};
use clap::{ArgMatches, Command};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod interactive;
pub mod output;

pub use interactive::{is_interactive, NonInteractiveMode, Prompter, TerminalPrompter};
pub use output::{
    format_error, format_header, format_info, format_section, format_success, format_warning,
    Action, ActionKind, OutputContext, OutputContextImpl, OutputFormat, OutputFormatter, Status,
    TableOutput,
};

/// Trait that every repo-seed front-end command implements
pub trait SeedCommand {
    /// Returns the command name (used for routing)
    fn name(&self) -> &str;

    /// Register the clap subcommand for this front-end
    fn register_commands(&self, app: Command) -> Command;

    /// Handle an invocation of this command
    fn handle_command(&self, matches: &ArgMatches, config: &RuntimeConfig) -> Result<()>;
}

/// Runtime configuration shared by all commands
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub working_dir: PathBuf,
    pub non_interactive: NonInteractiveMode,
    pub output_format: OutputFormat,
}

impl RuntimeConfig {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            non_interactive: NonInteractiveMode::Defaults,
            output_format: OutputFormat::Human,
        }
    }

    /// Resolve a user-supplied path against the working directory
    pub fn resolve_path(&self, path: Option<&Path>) -> PathBuf {
        match path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => self.working_dir.join(p),
            None => self.working_dir.clone(),
        }
    }
}

/// Optional `seed.toml` living next to the templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSettings {
    #[serde(default = "default_branch")]
    pub default_branch: String,
    #[serde(default = "default_remote_name")]
    pub remote_name: String,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_branch() -> String { "main".to_string() }
fn default_remote_name() -> String { "origin".to_string() }
fn default_commit_message() -> String {
    "Initial commit: Project setup with CodeRabbit CLI".to_string()
}
fn default_language() -> String { "python".to_string() }

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            default_branch: default_branch(),
            remote_name: default_remote_name(),
            commit_message: default_commit_message(),
            language: default_language(),
        }
    }
}

impl SeedSettings {
    pub const FILE_NAME: &'static str = "seed.toml";

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings: SeedSettings = toml::from_str(&content)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        Ok(settings)
    }

    /// Load `seed.toml` from a templates directory. A missing file yields defaults.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = SeedSettings::default();
        assert_eq!(settings.default_branch, "main");
        assert_eq!(settings.remote_name, "origin");
        assert_eq!(settings.language, "python");
        assert!(settings.commit_message.starts_with("Initial commit"));
    }

    #[test]
    fn test_missing_settings_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let settings = SeedSettings::load_from_dir(dir.path()).unwrap();
        assert_eq!(settings, SeedSettings::default());
    }

    #[test]
    fn test_partial_settings_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SeedSettings::FILE_NAME),
            "default_branch = \"trunk\"\nlanguage = \"rust\"\n",
        )
        .unwrap();

        let settings = SeedSettings::load_from_dir(dir.path()).unwrap();
        assert_eq!(settings.default_branch, "trunk");
        assert_eq!(settings.language, "rust");
        assert_eq!(settings.remote_name, "origin");
    }

    #[test]
    fn test_settings_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SeedSettings::FILE_NAME);

        let settings = SeedSettings {
            commit_message: "chore: bootstrap".to_string(),
            ..SeedSettings::default()
        };
        settings.save_to_file(&path).unwrap();

        let loaded = SeedSettings::load_from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_malformed_settings_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SeedSettings::FILE_NAME), "default_branch = [").unwrap();
        let err = SeedSettings::load_from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid settings"));
    }

    #[test]
    fn test_resolve_path() {
        let config = RuntimeConfig::new(PathBuf::from("/work"));
        assert_eq!(config.resolve_path(None), PathBuf::from("/work"));
        assert_eq!(
            config.resolve_path(Some(Path::new("app"))),
            PathBuf::from("/work/app")
        );
        assert_eq!(
            config.resolve_path(Some(Path::new("/abs/app"))),
            PathBuf::from("/abs/app")
        );
    }
}
