use crate::commands::{FullCommand, QuickCommand, WizardCommand};
use crate::SeedError;
use anyhow::Result;
use clap::{ArgMatches, Command};
use seed_core::{RuntimeConfig, SeedCommand};
use std::collections::BTreeMap;

pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn SeedCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, command: Box<dyn SeedCommand>) {
        let name = command.name().to_string();
        self.commands.insert(name, command);
    }

    /// Register the three built-in front-ends
    pub fn register_builtin(&mut self) {
        self.register(Box::new(FullCommand::new()));
        self.register(Box::new(QuickCommand::new()));
        self.register(Box::new(WizardCommand::new()));
    }

    pub fn build_cli(&self, base_app: Command) -> Command {
        self.commands
            .values()
            .fold(base_app, |app, command| command.register_commands(app))
    }

    pub fn handle_command(
        &self,
        command_name: &str,
        matches: &ArgMatches,
        config: &RuntimeConfig,
    ) -> Result<()> {
        match self.commands.get(command_name) {
            Some(command) => command.handle_command(matches, config),
            None => Err(SeedError::UnknownCommand(command_name.to_string()).into()),
        }
    }

    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.keys().map(|k| k.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_empty_registry() {
        let registry = CommandRegistry::new();
        assert!(registry.list_commands().is_empty());
    }

    #[test]
    fn test_builtin_commands() {
        let mut registry = CommandRegistry::new();
        registry.register_builtin();
        assert_eq!(registry.list_commands(), vec!["full", "quick", "wizard"]);
    }

    #[test]
    fn test_unknown_command() {
        let registry = CommandRegistry::new();
        let matches = Command::new("repo-seed").get_matches_from(vec!["repo-seed"]);
        let config = RuntimeConfig::new(PathBuf::from("."));
        let err = registry.handle_command("deploy", &matches, &config).unwrap_err();
        assert!(err.to_string().contains("Unknown command: deploy"));
    }
}
