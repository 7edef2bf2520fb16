pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod env;
pub mod hooks;
pub mod publish;
pub mod registry;
pub mod review;
pub mod templates;

pub use cli::SeedCli;
pub use env::{CommandOutput, Environment, SystemEnvironment};
pub use publish::{PushOutcome, RemotePublisher, RetrySchedule, Sleeper};
pub use registry::CommandRegistry;
pub use seed_core::{NonInteractiveMode, Prompter, RuntimeConfig, SeedCommand, SeedSettings};
pub use templates::{render, TemplateSet, Vars};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Aborted by user")]
    Aborted,

    #[error("`{command}` failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
