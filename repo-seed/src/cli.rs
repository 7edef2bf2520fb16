use crate::CommandRegistry;
use anyhow::Result;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Arg, ColorChoice, Command};
use seed_core::{NonInteractiveMode, OutputFormat, RuntimeConfig};

pub struct SeedCli {
    registry: CommandRegistry,
}

impl SeedCli {
    pub fn new() -> Self {
        let mut registry = CommandRegistry::new();
        registry.register_builtin();
        Self { registry }
    }

    pub fn build_app(&self) -> Command {
        let styles = Styles::styled()
            .header(AnsiColor::BrightCyan.on_default() | Effects::BOLD)
            .usage(AnsiColor::BrightGreen.on_default() | Effects::BOLD)
            .literal(AnsiColor::BrightWhite.on_default())
            .placeholder(AnsiColor::BrightYellow.on_default())
            .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
            .valid(AnsiColor::BrightGreen.on_default())
            .invalid(AnsiColor::BrightRed.on_default());

        let app = Command::new("repo-seed")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Bootstrap a new project with git, templates, a review hook and a first push")
            .author("Repo Seed Contributors")
            .styles(styles)
            .color(ColorChoice::Auto)
            .disable_help_subcommand(true);

        let app = self.registry.build_cli(app);

        app.arg(
            Arg::new("non-interactive")
                .long("non-interactive")
                .value_name("MODE")
                .value_parser(["fail", "defaults"])
                .default_value("defaults")
                .help("How to answer prompts without a terminal")
                .global(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .value_parser(["human", "json"])
                .default_value("human")
                .help("Output format for the run report")
                .global(true),
        )
    }

    pub fn run(&self, args: Vec<String>) -> Result<()> {
        self.init_logging();

        let app = self.build_app();
        let matches = app.try_get_matches_from(args)?;

        match matches.subcommand() {
            Some((command_name, sub_matches)) => {
                let config = runtime_config(sub_matches)?;
                tracing::debug!(
                    "running {} in {} ({:?})",
                    command_name,
                    config.working_dir.display(),
                    config.non_interactive
                );
                self.registry.handle_command(command_name, sub_matches, &config)
            }
            None => {
                let mut app = self.build_app();
                app.print_help()?;
                println!();
                Ok(())
            }
        }
    }

    fn init_logging(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("repo_seed=info"));

        // A second call (tests) keeps the first subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .try_init();
    }
}

fn runtime_config(matches: &clap::ArgMatches) -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::new(std::env::current_dir()?);

    if let Some(mode) = matches.get_one::<String>("non-interactive") {
        config.non_interactive = mode.parse::<NonInteractiveMode>()?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        config.output_format = format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    Ok(config)
}

impl Default for SeedCli {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_creation() {
        let cli = SeedCli::new();
        let app = cli.build_app();
        assert_eq!(app.get_name(), "repo-seed");
        assert!(app.get_version().is_some());
    }

    #[test]
    fn test_subcommands_and_aliases() {
        let cli = SeedCli::new();
        let app = cli.build_app();

        let matches = app
            .clone()
            .try_get_matches_from(vec!["repo-seed", "init", "--language", "rust", "--no-readme"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "full");
        assert_eq!(sub.get_one::<String>("language").map(String::as_str), Some("rust"));
        assert!(sub.get_flag("no-readme"));

        let matches = app.try_get_matches_from(vec!["repo-seed", "q"]).unwrap();
        assert_eq!(matches.subcommand_name(), Some("quick"));
    }

    #[test]
    fn test_global_options() {
        let cli = SeedCli::new();
        let matches = cli
            .build_app()
            .try_get_matches_from(vec![
                "repo-seed",
                "wizard",
                "--non-interactive",
                "fail",
                "--format",
                "json",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let config = runtime_config(sub).unwrap();
        assert_eq!(config.non_interactive, NonInteractiveMode::Fail);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let cli = SeedCli::new();
        let result = cli
            .build_app()
            .try_get_matches_from(vec!["repo-seed", "quick", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_command() {
        let cli = SeedCli::new();
        let result = cli.run(vec!["repo-seed".to_string(), "--help".to_string()]);

        match result {
            Ok(_) => {}
            Err(e) => {
                if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
                    assert_eq!(clap_err.kind(), clap::error::ErrorKind::DisplayHelp);
                } else {
                    panic!("Unexpected error type: {}", e);
                }
            }
        }
    }
}
