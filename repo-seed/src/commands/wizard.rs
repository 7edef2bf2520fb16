use super::steps;
use super::{execute, with_common_args, RunConfig, RunSummary, Session};
use crate::bootstrap::GitBootstrap;
use crate::review;
use crate::templates::{builtin, CODERABBIT_CONFIG, DOCKERIGNORE, GITATTRIBUTES, README};
use anyhow::Result;
use clap::ArgMatches;
use seed_core::{Action, ActionKind, RuntimeConfig, SeedCommand, Status, TableOutput};

/// (tag, label, description)
pub const KNOWN_LANGUAGES: &[(&str, &str, &str)] = &[
    ("python", "Python", "Python project with virtual environment support"),
    ("javascript", "JavaScript", "Node.js/JavaScript project"),
    ("typescript", "TypeScript", "TypeScript project"),
    ("java", "Java", "Java project with Maven/Gradle"),
    ("go", "Go", "Go project"),
    ("rust", "Rust", "Rust project"),
    ("generic", "Generic", "Generic project (minimal setup)"),
];

pub struct WizardCommand;

impl WizardCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WizardCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedCommand for WizardCommand {
    fn name(&self) -> &str {
        "wizard"
    }

    fn register_commands(&self, app: clap::Command) -> clap::Command {
        let cmd = clap::Command::new("wizard")
            .about("Interactive project setup")
            .long_about(
                "Walk through project name, description, language and setup options, \
                 review a summary, then run the selected steps.",
            )
            .visible_alias("w");

        app.subcommand(with_common_args(cmd))
    }

    fn handle_command(&self, matches: &ArgMatches, config: &RuntimeConfig) -> Result<()> {
        execute(matches, config, run_wizard)
    }
}

/// Environment facts gathered before asking anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prerequisites {
    pub git: bool,
    pub review_cli: bool,
    pub folder_empty: bool,
    pub git_configured: bool,
}

pub fn check_prerequisites(session: &mut Session<'_>) -> Prerequisites {
    session.output.print_section("Checking prerequisites");

    let bootstrap = GitBootstrap::new(session.env);
    let checks = Prerequisites {
        git: bootstrap.git_available(),
        review_cli: review::is_installed(session.env),
        folder_empty: steps::project_is_empty(session).unwrap_or(false),
        git_configured: bootstrap.identity().is_configured(),
    };

    let lines = [
        (checks.git, Status::Error, "Git", "Available", "Not found"),
        (checks.review_cli, Status::Warning, "CodeRabbit CLI", "Installed", "Not installed"),
        (checks.folder_empty, Status::Warning, "Project folder", "Empty", "Contains files"),
        (checks.git_configured, Status::Warning, "Git user", "Configured", "Not configured"),
    ];
    for (ok, missing_status, label, yes, no) in lines {
        let status = if ok { Status::Success } else { missing_status };
        session
            .output
            .print_status(status, &format!("{}: {}", label, if ok { yes } else { no }));
    }

    checks
}

fn ask_project_info(session: &mut Session<'_>, run: &mut RunConfig) -> Result<()> {
    session.output.print_section("Project information");

    run.project_name = session
        .prompter
        .text("Project name", Some(&run.project_name))?
        .trim()
        .to_string();
    run.description = session
        .prompter
        .text("Project description", Some(&run.description))?
        .trim()
        .to_string();

    let labels: Vec<String> = KNOWN_LANGUAGES
        .iter()
        .map(|(_, label, desc)| format!("{} - {}", label, desc))
        .collect();
    let default = KNOWN_LANGUAGES
        .iter()
        .position(|(tag, _, _)| *tag == run.language)
        .unwrap_or(0);
    let choice = session
        .prompter
        .select("Select programming language", &labels, default)?;
    run.language = KNOWN_LANGUAGES
        .get(choice)
        .map(|(tag, _, _)| tag.to_string())
        .unwrap_or_else(|| run.language.clone());

    Ok(())
}

fn ask_options(session: &mut Session<'_>, run: &mut RunConfig) -> Result<()> {
    session.output.print_section("Setup options");

    let prompter = &mut *session.prompter;
    run.readme = prompter.confirm("Create README.md", true)?;
    run.docker = prompter.confirm("Add Docker support", false)?;
    run.hooks = prompter.confirm("Setup pre-commit hooks", true)?;
    run.review_config = prompter.confirm("Setup CodeRabbit CLI", true)?;
    run.commit = prompter.confirm("Create initial commit", true)?;
    run.push = run.commit && prompter.confirm("Push to a remote afterwards", true)?;
    run.explain_workflow = prompter.confirm("Show workflow explanation", true)?;
    Ok(())
}

fn show_summary(session: &mut Session<'_>, run: &RunConfig) -> Result<bool> {
    session.output.print_section("Setup summary");

    let mut info = TableOutput::new(vec!["Setting".to_string(), "Value".to_string()]);
    info.add_row(vec!["Project Name".to_string(), run.project_name.clone()]);
    info.add_row(vec!["Description".to_string(), run.description.clone()]);
    info.add_row(vec!["Language".to_string(), run.language.clone()]);
    info.add_row(vec!["Path".to_string(), session.project().display().to_string()]);
    session.output.print_table(info);

    let mut options = TableOutput::new(vec!["Option".to_string(), "Status".to_string()]);
    for (label, enabled) in [
        ("Create README", run.readme),
        ("Docker support", run.docker),
        ("Pre-commit hook", run.hooks),
        ("CodeRabbit config", run.review_config),
        ("Initial commit", run.commit),
        ("Push to remote", run.push),
        ("Workflow explanation", run.explain_workflow),
    ] {
        let status = if enabled { "enabled" } else { "disabled" };
        options.add_row(vec![label.to_string(), status.to_string()]);
    }
    session.output.print_table(options);

    session.prompter.confirm("Proceed with setup?", true)
}

/// Interactive flow. Step failures are reported and skipped; only prompt
/// failures end the run early.
pub fn run_wizard(session: &mut Session<'_>) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    session.output.print_header("Smart Repository Initializer");
    session
        .output
        .print_text("Sets up git, language ignore rules, CodeRabbit review, hooks and more.");

    let checks = check_prerequisites(session);
    steps::ensure_templates(session);

    let mut run = RunConfig::for_project(session.project(), session.settings);
    ask_project_info(session, &mut run)?;
    ask_options(session, &mut run)?;

    if !show_summary(session, &run)? {
        session.output.print_status(Status::Warning, "Setup cancelled.");
        return Ok(summary);
    }

    session.output.print_section("Starting setup");

    if run.hooks || run.commit {
        match steps::init_git(session) {
            Ok(created) => summary.git_initialized = created,
            Err(e) => session.output.record(Action::new(
                ActionKind::Failed,
                ".git",
                format!("{:#}", e),
            )),
        }
    }

    steps::write_gitignore(session, &run.language, true);
    steps::write_template(
        session,
        GITATTRIBUTES,
        ".gitattributes",
        None,
        Some(builtin::GITATTRIBUTES),
    );

    if run.docker {
        steps::write_template(
            session,
            DOCKERIGNORE,
            ".dockerignore",
            None,
            Some(builtin::DOCKERIGNORE),
        );
    }

    if run.review_config {
        steps::write_template(
            session,
            CODERABBIT_CONFIG,
            ".coderabbit.yaml",
            None,
            Some(builtin::CODERABBIT),
        );
    }

    if run.hooks && summary.git_initialized {
        steps::install_hook(session, true);
    }

    if run.readme {
        let vars = run.readme_vars();
        steps::write_template(session, README, "README.md", Some(&vars), Some(builtin::README));
    }

    if run.commit && summary.git_initialized && checks.git_configured {
        match steps::initial_commit(session) {
            Ok(()) => summary.committed = true,
            Err(e) => session.output.record(Action::new(
                ActionKind::Failed,
                "initial commit",
                format!("{:#}", e),
            )),
        }
    } else if run.commit && !checks.git_configured {
        session
            .output
            .print_status(Status::Warning, "Skipping initial commit (Git not configured)");
    }

    if summary.committed && run.push {
        summary.push = Some(steps::publish(session));
    }

    session
        .output
        .print_status(Status::Success, "Project initialization complete!");

    if run.explain_workflow {
        review::print_workflow(&mut *session.output);
    }
    review::print_next_steps(
        &mut *session.output,
        &review::next_steps(checks.review_cli, checks.git_configured),
    );

    Ok(summary)
}
