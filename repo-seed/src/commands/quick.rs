use super::steps;
use super::{execute, no_push_arg, with_common_args, RunConfig, RunSummary, Session};
use crate::bootstrap::GitBootstrap;
use crate::review;
use crate::templates::{builtin, CODERABBIT_CONFIG, GITATTRIBUTES};
use anyhow::Result;
use clap::ArgMatches;
use seed_core::{RuntimeConfig, SeedCommand, Status};

/// Fast setup with fixed defaults. Missing templates fall back to
/// built-in minimal content.
pub struct QuickCommand;

impl QuickCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for QuickCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedCommand for QuickCommand {
    fn name(&self) -> &str {
        "quick"
    }

    fn register_commands(&self, app: clap::Command) -> clap::Command {
        let cmd = clap::Command::new("quick")
            .about("Fast setup with sensible defaults")
            .visible_alias("q")
            .arg(no_push_arg());

        app.subcommand(with_common_args(cmd))
    }

    fn handle_command(&self, matches: &ArgMatches, config: &RuntimeConfig) -> Result<()> {
        execute(matches, config, |session| {
            let mut run = RunConfig::for_project(session.project(), session.settings);
            run.readme = false;
            run.push = !matches.get_flag("no-push");
            run_quick(session, &run)
        })
    }
}

pub fn run_quick(session: &mut Session<'_>, run: &RunConfig) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if !steps::project_is_empty(session)? {
        session.output.print_status(Status::Warning, "Folder not empty!");
    }
    steps::confirm_non_empty(session, "Continue?")?;

    session.output.print_header("Initializing project");

    summary.git_initialized = steps::init_git(session)?;

    steps::write_gitignore(session, &run.language, true);
    steps::write_template(
        session,
        GITATTRIBUTES,
        ".gitattributes",
        None,
        Some(builtin::GITATTRIBUTES),
    );
    steps::write_template(
        session,
        CODERABBIT_CONFIG,
        ".coderabbit.yaml",
        None,
        Some(builtin::CODERABBIT),
    );

    let review_installed = review::check(session.env, &mut *session.output);

    if run.hooks {
        steps::install_hook(session, true);
    }

    let identity = GitBootstrap::new(session.env).identity();
    if identity.is_configured() {
        steps::initial_commit(session)?;
        summary.committed = true;
        if run.push {
            summary.push = Some(steps::publish(session));
        }
    } else {
        steps::print_identity_hint(&mut *session.output);
    }

    session.output.print_status(Status::Success, "Done!");

    if !review_installed {
        review::print_install_instructions(&mut *session.output);
    }
    review::print_quick_workflow(&mut *session.output);
    session
        .output
        .print_text("Next: customize .coderabbit.yaml for your needs and start coding!");

    Ok(summary)
}
