use super::steps;
use super::{execute, no_push_arg, with_common_args, RunConfig, RunSummary, Session};
use crate::bootstrap::GitBootstrap;
use crate::review;
use crate::templates::{CODERABBIT_CONFIG, GITATTRIBUTES, README};
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches};
use seed_core::{RuntimeConfig, SeedCommand, Status};

/// Scripted, flag-driven initialization. Templates only: a missing template
/// skips its file.
pub struct FullCommand;

impl FullCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FullCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedCommand for FullCommand {
    fn name(&self) -> &str {
        "full"
    }

    fn register_commands(&self, app: clap::Command) -> clap::Command {
        let cmd = clap::Command::new("full")
            .about("Initialize a project with git, templates and the CodeRabbit hook")
            .long_about(
                "Initialize a project directory: git repository on the default branch, \
                 .gitignore for the chosen language, .gitattributes, .coderabbit.yaml, \
                 a pre-commit review hook, a README and the initial commit. Offers to \
                 push to a remote afterwards.",
            )
            .visible_alias("init")
            .arg(
                Arg::new("language")
                    .long("language")
                    .short('l')
                    .value_name("LANG")
                    .help("Language for the .gitignore template (default: python)"),
            )
            .arg(
                Arg::new("no-readme")
                    .long("no-readme")
                    .action(ArgAction::SetTrue)
                    .help("Skip README.md creation"),
            )
            .arg(
                Arg::new("no-workflow")
                    .long("no-workflow")
                    .action(ArgAction::SetTrue)
                    .help("Skip the workflow explanation"),
            )
            .arg(no_push_arg());

        app.subcommand(with_common_args(cmd))
    }

    fn handle_command(&self, matches: &ArgMatches, config: &RuntimeConfig) -> Result<()> {
        execute(matches, config, |session| {
            let mut run = RunConfig::for_project(session.project(), session.settings);
            if let Some(language) = matches.get_one::<String>("language") {
                run.language = language.clone();
            }
            run.readme = !matches.get_flag("no-readme");
            run.explain_workflow = !matches.get_flag("no-workflow");
            run.push = !matches.get_flag("no-push");
            run_full(session, &run)
        })
    }
}

pub fn run_full(session: &mut Session<'_>, run: &RunConfig) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    session.output.print_header("repo-seed");
    session.output.print_status(
        Status::Info,
        &format!("Initializing project in: {}", session.project().display()),
    );
    session.output.print_status(
        Status::Info,
        &format!("Templates directory: {}", session.templates.dir().display()),
    );

    steps::confirm_non_empty(session, "Folder is not empty. Continue anyway?")?;
    steps::ensure_templates(session);

    summary.git_initialized = steps::init_git(session)?;

    session.output.print_section(&format!("Files for {}", run.language));
    steps::write_gitignore(session, &run.language, false);
    steps::write_template(session, GITATTRIBUTES, ".gitattributes", None, None);

    let review_installed = review::check(session.env, &mut *session.output);
    if !review_installed {
        review::print_install_instructions(&mut *session.output);
    }
    steps::write_template(session, CODERABBIT_CONFIG, ".coderabbit.yaml", None, None);

    if summary.git_initialized {
        steps::install_hook(session, false);
    }

    if run.readme {
        let vars = run.readme_vars();
        steps::write_template(session, README, "README.md", Some(&vars), None);
    }

    let identity = GitBootstrap::new(session.env).identity();
    if summary.git_initialized {
        if identity.is_configured() {
            steps::initial_commit(session)?;
            summary.committed = true;
            if run.push {
                summary.push = Some(steps::publish(session));
            }
        } else {
            steps::print_identity_hint(&mut *session.output);
        }
    }

    session
        .output
        .print_status(Status::Success, "Project initialization complete!");

    if run.explain_workflow {
        review::print_workflow(&mut *session.output);
    }
    review::print_next_steps(
        &mut *session.output,
        &review::next_steps(review_installed, identity.is_configured()),
    );
    session.output.print_text(&format!(
        "Tip: edit the templates in {} to customize future projects",
        session.templates.dir().display()
    ));

    Ok(summary)
}
