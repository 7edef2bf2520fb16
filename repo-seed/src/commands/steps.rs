use super::Session;
use crate::bootstrap::{is_empty_except, GitBootstrap};
use crate::hooks::{install_pre_commit, HookSource};
use crate::publish::{PushOutcome, RemotePublisher};
use crate::templates::{builtin, render, Vars};
use crate::SeedError;
use anyhow::Result;
use seed_core::{Action, ActionKind, OutputContext, Status};
use std::fs;

/// Whether the project has visible files. A templates directory inside the
/// project is not counted.
pub(super) fn project_is_empty(session: &Session<'_>) -> Result<bool> {
    is_empty_except(session.project(), Some(session.templates.dir()))
}

/// Ask before touching a directory that already has visible files.
/// Declining is the one operator answer that ends the run with an error.
pub(super) fn confirm_non_empty(session: &mut Session<'_>, prompt: &str) -> Result<()> {
    if project_is_empty(session)? {
        return Ok(());
    }

    let proceed = session.prompter.confirm(prompt, false)?;
    if !proceed {
        session.output.print_status(Status::Warning, "Aborting...");
        return Err(SeedError::Aborted.into());
    }
    Ok(())
}

/// `git init` + default branch. Errors propagate; the caller decides whether
/// they are fatal.
pub(super) fn init_git(session: &mut Session<'_>) -> Result<bool> {
    let bootstrap = GitBootstrap::new(session.env);
    let created = bootstrap.init(&session.settings.default_branch)?;

    if created {
        session.output.record(Action::new(
            ActionKind::Created,
            ".git",
            format!("initialized on {}", session.settings.default_branch),
        ));
    } else {
        session
            .output
            .record(Action::new(ActionKind::Skipped, ".git", "already initialized"));
    }
    Ok(created)
}

/// Write `dest` from template `name`, or from `fallback` when the template is
/// missing. Failures are recorded, never returned.
pub(super) fn write_template(
    session: &mut Session<'_>,
    name: &str,
    dest: &str,
    vars: Option<&Vars>,
    fallback: Option<&str>,
) -> ActionKind {
    let action = match session.templates.copy(name, session.project(), dest, vars) {
        Ok(Some(_)) => Action::new(ActionKind::Created, dest, format!("from {}", name)),
        Ok(None) => match fallback {
            Some(content) => {
                let path = session.project().join(dest);
                match fs::write(&path, render(content, vars)) {
                    Ok(()) => Action::new(ActionKind::Fallback, dest, "minimal built-in"),
                    Err(e) => Action::new(ActionKind::Failed, dest, e.to_string()),
                }
            }
            None => Action::new(
                ActionKind::Skipped,
                dest,
                format!("template not found: {}", name),
            ),
        },
        Err(e) => Action::new(ActionKind::Failed, dest, format!("{:#}", e)),
    };

    let kind = action.kind;
    session.output.record(action);
    kind
}

pub(super) fn write_gitignore(
    session: &mut Session<'_>,
    language: &str,
    allow_builtin: bool,
) -> ActionKind {
    let name = session.templates.gitignore_for(language);
    let fallback = allow_builtin.then_some(builtin::GITIGNORE);
    write_template(session, &name, ".gitignore", None, fallback)
}

pub(super) fn install_hook(session: &mut Session<'_>, allow_builtin: bool) -> ActionKind {
    if !session.project().join(".git").is_dir() {
        session.output.record(Action::new(
            ActionKind::Skipped,
            ".git/hooks/pre-commit",
            "not a git repository",
        ));
        return ActionKind::Skipped;
    }

    let action = match install_pre_commit(session.templates, session.project(), allow_builtin) {
        Ok(HookSource::Template) => {
            Action::new(ActionKind::Created, ".git/hooks/pre-commit", "executable")
        }
        Ok(HookSource::BuiltIn) => {
            Action::new(ActionKind::Fallback, ".git/hooks/pre-commit", "minimal built-in")
        }
        Err(e) => Action::new(ActionKind::Failed, ".git/hooks/pre-commit", format!("{:#}", e)),
    };

    let kind = action.kind;
    session.output.record(action);
    kind
}

pub(super) fn print_identity_hint(output: &mut dyn OutputContext) {
    output.print_status(Status::Warning, "Git user not configured. Skipping initial commit.");
    output.print_text("  Configure with:");
    output.print_text("    git config --global user.name 'Your Name'");
    output.print_text("    git config --global user.email 'you@example.com'");
}

/// Stage everything and create the first commit (hook bypassed). A templates
/// directory inside the project stays out of the commit.
pub(super) fn initial_commit(session: &mut Session<'_>) -> Result<()> {
    let bootstrap = GitBootstrap::new(session.env);
    let exclude = session.templates.relative_to(session.project());
    bootstrap.initial_commit(&session.settings.commit_message, exclude)?;
    session.output.record(Action::new(
        ActionKind::Created,
        "initial commit",
        "pre-commit hook skipped for setup",
    ));
    Ok(())
}

/// Seed the templates directory when it is missing, warning on failure
pub(super) fn ensure_templates(session: &mut Session<'_>) {
    match session.templates.ensure_basic() {
        Ok(true) => session.output.print_status(
            Status::Warning,
            "Templates directory not found, created basic templates",
        ),
        Ok(false) => {}
        Err(e) => session
            .output
            .print_status(Status::Warning, &format!("Could not create basic templates: {:#}", e)),
    }
}

pub(super) fn publish(session: &mut Session<'_>) -> PushOutcome {
    let publisher = RemotePublisher::new(
        session.env,
        session.settings.remote_name.clone(),
        session.settings.default_branch.clone(),
    );
    publisher.publish(&mut *session.prompter, &mut *session.sleeper, &mut *session.output)
}
