//! The three front-ends and the steps they share.

mod full;
mod quick;
mod steps;
mod wizard;

pub use full::{run_full, FullCommand};
pub use quick::{run_quick, QuickCommand};
pub use wizard::{check_prerequisites, run_wizard, Prerequisites, WizardCommand, KNOWN_LANGUAGES};

use crate::bootstrap::ensure_project_dir;
use crate::env::{Environment, SystemEnvironment};
use crate::publish::{PushOutcome, Sleeper, ThreadSleeper};
use crate::templates::{TemplateSet, Vars};
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use seed_core::{
    OutputContext, OutputContextImpl, Prompter, RuntimeConfig, SeedSettings, TerminalPrompter,
};
use std::path::{Path, PathBuf};

/// Everything a front-end talks to during one run
pub struct Session<'a> {
    pub env: &'a dyn Environment,
    pub templates: &'a TemplateSet,
    pub settings: &'a SeedSettings,
    pub prompter: &'a mut dyn Prompter,
    pub sleeper: &'a mut dyn Sleeper,
    pub output: &'a mut dyn OutputContext,
}

impl Session<'_> {
    pub fn project(&self) -> &Path {
        self.env.project_dir()
    }
}

/// Options for one run. Built from flags or prompts; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub project_name: String,
    pub description: String,
    pub language: String,
    pub readme: bool,
    pub docker: bool,
    pub hooks: bool,
    pub review_config: bool,
    pub commit: bool,
    pub push: bool,
    pub explain_workflow: bool,
}

impl RunConfig {
    pub fn for_project(project: &Path, settings: &SeedSettings) -> Self {
        Self {
            project_name: project_name(project),
            description: "A new project".to_string(),
            language: settings.language.clone(),
            readme: true,
            docker: false,
            hooks: true,
            review_config: true,
            commit: true,
            push: true,
            explain_workflow: true,
        }
    }

    pub fn readme_vars(&self) -> Vars {
        let mut vars = Vars::new();
        vars.insert("PROJECT_NAME".to_string(), self.project_name.clone());
        vars.insert("PROJECT_DESCRIPTION".to_string(), self.description.clone());
        vars
    }
}

/// What a run ended up doing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub git_initialized: bool,
    pub committed: bool,
    pub push: Option<PushOutcome>,
}

pub fn project_name(project: &Path) -> String {
    project
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

fn path_arg() -> Arg {
    Arg::new("path")
        .long("path")
        .value_name("PATH")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Project path (default: current directory)")
}

fn templates_dir_arg() -> Arg {
    Arg::new("templates-dir")
        .long("templates-dir")
        .value_name("DIR")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Custom templates directory (default: ./templates)")
}

fn no_push_arg() -> Arg {
    Arg::new("no-push")
        .long("no-push")
        .action(ArgAction::SetTrue)
        .help("Skip remote setup and push")
}

fn with_common_args(cmd: Command) -> Command {
    cmd.arg(path_arg()).arg(templates_dir_arg())
}

/// Wire the real environment, terminal and output together and run `f`
fn execute<F>(matches: &ArgMatches, config: &RuntimeConfig, f: F) -> Result<()>
where
    F: FnOnce(&mut Session<'_>) -> Result<RunSummary>,
{
    let project = config.resolve_path(matches.get_one::<PathBuf>("path").map(PathBuf::as_path));
    ensure_project_dir(&project)?;

    let templates = TemplateSet::resolve(
        matches.get_one::<PathBuf>("templates-dir").cloned(),
        &config.working_dir,
    );
    let settings = load_settings(&templates);

    let env = SystemEnvironment::new(&project);
    let mut prompter = TerminalPrompter::new(config.non_interactive);
    let mut sleeper = ThreadSleeper;
    let mut output = OutputContextImpl::new(config.output_format);

    let result = {
        let mut session = Session {
            env: &env,
            templates: &templates,
            settings: &settings,
            prompter: &mut prompter,
            sleeper: &mut sleeper,
            output: &mut output,
        };
        f(&mut session)
    };

    output.flush();
    result.map(|summary| tracing::debug!("run finished: {:?}", summary))
}

fn load_settings(templates: &TemplateSet) -> SeedSettings {
    match SeedSettings::load_from_dir(templates.dir()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("{:#}; using default settings", e);
            SeedSettings::default()
        }
    }
}
