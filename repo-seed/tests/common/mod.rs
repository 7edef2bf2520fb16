#![allow(dead_code)]

use anyhow::{anyhow, Result};
use repo_seed::commands::Session;
use repo_seed::{CommandOutput, Environment, Prompter, SeedSettings, TemplateSet};
use seed_core::OutputContextImpl;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Environment that records every command and answers from a script.
///
/// Unscripted commands succeed with empty output, except `git init` (which
/// also creates `.git/`), the identity lookups and `git remote get-url`
/// (which fails as if no remote exists).
pub struct FakeEnvironment {
    root: PathBuf,
    programs: Vec<String>,
    identity: bool,
    scripted: RefCell<HashMap<String, VecDeque<CommandOutput>>>,
    calls: RefCell<Vec<String>>,
}

impl FakeEnvironment {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            programs: vec!["git".to_string()],
            identity: true,
            scripted: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.programs.push(program.to_string());
        self
    }

    pub fn without_identity(mut self) -> Self {
        self.identity = false;
        self
    }

    /// Queue responses for an exact command line such as `git push -u origin main`
    pub fn respond(self, command: &str, outputs: Vec<CommandOutput>) -> Self {
        self.scripted
            .borrow_mut()
            .entry(command.to_string())
            .or_default()
            .extend(outputs);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn default_response(&self, command: &str) -> Result<CommandOutput> {
        match command {
            "git init" => {
                fs::create_dir_all(self.root.join(".git"))?;
                Ok(CommandOutput::ok("Initialized empty Git repository"))
            }
            "git config user.name" if self.identity => Ok(CommandOutput::ok("Test User\n")),
            "git config user.email" if self.identity => {
                Ok(CommandOutput::ok("test@example.com\n"))
            }
            "git config user.name" | "git config user.email" => Ok(CommandOutput::failed(1, "")),
            c if c.starts_with("git remote get-url") => {
                Ok(CommandOutput::failed(2, "error: No such remote"))
            }
            _ => Ok(CommandOutput::ok("")),
        }
    }
}

impl Environment for FakeEnvironment {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let command = format!("{} {}", program, args.join(" "));
        self.calls.borrow_mut().push(command.clone());

        let scripted = self
            .scripted
            .borrow_mut()
            .get_mut(&command)
            .and_then(VecDeque::pop_front);
        match scripted {
            Some(output) => Ok(output),
            None => self.default_response(&command),
        }
    }

    fn has_program(&self, program: &str) -> bool {
        self.programs.iter().any(|p| p == program)
    }

    fn project_dir(&self) -> &Path {
        &self.root
    }
}

#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Text(String),
    Select(usize),
    Fail,
}

/// Prompter fed from a queue. Once the queue is empty every question gets
/// its default.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            asked: Vec::new(),
        }
    }

    fn next(&mut self, prompt: &str) -> Option<Answer> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        match self.next(prompt) {
            None => Ok(default),
            Some(Answer::Confirm(value)) => Ok(value),
            Some(Answer::Fail) => Err(anyhow!("input closed")),
            Some(other) => panic!("expected a confirm answer for '{}', got {:?}", prompt, other),
        }
    }

    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        match self.next(prompt) {
            None => Ok(default.unwrap_or_default().to_string()),
            Some(Answer::Text(value)) => Ok(value),
            Some(Answer::Fail) => Err(anyhow!("input closed")),
            Some(other) => panic!("expected a text answer for '{}', got {:?}", prompt, other),
        }
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        match self.next(prompt) {
            None => Ok(default),
            Some(Answer::Select(index)) => {
                assert!(index < items.len(), "select index out of range");
                Ok(index)
            }
            Some(Answer::Fail) => Err(anyhow!("input closed")),
            Some(other) => panic!("expected a select answer for '{}', got {:?}", prompt, other),
        }
    }
}

/// A project directory and a templates directory under one tempdir,
/// plus everything a `Session` borrows.
pub struct Harness {
    pub temp: TempDir,
    pub env: FakeEnvironment,
    pub templates: TemplateSet,
    pub settings: SeedSettings,
    pub prompter: ScriptedPrompter,
    pub sleeps: Vec<Duration>,
    pub output: OutputContextImpl,
}

impl Harness {
    /// Empty project dir and an existing, empty templates dir
    pub fn new() -> Self {
        Self::with_env(|env| env)
    }

    pub fn with_env(configure: impl FnOnce(FakeEnvironment) -> FakeEnvironment) -> Self {
        let temp = tempfile::tempdir().unwrap();
        let project = temp.path().join("proj");
        let templates = temp.path().join("templates");
        fs::create_dir_all(&project).unwrap();
        fs::create_dir_all(&templates).unwrap();

        Self {
            env: configure(FakeEnvironment::new(project.clone())),
            templates: TemplateSet::new(templates),
            settings: SeedSettings::default(),
            prompter: ScriptedPrompter::default(),
            sleeps: Vec::new(),
            output: OutputContextImpl::quiet(),
            temp,
        }
    }

    pub fn answers(mut self, answers: Vec<Answer>) -> Self {
        self.prompter = ScriptedPrompter::new(answers);
        self
    }

    pub fn template(self, name: &str, content: &str) -> Self {
        fs::write(self.templates.dir().join(name), content).unwrap();
        self
    }

    pub fn project(&self) -> &Path {
        self.env.project_dir()
    }

    pub fn read(&self, rel: &str) -> Option<String> {
        fs::read_to_string(self.project().join(rel)).ok()
    }

    pub fn run<T>(&mut self, f: impl FnOnce(&mut Session<'_>) -> T) -> T {
        let sleeps = &mut self.sleeps;
        let mut sleeper = |delay: Duration| sleeps.push(delay);
        let mut session = Session {
            env: &self.env,
            templates: &self.templates,
            settings: &self.settings,
            prompter: &mut self.prompter,
            sleeper: &mut sleeper,
            output: &mut self.output,
        };
        f(&mut session)
    }
}

pub fn secs(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|s| Duration::from_secs(*s)).collect()
}
