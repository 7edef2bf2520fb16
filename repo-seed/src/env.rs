//! Handle on the external environment: subprocesses run inside the project
//! directory and PATH lookups.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Exit code and captured output of one external process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

pub trait Environment {
    /// Run `program` with `args` in the project directory and capture its output.
    /// An `Err` means the process could not be started at all.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Whether `program` resolves on PATH
    fn has_program(&self, program: &str) -> bool;

    /// The directory commands run in
    fn project_dir(&self) -> &Path;

    fn git(&self, args: &[&str]) -> Result<CommandOutput> {
        self.run("git", args)
    }
}

/// The real environment, bound to one project directory
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    root: PathBuf,
}

impl SystemEnvironment {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Environment for SystemEnvironment {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        tracing::debug!("running `{} {}` in {}", program, args.join(" "), self.root.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.root)
            .output()
            .with_context(|| format!("Failed to execute {}", program))?;

        let result = CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success() {
            tracing::debug!("`{}` exited with {}: {}", program, result.code, result.stderr.trim());
        }

        Ok(result)
    }

    fn has_program(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn project_dir(&self) -> &Path {
        &self.root
    }
}
