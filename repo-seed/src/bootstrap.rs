use crate::env::{CommandOutput, Environment};
use crate::SeedError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Whether `git config user.name` / `user.email` are set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: bool,
    pub email: bool,
}

impl GitIdentity {
    pub fn is_configured(&self) -> bool {
        self.name && self.email
    }
}

/// True when `path` holds nothing but dot-entries (`.git`, `.gitignore`, ...)
pub fn is_effectively_empty(path: &Path) -> Result<bool> {
    is_empty_except(path, None)
}

/// Like [`is_effectively_empty`], but the entry at `skip` does not count either
pub fn is_empty_except(path: &Path, skip: Option<&Path>) -> Result<bool> {
    let entries = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory {}", path.display()))?;

    for entry in entries {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if skip.is_some_and(|skip| entry.path() == skip) {
            continue;
        }
        return Ok(false);
    }
    Ok(true)
}

/// Create the project directory if it does not exist yet
pub fn ensure_project_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create project directory {}", path.display()))?;
        tracing::info!("created project directory {}", path.display());
    }
    Ok(())
}

/// git init / identity / first commit, all through the injected environment
pub struct GitBootstrap<'a> {
    env: &'a dyn Environment,
}

impl<'a> GitBootstrap<'a> {
    pub fn new(env: &'a dyn Environment) -> Self {
        Self { env }
    }

    pub fn is_initialized(&self) -> bool {
        self.env.project_dir().join(".git").exists()
    }

    pub fn git_available(&self) -> bool {
        self.env.has_program("git")
    }

    /// Initialize the repository on `branch`.
    /// Returns `false` without touching anything when `.git` already exists.
    pub fn init(&self, branch: &str) -> Result<bool> {
        if self.is_initialized() {
            tracing::debug!("{} already has a .git directory", self.env.project_dir().display());
            return Ok(false);
        }

        self.checked(&["init"])?;
        self.checked(&["branch", "-M", branch])?;
        Ok(true)
    }

    pub fn identity(&self) -> GitIdentity {
        let configured = |key: &str| {
            self.env
                .git(&["config", key])
                .map(|out| out.success() && !out.stdout.trim().is_empty())
                .unwrap_or(false)
        };
        GitIdentity {
            name: configured("user.name"),
            email: configured("user.email"),
        }
    }

    /// Stage everything (minus `exclude`, relative to the project) and commit,
    /// bypassing the freshly installed hook
    pub fn initial_commit(&self, message: &str, exclude: Option<&Path>) -> Result<()> {
        match exclude {
            Some(rel) => {
                let pathspec = format!(":(exclude){}", rel.display());
                self.checked(&["add", "--", ".", &pathspec])?;
            }
            None => {
                self.checked(&["add", "."])?;
            }
        }
        self.checked(&["commit", "--no-verify", "-m", message])?;
        Ok(())
    }

    fn checked(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.env.git(args)?;
        if !output.success() {
            return Err(SeedError::Git {
                command: format!("git {}", args.join(" ")),
                stderr: output.stderr.trim().to_string(),
            }
            .into());
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(is_effectively_empty(dir.path()).unwrap());
    }

    #[test]
    fn test_hidden_entries_do_not_count() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".gitignore"), "").unwrap();
        assert!(is_effectively_empty(dir.path()).unwrap());
    }

    #[test]
    fn test_visible_file_makes_directory_non_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("file.txt"), "x").unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(!is_effectively_empty(dir.path()).unwrap());
    }

    #[test]
    fn test_skipped_entry_does_not_count() {
        let dir = tempdir().unwrap();
        let templates = dir.path().join("templates");
        fs::create_dir(&templates).unwrap();

        assert!(!is_effectively_empty(dir.path()).unwrap());
        assert!(is_empty_except(dir.path(), Some(&templates)).unwrap());

        fs::write(dir.path().join("main.rs"), "").unwrap();
        assert!(!is_empty_except(dir.path(), Some(&templates)).unwrap());
    }

    #[test]
    fn test_ensure_project_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("a").join("b");
        ensure_project_dir(&project).unwrap();
        assert!(project.is_dir());
        ensure_project_dir(&project).unwrap();
    }

    #[test]
    fn test_identity_requires_both() {
        assert!(GitIdentity { name: true, email: true }.is_configured());
        assert!(!GitIdentity { name: true, email: false }.is_configured());
        assert!(!GitIdentity { name: false, email: true }.is_configured());
    }
}
