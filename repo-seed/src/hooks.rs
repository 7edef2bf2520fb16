use crate::templates::{builtin, TemplateSet, PRE_COMMIT};
use crate::SeedError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the pre-commit script came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookSource {
    Template,
    BuiltIn,
}

pub fn hook_path(project: &Path) -> PathBuf {
    project.join(".git").join("hooks").join(PRE_COMMIT)
}

/// Install `.git/hooks/pre-commit` and mark it executable.
///
/// With `allow_builtin` a missing template is replaced by the built-in
/// script; otherwise a missing template is an error.
pub fn install_pre_commit(
    templates: &TemplateSet,
    project: &Path,
    allow_builtin: bool,
) -> Result<HookSource> {
    let git_dir = project.join(".git");
    if !git_dir.is_dir() {
        return Err(SeedError::Config(format!(
            "{} is not a git repository",
            project.display()
        ))
        .into());
    }

    let (content, source) = match templates.load(PRE_COMMIT)? {
        Some(text) => (text, HookSource::Template),
        None if allow_builtin => (builtin::PRE_COMMIT.to_string(), HookSource::BuiltIn),
        None => {
            return Err(SeedError::Template(format!(
                "{} not found in {}",
                PRE_COMMIT,
                templates.dir().display()
            ))
            .into())
        }
    };

    let path = hook_path(project);
    if let Some(hooks_dir) = path.parent() {
        fs::create_dir_all(hooks_dir)?;
    }
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    make_executable(&path)?;

    tracing::debug!("installed pre-commit hook at {}", path.display());
    Ok(source)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
