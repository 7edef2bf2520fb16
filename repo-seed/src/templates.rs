//! Template lookup and `{KEY}` substitution.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Placeholder values, keyed without braces (`PROJECT_NAME`, not `{PROJECT_NAME}`)
pub type Vars = BTreeMap<String, String>;

pub const TEMPLATES_ENV: &str = "REPO_SEED_TEMPLATES";

pub const GITIGNORE_PREFIX: &str = "gitignore.";
pub const GITIGNORE_GENERIC: &str = "gitignore.generic";
pub const GITATTRIBUTES: &str = "gitattributes";
pub const CODERABBIT_CONFIG: &str = "coderabbit.yaml";
pub const PRE_COMMIT: &str = "pre-commit";
pub const README: &str = "README.md";
pub const DOCKERIGNORE: &str = "dockerignore";

/// Replace every `{KEY}` in `text` with its value in a single pass.
///
/// Substituted values are not scanned again, and keys without a value are
/// left as they are. Without vars (or with an empty map) the text comes back
/// unchanged.
pub fn render(text: &str, vars: Option<&Vars>) -> String {
    let vars = match vars {
        Some(vars) if !vars.is_empty() => vars,
        _ => return text.to_string(),
    };

    static KEY: OnceLock<Regex> = OnceLock::new();
    let re = KEY.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("key pattern is valid")
    });

    re.replace_all(text, |cap: &Captures<'_>| match vars.get(&cap[1]) {
        Some(value) => value.clone(),
        None => cap[0].to_string(),
    })
    .into_owned()
}

/// `{UPPER_CASE}` tokens still present in `text`, in order of first appearance
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([A-Z][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
    });

    let mut found: Vec<String> = Vec::new();
    for cap in re.captures_iter(text) {
        let name = cap[1].to_string();
        if !found.contains(&name) {
            found.push(name);
        }
    }
    found
}

/// A directory of template files
#[derive(Debug, Clone)]
pub struct TemplateSet {
    dir: PathBuf,
}

impl TemplateSet {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Pick the templates directory: explicit flag, then `$REPO_SEED_TEMPLATES`,
    /// then `templates/` beside the executable, then `./templates`.
    pub fn resolve(explicit: Option<PathBuf>, working_dir: &Path) -> Self {
        let from_env = std::env::var_os(TEMPLATES_ENV).map(PathBuf::from);
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join("templates")));
        Self::resolve_with(explicit, from_env, beside_exe, working_dir)
    }

    pub fn resolve_with(
        explicit: Option<PathBuf>,
        from_env: Option<PathBuf>,
        beside_exe: Option<PathBuf>,
        working_dir: &Path,
    ) -> Self {
        if let Some(dir) = explicit.or(from_env) {
            return Self::new(dir);
        }
        match beside_exe {
            Some(dir) if dir.is_dir() => Self::new(dir),
            _ => Self::new(working_dir.join("templates")),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The templates directory relative to `project`, when it lives inside it
    pub fn relative_to(&self, project: &Path) -> Option<&Path> {
        self.dir
            .strip_prefix(project)
            .ok()
            .filter(|rel| !rel.as_os_str().is_empty())
    }

    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    pub fn has(&self, name: &str) -> bool {
        self.dir.join(name).is_file()
    }

    /// Create the directory with minimal templates when it does not exist.
    /// Returns `true` when something was created.
    pub fn ensure_basic(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        fs::write(self.dir.join("gitignore.python"), builtin::BASIC_GITIGNORE)?;
        fs::write(self.dir.join(GITATTRIBUTES), builtin::GITATTRIBUTES)?;
        fs::write(self.dir.join(CODERABBIT_CONFIG), builtin::BASIC_CODERABBIT)?;

        tracing::info!("created basic templates in {}", self.dir.display());
        Ok(true)
    }

    /// Read a template. `Ok(None)` when it does not exist.
    pub fn load(&self, name: &str) -> Result<Option<String>> {
        let path = self.dir.join(name);
        if !path.is_file() {
            tracing::debug!("template {} not found in {}", name, self.dir.display());
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        Ok(Some(content))
    }

    pub fn load_rendered(&self, name: &str, vars: Option<&Vars>) -> Result<Option<String>> {
        Ok(self.load(name)?.map(|text| render(&text, vars)))
    }

    /// Template name for a language's ignore rules, falling back to
    /// `gitignore.generic` when the language has no template.
    pub fn gitignore_for(&self, language: &str) -> String {
        let specific = format!("{}{}", GITIGNORE_PREFIX, language);
        if self.has(&specific) {
            specific
        } else {
            tracing::warn!("no template for {}, using {}", language, GITIGNORE_GENERIC);
            GITIGNORE_GENERIC.to_string()
        }
    }

    /// Render template `name` into `project/dest`.
    /// Returns the written path, or `None` when the template is missing.
    pub fn copy(
        &self,
        name: &str,
        project: &Path,
        dest: &str,
        vars: Option<&Vars>,
    ) -> Result<Option<PathBuf>> {
        let Some(content) = self.load_rendered(name, vars)? else {
            return Ok(None);
        };

        let dest_path = project.join(dest);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest_path, &content)
            .with_context(|| format!("Failed to write {}", dest_path.display()))?;

        for name in unresolved_placeholders(&content) {
            tracing::warn!("{} still contains placeholder {{{}}}", dest, name);
        }

        Ok(Some(dest_path))
    }
}

/// Content written when a template is missing and the front-end allows it
pub mod builtin {
    pub const GITIGNORE: &str = "__pycache__/
*.py[cod]
.venv/
venv/
.env
.DS_Store
.idea/
.vscode/
";

    pub const BASIC_GITIGNORE: &str = "__pycache__/\n*.py[cod]\n.venv/\nvenv/\n.env\n.DS_Store\n";

    pub const GITATTRIBUTES: &str = "* text=auto eol=lf\n";

    pub const CODERABBIT: &str = "language: en
reviews:
  auto_review: true
  request_changes_workflow: true
";

    pub const BASIC_CODERABBIT: &str = "language: en\nreviews:\n  auto_review: true\n";

    pub const DOCKERIGNORE: &str = ".git
.gitignore
.env
**/__pycache__
**/node_modules
target/
";

    pub const PRE_COMMIT: &str = r#"#!/bin/sh
echo "Running CodeRabbit review..."
if ! command -v coderabbit > /dev/null 2>&1; then
    echo "CodeRabbit CLI not found!"
    echo "Install: curl -fsSL https://cli.coderabbit.ai/install.sh | sh"
    exit 0
fi
coderabbit review || exit 1
"#;

    pub const README: &str = "# {PROJECT_NAME}

{PROJECT_DESCRIPTION}

## Getting Started

This project was bootstrapped with repo-seed.

## Development

### Prerequisites

- Git
- CodeRabbit CLI (optional but recommended)

### Setup

1. Clone the repository
2. Install dependencies (if any)
3. Start developing!

## CodeRabbit Integration

Commits are reviewed by the CodeRabbit CLI through a pre-commit hook.

### Installation

```bash
curl -fsSL https://cli.coderabbit.ai/install.sh | sh
coderabbit configure
```

### Usage

The hook runs on every commit. To review manually:

```bash
coderabbit review
```

## License

[Add your license here]
";
}
