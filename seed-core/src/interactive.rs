use anyhow::{anyhow, Result};
use console::style;
use dialoguer::{Confirm, Input, Select};
use std::io::{self, IsTerminal};

/// Controls behavior when running in non-interactive mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonInteractiveMode {
    /// Fail with an error when an answer is needed
    Fail,
    /// Answer every question with its default
    Defaults,
}

impl std::str::FromStr for NonInteractiveMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(NonInteractiveMode::Fail),
            "defaults" => Ok(NonInteractiveMode::Defaults),
            other => Err(anyhow!(
                "Invalid non-interactive mode: '{}'. Use 'fail' or 'defaults'",
                other
            )),
        }
    }
}

/// Detects if we're running in an interactive TTY
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Answers the operator questions asked during a run.
///
/// Front-ends and the remote publisher only talk to the operator through
/// this trait, so a scripted implementation can drive them in tests.
pub trait Prompter {
    /// Ask a yes/no question
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Ask for free text. An empty answer is allowed and returned as-is.
    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Ask to pick one of `items`, returning its index
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize>;
}

/// Prompter backed by the terminal
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    mode: NonInteractiveMode,
}

impl TerminalPrompter {
    pub fn new(mode: NonInteractiveMode) -> Self {
        Self { mode }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        prompt_confirm(prompt, default, self.mode)
    }

    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        prompt_text(prompt, default, true, self.mode)
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        prompt_select(prompt, items, Some(default), self.mode)
    }
}

/// Prompts for a text input
///
/// # Arguments
/// * `prompt` - The prompt text to display
/// * `default` - Optional default value
/// * `allow_empty` - Whether to allow empty input
/// * `non_interactive` - How to behave when not in a TTY
pub fn prompt_text(
    prompt: &str,
    default: Option<&str>,
    allow_empty: bool,
    non_interactive: NonInteractiveMode,
) -> Result<String> {
    if !is_interactive() {
        return handle_non_interactive(non_interactive, prompt, default.map(|s| s.to_string()));
    }

    loop {
        let mut input = Input::<String>::new()
            .with_prompt(format!("{}", style(format!("→ {}", prompt)).cyan()))
            .allow_empty(allow_empty);

        if let Some(default_val) = default {
            input = input.default(default_val.to_string());
        }

        match input.interact_text() {
            Ok(value) => {
                if !allow_empty && value.trim().is_empty() {
                    eprintln!("{}", style("  ✗ Input cannot be empty").red());
                    continue;
                }
                return Ok(value);
            }
            Err(e) if is_eof_error(&e) => {
                return Err(anyhow!("Cancelled by user"));
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Prompts for a yes/no confirmation
pub fn prompt_confirm(
    prompt: &str,
    default: bool,
    non_interactive: NonInteractiveMode,
) -> Result<bool> {
    if !is_interactive() {
        return handle_non_interactive_confirm(non_interactive, prompt, default);
    }

    let confirm = Confirm::new()
        .with_prompt(format!("{}", style(format!("→ {}", prompt)).cyan()))
        .default(default)
        .interact_opt()?;

    match confirm {
        Some(value) => Ok(value),
        None => Err(anyhow!("Cancelled by user")),
    }
}

/// Prompts for a single selection, returning the chosen index
pub fn prompt_select(
    prompt: &str,
    items: &[String],
    default_index: Option<usize>,
    non_interactive: NonInteractiveMode,
) -> Result<usize> {
    if !is_interactive() {
        return handle_non_interactive_select(non_interactive, prompt, items, default_index);
    }

    if items.is_empty() {
        return Err(anyhow!("No items to select from"));
    }

    let mut select = Select::new().with_prompt(format!("{}", style(format!("→ {}", prompt)).cyan()));
    for item in items {
        select = select.item(item);
    }

    if let Some(idx) = default_index {
        if idx < items.len() {
            select = select.default(idx);
        }
    }

    match select.interact_opt()? {
        Some(idx) => Ok(idx),
        None => Err(anyhow!("Cancelled by user")),
    }
}

// ============================================================================
// Private helper functions
// ============================================================================

fn handle_non_interactive(
    mode: NonInteractiveMode,
    prompt: &str,
    default: Option<String>,
) -> Result<String> {
    match mode {
        NonInteractiveMode::Fail => Err(anyhow!(
            "Interactive input required for '{}'. Use --non-interactive=defaults or run in a terminal",
            prompt
        )),
        NonInteractiveMode::Defaults => default.ok_or_else(|| {
            anyhow!(
                "No default value available for '{}' in non-interactive mode",
                prompt
            )
        }),
    }
}

fn handle_non_interactive_confirm(
    mode: NonInteractiveMode,
    prompt: &str,
    default: bool,
) -> Result<bool> {
    match mode {
        NonInteractiveMode::Fail => Err(anyhow!(
            "Interactive confirmation required for: '{}'. Use --non-interactive=defaults or run in a terminal",
            prompt
        )),
        NonInteractiveMode::Defaults => Ok(default),
    }
}

fn handle_non_interactive_select(
    mode: NonInteractiveMode,
    prompt: &str,
    items: &[String],
    default: Option<usize>,
) -> Result<usize> {
    match mode {
        NonInteractiveMode::Fail => Err(anyhow!(
            "Interactive selection required for '{}'. Use --non-interactive=defaults or run in a terminal",
            prompt
        )),
        NonInteractiveMode::Defaults => {
            let idx = default.ok_or_else(|| {
                anyhow!(
                    "No default selection available for '{}' in non-interactive mode",
                    prompt
                )
            })?;
            if idx >= items.len() {
                return Err(anyhow!("Default index {} out of range", idx));
            }
            Ok(idx)
        }
    }
}

/// Checks if an error is due to EOF (Ctrl+D)
fn is_eof_error(error: &dyn std::error::Error) -> bool {
    let text = error.to_string();
    text.contains("EOF") || text.contains("end of file") || text.contains("Ctrl+D")
}
