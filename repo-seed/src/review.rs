use crate::env::Environment;
use seed_core::{OutputContext, Status};

pub const REVIEW_CLI: &str = "coderabbit";
pub const INSTALL_COMMAND: &str = "curl -fsSL https://cli.coderabbit.ai/install.sh | sh";
pub const CONFIGURE_COMMAND: &str = "coderabbit configure";
pub const DOCS_URL: &str = "https://www.coderabbit.ai/docs/cli";

pub fn is_installed(env: &dyn Environment) -> bool {
    env.has_program(REVIEW_CLI)
}

pub fn print_install_instructions(output: &mut dyn OutputContext) {
    output.print_section("CodeRabbit CLI is not installed");
    output.print_text("Install it with:");
    output.print_text(&format!("  {}", INSTALL_COMMAND));
    output.print_text(&format!("Or visit: {}", DOCS_URL));
    output.print_text("After installation, restart your terminal and run:");
    output.print_text(&format!("  {}", CONFIGURE_COMMAND));
}

/// Report whether the review CLI is present; returns the answer
pub fn check(env: &dyn Environment, output: &mut dyn OutputContext) -> bool {
    let installed = is_installed(env);
    if installed {
        output.print_status(Status::Success, "CodeRabbit CLI is installed");
    } else {
        output.print_status(Status::Warning, "CodeRabbit CLI not installed");
    }
    installed
}

pub const WORKFLOW: &str = "How CodeRabbit works with git:

1. You make code changes
   └─ Edit your files as usual

2. Stage your changes
   └─ git add .

3. Commit your changes
   └─ git commit -m \"Your commit message\"

4. The pre-commit hook triggers automatically
   ├─ CodeRabbit CLI reviews your staged changes
   ├─ Checks code quality, likely bugs, security and performance issues
   └─ Provides inline suggestions

5. Two possible outcomes:
   a) Review passes → commit proceeds
   b) Issues found → commit blocked
      └─ Fix the issues and try again
      └─ Or skip with: git commit --no-verify

Configuration:
• Edit .coderabbit.yaml to customize behavior
• Add path-specific instructions";

pub const QUICK_WORKFLOW: &str = "When you commit:
  1. git commit -m \"message\"
  2. Pre-commit hook runs automatically
  3. CodeRabbit reviews your changes
  4. If issues found → commit blocked
  5. If all good → commit proceeds

To skip the hook (not recommended):
  git commit --no-verify -m \"message\"";

pub fn print_workflow(output: &mut dyn OutputContext) {
    output.print_section("CodeRabbit workflow");
    output.print_text(WORKFLOW);
}

pub fn print_quick_workflow(output: &mut dyn OutputContext) {
    output.print_section("How it works");
    output.print_text(QUICK_WORKFLOW);
}

/// Remaining manual steps after a run
pub fn next_steps(review_installed: bool, identity_configured: bool) -> Vec<String> {
    let mut steps = Vec::new();

    if review_installed {
        steps.push(format!("Configure CodeRabbit: {} (if not done)", CONFIGURE_COMMAND));
    } else {
        steps.push(format!("Install CodeRabbit CLI: {}", INSTALL_COMMAND));
        steps.push(format!("Configure CodeRabbit: {}", CONFIGURE_COMMAND));
    }

    if !identity_configured {
        steps.push("Configure git user: git config --global user.name 'Your Name'".to_string());
        steps.push("Configure git email: git config --global user.email 'you@example.com'".to_string());
    }

    steps.push("Customize .coderabbit.yaml to your needs".to_string());
    steps.push("Start coding!".to_string());
    steps
}

pub fn print_next_steps(output: &mut dyn OutputContext, steps: &[String]) {
    output.print_section("Next steps");
    for (i, step) in steps.iter().enumerate() {
        output.print_text(&format!("  {}. {}", i + 1, step));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_steps_when_everything_is_ready() {
        let steps = next_steps(true, true);
        assert_eq!(steps.len(), 3);
        assert!(steps.last().unwrap().contains("Start coding"));
    }

    #[test]
    fn test_next_steps_include_install_and_identity() {
        let steps = next_steps(false, false);
        assert!(steps[0].contains(INSTALL_COMMAND));
        assert!(steps.iter().any(|s| s.contains("user.email")));
        assert_eq!(steps.len(), 6);
    }

    #[test]
    fn test_workflow_mentions_bypass() {
        assert!(WORKFLOW.contains("--no-verify"));
        assert!(QUICK_WORKFLOW.contains("--no-verify"));
    }
}
