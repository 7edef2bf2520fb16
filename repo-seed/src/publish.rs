//! Remote setup and push with a fixed, bounded retry schedule.
//!
//! Every failure here is reported and swallowed: `publish` hands back a
//! [`PushOutcome`] and never aborts the run.

use crate::env::Environment;
use seed_core::{OutputContext, Prompter, Status};
use std::time::Duration;

/// Delay capability used between push attempts
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

impl<F: FnMut(Duration)> Sleeper for F {
    fn sleep(&mut self, duration: Duration) {
        self(duration)
    }
}

/// Blocks the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Waits between push attempts. One attempt per entry; no wait after the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySchedule {
    delays: Vec<Duration>,
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self::from_secs(&[2, 4, 8, 16])
    }
}

impl RetrySchedule {
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    pub fn from_secs(secs: &[u64]) -> Self {
        Self::new(secs.iter().copied().map(Duration::from_secs).collect())
    }

    pub fn max_attempts(&self) -> usize {
        self.delays.len().max(1)
    }

    /// Wait after failed attempt `attempt` (0-based), `None` after the final one
    pub fn delay_after(&self, attempt: usize) -> Option<Duration> {
        if attempt + 1 >= self.max_attempts() {
            return None;
        }
        self.delays.get(attempt).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed { attempts: usize },
    /// The operator said no to pushing or to adding a remote
    Declined,
    /// No URL given, or the prompt itself failed
    Cancelled,
    RemoteAddFailed { stderr: String },
    Exhausted { attempts: usize, stderr: String },
}

impl PushOutcome {
    pub fn is_pushed(&self) -> bool {
        matches!(self, PushOutcome::Pushed { .. })
    }
}

pub struct RemotePublisher<'a> {
    env: &'a dyn Environment,
    remote: String,
    branch: String,
    schedule: RetrySchedule,
}

impl<'a> RemotePublisher<'a> {
    pub fn new(env: &'a dyn Environment, remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            env,
            remote: remote.into(),
            branch: branch.into(),
            schedule: RetrySchedule::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: RetrySchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Make sure the remote exists (asking the operator as needed), then push.
    pub fn publish(
        &self,
        prompter: &mut dyn Prompter,
        sleeper: &mut dyn Sleeper,
        output: &mut dyn OutputContext,
    ) -> PushOutcome {
        output.print_section("Remote repository");

        if let Err(outcome) = self.ensure_remote(prompter, output) {
            return outcome;
        }

        self.push_with_retry(sleeper, output)
    }

    fn ensure_remote(
        &self,
        prompter: &mut dyn Prompter,
        output: &mut dyn OutputContext,
    ) -> Result<(), PushOutcome> {
        let existing = self
            .env
            .git(&["remote", "get-url", &self.remote])
            .ok()
            .filter(|out| out.success());

        if let Some(found) = existing {
            output.print_status(
                Status::Success,
                &format!("Remote '{}' already exists: {}", self.remote, found.stdout.trim()),
            );
            return match prompter.confirm("Push to this remote?", false) {
                Ok(true) => Ok(()),
                Ok(false) => {
                    output.print_status(Status::Info, "Skipping push to remote.");
                    Err(PushOutcome::Declined)
                }
                Err(e) => {
                    output.print_status(Status::Warning, &format!("Skipping push: {}", e));
                    Err(PushOutcome::Cancelled)
                }
            };
        }

        output.print_status(Status::Info, "No remote repository configured.");
        match prompter.confirm("Add a remote repository?", false) {
            Ok(true) => {}
            Ok(false) => {
                output.print_status(Status::Info, "Skipping remote setup. You can add it later with:");
                output.print_text(&format!("  git remote add {} <url>", self.remote));
                output.print_text(&self.manual_push_command());
                return Err(PushOutcome::Declined);
            }
            Err(e) => {
                output.print_status(Status::Warning, &format!("Skipping remote setup: {}", e));
                return Err(PushOutcome::Cancelled);
            }
        }

        let url = match prompter.text(
            "Enter remote repository URL (e.g., git@github.com:user/repo.git)",
            None,
        ) {
            Ok(url) => url.trim().to_string(),
            Err(e) => {
                tracing::debug!("remote URL prompt failed: {}", e);
                String::new()
            }
        };

        if url.is_empty() {
            output.print_status(Status::Info, "No URL provided, skipping remote setup.");
            return Err(PushOutcome::Cancelled);
        }

        output.print_status(Status::Info, &format!("Adding remote '{}': {}", self.remote, url));
        let stderr = match self.env.git(&["remote", "add", &self.remote, &url]) {
            Ok(out) if out.success() => {
                output.print_status(Status::Success, "Remote added successfully");
                return Ok(());
            }
            Ok(out) => out.stderr.trim().to_string(),
            Err(e) => e.to_string(),
        };

        output.print_status(Status::Error, &format!("Failed to add remote: {}", stderr));
        Err(PushOutcome::RemoteAddFailed { stderr })
    }

    fn push_with_retry(&self, sleeper: &mut dyn Sleeper, output: &mut dyn OutputContext) -> PushOutcome {
        output.print_status(Status::Info, "Pushing to remote...");
        let max_attempts = self.schedule.max_attempts();
        let args = ["push", "-u", self.remote.as_str(), self.branch.as_str()];
        let mut last_error = String::new();

        for attempt in 0..max_attempts {
            match self.env.git(&args) {
                Ok(out) if out.success() => {
                    output.print_status(Status::Success, "Successfully pushed to remote!");
                    return PushOutcome::Pushed { attempts: attempt + 1 };
                }
                Ok(out) => last_error = out.stderr.trim().to_string(),
                Err(e) => last_error = e.to_string(),
            }

            if let Some(delay) = self.schedule.delay_after(attempt) {
                output.print_status(
                    Status::Warning,
                    &format!(
                        "Push failed (attempt {}/{}), retrying in {}s...",
                        attempt + 1,
                        max_attempts,
                        delay.as_secs()
                    ),
                );
                sleeper.sleep(delay);
            }
        }

        output.print_status(
            Status::Error,
            &format!("Failed to push after {} attempts", max_attempts),
        );
        output.print_text(&format!("  Error: {}", last_error));
        output.print_text("  You can push manually later with:");
        output.print_text(&self.manual_push_command());

        PushOutcome::Exhausted {
            attempts: max_attempts,
            stderr: last_error,
        }
    }

    fn manual_push_command(&self) -> String {
        format!("  git push -u {} {}", self.remote, self.branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let schedule = RetrySchedule::default();
        assert_eq!(schedule.max_attempts(), 4);
        assert_eq!(schedule.delay_after(0), Some(Duration::from_secs(2)));
        assert_eq!(schedule.delay_after(1), Some(Duration::from_secs(4)));
        assert_eq!(schedule.delay_after(2), Some(Duration::from_secs(8)));
        assert_eq!(schedule.delay_after(3), None);
    }

    #[test]
    fn test_empty_schedule_still_tries_once() {
        let schedule = RetrySchedule::new(Vec::new());
        assert_eq!(schedule.max_attempts(), 1);
        assert_eq!(schedule.delay_after(0), None);
    }

    #[test]
    fn test_closure_is_a_sleeper() {
        let mut seen = Vec::new();
        {
            let mut record = |d: Duration| seen.push(d);
            Sleeper::sleep(&mut record, Duration::from_millis(5));
        }
        assert_eq!(seen, vec![Duration::from_millis(5)]);
    }

    #[test]
    fn test_outcome_is_pushed() {
        assert!(PushOutcome::Pushed { attempts: 2 }.is_pushed());
        assert!(!PushOutcome::Declined.is_pushed());
    }
}
