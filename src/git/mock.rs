use crate::error::Result;
use crate::git::{CommandOutput, CommandRunner, GitCommand};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mock runner for testing without executing git
///
/// Responses are matched by argument prefix, first match wins. Commands with
/// no scripted response succeed with empty output.
pub struct MockRunner {
    responses: Vec<(Vec<String>, CommandOutput)>,
    history: Mutex<Vec<GitCommand>>,
}

impl MockRunner {
    /// Create a new mock runner with no scripted responses
    pub fn new() -> Self {
        MockRunner {
            responses: Vec::new(),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Answer commands whose arguments start with `prefix` with `output`
    pub fn respond(mut self, prefix: &[&str], output: CommandOutput) -> Self {
        let prefix = prefix.iter().map(|s| s.to_string()).collect();
        self.responses.push((prefix, output));
        self
    }

    /// Make `git describe` report `tag` as the latest tag
    pub fn with_latest_tag(self, tag: &str) -> Self {
        self.respond(&["describe"], CommandOutput::success(format!("{}\n", tag)))
    }

    /// Make commands starting with `prefix` exit with `code`
    pub fn failing(self, prefix: &[&str], code: i32, stderr: &str) -> Self {
        self.respond(prefix, CommandOutput::failure(code, stderr))
    }

    /// All commands received so far, in order
    pub fn history(&self) -> Vec<GitCommand> {
        self.recorded().clone()
    }

    // A panic while the lock was held must not drop recorded commands.
    fn recorded(&self) -> MutexGuard<'_, Vec<GitCommand>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether any received command starts with `prefix`
    pub fn ran(&self, prefix: &[&str]) -> bool {
        self.history().iter().any(|command| command.starts_with(prefix))
    }

    /// First subcommand of each received command, e.g. `["checkout", "pull"]`
    pub fn subcommands(&self) -> Vec<String> {
        self.history()
            .iter()
            .filter_map(|command| command.args.first().cloned())
            .collect()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &GitCommand) -> Result<CommandOutput> {
        self.recorded().push(command.clone());

        let output = self
            .responses
            .iter()
            .find(|(prefix, _)| {
                let prefix: Vec<&str> = prefix.iter().map(String::as_str).collect();
                command.starts_with(&prefix)
            })
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| CommandOutput::success(""));

        Ok(output)
    }
}
