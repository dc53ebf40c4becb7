//! External git invocation layer
//!
//! The release flow never talks to git directly. It describes each step as a
//! [GitCommand] and hands it to a [CommandRunner], which lets the flow be
//! exercised with [mock::MockRunner] instead of a real repository.
//!
//! - [system::SystemCommandRunner]: runs commands with `std::process::Command`
//! - [mock::MockRunner]: records commands and replays scripted outputs
//! - [repository]: `git2`-based lookups that need no subprocess

pub mod mock;
pub mod repository;
pub mod system;

pub use mock::MockRunner;
pub use system::SystemCommandRunner;

use crate::error::Result;
use std::fmt;

/// One external command: a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl GitCommand {
    /// Build a `git` invocation from its arguments.
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GitCommand {
            program: "git".to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `git checkout <branch>`
    pub fn checkout(branch: &str) -> Self {
        Self::git(["checkout", branch])
    }

    /// `git pull --tags <remote> <branch>`
    pub fn pull(remote: &str, branch: &str) -> Self {
        Self::git(["pull", "--tags", remote, branch])
    }

    /// `git describe --abbrev=0`: nearest annotated tag reachable from HEAD.
    pub fn describe_latest_tag() -> Self {
        Self::git(["describe", "--abbrev=0"])
    }

    /// `git tag -a <version> -m <message>`
    pub fn create_annotated_tag(version: &str, message: &str) -> Self {
        Self::git(["tag", "-a", version, "-m", message])
    }

    /// `git push <remote> refs/tags/<version>`
    pub fn push_tag(remote: &str, version: &str) -> Self {
        Self::git(vec![
            "push".to_string(),
            remote.to_string(),
            format!("refs/tags/{}", version),
        ])
    }

    /// Whether the arguments start with `prefix`.
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        self.args.len() >= prefix.len()
            && self.args.iter().zip(prefix).all(|(arg, expected)| arg == expected)
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed output with the given exit code and stderr.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run external commands.
///
/// ## Error Handling
///
/// `Err` means the command could not be started at all. A command that ran
/// and exited non-zero is still `Ok`; callers inspect
/// [CommandOutput::is_success] and decide.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &GitCommand) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &GitCommand) -> Result<CommandOutput> {
        (**self).run(command)
    }
}
