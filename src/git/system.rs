use crate::error::Result;
use crate::git::{CommandOutput, CommandRunner, GitCommand};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs commands as real subprocesses inside a fixed working directory.
pub struct SystemCommandRunner {
    work_dir: PathBuf,
}

impl SystemCommandRunner {
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Self {
        SystemCommandRunner {
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &GitCommand) -> Result<CommandOutput> {
        log::debug!("Running `{}` in {}", command, self.work_dir.display());

        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&self.work_dir)
            .output()?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        log::trace!("`{}` exited with {:?}", command, result.code);

        Ok(result)
    }
}
