use thiserror::Error;

/// Unified error type for create-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Command `{command}` failed{suffix}: {stderr}", suffix = exit_suffix(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " without an exit code".to_string(),
    }
}

/// Convenience type alias for Results in create-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        ReleaseError::Parse(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a command failure from the rendered command line and its output
    pub fn command_failed(command: impl Into<String>, code: Option<i32>, stderr: &str) -> Self {
        ReleaseError::CommandFailed {
            command: command.into(),
            code,
            stderr: stderr.trim().to_string(),
        }
    }

    /// Process exit code to report for this error.
    ///
    /// A failed external command propagates its own exit code; everything
    /// else (and a command killed without a code) exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
