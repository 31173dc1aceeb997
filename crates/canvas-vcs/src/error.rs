use std::io;

use thiserror::Error;

/// Result type local to canvas-vcs.
pub type Result<T> = std::result::Result<T, VcsError>;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {}: {stderr}", describe_status(.status))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("repository I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("injected failure: {0}")]
    Injected(String),
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

impl VcsError {
    /// Process exit code to propagate: git's own status when it has one.
    pub fn exit_code(&self) -> i32 {
        match self {
            VcsError::CommandFailed {
                status: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
