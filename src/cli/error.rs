//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::ErrorKind;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Parse { .. }
                | ApplicationError::UnknownName { .. }
                | ApplicationError::NameTaken { .. }
                | ApplicationError::NoTree { .. }
                | ApplicationError::Expectation { .. } => crate::exitcode::DATAERR,
                ApplicationError::Statement { source, .. } => {
                    match source.kind() {
                        ErrorKind::Corruption => crate::exitcode::SOFTWARE,
                        _ => crate::exitcode::DATAERR,
                    }
                }
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
            },
        }
    }
}
