//! Application-level errors (domain errors tagged with their script line)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add script and config context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("line {line}: {source}")]
    Statement {
        line: usize,
        #[source]
        source: DomainError,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: unknown node name '{name}'")]
    UnknownName { line: usize, name: String },

    #[error("line {line}: name '{name}' is already bound")]
    NameTaken { line: usize, name: String },

    #[error("line {line}: no tree yet, start the script with 'root <name> <colour>'")]
    NoTree { line: usize },

    #[error("line {line}: expectation failed: {message}")]
    Expectation { line: usize, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// Script line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ApplicationError::Statement { line, .. }
            | ApplicationError::Parse { line, .. }
            | ApplicationError::UnknownName { line, .. }
            | ApplicationError::NameTaken { line, .. }
            | ApplicationError::NoTree { line }
            | ApplicationError::Expectation { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
