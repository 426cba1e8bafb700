//! Error conversion helpers for reading script and config files

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Tag an I/O error with what was attempted on which path.
    ///
    /// # Example
    /// ```ignore
    /// let source = fs::read_to_string(&script).with_path_context("read script", &script)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{} {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// Reads a whole script file.
pub fn read_script(path: &Path) -> ApplicationResult<String> {
    std::fs::read_to_string(path).with_path_context("read script", path)
}
