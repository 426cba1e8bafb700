//! Application layer: script parsing and execution against a colour tree
//!
//! This layer drives the domain API the way a caller (demo or test harness) does.

pub mod demo;
pub mod error;
pub mod error_ext;
pub mod runner;
pub mod script;

pub use demo::{DEMOS, REFERENCE_DEMO, SWAP_DEMO};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use runner::{Outcome, RunSettings, ScriptRunner};
pub use script::{parse_script, Line, Statement};
