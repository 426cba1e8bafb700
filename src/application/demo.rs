//! Bundled demonstration scripts.

use crate::application::runner::{Outcome, RunSettings, ScriptRunner};
use crate::application::ApplicationResult;

/// Insert/remove walkthrough: propagated colour follows the dominant child.
pub const REFERENCE_DEMO: &str = include_str!("../../demos/reference.tree");

/// Subtree swaps across branches, including a swap into a former sibling.
pub const SWAP_DEMO: &str = include_str!("../../demos/swap.tree");

/// Demo names as accepted by the CLI.
pub const DEMOS: [(&str, &str); 2] = [("reference", REFERENCE_DEMO), ("swap", SWAP_DEMO)];

pub fn demo_source(name: &str) -> Option<&'static str> {
    DEMOS.iter().find(|(n, _)| *n == name).map(|(_, src)| *src)
}

pub fn run_demo(source: &str, settings: RunSettings) -> ApplicationResult<Vec<Outcome>> {
    ScriptRunner::new(settings).run_source(source)
}
