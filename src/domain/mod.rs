//! Domain layer: coloured nodes, the arena and the tree operations
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod colour;
pub mod error;
pub mod node;
pub mod render;
pub mod tree;

pub use arena::{NodeArena, SubtreeIterator};
pub use colour::Colour;
pub use error::{DomainError, ErrorKind, TreeResult};
pub use node::{Node, NodeId};
pub use render::{RenderOptions, TreeNodeConvert};
pub use tree::ColourTree;
