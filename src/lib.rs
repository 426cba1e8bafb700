//! Coloured trees.
//!
//! Every node carries a colour from a totally ordered set, and every node
//! caches the dominant colour found strictly below it. The cache is kept
//! exact across colour updates, insertions, removals and subtree swaps.
//!
//! ```
//! use colourtree::domain::{Colour, ColourTree};
//!
//! let mut tree = ColourTree::new(Colour::Red);
//! let root = tree.root();
//! let b = tree.new_node(Colour::Cyan);
//! let c = tree.new_node(Colour::Yellow);
//! tree.insert(root, b).unwrap();
//! tree.insert(root, c).unwrap();
//! assert_eq!(tree.propagated_colour(root).unwrap(), Some(&Colour::Cyan));
//!
//! tree.remove(b).unwrap();
//! assert_eq!(tree.propagated_colour(root).unwrap(), Some(&Colour::Yellow));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
