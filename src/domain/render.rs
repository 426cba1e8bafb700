//! Text rendering of coloured trees via `termtree`.

use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::node::NodeId;
use crate::domain::tree::ColourTree;

/// What goes into each rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append the propagated colour (or `-` for leaves)
    pub show_propagated: bool,
    /// Append the arena handle next to named nodes
    pub show_ids: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_propagated: true,
            show_ids: false,
        }
    }
}

pub trait TreeNodeConvert {
    /// Renders the subtree at `start`. `name` supplies a display name per node;
    /// nodes without one are shown by handle.
    fn to_tree_string(
        &self,
        start: NodeId,
        options: &RenderOptions,
        name: &dyn Fn(NodeId) -> Option<String>,
    ) -> TreeResult<Tree<String>>;
}

impl<C: Ord + Clone + fmt::Debug + fmt::Display> TreeNodeConvert for ColourTree<C> {
    #[instrument(level = "debug", skip(self, name))]
    fn to_tree_string(
        &self,
        start: NodeId,
        options: &RenderOptions,
        name: &dyn Fn(NodeId) -> Option<String>,
    ) -> TreeResult<Tree<String>> {
        self.node(start)?;
        // Open branches along the current preorder path, one per depth.
        let mut open: Vec<Tree<String>> = Vec::new();
        for (id, depth, _) in self.arena().iter_subtree(start) {
            while open.len() > depth {
                close_last(&mut open);
            }
            open.push(Tree::new(self.label(id, options, name)?));
        }
        while open.len() > 1 {
            close_last(&mut open);
        }
        open.pop().ok_or(DomainError::UnknownNode(start))
    }
}

fn close_last(open: &mut Vec<Tree<String>>) {
    if let Some(done) = open.pop() {
        if let Some(parent) = open.last_mut() {
            parent.push(done);
        }
    }
}

impl<C: Ord + Clone + fmt::Debug + fmt::Display> ColourTree<C> {
    fn label(
        &self,
        id: NodeId,
        options: &RenderOptions,
        name: &dyn Fn(NodeId) -> Option<String>,
    ) -> TreeResult<String> {
        let node = self.node(id)?;
        let mut label = match name(id) {
            Some(n) if options.show_ids => format!("{} ({})", n, id),
            Some(n) => n,
            None => id.to_string(),
        };
        label.push_str(&format!(" {}", node.colour()));
        if options.show_propagated {
            match node.propagated_colour() {
                Some(p) => label.push_str(&format!(" [{}]", p)),
                None => label.push_str(" [-]"),
            }
        }
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Colour;

    #[test]
    fn given_small_tree_when_rendered_then_lists_colours_and_caches() {
        let mut tree = ColourTree::new(Colour::Red);
        let root = tree.root();
        let child = tree.new_node(Colour::Cyan);
        tree.insert(root, child).unwrap();

        let names = |id: NodeId| (id == root).then(|| "r".to_string());
        let rendered = tree
            .to_tree_string(root, &RenderOptions::default(), &names)
            .unwrap()
            .to_string();

        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("r red [cyan]"));
        let child_line = lines.next().unwrap();
        assert!(child_line.ends_with(&format!("{} cyan [-]", child)));
    }

    #[test]
    fn given_propagation_hidden_when_rendered_then_only_colours() {
        let tree = ColourTree::new(Colour::Green);
        let options = RenderOptions {
            show_propagated: false,
            show_ids: true,
        };
        let rendered = tree
            .to_tree_string(tree.root(), &options, &|_| Some("top".into()))
            .unwrap()
            .to_string();
        assert_eq!(rendered.trim_end(), format!("top ({}) green", tree.root()));
    }

    #[test]
    fn given_nested_branches_when_rendered_then_children_follow_their_parent() {
        let mut tree = ColourTree::new(Colour::Red);
        let root = tree.root();
        let b = tree.new_node(Colour::Orange);
        let d = tree.new_node(Colour::Violet);
        let c = tree.new_node(Colour::Yellow);
        tree.insert(root, b).unwrap();
        tree.insert(b, d).unwrap();
        tree.insert(root, c).unwrap();

        let names = |id: NodeId| {
            [(root, "a"), (b, "b"), (c, "c"), (d, "d")]
                .iter()
                .find(|(n, _)| *n == id)
                .map(|(_, s)| s.to_string())
        };
        let rendered = tree
            .to_tree_string(root, &RenderOptions::default(), &names)
            .unwrap();

        assert_eq!(rendered.root, "a red [violet]");
        assert_eq!(rendered.leaves.len(), 2);
        assert_eq!(rendered.leaves[0].root, "b orange [violet]");
        assert_eq!(rendered.leaves[0].leaves[0].root, "d violet [-]");
        assert_eq!(rendered.leaves[1].root, "c yellow [-]");
    }

    #[test]
    fn given_deep_chain_when_rendered_then_every_level_present() {
        let mut tree = ColourTree::new(Colour::Blue);
        let mut tip = tree.root();
        for _ in 0..500 {
            let next = tree.new_node(Colour::Blue);
            tree.insert(tip, next).unwrap();
            tip = next;
        }
        let rendered = tree
            .to_tree_string(tree.root(), &RenderOptions::default(), &|_| None)
            .unwrap()
            .to_string();
        assert_eq!(rendered.lines().count(), 501);
        assert!(rendered.trim_end().ends_with(&format!("{} blue [-]", tip)));
    }

    #[test]
    fn given_unknown_start_when_rendered_then_error() {
        let mut tree = ColourTree::new(Colour::Red);
        let loose = tree.new_node(Colour::Red);
        tree.discard(loose).unwrap();
        assert_eq!(
            tree.to_tree_string(loose, &RenderOptions::default(), &|_| None)
                .map(|_| ()),
            Err(DomainError::UnknownNode(loose))
        );
    }
}
