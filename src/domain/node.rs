//! Node handle and node payload stored in the arena.

use std::fmt;

use generational_arena::Index;

/// Handle to a node in a [`NodeArena`](crate::domain::NodeArena).
///
/// Handles are generational: once a node is discarded its handle never
/// resolves again, even if the slot gets reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) Index);

impl NodeId {
    pub(crate) fn index(self) -> Index {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "n{}.{}", slot, generation)
    }
}

/// A coloured tree node.
///
/// Linkage and the propagated colour cache are only changed by the arena,
/// so readers can rely on them being consistent between public calls.
#[derive(Debug, Clone)]
pub struct Node<C> {
    pub(crate) colour: C,
    /// Dominant colour strictly below this node, None for leaves
    pub(crate) propagated: Option<C>,
    /// Parent handle, None for the root of a (possibly detached) tree
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl<C> Node<C> {
    pub fn new(colour: C) -> Self {
        Self {
            colour,
            propagated: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn colour(&self) -> &C {
        &self.colour
    }

    pub fn propagated_colour(&self) -> Option<&C> {
        self.propagated.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order; callers must not rely on the order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_detached(&self) -> bool {
        self.parent.is_none()
    }
}

impl<C: Ord + Clone> Node<C> {
    /// Dominant colour of the subtree rooted here, own colour included.
    pub fn subtree_colour(&self) -> C {
        match &self.propagated {
            Some(p) if *p > self.colour => p.clone(),
            _ => self.colour.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_node_when_inspected_then_is_detached_leaf() {
        let node = Node::new(3u8);
        assert_eq!(*node.colour(), 3);
        assert!(node.is_leaf());
        assert!(node.is_detached());
        assert!(node.propagated_colour().is_none());
    }

    #[test]
    fn given_propagated_above_own_when_subtree_colour_then_returns_propagated() {
        let mut node = Node::new(2u8);
        assert_eq!(node.subtree_colour(), 2);
        node.propagated = Some(7);
        assert_eq!(node.subtree_colour(), 7);
        node.propagated = Some(1);
        assert_eq!(node.subtree_colour(), 2);
    }
}
