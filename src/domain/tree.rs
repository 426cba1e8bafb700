//! Public tree operations composed from the arena primitives.

use std::fmt;

use tracing::{debug, instrument};

use crate::domain::arena::{NodeArena, SubtreeIterator};
use crate::domain::error::{DomainError, TreeResult};
use crate::domain::node::{Node, NodeId};

/// A coloured tree: one root plus the arena holding its nodes.
///
/// Nodes created with [`ColourTree::new_node`] start detached. They join the
/// tree through [`insert`](ColourTree::insert) and leave it again through
/// [`remove`](ColourTree::remove), which keeps the removed subtree alive and
/// intact until it is re-inserted or [`discard`](ColourTree::discard)ed.
///
/// Every operation validates its operands first and only then mutates, so a
/// rejected call leaves the tree untouched.
#[derive(Debug, Clone)]
pub struct ColourTree<C> {
    arena: NodeArena<C>,
    root: NodeId,
}

impl<C: Ord + Clone + fmt::Debug> ColourTree<C> {
    pub fn new(root_colour: C) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.insert_node(root_colour);
        Self { arena, root }
    }

    /// Creates a detached node in this tree's arena.
    pub fn new_node(&mut self, colour: C) -> NodeId {
        self.arena.insert_node(colour)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn arena(&self) -> &NodeArena<C> {
        &self.arena
    }

    pub fn node(&self, id: NodeId) -> TreeResult<&Node<C>> {
        self.arena.node(id)
    }

    pub fn colour(&self, id: NodeId) -> TreeResult<&C> {
        Ok(self.arena.node(id)?.colour())
    }

    pub fn propagated_colour(&self, id: NodeId) -> TreeResult<Option<&C>> {
        Ok(self.arena.node(id)?.propagated_colour())
    }

    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.arena.node(id)?.parent())
    }

    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        Ok(self.arena.node(id)?.children())
    }

    pub fn is_leaf(&self, id: NodeId) -> TreeResult<bool> {
        self.arena.is_leaf(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    /// True if `id` is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.arena.contains(id) && self.arena.root_of(id) == self.root
    }

    /// Nodes held by the arena, detached subtrees included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Preorder walk from the root.
    pub fn iter(&self) -> SubtreeIterator<'_, C> {
        self.arena.iter_subtree(self.root)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn update_colour(&mut self, id: NodeId, colour: C) -> TreeResult<()> {
        self.arena.set_colour(id, colour)
    }

    /// Attaches the detached node `child` under `parent`.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.arena.node(parent)?;
        if !self.is_attached(parent) {
            return Err(DomainError::NotInTree(parent));
        }
        self.arena.attach_child(parent, child)
    }

    /// Detaches `child` (with its whole subtree) from its parent.
    ///
    /// The former parent and its ancestors are recomputed from their surviving
    /// children. Returns the handle of the now standalone subtree root.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, child: NodeId) -> TreeResult<NodeId> {
        let parent = self
            .arena
            .node(child)?
            .parent()
            .ok_or(DomainError::NoParent(child))?;
        if !self.is_attached(child) {
            return Err(DomainError::NotInTree(child));
        }
        self.arena.detach_child(parent, child)?;
        self.arena.refresh_upward(parent);
        debug!(%child, %parent, "detached subtree");
        Ok(child)
    }

    /// Exchanges the positions of two subtrees.
    ///
    /// Both operands need a parent inside the tree and neither may lie inside
    /// the other.
    /// Swapping two siblings leaves the shape unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn swap(&mut self, a: NodeId, b: NodeId) -> TreeResult<()> {
        if a == b {
            self.arena.node(a)?;
            return Err(DomainError::SelfSwap(a));
        }
        let parent_a = self.arena.node(a)?.parent().ok_or(DomainError::NoParent(a))?;
        let parent_b = self.arena.node(b)?.parent().ok_or(DomainError::NoParent(b))?;
        if let Some(&loose) = [a, b].iter().find(|&&id| !self.is_attached(id)) {
            return Err(DomainError::NotInTree(loose));
        }
        if self.arena.is_ancestor(a, b) {
            return Err(DomainError::AncestorSwap {
                ancestor: a,
                descendant: b,
            });
        }
        if self.arena.is_ancestor(b, a) {
            return Err(DomainError::AncestorSwap {
                ancestor: b,
                descendant: a,
            });
        }

        self.remove(a)?;
        self.remove(b)?;
        self.arena.attach_child(parent_a, b)?;
        self.arena.attach_child(parent_b, a)?;
        Ok(())
    }

    /// Checks that every node from `start` down to `k` levels below it has
    /// exactly `colour`.
    ///
    /// The start node itself is always checked, so `k = 0` tests only `start`.
    /// Branches shallower than `k` pass for their missing levels.
    #[instrument(level = "debug", skip(self))]
    pub fn is_coloured_to_depth_k(&self, start: NodeId, colour: &C, k: usize) -> TreeResult<bool> {
        self.arena.node(start)?;
        let mut pending = vec![(start, 0usize)];
        while let Some((id, depth)) = pending.pop() {
            let node = self.arena.node(id)?;
            if node.colour() != colour {
                debug!(node = %id, depth, "colour mismatch");
                return Ok(false);
            }
            if depth < k {
                pending.extend(node.children().iter().map(|&child| (child, depth + 1)));
            }
        }
        Ok(true)
    }

    /// Frees a detached subtree, returning how many nodes were dropped.
    #[instrument(level = "debug", skip(self))]
    pub fn discard(&mut self, id: NodeId) -> TreeResult<usize> {
        if id == self.root {
            return Err(DomainError::StillAttached(id));
        }
        self.arena.remove_subtree(id)
    }

    /// Re-checks all tree invariants from the root.
    #[instrument(level = "debug", skip(self))]
    pub fn verify(&self) -> TreeResult<()> {
        if let Some(parent) = self.arena.node(self.root)?.parent() {
            return Err(DomainError::InvariantViolation {
                node: self.root,
                reason: format!("root has parent {}", parent),
            });
        }
        self.arena.verify(self.root)
    }
}
