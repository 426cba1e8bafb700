//! Node storage and the primitive linkage operations.
//!
//! Propagated colours are maintained here: raising a colour walks up with an
//! early exit, lowering or detaching recomputes ancestors from their children.

use std::collections::{HashMap, HashSet};
use std::fmt;

use generational_arena::Arena;
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::node::{Node, NodeId};

/// Arena storage for coloured nodes.
///
/// Holds every node of a tree plus any detached subtrees created alongside
/// it. All linkage changes go through this type so the parent/children links
/// and the propagated colour caches stay consistent.
#[derive(Debug, Clone)]
pub struct NodeArena<C> {
    arena: Arena<Node<C>>,
}

impl<C> Default for NodeArena<C> {
    fn default() -> Self {
        Self {
            arena: Arena::new(),
        }
    }
}

impl<C: Ord + Clone + fmt::Debug> NodeArena<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached node with the given colour.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, colour: C) -> NodeId {
        NodeId(self.arena.insert(Node::new(colour)))
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node<C>> {
        self.arena.get(id.index())
    }

    pub fn node(&self, id: NodeId) -> TreeResult<&Node<C>> {
        self.get_node(id).ok_or(DomainError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut Node<C>> {
        self.arena
            .get_mut(id.index())
            .ok_or(DomainError::UnknownNode(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.index())
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn is_leaf(&self, id: NodeId) -> TreeResult<bool> {
        Ok(self.node(id)?.is_leaf())
    }

    /// Sets the node's own colour and brings every ancestor cache up to date.
    ///
    /// Raising a colour only needs the raise-only walk. Lowering it may strip
    /// the dominant contributor from some ancestors, so those are recomputed.
    #[instrument(level = "trace", skip(self))]
    pub fn set_colour(&mut self, id: NodeId, colour: C) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        let previous = std::mem::replace(&mut node.colour, colour.clone());
        let Some(parent) = node.parent else {
            return Ok(());
        };
        if colour >= previous {
            self.propagate_upward(parent, &colour);
        } else {
            self.refresh_upward(parent);
        }
        Ok(())
    }

    /// Raise-only walk from `start` toward the root.
    ///
    /// Each visited node takes `candidate` if it has no propagated colour or a
    /// strictly less dominant one. The walk stops at the first node that
    /// already holds an equal or more dominant colour: everything above it was
    /// raised at least that far when that colour was recorded.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn propagate_upward(&mut self, start: NodeId, candidate: &C) {
        let mut current = Some(start);
        while let Some(id) = current {
            let Some(node) = self.arena.get_mut(id.index()) else {
                break;
            };
            let improves = node.propagated.as_ref().map_or(true, |p| p < candidate);
            if !improves {
                trace!(node = %id, "propagation stops, ancestor already dominates");
                break;
            }
            node.propagated = Some(candidate.clone());
            current = node.parent;
        }
    }

    /// Recomputes `start` and its ancestors from their children, one level at
    /// a time, until a level comes out unchanged.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn refresh_upward(&mut self, start: NodeId) {
        let mut current = Some(start);
        while let Some(id) = current {
            let fresh = self.recompute(id);
            let Some(node) = self.arena.get_mut(id.index()) else {
                break;
            };
            if node.propagated == fresh {
                trace!(node = %id, "refresh stops, cache unchanged");
                break;
            }
            node.propagated = fresh;
            current = node.parent;
        }
    }

    /// Propagated colour as a bottom-up pass over the current children would
    /// produce it, trusting the children's own caches.
    fn recompute(&self, id: NodeId) -> Option<C> {
        let node = self.get_node(id)?;
        node.children
            .iter()
            .filter_map(|&child| self.get_node(child))
            .map(Node::subtree_colour)
            .max()
    }

    /// Links a detached `child` under `parent` and propagates the dominant
    /// colour of the child's subtree upward from `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.node(parent)?;
        let child_node = self.node(child)?;
        if let Some(existing) = child_node.parent {
            return Err(DomainError::AlreadyAttached {
                child,
                parent: existing,
            });
        }
        let candidate = child_node.subtree_colour();
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DomainError::WouldCycle { parent, child });
        }

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        self.propagate_upward(parent, &candidate);
        Ok(())
    }

    /// Unlinks `child` from `parent` in both directions.
    ///
    /// The parent's cache is left as is; callers follow up with
    /// `refresh_upward(parent)`.
    #[instrument(level = "trace", skip(self))]
    pub fn detach_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.node(child)?;
        let position = self
            .node(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(DomainError::NotAChild { parent, child })?;

        self.node_mut(parent)?.children.swap_remove(position);
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    /// True if `ancestor` lies strictly above `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.get_node(node).and_then(Node::parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get_node(id).and_then(Node::parent);
        }
        false
    }

    /// Topmost node above `id` (the node itself when it has no parent).
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut top = id;
        while let Some(parent) = self.get_node(top).and_then(Node::parent) {
            top = parent;
        }
        top
    }

    pub fn iter_subtree(&self, start: NodeId) -> SubtreeIterator<'_, C> {
        SubtreeIterator::new(self, start)
    }

    /// Frees a detached subtree. Returns how many nodes were dropped.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_subtree(&mut self, start: NodeId) -> TreeResult<usize> {
        if !self.node(start)?.is_detached() {
            return Err(DomainError::StillAttached(start));
        }
        let doomed: Vec<NodeId> = self.iter_subtree(start).map(|(id, _, _)| id).collect();
        for id in &doomed {
            self.arena.remove(id.index());
        }
        Ok(doomed.len())
    }

    /// Checks linkage and cache invariants for the subtree at `start`.
    ///
    /// Caches are compared against true subtree maxima computed bottom-up,
    /// so a stale value is reported at the node that holds it.
    #[instrument(level = "trace", skip(self))]
    pub fn verify(&self, start: NodeId) -> TreeResult<()> {
        self.node(start)?;
        let violation = |node: NodeId, reason: String| DomainError::InvariantViolation { node, reason };

        let mut seen = HashSet::new();
        let mut order = Vec::new();
        for (id, _, node) in self.iter_subtree(start) {
            if !seen.insert(id) {
                return Err(violation(id, "reached twice (shared child or cycle)".into()));
            }
            let mut children = HashSet::new();
            for &child in &node.children {
                if !children.insert(child) {
                    return Err(violation(id, format!("child {} listed twice", child)));
                }
                match self.get_node(child) {
                    None => return Err(violation(id, format!("dangling child {}", child))),
                    Some(c) if c.parent != Some(id) => {
                        return Err(violation(
                            child,
                            format!("parent link {:?} does not point back to {}", c.parent, id),
                        ))
                    }
                    Some(_) => {}
                }
            }
            order.push((id, node));
        }

        // Reverse preorder visits children before their parent.
        let mut dominant: HashMap<NodeId, C> = HashMap::new();
        for (id, node) in order.into_iter().rev() {
            let expected = node
                .children
                .iter()
                .filter_map(|child| dominant.get(child))
                .max()
                .cloned();
            if node.propagated != expected {
                return Err(violation(
                    id,
                    format!(
                        "propagated colour {:?}, expected {:?}",
                        node.propagated, expected
                    ),
                ));
            }
            let own = match expected {
                Some(p) if p > node.colour => p,
                _ => node.colour.clone(),
            };
            dominant.insert(id, own);
        }
        Ok(())
    }
}

/// Preorder walk over a subtree, yielding `(id, depth, node)` with depth
/// relative to the start node.
pub struct SubtreeIterator<'a, C> {
    arena: &'a NodeArena<C>,
    stack: Vec<(NodeId, usize)>,
}

impl<'a, C> SubtreeIterator<'a, C> {
    fn new(arena: &'a NodeArena<C>, start: NodeId) -> Self {
        Self {
            arena,
            stack: vec![(start, 0)],
        }
    }
}

impl<'a, C> Iterator for SubtreeIterator<'a, C> {
    type Item = (NodeId, usize, &'a Node<C>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth)) = self.stack.pop() {
            if let Some(node) = self.arena.arena.get(current.index()) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current, depth, node));
            }
        }
        None
    }
}
