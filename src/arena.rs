// Copyright (c) 2024-present, Andrew Werner
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Index-addressed node storage.
//!
//! Nodes never hold references to each other. A forward link is a [`NodeId`],
//! an index into the arena, so unlinking a node is a plain slot update and
//! there is nothing to dangle. Slot 0 always holds the sentinel.

use crate::MAX_LEVEL;

/// Stable handle to a node slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// The sentinel heading every level.
pub(crate) const HEAD: NodeId = NodeId(0);

pub(crate) struct Node<K, V> {
    // `None` on the sentinel and on recycled slots.
    data: Option<(K, V)>,
    // One link per level this node participates in. Fixed at insertion.
    forward: Vec<Option<NodeId>>,
}

impl<K, V> Node<K, V> {
    fn sentinel() -> Self {
        Self {
            data: None,
            forward: vec![None; MAX_LEVEL],
        }
    }

    pub(crate) fn key(&self) -> Option<&K> {
        self.data.as_ref().map(|(k, _)| k)
    }

    pub(crate) fn value(&self) -> Option<&V> {
        self.data.as_ref().map(|(_, v)| v)
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        self.data.as_mut().map(|(_, v)| v)
    }

    pub(crate) fn entry(&self) -> Option<(&K, &V)> {
        self.data.as_ref().map(|(k, v)| (k, v))
    }

    /// Number of levels this node is linked into.
    #[cfg(test)]
    pub(crate) fn levels(&self) -> usize {
        self.forward.len()
    }

    /// Next node at `level`, or `None` at the end of the level or when this
    /// node does not reach that high.
    pub(crate) fn next(&self, level: usize) -> Option<NodeId> {
        self.forward.get(level).copied().flatten()
    }

    pub(crate) fn set_next(&mut self, level: usize, next: Option<NodeId>) {
        if let Some(slot) = self.forward.get_mut(level) {
            *slot = next;
        }
    }
}

pub(crate) struct Arena<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<NodeId>,
}

impl<K, V> Default for Arena<K, V> {
    fn default() -> Self {
        Self {
            nodes: vec![Node::sentinel()],
            free: Vec::new(),
        }
    }
}

#[allow(clippy::indexing_slicing)]
impl<K, V> Arena<K, V> {
    // Every NodeId handed out by `alloc` indexes a live slot until `free`
    // is called on it, and HEAD is slot 0 from construction on.
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }

    /// Stores a node with `levels` unlinked forward slots, reusing a freed
    /// slot when one is available.
    pub(crate) fn alloc(&mut self, key: K, value: V, levels: usize) -> NodeId {
        debug_assert!((1..=MAX_LEVEL).contains(&levels));
        let node = Node {
            data: Some((key, value)),
            forward: vec![None; levels],
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Releases the slot and hands back its entry. The caller must already
    /// have unlinked `id` from every level.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<(K, V)> {
        debug_assert_ne!(id, HEAD);
        let node = &mut self.nodes[id.0];
        node.forward = Vec::new();
        let data = node.data.take();
        self.free.push(id);
        data
    }

    /// Drops every node except the sentinel, whose links are reset.
    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(1);
        self.free.clear();
        for slot in &mut self.nodes[0].forward {
            *slot = None;
        }
    }

    #[cfg(test)]
    pub(crate) fn free_slots(&self) -> usize {
        self.free.len()
    }
}
