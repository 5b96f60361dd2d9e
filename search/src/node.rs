//! Search nodes, the node arena and frontier entries.
//!
//! Nodes live in a [`NodeArena`] and refer to their parent by [`NodeId`].
//! A node's identity for deduplication is its wrapped state alone (hash plus
//! [`Equatable::is_equal`]); parent, depth and costs never take part.

use lodestar_kernel::capability::{Equatable, Generative, Hashable};

/// Index of a node in its [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A generated state plus the bookkeeping needed to rebuild its path.
#[derive(Debug, Clone)]
pub struct SearchNode<S: Generative> {
    pub state: S,
    /// `None` for a root.
    pub parent: Option<NodeId>,
    /// Operation that produced `state` from the parent's state.
    pub last_op: Option<S::Op>,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Cumulative cost from the root.
    pub g: i64,
    /// Heuristic estimate to the finish state.
    pub h: i64,
    /// Frontier ordering key chosen by the algorithm.
    pub rank: i64,
    /// Cached `state.stable_hash()`.
    pub hash: u32,
}

impl<S: Generative + Hashable> SearchNode<S> {
    /// A root node: no parent, no operation, depth 0.
    #[must_use]
    pub fn root(state: S, g: i64, h: i64, rank: i64) -> Self {
        let hash = state.stable_hash();
        Self {
            state,
            parent: None,
            last_op: None,
            depth: 0,
            g,
            h,
            rank,
            hash,
        }
    }

    /// A child of `parent` reached through `op`.
    #[must_use]
    pub fn child(state: S, parent: NodeId, op: S::Op, depth: u32, g: i64, h: i64, rank: i64) -> Self {
        let hash = state.stable_hash();
        Self {
            state,
            parent: Some(parent),
            last_op: Some(op),
            depth,
            g,
            h,
            rank,
            hash,
        }
    }
}

impl<S: Generative> SearchNode<S> {
    /// `g + h`.
    #[must_use]
    pub fn f_cost(&self) -> i64 {
        self.g.saturating_add(self.h)
    }
}

/// Append-only node storage for one search run.
#[derive(Debug)]
pub struct NodeArena<S: Generative> {
    nodes: Vec<SearchNode<S>>,
}

impl<S: Generative> NodeArena<S> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: SearchNode<S>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// # Panics
    ///
    /// Never for an id returned by this arena's [`NodeArena::push`].
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk parent links from `id` to its root, yielding `id` first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &SearchNode<S>> + '_ {
        std::iter::successors(Some(self.get(id)), move |node| {
            node.parent.map(|parent| self.get(parent))
        })
    }
}

impl<S: Generative + Equatable> NodeArena<S> {
    /// Returns `true` if the node at `id` wraps a state equal to `state`.
    #[must_use]
    pub fn holds(&self, id: NodeId, state: &S) -> bool {
        self.get(id).state.is_equal(state)
    }
}

impl<S: Generative> Default for NodeArena<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A frontier slot: ordering key plus the node it points at.
///
/// Equality and ordering use `key` only, so entries with equal keys are
/// ordered purely by heap position.
#[derive(Debug, Clone, Copy)]
pub struct FrontierEntry {
    pub key: i64,
    pub node: NodeId,
}

impl FrontierEntry {
    #[must_use]
    pub fn new(key: i64, node: NodeId) -> Self {
        Self { key, node }
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}
