//! Closed set over arena nodes.
//!
//! Stores [`NodeId`]s in a [`ChainedHashSet`] keyed by the wrapped state's
//! stable hash; equality is checked against the arena. At most one node per
//! logical state is held at any time. A better-cost duplicate replaces the
//! old entry (remove then add), it is never merged.

use lodestar_kernel::capability::{Equatable, Generative};
use lodestar_kernel::collections::ChainedHashSet;

use crate::error::{SearchError, Structure};
use crate::node::{NodeArena, NodeId};
use crate::policy::SearchPolicy;

#[derive(Debug)]
pub struct ClosedSet {
    set: ChainedHashSet<NodeId>,
}

impl ClosedSet {
    /// Build a closed set sized by `policy`.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if the bucket geometry is invalid.
    pub fn new(policy: &SearchPolicy) -> Result<Self, SearchError> {
        let set = ChainedHashSet::with_growth(
            policy.bucket_count,
            policy.closed_capacity,
            policy.grow_closed_set,
        )
        .map_err(|err| SearchError::from_collection(Structure::ClosedSet, err))?;
        Ok(Self { set })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// The node currently standing for `state`, if any.
    #[must_use]
    pub fn find<S>(&self, arena: &NodeArena<S>, state: &S, hash: u32) -> Option<NodeId>
    where
        S: Generative + Equatable,
    {
        self.set
            .get_by(hash, |&id| arena.holds(id, state))
            .copied()
    }

    #[must_use]
    pub fn contains<S>(&self, arena: &NodeArena<S>, state: &S, hash: u32) -> bool
    where
        S: Generative + Equatable,
    {
        self.find(arena, state, hash).is_some()
    }

    /// Close `id`. Returns `false` if its state was already closed (the
    /// existing entry is kept).
    ///
    /// # Errors
    ///
    /// [`SearchError::CapacityExceeded`] if the set is full.
    pub fn insert<S>(&mut self, arena: &NodeArena<S>, id: NodeId) -> Result<bool, SearchError>
    where
        S: Generative + Equatable,
    {
        let node = arena.get(id);
        self.set
            .add_by(node.hash, id, |&other| arena.holds(other, &node.state))
            .map_err(|err| SearchError::from_collection(Structure::ClosedSet, err))
    }

    /// Make `id` the entry for its state, returning the node it displaced.
    ///
    /// # Errors
    ///
    /// [`SearchError::CapacityExceeded`] if no entry was displaced and the
    /// set is full.
    pub fn replace<S>(
        &mut self,
        arena: &NodeArena<S>,
        id: NodeId,
    ) -> Result<Option<NodeId>, SearchError>
    where
        S: Generative + Equatable,
    {
        let previous = self.remove(arena, id);
        self.insert(arena, id)?;
        Ok(previous)
    }

    /// Drop the entry for `id`'s state.
    pub fn remove<S>(&mut self, arena: &NodeArena<S>, id: NodeId) -> Option<NodeId>
    where
        S: Generative + Equatable,
    {
        let node = arena.get(id);
        self.set
            .remove_by(node.hash, |&other| arena.holds(other, &node.state))
    }

    /// Closed node ids in bucket order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.set.iter().copied()
    }
}
