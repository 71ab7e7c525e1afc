//! Association-Set Reconciliation
//!
//! Computes the minimal add/remove edge operations that move an owner's
//! stored association set to a requested target set. Used for user<->role
//! membership and role<->permission grants.
//!
//! The plan is a snapshot: removals are keyed by the edge ids observed at
//! planning time and are applied as one batch delete, additions as
//! individual inserts. There is no rollback; a failed insert partway
//! through leaves earlier inserts in place, and re-running the same
//! request converges because a second plan against the resulting state is
//! empty.

use std::collections::HashSet;
use std::hash::Hash;

/// A stored association edge: the edge record's own id plus the peer it
/// points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<P> {
    pub edge_id: String,
    pub peer: P,
}

impl<P> Edge<P> {
    pub fn new(edge_id: impl Into<String>, peer: P) -> Self {
        Self { edge_id: edge_id.into(), peer }
    }
}

/// The operations required to make an owner's peer set equal the
/// requested set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan<P> {
    /// Edge ids to delete, as one batch operation.
    pub remove_edge_ids: Vec<String>,
    /// Peers to create new edges for, in request order.
    pub add_peers: Vec<P>,
}

impl<P> ReconcilePlan<P> {
    pub fn is_empty(&self) -> bool {
        self.remove_edge_ids.is_empty() && self.add_peers.is_empty()
    }
}

/// Compute the edge operations that take `current` to `requested`.
///
/// - Edges whose peer is absent from `requested` are removed.
/// - Requested peers absent from `current` are added; duplicates in the
///   request collapse to a single edge.
/// - An empty `requested` set removes every current edge (full
///   detachment).
///
/// Applying the plan twice from the same starting state yields the same
/// final set, and the second plan is empty.
pub fn reconcile<P>(current: &[Edge<P>], requested: &[P]) -> ReconcilePlan<P>
where
    P: Eq + Hash + Clone,
{
    let requested_set: HashSet<&P> = requested.iter().collect();
    let current_set: HashSet<&P> = current.iter().map(|e| &e.peer).collect();

    let remove_edge_ids = current
        .iter()
        .filter(|e| !requested_set.contains(&e.peer))
        .map(|e| e.edge_id.clone())
        .collect();

    let mut seen: HashSet<&P> = HashSet::new();
    let add_peers = requested
        .iter()
        .filter(|p| !current_set.contains(*p) && seen.insert(*p))
        .cloned()
        .collect();

    ReconcilePlan { remove_edge_ids, add_peers }
}
