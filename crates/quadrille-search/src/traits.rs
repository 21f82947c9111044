use std::hash::Hash;

/// The graph contract a search caller supplies.
///
/// Nodes are an arbitrary cheap-to-clone hashable type — grid positions,
/// integers, or small state tuples.
pub trait Graph {
    /// The node type searched over.
    type Node: Clone + Eq + Hash;

    /// Append the neighbors of `node` into `buf`. The engine clears `buf`
    /// before calling.
    fn neighbors(&self, node: &Self::Node, buf: &mut Vec<Self::Node>);

    /// Cost of the direct edge from `from` to adjacent `to`.
    fn distance(&self, from: &Self::Node, to: &Self::Node) -> i64;

    /// Estimate of the remaining cost from `node` to any target.
    /// Must never overestimate the true cost (admissible) for
    /// shortest-path optimality. The default of 0 is always admissible
    /// and turns the search into uniform-cost search.
    fn heuristic(&self, _node: &Self::Node) -> i64 {
        0
    }
}
