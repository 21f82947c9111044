//! The best-first search engine.
//!
//! [`Search`] implements A*-style search over any [`Graph`]: a min-heap
//! frontier ordered by `cost + heuristic`, a best-known-cost map keyed by
//! node identity, and predecessor links for path reconstruction. The
//! longest-path mode reuses the same loop with every operator inverted.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;
use std::mem;

use crate::traits::Graph;

const UNSEEN: i64 = i64::MAX;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Operator set distinguishing shortest- from longest-path accumulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Shortest,
    Longest,
}

impl Mode {
    /// Best-known cost of a never-visited node.
    fn unseen(self) -> i64 {
        match self {
            Self::Shortest => UNSEEN,
            Self::Longest => -UNSEEN,
        }
    }

    /// Accumulate a step cost onto a path cost.
    fn combine(self, cost: i64, step: i64) -> i64 {
        match self {
            Self::Shortest => cost + step,
            Self::Longest => cost - step,
        }
    }

    /// Whether `tentative` beats `best`.
    fn improves(self, tentative: i64, best: i64) -> bool {
        match self {
            Self::Shortest => tentative < best,
            Self::Longest => tentative > best,
        }
    }
}

// ---------------------------------------------------------------------------
// Frontier entries
// ---------------------------------------------------------------------------

/// A frontier entry: a node with the cost it was queued at and its
/// priority. Ordering considers the priority alone, reversed so the
/// max-heap [`BinaryHeap`] pops the lowest priority first.
struct Entry<N> {
    node: N,
    cost: i64,
    priority: i64,
}

impl<N> PartialEq for Entry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl<N> Eq for Entry<N> {}

impl<N> Ord for Entry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
    }
}

impl<N> PartialOrd for Entry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A reusable best-first search engine.
///
/// The engine owns its bookkeeping (best-cost map, predecessor links, a
/// neighbor scratch buffer) and clears it at the start of every
/// [`search`](Search::search) call; the graph itself is passed per call.
/// After a search, [`cost`](Search::cost) and
/// [`previous`](Search::previous) expose the traversal that was built.
///
/// Duplicate frontier entries are never removed eagerly: relaxing a node
/// pushes a fresh entry, and popped entries whose cost no longer matches
/// the best-known cost are skipped.
pub struct Search<N> {
    mode: Mode,
    best: HashMap<N, i64>,
    previous: HashMap<N, N>,
    nbuf: Vec<N>,
}

impl<N: Clone + Eq + Hash> Search<N> {
    /// A shortest-path engine: costs add up, smaller is better. Optimal
    /// when the graph's heuristic is admissible.
    pub fn shortest() -> Self {
        Self::with_mode(Mode::Shortest)
    }

    /// A longest-path engine: costs accumulate by subtraction, larger
    /// (closer to zero) is better, and the reported costs are negated
    /// path lengths.
    ///
    /// Valid only on graphs where no node can reach itself — on a cyclic
    /// graph the longest path is unbounded and the search may not
    /// terminate. The engine does not check this.
    pub fn longest() -> Self {
        Self::with_mode(Mode::Longest)
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            best: HashMap::new(),
            previous: HashMap::new(),
            nbuf: Vec::new(),
        }
    }

    /// Search from `origin` to whichever of `targets` is reached first.
    ///
    /// Returns the ordered node sequence from origin to target inclusive,
    /// or `None` when the frontier empties without reaching any target.
    /// With an empty `targets` slice the search exhausts everything
    /// reachable from the origin, leaving [`cost`](Search::cost) usable
    /// as a distance map.
    pub fn search<G>(&mut self, graph: &G, origin: N, targets: &[N]) -> Option<Vec<N>>
    where
        G: Graph<Node = N>,
    {
        self.best.clear();
        self.previous.clear();

        let mut frontier: BinaryHeap<Entry<N>> = BinaryHeap::new();
        let priority = self.mode.combine(0, graph.heuristic(&origin));
        self.best.insert(origin.clone(), 0);
        frontier.push(Entry {
            node: origin,
            cost: 0,
            priority,
        });

        let mut nbuf = mem::take(&mut self.nbuf);
        let mut found = None;

        while let Some(entry) = frontier.pop() {
            // Stale duplicate: a later relaxation already improved this node.
            if self.best.get(&entry.node) != Some(&entry.cost) {
                continue;
            }
            if targets.contains(&entry.node) {
                found = Some(entry.node);
                break;
            }

            nbuf.clear();
            graph.neighbors(&entry.node, &mut nbuf);

            for neighbor in nbuf.drain(..) {
                let step = graph.distance(&entry.node, &neighbor);
                let tentative = self.mode.combine(entry.cost, step);
                let best = self
                    .best
                    .get(&neighbor)
                    .copied()
                    .unwrap_or(self.mode.unseen());
                if self.mode.improves(tentative, best) {
                    self.best.insert(neighbor.clone(), tentative);
                    self.previous.insert(neighbor.clone(), entry.node.clone());
                    let priority = self.mode.combine(tentative, graph.heuristic(&neighbor));
                    frontier.push(Entry {
                        node: neighbor,
                        cost: tentative,
                        priority,
                    });
                }
            }
        }
        self.nbuf = nbuf;

        found.map(|target| self.solution(target))
    }

    /// Best known cost to reach `node` on the last search, absent when
    /// the node was never visited. In longest mode this is the negated
    /// path length.
    pub fn cost(&self, node: &N) -> Option<i64> {
        self.best.get(node).copied()
    }

    /// Predecessor of `node` on the last search's traversal tree. Absent
    /// for the origin and for unvisited nodes.
    pub fn previous(&self, node: &N) -> Option<&N> {
        self.previous.get(node)
    }

    /// Walk predecessor links back from `target` and reverse into
    /// origin→target order.
    fn solution(&self, target: N) -> Vec<N> {
        let mut path = Vec::new();
        let mut current = Some(&target);
        while let Some(node) = current {
            path.push(node.clone());
            current = self.previous.get(node);
        }
        path.reverse();
        path
    }
}
