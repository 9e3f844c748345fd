//! Community detection traits.

use crate::error::Result;
use crate::graph::Subgraph;
use petgraph::graph::UnGraph;

/// Trait for community detection algorithms.
pub trait CommunityDetection {
    /// Detect communities in a graph.
    ///
    /// Returns a mapping from node index to community ID.
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>>;
}

/// Two disjoint induced views covering the vertices of the split view.
#[derive(Debug, Clone)]
pub struct Bipartition<'g, N, E> {
    /// Partition A.
    pub first: Subgraph<'g, N, E>,
    /// Partition B.
    pub second: Subgraph<'g, N, E>,
}

impl<'g, N, E> Bipartition<'g, N, E> {
    /// Bipartition with every vertex in partition B.
    pub fn unsplit(view: &Subgraph<'g, N, E>) -> Self {
        Self {
            first: view.empty(),
            second: view.clone(),
        }
    }

    /// True when either side is empty.
    pub fn is_degenerate(&self) -> bool {
        self.first.is_empty() || self.second.is_empty()
    }
}

/// A way of cutting a graph into two.
///
/// Implementations treat the graph as read-only and must tolerate empty and
/// degenerate inputs; only numerical preconditions are errors.
pub trait SplitStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Bipartition the vertices of `view`.
    fn split<'g, N, E>(&self, view: &Subgraph<'g, N, E>) -> Result<Bipartition<'g, N, E>>;
}
