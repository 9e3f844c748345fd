//! Girvan–Newman partitioning by edge-betweenness removal.
//!
//! Edges between communities carry many shortest paths. Removing the
//! highest-betweenness edges one round at a time disconnects the graph along
//! its community boundaries:
//!
//! ```text
//! repeat
//!     compute edge betweenness of the remaining edges
//!     remove every edge tied for the maximum
//! until components >= k
//! ```
//!
//! The caller's graph is never modified; removal happens on a private copy.
//! Because tied edges go in the same round, the final component count can
//! overshoot `k`.
//!
//! ## References
//!
//! Girvan & Newman (2002). "Community structure in social and biological
//! networks." PNAS 99(12).

use petgraph::graph::UnGraph;

use super::assignment::community_count;
use super::traits::CommunityDetection;
use crate::error::{Error, Result};
use crate::graph::components::WorkingGraph;

/// Edge-betweenness partitioner.
#[derive(Debug, Clone)]
pub struct GirvanNewman {
    /// Target component count.
    k: usize,
    /// Relative tolerance for betweenness ties.
    tolerance: f64,
}

/// Outcome of a Girvan–Newman run.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRemoval {
    /// Component id per vertex, contiguous from 0.
    pub assignment: Vec<usize>,
    /// Edges removed in each round, as vertex pairs.
    pub rounds: Vec<Vec<(usize, usize)>>,
    /// Number of components at the end.
    pub components: usize,
}

impl EdgeRemoval {
    /// All removed edges in removal order.
    pub fn removed_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rounds.iter().flatten().copied()
    }
}

impl GirvanNewman {
    /// Create a partitioner targeting `k` components.
    pub fn new(k: usize) -> Self {
        Self { k, tolerance: 1e-9 }
    }

    /// Set the relative tolerance under which betweenness values count as tied.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Target component count.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Partition and report which edges were removed in each round.
    pub fn partition_with_history<N, E>(&self, graph: &UnGraph<N, E>) -> Result<EdgeRemoval> {
        let n = graph.node_count();
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidTargetCount {
                requested: self.k,
                n_items: n,
            });
        }

        let mut work = WorkingGraph::from_graph(graph);
        let mut labels = work.component_labels();
        let mut rounds = Vec::new();

        while community_count(&labels) < self.k {
            let betweenness = work.edge_betweenness();
            let Some(max) = work
                .live_edges()
                .map(|e| betweenness[e])
                .max_by(f64::total_cmp)
            else {
                // No edges left: every vertex is already isolated.
                break;
            };

            let threshold = self.tolerance * max.abs().max(1.0);
            let tied: Vec<usize> = work
                .live_edges()
                .filter(|&e| (betweenness[e] - max).abs() <= threshold)
                .collect();
            for &e in &tied {
                work.remove_edge(e);
            }

            let removed: Vec<(usize, usize)> = tied.iter().map(|&e| work.endpoints(e)).collect();
            tracing::trace!(round = rounds.len(), betweenness = max, ?removed, "removed edges");
            rounds.push(removed);
            labels = work.component_labels();
        }

        let components = community_count(&labels);
        tracing::debug!(
            k = self.k,
            components,
            rounds = rounds.len(),
            "edge betweenness partition finished"
        );
        Ok(EdgeRemoval {
            assignment: labels,
            rounds,
            components,
        })
    }
}

impl CommunityDetection for GirvanNewman {
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>> {
        Ok(self.partition_with_history(graph)?.assignment)
    }
}

/// Partition `graph` into at least `k` connected components by removing
/// highest-betweenness edges.
pub fn betweenness_partition<N, E>(graph: &UnGraph<N, E>, k: usize) -> Result<Vec<usize>> {
    GirvanNewman::new(k).detect(graph)
}
