//! Per-partition statistics for reporting.

use std::fmt;

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

use super::assignment::community_count;
use super::modularity::modularity;
use crate::error::{Error, Result};

/// Sizes, edge counts and modularity of one assignment.
///
/// ```rust
/// use petgraph::graph::UnGraph;
/// use cleave::community::PartitionSummary;
///
/// let graph = UnGraph::<(), ()>::from_edges(&[(0, 1), (1, 2), (2, 3)]);
/// let summary = PartitionSummary::new(&graph, &[0, 0, 1, 1]).unwrap();
/// assert_eq!(summary.sizes, vec![2, 2]);
/// assert_eq!(summary.cut_edges, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionSummary {
    /// Number of communities.
    pub communities: usize,
    /// Vertex count per community id.
    pub sizes: Vec<usize>,
    /// Edges with both endpoints in the community, per community id.
    pub internal_edges: Vec<usize>,
    /// Edges joining two different communities.
    pub cut_edges: usize,
    /// Newman modularity of the assignment.
    pub modularity: f64,
}

impl PartitionSummary {
    /// Summarize `assignment` on `graph`.
    ///
    /// Fails with [`Error::DimensionMismatch`] when the assignment does not
    /// have one entry per vertex.
    pub fn new<N, E>(graph: &UnGraph<N, E>, assignment: &[usize]) -> Result<Self> {
        if assignment.len() != graph.node_count() {
            return Err(Error::DimensionMismatch {
                expected: graph.node_count(),
                found: assignment.len(),
            });
        }

        let communities = community_count(assignment);
        let mut sizes = vec![0; communities];
        for &c in assignment {
            sizes[c] += 1;
        }

        let mut internal_edges = vec![0; communities];
        let mut cut_edges = 0;
        for edge in graph.edge_references() {
            let (a, b) = (
                assignment[edge.source().index()],
                assignment[edge.target().index()],
            );
            if a == b {
                internal_edges[a] += 1;
            } else {
                cut_edges += 1;
            }
        }

        Ok(Self {
            communities,
            sizes,
            internal_edges,
            cut_edges,
            modularity: modularity(graph, assignment),
        })
    }

    /// Size of the largest community, 0 for an empty graph.
    pub fn largest(&self) -> usize {
        self.sizes.iter().copied().max().unwrap_or(0)
    }

    /// Fraction of edges that stay inside a community, 0.0 without edges.
    pub fn coverage(&self) -> f64 {
        let internal: usize = self.internal_edges.iter().sum();
        let total = internal + self.cut_edges;
        if total == 0 {
            0.0
        } else {
            internal as f64 / total as f64
        }
    }
}

impl fmt::Display for PartitionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} communities, modularity {:.4}, {} cut edges",
            self.communities, self.modularity, self.cut_edges
        )?;
        for (c, (size, internal)) in self.sizes.iter().zip(&self.internal_edges).enumerate() {
            writeln!(f, "  community {c}: {size} vertices, {internal} internal edges")?;
        }
        Ok(())
    }
}
