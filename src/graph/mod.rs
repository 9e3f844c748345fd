//! Graph primitives consumed by the community detection core.
//!
//! The input graph is a `petgraph` [`UnGraph`]. Vertex ids are the dense
//! `NodeIndex::index()` values `0..n-1`, and every view in this module keeps
//! those global ids.
//!
//! - [`Subgraph`]: induced view over a vertex subset (never mutates the graph)
//! - [`matrix`]: adjacency, Laplacian and modularity matrices plus eigenpairs
//! - [`components`]: connected-component labeling and edge betweenness
//!
//! Invariants:
//! - A view's vertex list is ascending and duplicate-free.
//! - Local indices (`0..view.len()`) follow the order of that list, so matrix
//!   row `i` always belongs to `view.vertices()[i]`.

pub mod components;
pub mod matrix;

pub use components::{connected_components, edge_betweenness};
pub use matrix::{eigenpairs, laplacian, modularity_matrix, EigenPair, Spectrum};

use core::fmt;
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

/// Induced subgraph view over a subset of vertices.
pub struct Subgraph<'g, N, E> {
    graph: &'g UnGraph<N, E>,
    /// Global vertex ids, ascending.
    vertices: Vec<usize>,
}

impl<'g, N, E> Subgraph<'g, N, E> {
    /// View over the whole graph.
    pub fn full(graph: &'g UnGraph<N, E>) -> Self {
        Self {
            graph,
            vertices: (0..graph.node_count()).collect(),
        }
    }

    /// View induced by the vertices for which `keep` returns true.
    pub fn induced(graph: &'g UnGraph<N, E>, mut keep: impl FnMut(usize) -> bool) -> Self {
        Self {
            graph,
            vertices: (0..graph.node_count()).filter(|&v| keep(v)).collect(),
        }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &'g UnGraph<N, E> {
        self.graph
    }

    /// Global ids of the visible vertices, ascending.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Number of visible vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when no vertex is visible.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether a global vertex id is visible.
    pub fn contains(&self, vertex: usize) -> bool {
        self.vertices.binary_search(&vertex).is_ok()
    }

    /// Position of a global vertex id inside this view.
    pub fn local_index(&self, vertex: usize) -> Option<usize> {
        self.vertices.binary_search(&vertex).ok()
    }

    /// Visible edges as pairs of local indices (one entry per parallel edge).
    pub fn local_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph.edge_references().filter_map(move |edge| {
            let i = self.local_index(edge.source().index())?;
            let j = self.local_index(edge.target().index())?;
            Some((i, j))
        })
    }

    /// Number of visible edges.
    pub fn edge_count(&self) -> usize {
        self.local_edges().count()
    }

    /// Split into two induced views by a mask over local indices.
    ///
    /// Vertices whose mask entry is true land in the first view.
    pub fn partition_by(&self, mask: &[bool]) -> (Self, Self) {
        debug_assert_eq!(mask.len(), self.len());
        let mut first = Vec::new();
        let mut second = Vec::new();
        for (&v, &in_first) in self.vertices.iter().zip(mask) {
            if in_first {
                first.push(v);
            } else {
                second.push(v);
            }
        }
        (
            Self {
                graph: self.graph,
                vertices: first,
            },
            Self {
                graph: self.graph,
                vertices: second,
            },
        )
    }

    /// An empty view over the same graph.
    pub fn empty(&self) -> Self {
        Self {
            graph: self.graph,
            vertices: Vec::new(),
        }
    }
}

impl<N, E> Clone for Subgraph<'_, N, E> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            vertices: self.vertices.clone(),
        }
    }
}

impl<N, E> fmt::Debug for Subgraph<'_, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subgraph")
            .field("vertices", &self.vertices)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> UnGraph<(), ()> {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let nodes: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
        for w in nodes.windows(2) {
            let _ = graph.add_edge(w[0], w[1], ());
        }
        graph
    }

    #[test]
    fn induced_view_keeps_global_ids() {
        let graph = path(5);
        let view = Subgraph::induced(&graph, |v| v % 2 == 0);
        assert_eq!(view.vertices(), &[0, 2, 4]);
        assert_eq!(view.local_index(4), Some(2));
        assert!(!view.contains(1));
        // no two even vertices are adjacent on a path
        assert_eq!(view.edge_count(), 0);
    }

    #[test]
    fn local_edges_are_restricted_to_the_view() {
        let graph = path(5);
        let view = Subgraph::induced(&graph, |v| v >= 2);
        let edges: Vec<_> = view.local_edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn partition_by_mask_is_a_bipartition() {
        let graph = path(4);
        let view = Subgraph::full(&graph);
        let (a, b) = view.partition_by(&[true, false, false, true]);
        assert_eq!(a.vertices(), &[0, 3]);
        assert_eq!(b.vertices(), &[1, 2]);
        assert_eq!(a.len() + b.len(), view.len());
    }
}
