//! Newman modularity of a vertex-to-community assignment.
//!
//! ```text
//! Q = Σ_c [ L_c / m − (D_c / 2m)² ]
//! ```
//!
//! where `L_c` counts edges inside community `c`, `D_c` is the summed degree of
//! its vertices and `m` the total edge count. Self-loops add 2 to the degree and
//! count as internal edges; parallel edges count once each.

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

/// Modularity of `assignment` on `graph`.
///
/// `assignment[v]` is the community of vertex `v`. Returns 0.0 for graphs
/// without edges.
pub fn modularity<N, E>(graph: &UnGraph<N, E>, assignment: &[usize]) -> f64 {
    ModularityScorer::from_graph(graph).score(assignment)
}

/// Edge list and degrees cached for scoring many assignments of one graph.
///
/// Holds no borrow of the graph, so a single scorer can be shared across
/// worker threads.
#[derive(Debug, Clone)]
pub struct ModularityScorer {
    edges: Vec<(usize, usize)>,
    degrees: Vec<f64>,
    /// Twice the edge count (sum of degrees).
    total_weight: f64,
}

impl ModularityScorer {
    /// Cache edges and degrees of `graph`.
    pub fn from_graph<N, E>(graph: &UnGraph<N, E>) -> Self {
        let mut degrees = vec![0.0; graph.node_count()];
        let mut edges = Vec::with_capacity(graph.edge_count());
        for edge in graph.edge_references() {
            let (i, j) = (edge.source().index(), edge.target().index());
            degrees[i] += 1.0;
            degrees[j] += 1.0;
            edges.push((i, j));
        }
        let total_weight = degrees.iter().sum();
        Self {
            edges,
            degrees,
            total_weight,
        }
    }

    /// Number of vertices the scorer was built for.
    pub fn node_count(&self) -> usize {
        self.degrees.len()
    }

    /// Modularity of `assignment`.
    pub fn score(&self, assignment: &[usize]) -> f64 {
        debug_assert_eq!(assignment.len(), self.degrees.len());
        if self.total_weight == 0.0 {
            return 0.0;
        }

        let n_comms = assignment.iter().copied().max().map_or(0, |c| c + 1);
        let mut internal = vec![0.0; n_comms];
        let mut comm_degree = vec![0.0; n_comms];

        for &(i, j) in &self.edges {
            if assignment[i] == assignment[j] {
                internal[assignment[i]] += 1.0;
            }
        }
        for (v, &c) in assignment.iter().enumerate() {
            comm_degree[c] += self.degrees[v];
        }

        let m = self.total_weight / 2.0;
        internal
            .iter()
            .zip(&comm_degree)
            .map(|(&l, &d)| l / m - (d / self.total_weight).powi(2))
            .sum()
    }
}
