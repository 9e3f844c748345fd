//! Connectivity primitives: component labeling and edge betweenness.
//!
//! Both operate on [`WorkingGraph`], a mutable adjacency copy that supports edge
//! removal without disturbing edge ids. The public functions build one from a
//! `petgraph` graph and never touch the caller's graph.

use std::collections::VecDeque;

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Connected-component labels of an undirected graph, in BFS first-seen order.
///
/// Labels are contiguous `0..c`; vertex 0 always gets label 0.
pub fn connected_components<N, E>(graph: &UnGraph<N, E>) -> Vec<usize> {
    WorkingGraph::from_graph(graph).component_labels()
}

/// Edge betweenness of every edge, indexed by `EdgeIndex::index()`.
///
/// Each value counts the shortest paths between unordered vertex pairs that use
/// the edge, with a path shared by several equal-length routes split evenly.
pub fn edge_betweenness<N, E>(graph: &UnGraph<N, E>) -> Vec<f64> {
    WorkingGraph::from_graph(graph).edge_betweenness()
}

/// Private, mutable adjacency copy of a graph.
#[derive(Debug, Clone)]
pub(crate) struct WorkingGraph {
    /// Endpoints of every edge ever present, by edge id.
    edges: Vec<(usize, usize)>,
    /// Whether each edge id is still present.
    alive: Vec<bool>,
    /// Node -> [(neighbor, edge id)] over live edges.
    adj: Vec<Vec<(usize, usize)>>,
}

impl WorkingGraph {
    pub(crate) fn from_graph<N, E>(graph: &UnGraph<N, E>) -> Self {
        let n = graph.node_count();
        let mut edges = Vec::with_capacity(graph.edge_count());
        let mut adj = vec![Vec::new(); n];
        for edge in graph.edge_references() {
            let id = edge.id().index();
            let (i, j) = (edge.source().index(), edge.target().index());
            debug_assert_eq!(id, edges.len());
            edges.push((i, j));
            adj[i].push((j, id));
            if i != j {
                adj[j].push((i, id));
            }
        }
        let alive = vec![true; edges.len()];
        Self { edges, alive, adj }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Endpoints of an edge id.
    pub(crate) fn endpoints(&self, edge: usize) -> (usize, usize) {
        self.edges[edge]
    }

    /// Ids of the edges still present.
    pub(crate) fn live_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter_map(|(id, &alive)| alive.then_some(id))
    }

    /// Remove an edge; removing twice is a no-op.
    pub(crate) fn remove_edge(&mut self, edge: usize) {
        if !std::mem::replace(&mut self.alive[edge], false) {
            return;
        }
        let (i, j) = self.edges[edge];
        self.adj[i].retain(|&(_, id)| id != edge);
        self.adj[j].retain(|&(_, id)| id != edge);
    }

    /// BFS component labels, contiguous in first-seen order.
    pub(crate) fn component_labels(&self) -> Vec<usize> {
        let n = self.node_count();
        let mut labels = vec![usize::MAX; n];
        let mut queue = VecDeque::new();

        let mut comp = 0usize;
        for start in 0..n {
            if labels[start] != usize::MAX {
                continue;
            }
            labels[start] = comp;
            queue.push_back(start);
            while let Some(u) = queue.pop_front() {
                for &(v, _) in &self.adj[u] {
                    if labels[v] == usize::MAX {
                        labels[v] = comp;
                        queue.push_back(v);
                    }
                }
            }
            comp += 1;
        }
        labels
    }

    /// Brandes edge betweenness over live edges; removed edges score 0.
    pub(crate) fn edge_betweenness(&self) -> Vec<f64> {
        let n = self.node_count();

        #[cfg(feature = "parallel")]
        let partial: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|source| self.brandes_from_source(source))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let partial: Vec<Vec<f64>> = (0..n)
            .map(|source| self.brandes_from_source(source))
            .collect();

        // Fixed reduction order keeps the result identical with or without rayon.
        let mut betweenness = vec![0.0; self.edges.len()];
        for scores in partial {
            for (total, score) in betweenness.iter_mut().zip(scores) {
                *total += score;
            }
        }

        // Every unordered pair was counted from both endpoints.
        for score in &mut betweenness {
            *score /= 2.0;
        }
        betweenness
    }

    /// Edge dependencies accumulated from a single BFS source.
    fn brandes_from_source(&self, source: usize) -> Vec<f64> {
        let n = self.node_count();
        let mut stack = Vec::with_capacity(n);
        let mut paths = vec![0.0f64; n];
        let mut distance = vec![usize::MAX; n];
        let mut predecessors: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
        let mut dependency = vec![0.0f64; n];
        let mut scores = vec![0.0f64; self.edges.len()];

        paths[source] = 1.0;
        distance[source] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &(w, edge) in &self.adj[v] {
                if w == v {
                    continue;
                }
                if distance[w] == usize::MAX {
                    distance[w] = distance[v] + 1;
                    queue.push_back(w);
                }
                if distance[w] == distance[v] + 1 {
                    paths[w] += paths[v];
                    predecessors[w].push((v, edge));
                }
            }
        }

        while let Some(w) = stack.pop() {
            for &(v, edge) in &predecessors[w] {
                let contrib = (paths[v] / paths[w]) * (1.0 + dependency[w]);
                scores[edge] += contrib;
                dependency[v] += contrib;
            }
        }
        scores
    }
}
