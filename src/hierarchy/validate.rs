//! Partition tree validation and health checking.
//!
//! Checks the structural guarantees recursive bisection relies on:
//! - level `l` holds exactly `2^l` nodes with consistent parent links
//! - every level covers each graph vertex exactly once
//! - the two children of a node partition their parent
//!
//! Empty nodes left by degenerate splits are reported as warnings; they do not
//! make a tree unhealthy.
//!
//! # Example
//!
//! ```rust
//! use cleave::community::SpectralSplit;
//! use cleave::hierarchy::{HealthCheck, PartitionTree};
//! use petgraph::graph::UnGraph;
//!
//! let graph = UnGraph::<(), ()>::from_edges(&[(0, 1), (1, 2), (2, 3)]);
//! let tree = PartitionTree::grow(&graph, &SpectralSplit, 2).unwrap();
//! let report = tree.health_check();
//! assert!(report.is_healthy(), "{report}");
//! ```

use std::collections::HashMap;
use std::fmt;

use super::PartitionTree;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Something unusual but not necessarily wrong.
    Warning,
    /// A broken invariant.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single issue found during a health check.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Tree node involved, as `(level, position)`.
    pub node: Option<(usize, usize)>,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            node: None,
        }
    }

    /// Attach the node this issue concerns.
    pub fn at(mut self, level: usize, position: usize) -> Self {
        self.node = Some((level, position));
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        if let Some((level, position)) = self.node {
            write!(f, " (node {level}:{position})")?;
        }
        Ok(())
    }
}

/// Result of a partition tree health check.
#[derive(Debug, Clone, Default)]
pub struct HealthReport {
    /// All issues found.
    pub issues: Vec<ValidationIssue>,
    /// Total number of nodes.
    pub node_count: usize,
    /// Depth of the deepest level.
    pub depth: usize,
    /// Deepest-level nodes with no vertices.
    pub empty_leaves: usize,
}

impl HealthReport {
    fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// No error-level issues.
    pub fn is_healthy(&self) -> bool {
        !self.issues.iter().any(|i| i.severity >= Severity::Error)
    }

    /// No issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Count issues by severity.
    pub fn counts(&self) -> HashMap<Severity, usize> {
        let mut counts = HashMap::new();
        for issue in &self.issues {
            *counts.entry(issue.severity).or_default() += 1;
        }
        counts
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Partition tree: {} nodes, depth {}, {} empty leaves",
            self.node_count, self.depth, self.empty_leaves
        )?;
        if self.is_clean() {
            return write!(f, "no issues found");
        }
        let counts = self.counts();
        writeln!(
            f,
            "{} errors, {} warnings",
            counts.get(&Severity::Error).copied().unwrap_or(0),
            counts.get(&Severity::Warning).copied().unwrap_or(0)
        )?;
        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }
        Ok(())
    }
}

/// Trait for types that can be health-checked.
pub trait HealthCheck {
    /// Perform a health check and return a report.
    fn health_check(&self) -> HealthReport;

    /// Quick check: returns true if healthy.
    fn is_healthy(&self) -> bool {
        self.health_check().is_healthy()
    }
}

impl<N, E> HealthCheck for PartitionTree<'_, N, E> {
    fn health_check(&self) -> HealthReport {
        let n = self.node_count();
        let mut report = HealthReport {
            node_count: self.len(),
            depth: self.depth(),
            empty_leaves: self.leaves().iter().filter(|l| l.subgraph.is_empty()).count(),
            ..HealthReport::default()
        };

        for level in 0..=self.depth() {
            let nodes = self.level(level).unwrap_or(&[]);
            if nodes.len() != 1 << level {
                report.add(ValidationIssue::new(
                    Severity::Error,
                    format!("level {level} has {} nodes, expected {}", nodes.len(), 1usize << level),
                ));
            }

            let mut seen = vec![0usize; n];
            for (position, node) in nodes.iter().enumerate() {
                if node.level != level {
                    report.add(
                        ValidationIssue::new(
                            Severity::Error,
                            format!("node records level {}", node.level),
                        )
                        .at(level, position),
                    );
                }
                let expected_parent = (level > 0).then_some(position / 2);
                if node.parent != expected_parent {
                    report.add(
                        ValidationIssue::new(
                            Severity::Error,
                            format!("parent link {:?}, expected {:?}", node.parent, expected_parent),
                        )
                        .at(level, position),
                    );
                }
                if node.subgraph.is_empty() && level == self.depth() {
                    report.add(
                        ValidationIssue::new(Severity::Warning, "empty leaf from a degenerate split")
                            .at(level, position),
                    );
                }
                for &v in node.subgraph.vertices() {
                    match seen.get_mut(v) {
                        Some(count) => *count += 1,
                        None => report.add(
                            ValidationIssue::new(
                                Severity::Error,
                                format!("vertex {v} is outside the graph"),
                            )
                            .at(level, position),
                        ),
                    }
                }

                if let Some([left, right]) = self.children(level, position) {
                    let mut union: Vec<usize> = left
                        .subgraph
                        .vertices()
                        .iter()
                        .chain(right.subgraph.vertices())
                        .copied()
                        .collect();
                    union.sort_unstable();
                    if union != node.subgraph.vertices() {
                        report.add(
                            ValidationIssue::new(
                                Severity::Error,
                                "children do not partition their parent",
                            )
                            .at(level, position),
                        );
                    }
                }
            }

            let missing = seen.iter().filter(|&&c| c == 0).count();
            let repeated = seen.iter().filter(|&&c| c > 1).count();
            if missing > 0 || repeated > 0 {
                report.add(ValidationIssue::new(
                    Severity::Error,
                    format!("level {level} misses {missing} vertices and repeats {repeated}"),
                ));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::{ModularitySplit, SpectralSplit};
    use petgraph::graph::UnGraph;
    use proptest::prelude::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn spectral_tree_on_path_is_clean() {
        let graph = UnGraph::<(), ()>::from_edges(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]);
        let tree = PartitionTree::grow(&graph, &SpectralSplit, 2).unwrap();
        let report = tree.health_check();
        assert!(report.is_healthy(), "{report}");
        assert_eq!(report.node_count, 7);
        assert_eq!(report.depth, 2);
    }

    #[test]
    fn empty_leaves_warn_but_stay_healthy() {
        let mut edges = Vec::new();
        for base in [0u32, 4] {
            for i in 0..4 {
                for j in (i + 1)..4 {
                    edges.push((base + i, base + j));
                }
            }
        }
        let graph = UnGraph::<(), ()>::from_edges(&edges);
        let tree = PartitionTree::grow(&graph, &ModularitySplit, 2).unwrap();
        let report = tree.health_check();
        assert!(report.is_healthy(), "{report}");
        assert!(!report.is_clean());
        assert_eq!(report.empty_leaves, 2);
        assert_eq!(report.counts().get(&Severity::Warning), Some(&2));
    }

    proptest! {
        #[test]
        fn spectral_trees_are_healthy(
            n in 1usize..14,
            raw_edges in proptest::collection::vec((0usize..14, 0usize..14), 0..30),
            depth in 0usize..4,
        ) {
            let mut graph = UnGraph::<(), ()>::new_undirected();
            let nodes: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
            for (a, b) in raw_edges {
                let _ = graph.add_edge(nodes[a % n], nodes[b % n], ());
            }
            let tree = PartitionTree::grow(&graph, &SpectralSplit, depth).unwrap();
            let report = tree.health_check();
            prop_assert!(report.is_healthy(), "{}", report);
        }
    }
}
