//! Recursive bisection community detection.
//!
//! ## The Algorithm
//!
//! 1. **Depth**: `d = ceil(log2 k)`; `k = 1` needs no split at all.
//! 2. **Tree growth**: split every node of each level with the chosen
//!    [`SplitStrategy`] until depth `d`, giving `2^d` leaves.
//! 3. **Exact power of two**: when `k = 2^d` the leaves are the communities.
//! 4. **Otherwise**: the [`CombinationSelector`] keeps `2^d − k` depth-(d−1)
//!    nodes whole, splits the rest, and returns the modularity maximum.
//!
//! Degenerate splits never abort a run. Their empty leaves are skipped when
//! ids are assigned, so a run that hit one may return fewer than `k`
//! communities; the [`Bisection`] report lists every such split.
//!
//! ## References
//!
//! - Newman (2006). "Modularity and community structure in networks." PNAS.
//! - Fiedler (1973). "Algebraic connectivity of graphs."

use petgraph::graph::UnGraph;

use super::assignment::{collect_assignment, community_count};
use super::combination::CombinationSelector;
use super::modularity::ModularityScorer;
use super::split::{ModularitySplit, SpectralSplit, SplitMethod};
use super::traits::{CommunityDetection, SplitStrategy};
use crate::error::{Error, Result};
use crate::hierarchy::{DegenerateSplit, PartitionTree};

/// Recursive bisection into `k` communities.
#[derive(Debug, Clone)]
pub struct RecursiveBisection {
    /// Split strategy used at every tree node.
    method: SplitMethod,
    /// Target community count.
    k: usize,
    /// Upper bound on scored level combinations.
    candidate_limit: Option<usize>,
}

/// Outcome of one recursive bisection run.
#[derive(Debug, Clone, PartialEq)]
pub struct Bisection {
    /// Community id per vertex, contiguous from 0.
    pub assignment: Vec<usize>,
    /// Modularity of `assignment` on the input graph.
    pub modularity: f64,
    /// Depth the partition tree was grown to.
    pub depth: usize,
    /// Number of non-empty communities returned.
    pub communities: usize,
    /// Level combinations scored (1 when the leaves were used directly).
    pub candidates_evaluated: usize,
    /// Depth-(d−1) positions kept whole by the combination search.
    pub merged: Vec<usize>,
    /// Splits that left one side empty.
    pub degenerate_splits: Vec<DegenerateSplit>,
}

impl RecursiveBisection {
    /// Create a detector for `k` communities using `method`.
    pub fn new(method: SplitMethod, k: usize) -> Self {
        Self {
            method,
            k,
            candidate_limit: None,
        }
    }

    /// Create a detector from a method name (`"modularity"` or `"spectral"`).
    pub fn from_name(method: &str, k: usize) -> Result<Self> {
        Ok(Self::new(method.parse()?, k))
    }

    /// Fail instead of scoring more than `limit` level combinations.
    pub fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = Some(limit);
        self
    }

    /// Split method in use.
    pub fn method(&self) -> SplitMethod {
        self.method
    }

    /// Target community count.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Tree depth needed for `k` communities: `ceil(log2 k)`, 0 for `k ≤ 1`.
    pub fn target_depth(k: usize) -> usize {
        k.max(1).next_power_of_two().trailing_zeros() as usize
    }

    /// Grow the partition tree this detector would use.
    pub fn build_tree<'g, N, E>(
        &self,
        graph: &'g UnGraph<N, E>,
    ) -> Result<PartitionTree<'g, N, E>> {
        self.validate(graph.node_count())?;
        let depth = Self::target_depth(self.k);
        match self.method {
            SplitMethod::Modularity => PartitionTree::grow(graph, &ModularitySplit, depth),
            SplitMethod::Spectral => PartitionTree::grow(graph, &SpectralSplit, depth),
        }
    }

    /// Detect communities and report how the partition was reached.
    pub fn detect_with_report<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Bisection> {
        self.validate(graph.node_count())?;
        match self.method {
            SplitMethod::Modularity => self.run(graph, &ModularitySplit),
            SplitMethod::Spectral => self.run(graph, &SpectralSplit),
        }
    }

    /// Entry checks, before any decomposition runs.
    fn validate(&self, n: usize) -> Result<()> {
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidTargetCount {
                requested: self.k,
                n_items: n,
            });
        }
        let depth = Self::target_depth(self.k);
        let leaves = 1usize << depth;
        if let Some(limit) = self.candidate_limit {
            if self.k < leaves {
                let candidates = CombinationSelector::candidate_count(leaves / 2, leaves - self.k);
                if candidates > limit {
                    return Err(Error::CandidateLimitExceeded { candidates, limit });
                }
            }
        }
        Ok(())
    }

    fn run<S: SplitStrategy, N, E>(&self, graph: &UnGraph<N, E>, strategy: &S) -> Result<Bisection> {
        let n = graph.node_count();
        let k = self.k;
        let depth = Self::target_depth(k);
        tracing::debug!(method = %self.method, k, depth, vertices = n, "recursive bisection");

        let tree = PartitionTree::grow(graph, strategy, depth)?;
        let scorer = ModularityScorer::from_graph(graph);

        let (assignment, modularity, candidates_evaluated, merged) = if k == 1 << depth {
            let assignment =
                collect_assignment(n, tree.leaves().iter().map(|leaf| leaf.subgraph.vertices()));
            let modularity = scorer.score(&assignment);
            (assignment, modularity, 1, Vec::new())
        } else {
            let mut selector = CombinationSelector::new(&scorer);
            if let Some(limit) = self.candidate_limit {
                selector = selector.with_candidate_limit(limit);
            }
            let parents = tree.vertex_sets(depth - 1);
            let selection = selector.select(&parents, &tree.vertex_sets(depth), k)?;
            (
                selection.assignment,
                selection.modularity,
                selection.candidates_evaluated,
                selection.merged,
            )
        };

        let communities = community_count(&assignment);
        tracing::debug!(
            communities,
            modularity,
            degenerate = tree.degenerate_splits().len(),
            "recursive bisection finished"
        );

        Ok(Bisection {
            assignment,
            modularity,
            depth,
            communities,
            candidates_evaluated,
            merged,
            degenerate_splits: tree.degenerate_splits().to_vec(),
        })
    }
}

impl CommunityDetection for RecursiveBisection {
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>> {
        Ok(self.detect_with_report(graph)?.assignment)
    }
}

/// Partition `graph` into `k` communities by recursive bisection.
///
/// `method` is `"modularity"` or `"spectral"`.
///
/// ```rust
/// use petgraph::graph::UnGraph;
///
/// // Two triangles joined by the edge 2-3.
/// let graph = UnGraph::<(), ()>::from_edges(&[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)]);
/// let communities = cleave::cluster(&graph, "spectral", 2).unwrap();
/// assert_eq!(communities[0], communities[2]);
/// assert_ne!(communities[0], communities[3]);
/// ```
pub fn cluster<N, E>(graph: &UnGraph<N, E>, method: &str, k: usize) -> Result<Vec<usize>> {
    RecursiveBisection::from_name(method, k)?.detect(graph)
}
