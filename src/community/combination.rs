//! Modularity-maximizing combination of two adjacent tree levels.
//!
//! With `k` strictly between `2^(d−1)` and `2^d`, a `k`-way partition is built
//! from the `p = 2^(d−1)` nodes at depth `d − 1`: `m = 2^d − k` of them are
//! kept whole ("merged") and every other one contributes its two children.
//!
//! ```text
//! p = 4, k = 6, m = 2        merged = {1, 3}
//!
//! depth d-1:  [ P0 ]   [ P1 ]   [ P2 ]   [ P3 ]
//! depth d:   [C0][C1]          [C4][C5]
//! candidate:  C0, C1,   P1,     C4, C5,   P3      -> 6 communities
//! ```
//!
//! The search scores all `C(p, m)` merged sets in lexicographic order and
//! keeps the highest modularity; ties go to the earliest set.

use std::cmp::Ordering;

use itertools::Itertools;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::assignment::collect_assignment;
use super::modularity::ModularityScorer;
use crate::error::{Error, Result};

/// Best combination found by [`CombinationSelector::select`].
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Community id per vertex.
    pub assignment: Vec<usize>,
    /// Modularity of `assignment`.
    pub modularity: f64,
    /// Depth-(d−1) positions kept whole, ascending.
    pub merged: Vec<usize>,
    /// Number of candidates scored.
    pub candidates_evaluated: usize,
}

/// Exhaustive choose-`m`-to-merge search over two tree levels.
#[derive(Debug, Clone)]
pub struct CombinationSelector<'a> {
    scorer: &'a ModularityScorer,
    candidate_limit: Option<usize>,
}

/// A scored candidate with its enumeration index.
struct Scored {
    index: usize,
    modularity: f64,
    merged: Vec<usize>,
    assignment: Vec<usize>,
}

impl<'a> CombinationSelector<'a> {
    /// Selector scoring candidates with `scorer`.
    pub fn new(scorer: &'a ModularityScorer) -> Self {
        Self {
            scorer,
            candidate_limit: None,
        }
    }

    /// Refuse searches with more than `limit` candidates.
    pub fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = Some(limit);
        self
    }

    /// Number of candidates for `parents` nodes with `merged` kept whole.
    pub fn candidate_count(parents: usize, merged: usize) -> usize {
        binomial(parents, merged)
    }

    /// Pick the best `k`-way combination.
    ///
    /// `parents` are the vertex sets at depth `d − 1`; `children[2i]` and
    /// `children[2i + 1]` are the two halves of `parents[i]`. Requires
    /// `p ≤ k ≤ 2p`.
    pub fn select(
        &self,
        parents: &[Vec<usize>],
        children: &[Vec<usize>],
        k: usize,
    ) -> Result<Selection> {
        let p = parents.len();
        debug_assert_eq!(children.len(), 2 * p);
        if k < p || k > 2 * p {
            return Err(Error::InvalidTargetCount {
                requested: k,
                n_items: 2 * p,
            });
        }

        let m = 2 * p - k;
        let candidates = Self::candidate_count(p, m);
        if let Some(limit) = self.candidate_limit {
            if candidates > limit {
                return Err(Error::CandidateLimitExceeded { candidates, limit });
            }
        }
        tracing::debug!(parents = p, merged = m, candidates, "searching level combinations");

        let combos = (0..p).combinations(m).enumerate();
        let score = |(index, merged): (usize, Vec<usize>)| {
            let assignment = self.assemble(parents, children, &merged);
            let modularity = self.scorer.score(&assignment);
            tracing::trace!(index, ?merged, modularity, "scored candidate");
            Scored {
                index,
                modularity,
                merged,
                assignment,
            }
        };

        #[cfg(feature = "parallel")]
        let best = combos.par_bridge().map(score).reduce_with(better);

        #[cfg(not(feature = "parallel"))]
        let best = combos.map(score).reduce(better);

        let best = best.ok_or(Error::InvalidTargetCount {
            requested: k,
            n_items: 2 * p,
        })?;
        Ok(Selection {
            assignment: best.assignment,
            modularity: best.modularity,
            merged: best.merged,
            candidates_evaluated: candidates,
        })
    }

    /// Assignment of one candidate: merged parents first, then the children of
    /// every other parent, each group in position order.
    fn assemble(
        &self,
        parents: &[Vec<usize>],
        children: &[Vec<usize>],
        merged: &[usize],
    ) -> Vec<usize> {
        let whole = merged.iter().map(|&i| parents[i].as_slice());
        let split = (0..parents.len())
            .filter(|i| merged.binary_search(i).is_err())
            .flat_map(|i| [children[2 * i].as_slice(), children[2 * i + 1].as_slice()]);
        collect_assignment(self.scorer.node_count(), whole.chain(split))
    }
}

/// Higher modularity wins; equal scores go to the lower enumeration index.
fn better(a: Scored, b: Scored) -> Scored {
    match a.modularity.total_cmp(&b.modularity) {
        Ordering::Greater => a,
        Ordering::Less => b,
        Ordering::Equal if a.index < b.index => a,
        Ordering::Equal => b,
    }
}

/// `C(n, k)`, saturating at `usize::MAX`.
fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = match acc.checked_mul((n - i) as u128) {
            Some(v) => v / (i + 1) as u128,
            None => return usize::MAX,
        };
        if acc > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    acc as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::UnGraph;

    /// Triangle 0-1-2, edge 3-4, bridge 2-3.
    fn triangle_and_tail() -> UnGraph<(), ()> {
        UnGraph::<(), ()>::from_edges(&[(0, 1), (0, 2), (1, 2), (3, 4), (2, 3)])
    }

    #[test]
    fn binomial_values() {
        assert_eq!(binomial(4, 2), 6);
        assert_eq!(binomial(8, 3), 56);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(200, 100), usize::MAX);
    }

    #[test]
    fn picks_the_modularity_maximizing_merge() {
        let graph = triangle_and_tail();
        let scorer = ModularityScorer::from_graph(&graph);
        let parents = vec![vec![3, 4], vec![0, 1, 2]];
        let children = vec![vec![3], vec![4], vec![0], vec![1, 2]];

        let selection = CombinationSelector::new(&scorer)
            .select(&parents, &children, 3)
            .unwrap();

        // Keeping the triangle whole scores 0.06 against 0.02 for keeping {3,4}.
        assert_eq!(selection.merged, vec![1]);
        assert_eq!(selection.assignment, vec![0, 0, 0, 1, 2]);
        assert!((selection.modularity - 0.06).abs() < 1e-12);
        assert_eq!(selection.candidates_evaluated, 2);
    }

    #[test]
    fn selection_dominates_every_candidate() {
        let graph = UnGraph::<(), ()>::from_edges(&[
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 7),
            (0, 7),
            (1, 5),
        ]);
        let scorer = ModularityScorer::from_graph(&graph);
        let parents = vec![vec![0, 1], vec![2, 3], vec![4, 5], vec![6, 7]];
        let children = vec![
            vec![0],
            vec![1],
            vec![2],
            vec![3],
            vec![4],
            vec![5],
            vec![6],
            vec![7],
        ];
        let selector = CombinationSelector::new(&scorer);

        for k in 5..8 {
            let selection = selector.select(&parents, &children, k).unwrap();
            let m = 8 - k;
            let mut seen = 0;
            for merged in (0..4).combinations(m) {
                let q = scorer.score(&selector.assemble(&parents, &children, &merged));
                assert!(selection.modularity >= q, "k={k} merged={merged:?}");
                seen += 1;
            }
            assert_eq!(selection.candidates_evaluated, seen);
            assert_eq!(
                selection.assignment.iter().copied().max(),
                Some(k - 1),
                "k={k}"
            );
        }
    }

    #[test]
    fn ties_go_to_the_first_candidate() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        for _ in 0..4 {
            let _ = graph.add_node(());
        }
        let scorer = ModularityScorer::from_graph(&graph);
        let parents = vec![vec![0, 1], vec![2, 3]];
        let children = vec![vec![0], vec![1], vec![2], vec![3]];

        let selection = CombinationSelector::new(&scorer)
            .select(&parents, &children, 3)
            .unwrap();
        assert_eq!(selection.merged, vec![0]);
        assert_eq!(selection.assignment, vec![0, 0, 1, 2]);
    }

    #[test]
    fn candidate_limit_is_enforced_before_scoring() {
        let graph = triangle_and_tail();
        let scorer = ModularityScorer::from_graph(&graph);
        let parents = vec![vec![0], vec![1], vec![2], vec![3, 4]];
        let children = vec![
            vec![0],
            vec![],
            vec![1],
            vec![],
            vec![2],
            vec![],
            vec![3],
            vec![4],
        ];
        let err = CombinationSelector::new(&scorer)
            .with_candidate_limit(5)
            .select(&parents, &children, 6)
            .unwrap_err();
        assert_eq!(
            err,
            Error::CandidateLimitExceeded {
                candidates: 6,
                limit: 5
            }
        );
    }
}
