//! Binary partition tree grown by repeated bisection.
//!
//! ```text
//! level 0:              [ all vertices ]
//!                       /              \
//! level 1:        [ A ]                  [ B ]
//!                /     \                /     \
//! level 2:   [AA]      [AB]          [BA]      [BB]
//! ```
//!
//! Nodes live in an arena indexed by `(level, position)`. The children of
//! `(l, p)` are `(l + 1, 2p)` and `(l + 1, 2p + 1)`; each node stores its
//! parent's position as a plain index. Every level partitions the full vertex
//! set.

use core::fmt;

use crate::community::{Bipartition, SplitStrategy};
use crate::error::Result;
use crate::graph::Subgraph;
use petgraph::graph::UnGraph;

/// A node of the partition tree.
pub struct TreeNode<'g, N, E> {
    /// Vertices of this node.
    pub subgraph: Subgraph<'g, N, E>,
    /// Depth in the tree (0 = root).
    pub level: usize,
    /// Position of the parent in the previous level (`None` for the root).
    pub parent: Option<usize>,
}

impl<N, E> Clone for TreeNode<'_, N, E> {
    fn clone(&self) -> Self {
        Self {
            subgraph: self.subgraph.clone(),
            level: self.level,
            parent: self.parent,
        }
    }
}

impl<N, E> fmt::Debug for TreeNode<'_, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("level", &self.level)
            .field("parent", &self.parent)
            .field("vertices", &self.subgraph.vertices())
            .finish()
    }
}

/// A split that left one side empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateSplit {
    /// Level of the node that was split.
    pub level: usize,
    /// Position of that node within its level.
    pub position: usize,
    /// Vertices of the node (all of which landed on one side).
    pub size: usize,
}

impl fmt::Display for DegenerateSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "degenerate split of node ({}, {}) with {} vertices",
            self.level, self.position, self.size
        )
    }
}

/// Arena-backed binary partition tree.
pub struct PartitionTree<'g, N, E> {
    /// Nodes per level; level `l` holds `2^l` nodes.
    levels: Vec<Vec<TreeNode<'g, N, E>>>,
    degenerate: Vec<DegenerateSplit>,
}

impl<'g, N, E> PartitionTree<'g, N, E> {
    /// Tree holding only the root (the whole graph).
    pub fn root(graph: &'g UnGraph<N, E>) -> Self {
        Self {
            levels: vec![vec![TreeNode {
                subgraph: Subgraph::full(graph),
                level: 0,
                parent: None,
            }]],
            degenerate: Vec::new(),
        }
    }

    /// Grow a tree of the given depth with `strategy`.
    pub fn grow<S: SplitStrategy>(
        graph: &'g UnGraph<N, E>,
        strategy: &S,
        depth: usize,
    ) -> Result<Self> {
        let mut tree = Self::root(graph);
        tree.extend_to(strategy, depth)?;
        Ok(tree)
    }

    /// Split every node of the deepest level until the tree reaches `depth`.
    ///
    /// Existing levels are left untouched; a shallower `depth` is a no-op.
    pub fn extend_to<S: SplitStrategy>(&mut self, strategy: &S, depth: usize) -> Result<()> {
        while self.depth() < depth {
            let level = self.depth();
            let mut next = Vec::with_capacity(2 * self.levels[level].len());

            for (position, node) in self.levels[level].iter().enumerate() {
                let Bipartition { first, second } = strategy.split(&node.subgraph)?;
                if !node.subgraph.is_empty() && (first.is_empty() || second.is_empty()) {
                    let split = DegenerateSplit {
                        level,
                        position,
                        size: node.subgraph.len(),
                    };
                    tracing::warn!(strategy = strategy.name(), %split, "split produced an empty side");
                    self.degenerate.push(split);
                }
                for subgraph in [first, second] {
                    next.push(TreeNode {
                        subgraph,
                        level: level + 1,
                        parent: Some(position),
                    });
                }
            }

            tracing::debug!(
                strategy = strategy.name(),
                level = level + 1,
                nodes = next.len(),
                "grew partition tree level"
            );
            self.levels.push(next);
        }
        Ok(())
    }

    /// Depth of the deepest level (0 for a root-only tree).
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Nodes at a level.
    pub fn level(&self, level: usize) -> Option<&[TreeNode<'g, N, E>]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// Node at `(level, position)`.
    pub fn node(&self, level: usize, position: usize) -> Option<&TreeNode<'g, N, E>> {
        self.levels.get(level)?.get(position)
    }

    /// Parent of the node at `(level, position)`.
    pub fn parent(&self, level: usize, position: usize) -> Option<&TreeNode<'g, N, E>> {
        let parent = self.node(level, position)?.parent?;
        self.node(level.checked_sub(1)?, parent)
    }

    /// Both children of the node at `(level, position)`, if grown.
    pub fn children(
        &self,
        level: usize,
        position: usize,
    ) -> Option<[&TreeNode<'g, N, E>; 2]> {
        let next = self.levels.get(level + 1)?;
        Some([next.get(2 * position)?, next.get(2 * position + 1)?])
    }

    /// Nodes of the deepest level.
    pub fn leaves(&self) -> &[TreeNode<'g, N, E>] {
        &self.levels[self.depth()]
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// A tree always has its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Vertex sets of a level, in position order.
    pub fn vertex_sets(&self, level: usize) -> Vec<Vec<usize>> {
        self.level(level)
            .unwrap_or(&[])
            .iter()
            .map(|node| node.subgraph.vertices().to_vec())
            .collect()
    }

    /// Splits that left one side empty, in growth order.
    pub fn degenerate_splits(&self) -> &[DegenerateSplit] {
        &self.degenerate
    }

    /// Number of vertices of the underlying graph.
    pub fn node_count(&self) -> usize {
        self.levels[0][0].subgraph.graph().node_count()
    }
}

impl<N, E> fmt::Debug for PartitionTree<'_, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionTree")
            .field("levels", &self.levels)
            .field("degenerate", &self.degenerate)
            .finish()
    }
}
