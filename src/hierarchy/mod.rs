//! Hierarchical structures produced by recursive bisection.
//!
//! Recursive bisection never looks at a single cut in isolation: the
//! combination search needs every node of two adjacent levels. The
//! [`PartitionTree`] keeps all of them.
//!
//! ```text
//! Level 0:            [0 1 2 3 4 5 6 7]
//!                     /               \
//! Level 1:      [0 1 2 3]           [4 5 6 7]
//!               /      \            /       \
//! Level 2:   [0 1]    [2 3]      [4 5]     [6 7]
//! ```
//!
//! Key property: every level is a partition of the full vertex set, so any
//! mix of whole level-1 nodes and level-2 children of the remaining level-1
//! nodes is a partition too.
//!
//! - [`PartitionTree`]: arena of [`TreeNode`]s indexed by `(level, position)`
//! - [`HealthCheck`]: verification of the bipartition invariant

mod partition_tree;
mod validate;

pub use partition_tree::{DegenerateSplit, PartitionTree, TreeNode};
pub use validate::{HealthCheck, HealthReport, Severity, ValidationIssue};
