//! Error types used across `cleave`.

/// Result alias for `cleave`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by splitting, tree growth and partitioning.
///
/// Degenerate splits (one side of a bipartition empty) are not errors:
/// they are recorded as [`DegenerateSplit`](crate::hierarchy::DegenerateSplit)
/// and never abort a run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Split method name is not one of `modularity` or `spectral`.
    #[error("unknown split method '{0}' (expected 'modularity' or 'spectral')")]
    UnknownMethod(String),

    /// Requested community count outside `1..=n`.
    #[error("cannot create {requested} communities from {n_items} vertices")]
    InvalidTargetCount {
        /// Requested count.
        requested: usize,
        /// Number of vertices in the graph.
        n_items: usize,
    },

    /// Subgraph too small for the eigen-decomposition rank a split needs.
    #[error("split requires at least {required} vertices, found {found}")]
    InsufficientVertices {
        /// Minimum vertex count.
        required: usize,
        /// Vertices in the subgraph.
        found: usize,
    },

    /// Matrix dimension mismatch.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Combination search would exceed the configured candidate budget.
    #[error("{candidates} level combinations exceed the limit of {limit}")]
    CandidateLimitExceeded {
        /// Number of candidates the search would score.
        candidates: usize,
        /// Configured limit.
        limit: usize,
    },
}
