//! # cleave
//!
//! Community detection on undirected graphs by recursive bisection.
//!
//! A graph is split in two, each half in two again, until the partition tree
//! has `2^d ≥ k` leaves. When `k` is not a power of two, whole depth-`d−1`
//! nodes are mixed with depth-`d` children in the combination of highest
//! modularity. A Girvan–Newman edge-betweenness partitioner is provided for
//! comparison.
//!
//! ```rust
//! use petgraph::graph::UnGraph;
//!
//! // Two 4-cliques with no edge between them
//! let mut edges = Vec::new();
//! for offset in [0u32, 4] {
//!     for i in 0..4 {
//!         for j in (i + 1)..4 {
//!             edges.push((offset + i, offset + j));
//!         }
//!     }
//! }
//! let graph = UnGraph::<(), ()>::from_edges(&edges);
//!
//! let labels = cleave::cluster(&graph, "spectral", 2).unwrap();
//! assert_eq!(labels[0], labels[3]);
//! assert_ne!(labels[0], labels[4]);
//! assert!((cleave::modularity(&graph, &labels) - 0.5).abs() < 1e-9);
//! ```
//!
//! Modules:
//! - [`graph`]: induced views, matrices, eigenpairs, components, betweenness
//! - [`hierarchy`]: the partition tree and its health check
//! - [`community`]: split strategies, combination search, entry points
//!
//! The `parallel` feature (on by default) scores combination candidates and
//! betweenness sources on rayon. Output does not depend on it.

pub mod community;
/// Error types used across `cleave`.
pub mod error;
pub mod graph;
pub mod hierarchy;

pub use error::{Error, Result};

pub use community::{
    betweenness_partition, cluster, modularity, Bisection, CommunityDetection, EdgeRemoval,
    GirvanNewman, PartitionSummary, RecursiveBisection, SplitMethod,
};
pub use graph::{connected_components, edge_betweenness};
pub use hierarchy::{HealthCheck, PartitionTree};
