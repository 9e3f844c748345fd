//! Community detection by recursive bisection and edge removal.
//!
//! Given a graph and a target count `k`, assign every vertex to one of `k`
//! groups so that edges mostly stay inside groups.
//!
//! ## The Modularity Objective
//!
//! Partitions are compared by Newman **modularity** Q: the fraction of edges
//! inside communities minus the fraction expected in a random graph with the
//! same degree sequence.
//!
//! ```text
//! Q = (1/2m) × Σ[A_ij - (k_i × k_j)/(2m)] × δ(c_i, c_j)
//! ```
//!
//! Where:
//! - m = number of edges
//! - A_ij = number of edges between i and j
//! - k_i = degree of vertex i
//! - δ(c_i, c_j) = 1 if i and j are in the same community
//!
//! A good partition has Q > 0, meaning more internal edges than chance.
//!
//! ## Algorithms
//!
//! ### Recursive bisection
//!
//! [`RecursiveBisection`] splits the graph in two, then each half in two, down
//! to depth `d = ⌈log₂ k⌉`. Two split rules are available:
//!
//! - **Modularity** ([`ModularitySplit`]): sign of the leading eigenvector of
//!   the modularity matrix `B = A − kkᵀ/2m` (Newman 2006).
//! - **Spectral** ([`SpectralSplit`]): Laplacian Fiedler vector cut at its
//!   median, giving halves of nearly equal size.
//!
//! When `k` is not a power of two, [`CombinationSelector`] keeps some
//! depth-`d−1` nodes whole and splits the rest, picking the combination with
//! the highest modularity.
//!
//! ### Girvan–Newman
//!
//! [`GirvanNewman`] removes the edges with the highest betweenness until the
//! graph falls apart into `k` connected components.
//!
//! ## Usage
//!
//! ```rust
//! use petgraph::graph::UnGraph;
//! use cleave::community::{CommunityDetection, RecursiveBisection, SplitMethod};
//!
//! // Two triangles joined by one edge
//! let graph = UnGraph::<(), ()>::from_edges(&[
//!     (0, 1), (1, 2), (0, 2),
//!     (3, 4), (4, 5), (3, 5),
//!     (2, 3),
//! ]);
//!
//! let communities = RecursiveBisection::new(SplitMethod::Spectral, 2)
//!     .detect(&graph)
//!     .unwrap();
//! // communities[i] = community ID for vertex i
//! assert_eq!(communities[0], communities[2]);
//! assert_ne!(communities[0], communities[3]);
//! ```
//!
//! ## References
//!
//! - Newman (2006). "Modularity and community structure in networks." PNAS 103(23).
//! - Girvan & Newman (2002). "Community structure in social and biological networks."
//! - Newman & Girvan (2004). "Finding and evaluating community structure in networks."

mod assignment;
mod bisection;
mod combination;
mod girvan_newman;
mod modularity;
mod split;
mod summary;
mod traits;

pub use assignment::{collect_assignment, community_count};
pub use bisection::{cluster, Bisection, RecursiveBisection};
pub use combination::{CombinationSelector, Selection};
pub use girvan_newman::{betweenness_partition, EdgeRemoval, GirvanNewman};
pub use modularity::{modularity, ModularityScorer};
pub use split::{ModularitySplit, SpectralSplit, SplitMethod};
pub use summary::PartitionSummary;
pub use traits::{Bipartition, CommunityDetection, SplitStrategy};
