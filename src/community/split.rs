//! Two-way split strategies for recursive bisection.
//!
//! ## Modularity maximization (Newman 2006)
//!
//! The leading eigenvector `u` of the modularity matrix `B` approximates the
//! bipartition with the highest modularity. Vertices split by the sign of their
//! entry in `u`:
//!
//! ```text
//! A = { i : u_i < 0 }     B = { i : u_i ≥ 0 }
//! ```
//!
//! When `u` is single-signed the split is degenerate; the caller records it and
//! carries on. A single vertex is returned unsplit; two vertices leave no
//! room for the decomposition and fail with `InsufficientVertices`.
//!
//! ## Spectral bisection (Fiedler 1973)
//!
//! The eigenvector of the second-smallest Laplacian eigenvalue orders vertices
//! along the graph's weakest cut. Splitting at the median gives a near-balanced
//! bipartition:
//!
//! ```text
//! A = { i : f_i > median(f) }     B = the rest
//! ```
//!
//! On a view with three or more components the vector can be a component
//! indicator whose heaviest value is the median. Then `A = { i : f_i < median(f) }`,
//! so a non-constant vector always gives two non-empty sides.
//!
//! Both strategies use a dense `O(n³)` decomposition, which dominates the cost
//! above a few thousand vertices.

use core::fmt;
use core::str::FromStr;

use super::traits::{Bipartition, SplitStrategy};
use crate::error::{Error, Result};
use crate::graph::{eigenpairs, laplacian, modularity_matrix, Spectrum, Subgraph};

/// Eigenvectors flatter than this are treated as constant.
const FLAT_SPREAD: f64 = 1e-9;

/// Closed set of tree-based split methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitMethod {
    /// Leading eigenvector of the modularity matrix.
    Modularity,
    /// Fiedler vector of the Laplacian, split at the median.
    Spectral,
}

impl SplitMethod {
    /// Method name as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMethod::Modularity => "modularity",
            SplitMethod::Spectral => "spectral",
        }
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "modularity" => Ok(SplitMethod::Modularity),
            "spectral" => Ok(SplitMethod::Spectral),
            other => Err(Error::UnknownMethod(other.to_string())),
        }
    }
}

/// Modularity-maximization split.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModularitySplit;

impl ModularitySplit {
    /// Most eigenpairs requested from one decomposition.
    pub const MAX_EIGENPAIRS: usize = 6;

    /// Eigenpairs requested for an `n`-vertex view: 6 above 7 vertices, else `n − 2`.
    pub fn eigenpair_budget(n: usize) -> usize {
        if n > 7 {
            Self::MAX_EIGENPAIRS
        } else {
            n.saturating_sub(2)
        }
    }
}

impl SplitStrategy for ModularitySplit {
    fn name(&self) -> &'static str {
        "modularity"
    }

    fn split<'g, N, E>(&self, view: &Subgraph<'g, N, E>) -> Result<Bipartition<'g, N, E>> {
        let n = view.len();
        if n <= 1 {
            return Ok(Bipartition::unsplit(view));
        }

        let budget = Self::eigenpair_budget(n);
        if budget == 0 {
            return Err(Error::InsufficientVertices {
                required: 3,
                found: n,
            });
        }

        let Some(b) = modularity_matrix(view) else {
            return Ok(Bipartition::unsplit(view));
        };
        let pairs = eigenpairs(&b, budget, Spectrum::Largest)?;
        let Some(leading) = pairs.first() else {
            return Err(Error::InsufficientVertices {
                required: 3,
                found: n,
            });
        };

        let mask: Vec<bool> = leading.vector.iter().map(|&x| x < 0.0).collect();
        let (first, second) = view.partition_by(&mask);
        Ok(Bipartition { first, second })
    }
}

/// Spectral-bisection split.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectralSplit;

impl SplitStrategy for SpectralSplit {
    fn name(&self) -> &'static str {
        "spectral"
    }

    fn split<'g, N, E>(&self, view: &Subgraph<'g, N, E>) -> Result<Bipartition<'g, N, E>> {
        if view.len() < 2 {
            return Ok(Bipartition::unsplit(view));
        }

        let pairs = eigenpairs(&laplacian(view), 2, Spectrum::Smallest)?;
        let fiedler = match pairs.as_slice() {
            [first, second] => {
                // Repeated zero eigenvalue: the solver may hand back the
                // constant vector second.
                if spread(&second.vector) < FLAT_SPREAD {
                    &first.vector
                } else {
                    &second.vector
                }
            }
            _ => return Ok(Bipartition::unsplit(view)),
        };

        // Values within `tie` of the median count as equal to it, so solver
        // noise on component indicators never cuts a component.
        let mid = median(fiedler);
        let tie = FLAT_SPREAD * spread(fiedler);
        let mut mask: Vec<bool> = fiedler.iter().map(|&x| x > mid + tie).collect();
        // Indicators of three or more components can put the median on the
        // heaviest value, leaving nothing above it.
        if !mask.contains(&true) {
            mask = fiedler.iter().map(|&x| x < mid - tie).collect();
        }
        let (first, second) = view.partition_by(&mask);
        Ok(Bipartition { first, second })
    }
}

fn spread(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

/// Median; the mean of the two middle values for even lengths.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
