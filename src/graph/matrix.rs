//! Dense matrices of a subgraph view and their eigenpairs.
//!
//! All matrices are `n × n` over the view's local indices. Degrees and the edge
//! total `m` are measured inside the view, so a child view is scored as a graph
//! of its own.
//!
//! | Matrix | Entry |
//! |--------|-------|
//! | Adjacency `A` | edge multiplicity (self-loop counts 2) |
//! | Laplacian `L` | `D − A`, self-loops ignored |
//! | Modularity `B` | `A_ij − k_i k_j / 2m` |

use faer::{Mat, Side};

use super::Subgraph;
use crate::error::{Error, Result};

/// One eigenvalue with its unit eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenPair {
    /// Eigenvalue.
    pub value: f64,
    /// Eigenvector, indexed like the matrix rows.
    pub vector: Vec<f64>,
}

/// Which end of the spectrum [`eigenpairs`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spectrum {
    /// Ascending eigenvalues.
    Smallest,
    /// Descending eigenvalues.
    Largest,
}

/// Adjacency matrix of the view.
pub fn adjacency<N, E>(view: &Subgraph<'_, N, E>) -> Mat<f64> {
    let n = view.len();
    let mut a = Mat::<f64>::zeros(n, n);
    for (i, j) in view.local_edges() {
        if i == j {
            a[(i, i)] += 2.0;
        } else {
            a[(i, j)] += 1.0;
            a[(j, i)] += 1.0;
        }
    }
    a
}

/// Combinatorial Laplacian `L = D − A` of the view.
pub fn laplacian<N, E>(view: &Subgraph<'_, N, E>) -> Mat<f64> {
    let n = view.len();
    let mut l = Mat::<f64>::zeros(n, n);
    for (i, j) in view.local_edges() {
        if i == j {
            continue;
        }
        l[(i, j)] -= 1.0;
        l[(j, i)] -= 1.0;
        l[(i, i)] += 1.0;
        l[(j, j)] += 1.0;
    }
    l
}

/// Modularity matrix `B = A − k kᵀ / 2m` of the view.
///
/// Returns `None` when the view has no edges, where `B` is undefined.
pub fn modularity_matrix<N, E>(view: &Subgraph<'_, N, E>) -> Option<Mat<f64>> {
    let a = adjacency(view);
    let n = a.nrows();
    let degrees: Vec<f64> = (0..n).map(|i| (0..n).map(|j| a[(i, j)]).sum()).collect();
    let two_m: f64 = degrees.iter().sum();
    if two_m == 0.0 {
        return None;
    }
    Some(Mat::from_fn(n, n, |i, j| {
        a[(i, j)] - degrees[i] * degrees[j] / two_m
    }))
}

/// Up to `count` eigenpairs of a symmetric matrix from one end of its spectrum.
///
/// Runs a full self-adjoint decomposition (`O(n³)`), then orders the pairs.
/// Asking for more pairs than the matrix has returns all of them.
pub fn eigenpairs(matrix: &Mat<f64>, count: usize, end: Spectrum) -> Result<Vec<EigenPair>> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: matrix.ncols(),
        });
    }
    if n == 0 || count == 0 {
        return Ok(Vec::new());
    }

    let evd = matrix.selfadjoint_eigendecomposition(Side::Lower);
    let values = evd.s().column_vector();
    let vectors = evd.u();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values.read(a).total_cmp(&values.read(b)));
    if end == Spectrum::Largest {
        order.reverse();
    }

    Ok(order
        .into_iter()
        .take(count)
        .map(|j| EigenPair {
            value: values.read(j),
            vector: (0..n).map(|i| vectors.read(i, j)).collect(),
        })
        .collect())
}
