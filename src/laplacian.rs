//! Sparse symmetric matrices and graph Laplacians.
//!
//! The encodings produce sparse graphs, so the Laplacian is kept in
//! compressed sparse row form and only ever touched through
//! matrix-vector products. Two variants are built from a [`SatGraph`]:
//!
//! - unnormalized: `L = D - A`
//! - symmetric normalized: `L = I - D^(-1/2) A D^(-1/2)`
//!
//! where `A` counts edge multiplicity and `D` is the degree diagonal.

use nalgebra::DVector;

use crate::graph::SatGraph;

/// A square symmetric sparse matrix in CSR form.
#[derive(Debug, Clone)]
pub struct CsrMatrix {
    dim: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Builds a matrix from `(row, col, value)` triplets, summing
    /// duplicates. Entries must be provided for both `(i, j)` and
    /// `(j, i)`; symmetry is the caller's responsibility.
    pub fn from_triplets(dim: usize, mut triplets: Vec<(usize, usize, f64)>) -> Self {
        triplets.sort_unstable_by_key(|&(r, c, _)| (r, c));

        let mut row_ptr = vec![0usize; dim + 1];
        let mut col_idx = Vec::with_capacity(triplets.len());
        let mut values: Vec<f64> = Vec::with_capacity(triplets.len());

        let mut last: Option<(usize, usize)> = None;
        for (r, c, v) in triplets {
            debug_assert!(r < dim && c < dim);
            if last == Some((r, c)) {
                *values.last_mut().unwrap() += v;
            } else {
                row_ptr[r + 1] += 1;
                col_idx.push(c);
                values.push(v);
                last = Some((r, c));
            }
        }
        for i in 0..dim {
            row_ptr[i + 1] += row_ptr[i];
        }

        CsrMatrix { dim, row_ptr, col_idx, values }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The diagonal entry `a_ii`.
    pub fn diagonal(&self, i: usize) -> f64 {
        let (lo, hi) = (self.row_ptr[i], self.row_ptr[i + 1]);
        for k in lo..hi {
            if self.col_idx[k] == i {
                return self.values[k];
            }
        }
        0.0
    }

    /// `y = A x`.
    pub fn mat_vec(&self, x: &DVector<f64>) -> DVector<f64> {
        debug_assert_eq!(x.len(), self.dim);
        let mut y = DVector::zeros(self.dim);
        for i in 0..self.dim {
            let mut acc = 0.0;
            for k in self.row_ptr[i]..self.row_ptr[i + 1] {
                acc += self.values[k] * x[self.col_idx[k]];
            }
            y[i] = acc;
        }
        y
    }

    /// Gershgorin upper bound on the largest eigenvalue:
    /// `max_i (a_ii + sum_{j != i} |a_ij|)`.
    pub fn gershgorin_bound(&self) -> f64 {
        let mut bound: f64 = 0.0;
        for i in 0..self.dim {
            let mut row = 0.0;
            for k in self.row_ptr[i]..self.row_ptr[i + 1] {
                let v = self.values[k];
                row += if self.col_idx[k] == i { v } else { v.abs() };
            }
            bound = bound.max(row);
        }
        bound
    }
}

/// Builds the graph Laplacian of an encoded graph.
///
/// Parallel edges contribute their multiplicity to both the adjacency
/// entries and the degrees, matching the multigraph semantics of the
/// literal-clause and polar encodings.
pub fn laplacian(graph: &SatGraph, normalized: bool) -> CsrMatrix {
    let n = graph.num_vertices();

    let mut degree = vec![0.0f64; n];
    for (a, b, _) in graph.edges() {
        degree[a.index()] += 1.0;
        degree[b.index()] += 1.0;
    }

    let mut triplets = Vec::with_capacity(2 * graph.num_edges() + n);
    if normalized {
        // L = I - D^(-1/2) A D^(-1/2); rows of isolated vertices stay zero
        for i in 0..n {
            if degree[i] > 0.0 {
                triplets.push((i, i, 1.0));
            }
        }
        for (a, b, _) in graph.edges() {
            let (i, j) = (a.index(), b.index());
            let w = -1.0 / (degree[i] * degree[j]).sqrt();
            triplets.push((i, j, w));
            triplets.push((j, i, w));
        }
    } else {
        // L = D - A
        for (i, &d) in degree.iter().enumerate() {
            if d > 0.0 {
                triplets.push((i, i, d));
            }
        }
        for (a, b, _) in graph.edges() {
            let (i, j) = (a.index(), b.index());
            triplets.push((i, j, -1.0));
            triplets.push((j, i, -1.0));
        }
    }

    CsrMatrix::from_triplets(n, triplets)
}
