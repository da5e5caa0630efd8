//! Spectral analysis of encoded graphs.
//!
//! Everything here works on the graph Laplacian's low end of the
//! spectrum. For a connected graph the smallest eigenvalue is the trivial
//! 0; the second-smallest `λ2` bounds the Cheeger constant (conductance)
//! from both sides:
//!
//! ```text
//! λ2 / 2  <=  h(G)  <=  sqrt(2 λ2)
//! ```
//!
//! (Chung, "Spectral Graph Theory", ch. 2, for the normalized Laplacian.)
//!
//! The eigensolver is a deflated power iteration on the spectral
//! complement `B = σI - L` with `σ` a Gershgorin bound on `λmax`: the
//! largest eigenpairs of `B` are exactly the smallest of `L`, and the
//! known converged eigenvectors are projected out of every iterate.
//! Eigenvalues are approximate; tolerances and iteration limits are
//! explicit in [`SpectralOptions`] rather than inherited from any solver
//! default.

use log::debug;
use nalgebra::DVector;
use petgraph::graph::NodeIndex;

use crate::graph::SatGraph;
use crate::laplacian::{laplacian, CsrMatrix};

/// Convergence configuration for the eigensolver.
#[derive(Debug, Clone, Copy)]
pub struct SpectralOptions {
    /// Iteration stops once successive normalized iterates differ by less
    /// than this (in Euclidean norm, up to sign). Default: `1e-10`.
    pub tolerance: f64,
    /// Per-eigenpair iteration budget. Default: `10_000`.
    pub max_iterations: usize,
}

impl Default for SpectralOptions {
    fn default() -> Self {
        Self { tolerance: 1e-10, max_iterations: 10_000 }
    }
}

/// The two-sided Cheeger inequality bound derived from `λ2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheegerBound {
    /// `λ2 / 2`
    pub lower: f64,
    /// `sqrt(2 λ2)`
    pub upper: f64,
}

/// Errors local to one instance's spectral analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpectralError {
    /// The graph has too few vertices for the requested quantity.
    GraphTooSmall { vertices: usize, required: usize },
    /// The eigensolver failed to converge within the iteration budget.
    NoConvergence { eigenpair: usize, iterations: usize },
    /// Every start vector collapsed under deflation before iterating.
    DegenerateStart { eigenpair: usize },
}

impl std::fmt::Display for SpectralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectralError::GraphTooSmall { vertices, required } => {
                write!(f, "graph has {} vertices, spectral analysis requires {}", vertices, required)
            }
            SpectralError::NoConvergence { eigenpair, iterations } => {
                write!(f, "eigenpair {} did not converge within {} iterations", eigenpair, iterations)
            }
            SpectralError::DegenerateStart { eigenpair } => {
                write!(f, "no usable start vector for eigenpair {}", eigenpair)
            }
        }
    }
}

impl std::error::Error for SpectralError {}

struct EigenPair {
    value: f64,
    vector: DVector<f64>,
}

/// Deterministic pseudo-random unit-free start vector. Distinct per
/// eigenpair so restarts after deflation do not collapse to a previously
/// found direction.
fn seed_vector(n: usize, k: usize) -> DVector<f64> {
    DVector::from_fn(n, |i, _| {
        let mut x = (i as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(k as u64);
        x ^= x >> 33;
        x = x.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
        x ^= x >> 33;
        (x as f64 / u64::MAX as f64) * 2.0 - 1.0
    })
}

fn project_out(v: &mut DVector<f64>, basis: &[EigenPair]) {
    for pair in basis {
        let coeff = pair.vector.dot(v);
        v.axpy(-coeff, &pair.vector, 1.0);
    }
}

/// Computes the `k` smallest eigenpairs of a symmetric PSD matrix,
/// in ascending eigenvalue order.
fn smallest_eigenpairs(
    matrix: &CsrMatrix,
    k: usize,
    options: &SpectralOptions,
) -> Result<Vec<EigenPair>, SpectralError> {
    let n = matrix.dim();
    debug_assert!(k <= n);

    // Largest eigenpairs of B = sigma I - L are the smallest of L.
    let sigma = matrix.gershgorin_bound().max(1.0);
    let mut found: Vec<EigenPair> = Vec::with_capacity(k);

    // a seed can land (numerically) inside the deflated subspace; retry
    // with fresh seeds before giving up
    const SEED_ATTEMPTS: usize = 4;

    for j in 0..k {
        let mut v = DVector::zeros(n);
        let mut seeded = false;
        for attempt in 0..SEED_ATTEMPTS {
            v = seed_vector(n, j + attempt * k);
            project_out(&mut v, &found);
            let norm = v.norm();
            if norm >= f64::EPSILON {
                v /= norm;
                seeded = true;
                break;
            }
        }
        if !seeded {
            return Err(SpectralError::DegenerateStart { eigenpair: j });
        }

        let mut converged = false;
        for it in 0..options.max_iterations {
            // w = B v = sigma v - L v
            let mut w = &v * sigma - matrix.mat_vec(&v);
            project_out(&mut w, &found);

            let norm = w.norm();
            if norm < f64::EPSILON {
                // B annihilated the deflated iterate, so v is an exact
                // eigenvector already (L v = sigma v); happens for tiny
                // graphs where the deflated subspace is one-dimensional
                converged = true;
                break;
            }
            w /= norm;

            // sign-insensitive distance between successive iterates
            let diff = (&w - &v).norm().min((&w + &v).norm());
            v = w;
            if diff < options.tolerance {
                debug!("eigenpair {} converged after {} iterations", j, it + 1);
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(SpectralError::NoConvergence {
                eigenpair: j,
                iterations: options.max_iterations,
            });
        }

        // Rayleigh quotient against L itself; clamp the tiny negatives
        // that roundoff produces for the trivial eigenvalue
        let value = v.dot(&matrix.mat_vec(&v)).max(0.0);
        found.push(EigenPair { value, vector: v });
    }

    found.sort_by(|a, b| a.value.total_cmp(&b.value));
    Ok(found)
}

/// Computes the two-sided Cheeger bound of a connected graph.
///
/// Builds the normalized Laplacian, targets its two smallest eigenvalues,
/// and derives the bound from the second. The graph must be connected
/// (reduce with [`crate::component::largest_component`] first); on a
/// disconnected graph `λ2 = 0` and the bound degenerates to `(0, 0)`.
pub fn cheeger_bound(
    graph: &SatGraph,
    options: &SpectralOptions,
) -> Result<CheegerBound, SpectralError> {
    let n = graph.num_vertices();
    if n < 2 {
        return Err(SpectralError::GraphTooSmall { vertices: n, required: 2 });
    }

    let lap = laplacian(graph, true);
    let pairs = smallest_eigenpairs(&lap, 2, options)?;
    let lambda2 = pairs[1].value;
    debug!("lambda2 = {}", lambda2);

    Ok(CheegerBound { lower: lambda2 / 2.0, upper: (2.0 * lambda2).sqrt() })
}

/// Embeds the vertices of a connected graph in `R^dimensions` using
/// Laplacian eigenvectors.
///
/// The `dimensions + 1` smallest eigenpairs of the (optionally normalized)
/// Laplacian are computed; the trivial first eigenvector is discarded and
/// vertex `v` is placed at `(eigvec_2[v], ..., eigvec_{dimensions+1}[v])`.
///
/// The embedding is deterministic up to eigenvector sign and, for
/// degenerate eigenvalues, rotation within the tied eigenspace. Consumers
/// should rely on relative distances only, never on orientation.
pub fn spectral_immersion(
    graph: &SatGraph,
    dimensions: usize,
    normalized: bool,
    options: &SpectralOptions,
) -> Result<Vec<(NodeIndex, Vec<f64>)>, SpectralError> {
    let n = graph.num_vertices();
    if n < dimensions + 1 {
        return Err(SpectralError::GraphTooSmall { vertices: n, required: dimensions + 1 });
    }

    let lap = laplacian(graph, normalized);
    let pairs = smallest_eigenpairs(&lap, dimensions + 1, options)?;

    let coords = graph
        .vertices()
        .map(|v| {
            let point = pairs[1..].iter().map(|pair| pair.vector[v.index()]).collect();
            (v, point)
        })
        .collect();
    Ok(coords)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::cnf::Cnf;
    use crate::component::largest_component;
    use crate::encode::{EncodeOptions, Encoding};
    use crate::graph::{EdgeKind, VertexKind};

    fn complete_graph(n: usize) -> SatGraph {
        let mut g = SatGraph::new();
        let vs: Vec<_> = (0..n).map(|_| g.add_vertex(VertexKind::Variable)).collect();
        for i in 0..n {
            for j in (i + 1)..n {
                g.add_edge(vs[i], vs[j], EdgeKind::CoOccurrence);
            }
        }
        g
    }

    /// Two K5's joined by a single bridge edge.
    fn barbell() -> SatGraph {
        let mut g = SatGraph::new();
        let vs: Vec<_> = (0..10).map(|_| g.add_vertex(VertexKind::Variable)).collect();
        for half in [&vs[..5], &vs[5..]] {
            for i in 0..5 {
                for j in (i + 1)..5 {
                    g.add_edge(half[i], half[j], EdgeKind::CoOccurrence);
                }
            }
        }
        g.add_edge(vs[4], vs[5], EdgeKind::CoOccurrence);
        g
    }

    #[test]
    fn test_cheeger_complete_graph() {
        // normalized K_n has lambda2 = n / (n - 1)
        for n in [4, 8, 16] {
            let g = complete_graph(n);
            let bound = cheeger_bound(&g, &SpectralOptions::default()).unwrap();
            let lambda2 = n as f64 / (n as f64 - 1.0);
            assert!((bound.lower - lambda2 / 2.0).abs() < 1e-6, "n = {}: {:?}", n, bound);
            assert!((bound.upper - (2.0 * lambda2).sqrt()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_cheeger_bottleneck_is_near_zero() {
        let g = barbell();
        let bound = cheeger_bound(&g, &SpectralOptions::default()).unwrap();
        // one bridge between two dense halves: tiny conductance
        assert!(bound.lower < 0.05, "{:?}", bound);
        assert!(bound.lower <= bound.upper);
        assert!(bound.lower >= 0.0);
    }

    #[test]
    fn test_cheeger_order_invariant_on_encodings() {
        let cnf = Cnf::new(3, vec![vec![1, -2], vec![2, 3], vec![-1, -3], vec![1, 2, 3]]).unwrap();
        for enc in Encoding::ALL {
            let g = enc.encode(&cnf, &EncodeOptions::default());
            let reduced = largest_component(&g).graph;
            let bound = cheeger_bound(&reduced, &SpectralOptions::default()).unwrap();
            assert!(bound.lower >= 0.0, "{}: {:?}", enc, bound);
            assert!(bound.lower <= bound.upper, "{}: {:?}", enc, bound);
            assert!(bound.upper.is_finite());
        }
    }

    #[test]
    fn test_cheeger_rejects_tiny_graph() {
        let mut g = SatGraph::new();
        g.add_vertex(VertexKind::Variable);
        let err = cheeger_bound(&g, &SpectralOptions::default()).unwrap_err();
        assert_eq!(err, SpectralError::GraphTooSmall { vertices: 1, required: 2 });
    }

    #[test]
    fn test_no_convergence_is_reported() {
        let g = barbell();
        let opts = SpectralOptions { tolerance: 1e-14, max_iterations: 1 };
        let err = cheeger_bound(&g, &opts).unwrap_err();
        assert!(matches!(err, SpectralError::NoConvergence { .. }));
    }

    #[test]
    fn test_immersion_separates_bottleneck() {
        let g = barbell();
        let opts = SpectralOptions::default();
        let coords = spectral_immersion(&g, 2, true, &opts).unwrap();

        assert_eq!(coords.len(), 10);
        assert!(coords.iter().all(|(_, p)| p.len() == 2));

        // structural property: the Fiedler coordinate separates the halves
        let fiedler: Vec<f64> = coords.iter().map(|(_, p)| p[0]).collect();
        let left_sign = fiedler[0].signum();
        assert!(fiedler[..5].iter().all(|x| x.signum() == left_sign));
        assert!(fiedler[5..].iter().all(|x| x.signum() == -left_sign));
    }

    #[test]
    fn test_immersion_unnormalized() {
        let g = complete_graph(6);
        let coords = spectral_immersion(&g, 3, false, &SpectralOptions::default()).unwrap();
        assert_eq!(coords.len(), 6);
        assert!(coords.iter().all(|(_, p)| p.len() == 3 && p.iter().all(|x| x.is_finite())));
    }

    #[test]
    fn test_immersion_full_spectrum_deflation() {
        // k = n: every eigenpair must find a usable start vector even
        // when the deflated subspace shrinks to one dimension
        let g = complete_graph(4);
        let coords = spectral_immersion(&g, 3, true, &SpectralOptions::default()).unwrap();
        assert_eq!(coords.len(), 4);
        assert!(coords.iter().all(|(_, p)| p.len() == 3 && p.iter().all(|x| x.is_finite())));
    }

    #[test]
    fn test_error_messages() {
        let err = SpectralError::DegenerateStart { eigenpair: 2 };
        assert_eq!(err.to_string(), "no usable start vector for eigenpair 2");
        let err = SpectralError::NoConvergence { eigenpair: 1, iterations: 10 };
        assert_eq!(err.to_string(), "eigenpair 1 did not converge within 10 iterations");
    }

    #[test]
    fn test_immersion_requires_enough_vertices() {
        let g = complete_graph(3);
        let err = spectral_immersion(&g, 3, true, &SpectralOptions::default()).unwrap_err();
        assert_eq!(err, SpectralError::GraphTooSmall { vertices: 3, required: 4 });
    }

    #[test]
    fn test_end_to_end_polar_var() {
        let cnf = Cnf::new(2, vec![vec![1, 2], vec![-1, 2]]).unwrap();
        let g = Encoding::PolarVar.encode(&cnf, &EncodeOptions::default());
        let reduction = largest_component(&g);
        assert!(reduction.was_connected());

        let bound = cheeger_bound(&reduction.graph, &SpectralOptions::default()).unwrap();
        assert!(bound.lower >= 0.0);
        assert!(bound.lower <= bound.upper);
        assert!(bound.upper.is_finite());
    }
}
