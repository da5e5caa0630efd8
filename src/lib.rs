//! # sat-spectra: spectral analysis of SAT instance graphs
//!
//! **`sat-spectra`** turns Boolean satisfiability instances into graphs and
//! computes spectral properties of those graphs: Cheeger-constant bounds
//! (graph conductance) via the normalized Laplacian's second eigenvalue,
//! and low-dimensional eigenvector embeddings for visualization.
//!
//! ## Pipeline
//!
//! ```text
//! Cnf --(encode)--> SatGraph --(largest_component)--> SatGraph --(analyze)--> bound / embedding
//! ```
//!
//! Each stage is a pure, deterministic, synchronous transformation; a
//! batch over many instances can run each pipeline independently.
//!
//! ## Encodings
//!
//! Three graph constructions with different fidelity/size tradeoffs:
//!
//! - `neurosat`: literal-clause graph (`2·nv + nc` vertices), the richest.
//! - `polar_var`: variable-clause graph (`nv + nc` vertices), polarity on
//!   the edges.
//! - `var_incidence`: variable co-occurrence graph (`nv` vertices), the
//!   most compact, no multi-edges.
//!
//! ## Basic Usage
//!
//! ```rust
//! use sat_spectra::analyze::{cheeger_bound, SpectralOptions};
//! use sat_spectra::cnf::Cnf;
//! use sat_spectra::component::largest_component;
//! use sat_spectra::encode::{EncodeOptions, Encoding};
//!
//! let cnf = Cnf::new(2, vec![vec![1, 2], vec![-1, 2]]).unwrap();
//! let graph = Encoding::PolarVar.encode(&cnf, &EncodeOptions::default());
//!
//! // the analyzer requires a connected graph
//! let reduction = largest_component(&graph);
//! assert!(reduction.was_connected());
//!
//! let bound = cheeger_bound(&reduction.graph, &SpectralOptions::default()).unwrap();
//! assert!(bound.lower >= 0.0 && bound.lower <= bound.upper);
//! ```
//!
//! ## Core Components
//!
//! - **[`cnf`]**: the formula model, validated on construction.
//! - **[`dimacs`]**: DIMACS CNF parsing.
//! - **[`encode`]**: the closed registry of graph encodings.
//! - **[`component`]**: largest-connected-component reduction.
//! - **[`analyze`]**: Cheeger bounds and spectral immersion.
//! - **[`dot`]**: Graphviz export of encoded graphs.
//! - **[`solver`]**: SAT/UNSAT verdicts delegated to an external solver.

pub mod analyze;
pub mod cnf;
pub mod component;
pub mod dimacs;
pub mod dot;
pub mod encode;
pub mod graph;
pub mod laplacian;
pub mod report;
pub mod solver;
