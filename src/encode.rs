//! Graph encodings of CNF formulas.
//!
//! Three deterministic constructions with different fidelity/size
//! tradeoffs:
//!
//! - [`Encoding::NeuroSat`]: literal-clause graph, `2·nv + nc` vertices.
//!   Richest and largest; polarity is encoded by doubling the vertices.
//! - [`Encoding::PolarVar`]: variable-clause graph, `nv + nc` vertices.
//!   Polarity lives on the edge tags instead.
//! - [`Encoding::VarIncidence`]: variable co-occurrence graph, `nv`
//!   vertices and no multi-edges. Most compact.
//!
//! Each encoder is a pure function of the (already validated) formula and
//! the options; no I/O, deterministic output.

use std::fmt;
use std::str::FromStr;

use crate::cnf::{Cnf, Lit};
use crate::graph::{EdgeKind, SatGraph, VertexKind};

/// Options shared by all encoders.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// NeuroSat only: add a `PolarityLink` edge between each variable's
    /// positive and negative literal vertices.
    pub connect_literals: bool,
}

/// The closed registry of encoding strategies.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Encoding {
    NeuroSat,
    PolarVar,
    VarIncidence,
}

impl Encoding {
    /// All strategies, in registry order.
    pub const ALL: [Encoding; 3] = [Encoding::NeuroSat, Encoding::PolarVar, Encoding::VarIncidence];

    /// The stable strategy name used for selection and reporting.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::NeuroSat => "neurosat",
            Encoding::PolarVar => "polar_var",
            Encoding::VarIncidence => "var_incidence",
        }
    }

    /// Encodes a formula with this strategy.
    pub fn encode(self, cnf: &Cnf, options: &EncodeOptions) -> SatGraph {
        match self {
            Encoding::NeuroSat => neurosat(cnf, options.connect_literals),
            Encoding::PolarVar => polar_var(cnf),
            Encoding::VarIncidence => var_incidence(cnf),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error produced when an encoding name is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncoding(pub String);

impl fmt::Display for UnknownEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown encoding {:?} (expected one of: ", self.0)?;
        for (i, enc) in Encoding::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(enc.name())?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for UnknownEncoding {}

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::ALL
            .iter()
            .copied()
            .find(|enc| enc.name() == s)
            .ok_or_else(|| UnknownEncoding(s.to_string()))
    }
}

/// Maps a literal to its vertex index in the literal-clause encoding.
///
/// Positive literal `i` occupies index `i-1`; negative literal `-i`
/// occupies index `nv + i - 1`. A bijection from the `2·nv` polarized
/// literals onto `0..2·nv`.
pub fn lit_to_index(lit: Lit, num_vars: u32) -> usize {
    if lit.is_positive() {
        (lit.var() - 1) as usize
    } else {
        (num_vars + lit.var() - 1) as usize
    }
}

fn neurosat(cnf: &Cnf, connect_literals: bool) -> SatGraph {
    let mut g = SatGraph::new();
    let nv = cnf.num_vars() as usize;

    let literals: Vec<_> = (0..2 * nv).map(|_| g.add_vertex(VertexKind::Literal)).collect();
    let clauses: Vec<_> =
        (0..cnf.num_clauses()).map(|_| g.add_vertex(VertexKind::Clause)).collect();

    for (i, clause) in cnf.clauses().iter().enumerate() {
        for &lit in clause {
            let target = literals[lit_to_index(lit, cnf.num_vars())];
            g.add_edge(clauses[i], target, EdgeKind::Structural);
        }
    }

    if connect_literals {
        for i in 0..nv {
            g.add_edge(literals[i], literals[nv + i], EdgeKind::PolarityLink);
        }
    }

    g
}

fn polar_var(cnf: &Cnf) -> SatGraph {
    let mut g = SatGraph::new();

    let vars: Vec<_> =
        (0..cnf.num_vars()).map(|_| g.add_vertex(VertexKind::Variable)).collect();
    let clauses: Vec<_> =
        (0..cnf.num_clauses()).map(|_| g.add_vertex(VertexKind::Clause)).collect();

    for (i, clause) in cnf.clauses().iter().enumerate() {
        for &lit in clause {
            let kind = if lit.is_positive() {
                EdgeKind::PositiveOccurrence
            } else {
                EdgeKind::NegativeOccurrence
            };
            g.add_edge(clauses[i], vars[(lit.var() - 1) as usize], kind);
        }
    }

    g
}

fn var_incidence(cnf: &Cnf) -> SatGraph {
    let mut g = SatGraph::new();

    let vars: Vec<_> =
        (0..cnf.num_vars()).map(|_| g.add_vertex(VertexKind::Variable)).collect();

    for clause in cnf.clauses() {
        for i in 0..clause.len() {
            for j in (i + 1)..clause.len() {
                let s = vars[(clause[i].var() - 1) as usize];
                let t = vars[(clause[j].var() - 1) as usize];
                if s != t {
                    g.ensure_edge(s, t, EdgeKind::CoOccurrence);
                }
            }
        }
    }

    g
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn cnf(num_vars: u32, clauses: Vec<Vec<i32>>) -> Cnf {
        Cnf::new(num_vars, clauses).unwrap()
    }

    #[test]
    fn test_lit_to_index_bijection() {
        // nv = 3: positives at 0..3, negatives at 3..6
        let nv = 3;
        assert_eq!(lit_to_index(Lit::from_dimacs(1), nv), 0);
        assert_eq!(lit_to_index(Lit::from_dimacs(3), nv), 2);
        assert_eq!(lit_to_index(Lit::from_dimacs(-1), nv), 3);
        assert_eq!(lit_to_index(Lit::from_dimacs(-3), nv), 5);

        let mut seen = std::collections::HashSet::new();
        for lit in [1, 2, 3, -1, -2, -3] {
            seen.insert(lit_to_index(Lit::from_dimacs(lit), nv));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_encoding_names_round_trip() {
        for enc in Encoding::ALL {
            assert_eq!(enc.name().parse::<Encoding>().unwrap(), enc);
        }
        assert!("nope".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_neurosat_counts() {
        let f = cnf(3, vec![vec![1, -2], vec![2, 3], vec![-1, -3]]);
        let g = Encoding::NeuroSat.encode(&f, &EncodeOptions::default());

        assert_eq!(g.num_vertices(), 2 * 3 + 3);
        assert_eq!(g.count_kind(VertexKind::Literal), 6);
        assert_eq!(g.count_kind(VertexKind::Clause), 3);
        // one structural edge per literal occurrence
        assert_eq!(g.num_edges(), 6);
        assert!(g.edges().all(|(_, _, k)| k == EdgeKind::Structural));
    }

    #[test]
    fn test_neurosat_connect_literals() {
        let f = cnf(3, vec![vec![1, -2]]);
        let opts = EncodeOptions { connect_literals: true };
        let g = Encoding::NeuroSat.encode(&f, &opts);

        assert_eq!(g.num_edges(), 2 + 3);
        let links = g.edges().filter(|&(_, _, k)| k == EdgeKind::PolarityLink).count();
        assert_eq!(links, 3);
    }

    #[test]
    fn test_polar_var_counts_and_tags() {
        let f = cnf(2, vec![vec![1, 2], vec![-1, 2]]);
        let g = Encoding::PolarVar.encode(&f, &EncodeOptions::default());

        assert_eq!(g.count_kind(VertexKind::Variable), 2);
        assert_eq!(g.count_kind(VertexKind::Clause), 2);
        assert_eq!(g.num_edges(), 4);

        let mut tags: Vec<_> = g.edges().map(|(_, _, k)| k).collect();
        tags.sort_by_key(|k| *k == EdgeKind::PositiveOccurrence);
        assert_eq!(
            tags,
            vec![
                EdgeKind::NegativeOccurrence,
                EdgeKind::PositiveOccurrence,
                EdgeKind::PositiveOccurrence,
                EdgeKind::PositiveOccurrence,
            ]
        );
    }

    #[test]
    fn test_var_incidence_counts() {
        let f = cnf(3, vec![vec![1, 2, 3]]);
        let g = Encoding::VarIncidence.encode(&f, &EncodeOptions::default());

        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.count_kind(VertexKind::Variable), 3);
        // all unordered pairs within the clause
        assert_eq!(g.num_edges(), 3);
        assert!(g.edges().all(|(_, _, k)| k == EdgeKind::CoOccurrence));
    }

    #[test]
    fn test_var_incidence_idempotent() {
        let f = cnf(2, vec![vec![1, 2], vec![1, 2]]);
        let g = Encoding::VarIncidence.encode(&f, &EncodeOptions::default());

        assert_eq!(g.num_vertices(), 2);
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn test_var_incidence_same_var_both_polarities() {
        // x and -x in one clause co-occur with themselves: no self-loop
        let f = cnf(2, vec![vec![1, -1, 2]]);
        let g = Encoding::VarIncidence.encode(&f, &EncodeOptions::default());

        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn test_empty_formula() {
        let f = cnf(0, vec![]);
        for enc in Encoding::ALL {
            let g = enc.encode(&f, &EncodeOptions::default());
            assert_eq!(g.num_vertices(), 0);
            assert_eq!(g.num_edges(), 0);
        }
    }
}
