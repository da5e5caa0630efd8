//! CNF formula model.
//!
//! A formula is a conjunction of clauses, each clause a disjunction of
//! literals. Literals use the DIMACS convention: a non-zero signed integer
//! whose absolute value is the (1-indexed) variable and whose sign is the
//! polarity.
//!
//! # Invariants
//!
//! - Every literal satisfies `1 <= lit.var() <= num_vars`.
//! - A [`Cnf`] is validated on construction and immutable afterwards.

use std::fmt;

/// A literal: a variable or its negation.
///
/// Stored as the raw DIMACS integer. Use [`Lit::var`] for the variable and
/// [`Lit::is_positive`] for the polarity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit(i32);

impl Lit {
    /// Creates a literal from a DIMACS integer.
    ///
    /// # Panics
    ///
    /// Panics if `lit == 0`. Zero is the clause terminator in DIMACS and
    /// never a literal.
    pub fn from_dimacs(lit: i32) -> Self {
        assert_ne!(lit, 0, "literals must be non-zero");
        Lit(lit)
    }

    /// The variable this literal mentions (1-indexed).
    pub fn var(self) -> u32 {
        self.0.unsigned_abs()
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// The raw signed integer representation.
    pub fn to_dimacs(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error produced when a formula fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CnfError {
    /// A clause mentions a literal that is zero or whose variable exceeds
    /// the declared variable count.
    InvalidLiteral { clause: usize, lit: i32, num_vars: u32 },
}

impl fmt::Display for CnfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CnfError::InvalidLiteral { clause, lit, num_vars } => {
                write!(
                    f,
                    "invalid literal {} in clause {} (formula declares {} variables)",
                    lit, clause, num_vars
                )
            }
        }
    }
}

impl std::error::Error for CnfError {}

/// An immutable CNF formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    num_vars: u32,
    clauses: Vec<Vec<Lit>>,
}

impl Cnf {
    /// Builds a formula from raw DIMACS clauses, validating every literal.
    pub fn new(num_vars: u32, clauses: Vec<Vec<i32>>) -> Result<Self, CnfError> {
        let mut checked = Vec::with_capacity(clauses.len());
        for (i, clause) in clauses.into_iter().enumerate() {
            let mut lits = Vec::with_capacity(clause.len());
            for lit in clause {
                if lit == 0 || lit.unsigned_abs() > num_vars {
                    return Err(CnfError::InvalidLiteral { clause: i, lit, num_vars });
                }
                lits.push(Lit(lit));
            }
            checked.push(lits);
        }
        Ok(Cnf { num_vars, clauses: checked })
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Vec<Lit>] {
        &self.clauses
    }
}
