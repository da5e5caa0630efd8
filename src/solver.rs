//! Delegation to an external SAT solver.
//!
//! The analysis pipeline never needs a satisfiability verdict, but the
//! batch driver reports one next to the spectral results. Solving is
//! delegated wholesale to [`splr`]; nothing here implements any decision
//! procedure.

use std::fmt;

use splr::Certificate;

use crate::cnf::Cnf;

/// Error from the delegated solver.
#[derive(Debug, Clone)]
pub struct SolverError(String);

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solver failed: {}", self.0)
    }
}

impl std::error::Error for SolverError {}

/// Decides satisfiability of a formula. `true` means SAT.
///
/// The empty formula is trivially satisfiable.
pub fn solve(cnf: &Cnf) -> Result<bool, SolverError> {
    if cnf.num_clauses() == 0 {
        return Ok(true);
    }

    let clauses: Vec<Vec<i32>> = cnf
        .clauses()
        .iter()
        .map(|clause| clause.iter().map(|lit| lit.to_dimacs()).collect())
        .collect();

    match Certificate::try_from(clauses) {
        Ok(Certificate::SAT(_)) => Ok(true),
        Ok(Certificate::UNSAT) => Ok(false),
        Err(e) => Err(SolverError(e.to_string())),
    }
}
