//! DIMACS CNF parsing.
//!
//! Reads the standard competition format: `c` comment lines, a
//! `p cnf <vars> <clauses>` header, then clauses of whitespace-separated
//! signed integers, each terminated by `0`. Clauses may span multiple
//! lines.

use std::fmt;
use std::path::Path;

use crate::cnf::{Cnf, CnfError};

#[derive(Debug)]
pub enum DimacsError {
    Io(std::io::Error),
    /// No `p cnf` header before the first clause.
    MissingHeader,
    /// A header that is not of the form `p cnf <vars> <clauses>`.
    MalformedHeader(String),
    /// A clause token that is not a signed integer.
    BadToken(String),
    /// Input ended in the middle of a clause (no terminating `0`).
    UnterminatedClause,
    /// A literal failed formula validation.
    Formula(CnfError),
}

impl fmt::Display for DimacsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimacsError::Io(e) => write!(f, "i/o error: {}", e),
            DimacsError::MissingHeader => write!(f, "missing 'p cnf' header"),
            DimacsError::MalformedHeader(line) => write!(f, "malformed header: {:?}", line),
            DimacsError::BadToken(tok) => write!(f, "bad clause token: {:?}", tok),
            DimacsError::UnterminatedClause => write!(f, "unterminated final clause"),
            DimacsError::Formula(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DimacsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimacsError::Io(e) => Some(e),
            DimacsError::Formula(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DimacsError {
    fn from(e: std::io::Error) -> Self {
        DimacsError::Io(e)
    }
}

impl From<CnfError> for DimacsError {
    fn from(e: CnfError) -> Self {
        DimacsError::Formula(e)
    }
}

/// Parses a DIMACS CNF document.
pub fn parse_str(input: &str) -> Result<Cnf, DimacsError> {
    let mut num_vars: Option<u32> = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();
    let mut eof = false;

    for line in input.lines() {
        if eof {
            break;
        }
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('p') {
            let fields: Vec<&str> = line.split_ascii_whitespace().collect();
            match fields.as_slice() {
                ["p", "cnf", vars, clause_count] => {
                    let vars =
                        vars.parse().map_err(|_| DimacsError::MalformedHeader(line.to_string()))?;
                    // the declared clause count is not used, but it must
                    // at least be a number
                    let _: usize = clause_count
                        .parse()
                        .map_err(|_| DimacsError::MalformedHeader(line.to_string()))?;
                    num_vars = Some(vars);
                }
                _ => return Err(DimacsError::MalformedHeader(line.to_string())),
            }
            continue;
        }

        if num_vars.is_none() {
            return Err(DimacsError::MissingHeader);
        }
        for token in line.split_ascii_whitespace() {
            // '%' marks an early EOF in SATLIB-style benchmarks; whatever
            // follows it (typically a lone '0' line) is a trailer, not data
            if token == "%" {
                eof = true;
                break;
            }
            let lit: i32 = token.parse().map_err(|_| DimacsError::BadToken(token.to_string()))?;
            if lit == 0 {
                clauses.push(std::mem::take(&mut current));
            } else {
                current.push(lit);
            }
        }
    }

    let num_vars = num_vars.ok_or(DimacsError::MissingHeader)?;
    if !current.is_empty() {
        return Err(DimacsError::UnterminatedClause);
    }
    Ok(Cnf::new(num_vars, clauses)?)
}

/// Reads and parses a DIMACS CNF file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Cnf, DimacsError> {
    let text = std::fs::read_to_string(path)?;
    parse_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let cnf = parse_str("c example\np cnf 3 2\n1 -2 0\n2 3 0\n").unwrap();
        assert_eq!(cnf.num_vars(), 3);
        assert_eq!(cnf.num_clauses(), 2);
        assert_eq!(cnf.clauses()[0].iter().map(|l| l.to_dimacs()).collect::<Vec<_>>(), vec![1, -2]);
    }

    #[test]
    fn test_parse_multiline_clause() {
        let cnf = parse_str("p cnf 4 1\n1 2\n-3 4 0\n").unwrap();
        assert_eq!(cnf.num_clauses(), 1);
        assert_eq!(cnf.clauses()[0].len(), 4);
    }

    #[test]
    fn test_parse_multiple_clauses_per_line() {
        let cnf = parse_str("p cnf 2 2\n1 0 -2 0\n").unwrap();
        assert_eq!(cnf.num_clauses(), 2);
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(parse_str("1 2 0\n"), Err(DimacsError::MissingHeader)));
    }

    #[test]
    fn test_malformed_header() {
        assert!(matches!(parse_str("p dnf 2 1\n1 0\n"), Err(DimacsError::MalformedHeader(_))));
    }

    #[test]
    fn test_non_numeric_clause_count() {
        assert!(matches!(parse_str("p cnf 2 xyz\n1 0\n"), Err(DimacsError::MalformedHeader(_))));
    }

    #[test]
    fn test_satlib_trailer_is_ignored() {
        // SATLIB benchmarks end with a '%' line followed by a lone '0';
        // neither may produce an (empty) clause
        let cnf = parse_str("p cnf 2 1\n1 2 0\n%\n0\n").unwrap();
        assert_eq!(cnf.num_clauses(), 1);
        assert_eq!(cnf.clauses()[0].len(), 2);
    }

    #[test]
    fn test_nothing_after_early_eof_marker() {
        let cnf = parse_str("p cnf 3 1\n1 2 0\n%\n3 0\n").unwrap();
        assert_eq!(cnf.num_clauses(), 1);
    }

    #[test]
    fn test_bad_token() {
        assert!(matches!(parse_str("p cnf 2 1\n1 x 0\n"), Err(DimacsError::BadToken(_))));
    }

    #[test]
    fn test_unterminated_clause() {
        assert!(matches!(parse_str("p cnf 2 1\n1 2\n"), Err(DimacsError::UnterminatedClause)));
    }

    #[test]
    fn test_out_of_range_literal() {
        assert!(matches!(parse_str("p cnf 2 1\n1 5 0\n"), Err(DimacsError::Formula(_))));
    }
}
