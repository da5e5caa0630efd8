//! Flat records for tabular export of analysis results.

use std::fmt;

use crate::analyze::CheegerBound;
use crate::encode::Encoding;

/// CSV header matching [`AnalysisRecord`]'s `Display` output.
pub const CSV_HEADER: &str = "problem,encoding,cheeger_lb,cheeger_ub";

/// One row of aggregated results: which instance, which encoding, and the
/// Cheeger bound interval.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRecord {
    pub problem: String,
    pub encoding: Encoding,
    pub cheeger_lb: f64,
    pub cheeger_ub: f64,
}

impl AnalysisRecord {
    pub fn new(problem: impl Into<String>, encoding: Encoding, bound: CheegerBound) -> Self {
        Self {
            problem: problem.into(),
            encoding,
            cheeger_lb: bound.lower,
            cheeger_ub: bound.upper,
        }
    }
}

impl fmt::Display for AnalysisRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.problem, self.encoding, self.cheeger_lb, self.cheeger_ub)
    }
}
