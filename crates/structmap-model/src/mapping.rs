use serde::{Deserialize, Serialize};

/// Strength of a candidate match, attached to diagnostics when ranking
/// candidate paths or converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchDegree {
    None,
    Partial,
    Full,
    Ambiguous,
}

/// Diagnostic payload for a destination path that could not be mapped
/// cleanly, listing the rejected candidates and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDiagnostic {
    pub degree: MatchDegree,
    pub rejected: Vec<String>,
    pub reason: String,
}

impl MatchDiagnostic {
    pub fn ambiguous(rejected: Vec<String>) -> Self {
        Self {
            degree: MatchDegree::Ambiguous,
            reason: format!("{} candidates with equal evidence", rejected.len()),
            rejected,
        }
    }
}
