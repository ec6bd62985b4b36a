//! Candidate disambiguation.
//!
//! When several source paths satisfy one destination path, the candidate
//! whose tokens line up most closely with the destination wins, but only
//! with strictly greater weight. A tie is never broken by picking the
//! first or shortest candidate; it is surfaced as an ambiguity for the
//! configured policy to handle.

use crate::hierarchy::PropertyPath;
use crate::tokens::Tokens;

/// Outcome of ranking the candidates for one destination path.
#[derive(Debug, Clone, PartialEq)]
pub enum Disambiguation {
    /// Index of the winning candidate.
    Resolved(usize),
    /// No strict winner; dotted paths of every tied-or-better candidate.
    Ambiguous { candidates: Vec<String> },
}

/// Ranks `candidates` against `destination`.
///
/// Weight per candidate: matched source tokens x an order bonus (1.0 plus
/// 0.1 per token matched in sequence) divided by the combined source and
/// destination token counts.
pub fn disambiguate(destination: &PropertyPath, candidates: &[PropertyPath]) -> Disambiguation {
    debug_assert!(!candidates.is_empty());
    if candidates.len() == 1 {
        return Disambiguation::Resolved(0);
    }

    let dest_tokens: Vec<&str> = destination
        .segments
        .iter()
        .flat_map(|s| s.name_tokens.iter())
        .collect();

    let mut weights: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| (index, weight(candidate, &dest_tokens)))
        .collect();
    weights.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let top = weights[0].1;
    if weights[1].1 == top {
        let candidates = weights
            .iter()
            .filter(|(_, w)| *w == top)
            .map(|(index, _)| candidates[*index].dotted())
            .collect();
        return Disambiguation::Ambiguous { candidates };
    }
    Disambiguation::Resolved(weights[0].0)
}

fn weight(candidate: &PropertyPath, dest_tokens: &[&str]) -> f64 {
    let source_tokens: Vec<&str> = candidate
        .segments
        .iter()
        .flat_map(|s| s.name_tokens.iter())
        .collect();

    let mut unmatched: Vec<usize> = (0..source_tokens.len()).collect();
    let mut order_matches = 0usize;
    for dest_token in dest_tokens {
        let position = unmatched
            .iter()
            .position(|&i| Tokens::eq_token(source_tokens[i], dest_token));
        if let Some(position) = position {
            if position == 0 {
                order_matches += 1;
            }
            unmatched.remove(position);
        }
    }

    let matched = source_tokens.len() - unmatched.len();
    let order_weight = 1.0 + order_matches as f64 * 0.1;
    (matched as f64 * order_weight) / (source_tokens.len() + dest_tokens.len()) as f64
}
