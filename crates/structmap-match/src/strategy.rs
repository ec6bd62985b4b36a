//! Standard and Loose matching strategies.
//!
//! A strategy decides whether one destination path is satisfied by token
//! evidence drawn from one source path, given the full token bookkeeping of
//! both sides. Tokens combine across adjacent positions within a segment,
//! so `customerAddress` can consume the two single-token segments
//! `customer` and `address` and vice versa.

use structmap_model::StrategyKind;

use crate::hierarchy::{PropertyNameInfo, PropertyPath};
use crate::tokens::Tokens;

/// Everything a strategy may consult for one (source path, destination
/// path) comparison.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    /// Tokens of the source root type's simple name.
    pub source_root_tokens: &'a Tokens,
    pub source: &'a PropertyPath,
    pub destination: &'a PropertyPath,
}

impl<'a> MatchContext<'a> {
    pub fn new(
        source_info: &'a PropertyNameInfo,
        source: &'a PropertyPath,
        destination: &'a PropertyPath,
    ) -> Self {
        Self {
            source_root_tokens: &source_info.root_tokens,
            source,
            destination,
        }
    }
}

/// A matching policy. Pure: identical inputs always produce the same
/// answer, which is what makes racing cache computations acceptable.
pub trait MatchingStrategy {
    fn matches(&self, ctx: &MatchContext<'_>) -> bool;

    /// Whether a single full match ends the candidate search.
    fn is_exact(&self) -> bool {
        false
    }
}

/// Runs the configured strategy.
pub fn matches(kind: StrategyKind, ctx: &MatchContext<'_>) -> bool {
    match kind {
        StrategyKind::Standard => StandardStrategy.matches(ctx),
        StrategyKind::Loose => LooseStrategy.matches(ctx),
    }
}

/// Exact policy: every destination token must be consumed left to right by
/// source member-name tokens, source type-name tokens, or (while consuming
/// the first destination segment) the source root type's tokens. Source
/// segments that contribute name tokens are marked used; any unused segment
/// must share a token with a used one, otherwise the candidate ignores an
/// intended sibling property and is rejected.
pub struct StandardStrategy;

impl MatchingStrategy for StandardStrategy {
    fn matches(&self, ctx: &MatchContext<'_>) -> bool {
        let mut used = vec![false; ctx.source.segments.len()];

        for (dest_index, dest_segment) in ctx.destination.segments.iter().enumerate() {
            let dest_tokens = &dest_segment.name_tokens;
            let mut i = 0;
            while i < dest_tokens.len() {
                let counts = match_source_names(ctx.source, dest_tokens, i);
                let best = counts.iter().copied().max().unwrap_or(0);
                if best > 0 {
                    for (index, count) in counts.iter().enumerate() {
                        if *count > 0 {
                            used[index] = true;
                        }
                    }
                    i += best;
                    continue;
                }

                let token = dest_tokens.get(i).expect("index in bounds");
                let by_type = matches_source_type(ctx.source, token);
                let by_class = dest_index == 0 && ctx.source_root_tokens.contains(token);
                if by_type || by_class {
                    i += 1;
                    continue;
                }
                return false;
            }
        }

        all_segments_accounted(ctx.source, &used)
    }
}

/// Permissive policy: destination segments are scanned in reverse; the last
/// destination segment must be satisfiable from source tokens, and the last
/// source segment must contribute a match somewhere. Intermediate segments
/// on either side may go unmatched, which is what lets graphs of unequal
/// nesting depth correspond.
pub struct LooseStrategy;

impl MatchingStrategy for LooseStrategy {
    fn matches(&self, ctx: &MatchContext<'_>) -> bool {
        let segments = &ctx.destination.segments;
        let last = segments.len() - 1;
        let mut last_source_matched = false;
        let mut last_dest_matched = false;

        for dest_index in (0..segments.len()).rev() {
            if last_source_matched {
                break;
            }
            let dest_tokens = &segments[dest_index].name_tokens;
            let mut i = 0;
            while i < dest_tokens.len() {
                let matched = loose_match_names(ctx.source, dest_tokens, i, &mut last_source_matched);
                if dest_index == last {
                    let token = dest_tokens.get(i).expect("index in bounds");
                    if matched > 0
                        || matches_source_type(ctx.source, token)
                        || ctx.source_root_tokens.contains(token)
                    {
                        last_dest_matched = true;
                    }
                }
                i += matched.max(1);
            }
        }

        last_source_matched && last_dest_matched
    }
}

/// Per-source-segment count of destination tokens consumed starting at
/// `dest_start`.
fn match_source_names(source: &PropertyPath, dest_tokens: &Tokens, dest_start: usize) -> Vec<usize> {
    source
        .segments
        .iter()
        .map(|segment| match_token_run(&segment.name_tokens, dest_tokens, dest_start))
        .collect()
}

/// Reverse-order name matching for the loose policy: the nearest-to-leaf
/// source segment that matches wins, and a match from the final segment
/// flips `last_source_matched`.
fn loose_match_names(
    source: &PropertyPath,
    dest_tokens: &Tokens,
    dest_start: usize,
    last_source_matched: &mut bool,
) -> usize {
    for (index, segment) in source.segments.iter().enumerate().rev() {
        let matched = match_token_run(&segment.name_tokens, dest_tokens, dest_start);
        if matched > 0 {
            if index == source.segments.len() - 1 {
                *last_source_matched = true;
            }
            return matched;
        }
    }
    0
}

fn matches_source_type(source: &PropertyPath, token: &str) -> bool {
    source
        .segments
        .iter()
        .any(|segment| segment.type_tokens.contains(token))
}

/// Every source segment that contributed nothing must share a token with
/// one that did.
fn all_segments_accounted(source: &PropertyPath, used: &[bool]) -> bool {
    for (index, segment) in source.segments.iter().enumerate() {
        if used[index] {
            continue;
        }
        let covered = source
            .segments
            .iter()
            .enumerate()
            .any(|(other, used_segment)| {
                used[other] && segment.name_tokens.shares_any(&used_segment.name_tokens)
            });
        if !covered {
            return false;
        }
    }
    true
}

/// Returns how many destination tokens starting at `dest_start` are
/// consumed by source tokens starting anywhere in `src`. Tokens on both
/// sides combine: character comparison continues across token boundaries,
/// so unequal token granularity still matches.
fn match_token_run(src: &Tokens, dst: &Tokens, dest_start: usize) -> usize {
    for src_start in 0..src.len() {
        let mut si = src_start;
        let mut sj = 0usize;
        let mut di = dest_start;
        let mut dj = 0usize;

        'compare: loop {
            let s = src.get(si).expect("source index in bounds").as_bytes();
            let d = dst.get(di).expect("destination index in bounds").as_bytes();
            while sj < s.len() && dj < d.len() {
                if !s[sj].eq_ignore_ascii_case(&d[dj]) {
                    break 'compare;
                }
                sj += 1;
                dj += 1;
            }

            let src_done = sj == s.len();
            let dst_done = dj == d.len();
            if src_done && dst_done {
                return di - dest_start + 1;
            }
            if src_done {
                if si + 1 >= src.len() {
                    break;
                }
                si += 1;
                sj = 0;
            }
            if dst_done {
                if di + 1 >= dst.len() {
                    break;
                }
                di += 1;
                dj = 0;
            }
        }
    }
    0
}
