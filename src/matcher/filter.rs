//! Overlap filtering of matches registered under one name.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::Match;

/// How matches of one pattern name that overlap each other are resolved.
///
/// Filters never look across names: two names matching overlapping spans
/// both keep their matches.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum MatchFilter {
    /// Keep every match.
    #[default]
    All,
    /// Scan left to right and keep a match only if it starts after the end
    /// of the last kept one.
    First,
    /// Prefer longer matches, then earlier ones, among overlapping matches.
    Longest,
}

/// Left-to-right state for [`MatchFilter::First`].
#[derive(Debug, Default)]
pub(super) struct FirstFilter {
    blocked_until: usize,
}

impl FirstFilter {
    /// Whether `m` survives, given matches are fed in start order.
    pub(super) fn admit(&mut self, m: &Match) -> bool {
        if m.start < self.blocked_until {
            return false;
        }
        self.blocked_until = m.end;
        true
    }
}

/// Keep the longest non-overlapping matches, returned in start order.
pub(super) fn keep_longest(mut matches: Vec<Match>) -> Vec<Match> {
    matches.sort_by(|a, b| b.len().cmp(&a.len()).then(a.start.cmp(&b.start)));

    let mut kept: Vec<Match> = Vec::with_capacity(matches.len());
    for m in matches {
        if !kept.iter().any(|k| k.overlaps(&m)) {
            kept.push(m);
        }
    }

    kept.sort_by_key(|m| (m.start, m.end));
    kept
}
