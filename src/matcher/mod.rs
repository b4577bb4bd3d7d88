//! Rule-based token pattern matcher.
//!
//! Patterns are registered under names; each name can hold several
//! alternative patterns. Matching walks every start position of a document
//! and tries each name's patterns there in registration order.
//!
//! Results are ordered by start position, then by registration order of the
//! name, then by alternative order. Each pattern yields at most one span per
//! start position: the first accepted by the backtracking walker (see
//! [`engine`]). Matches of different names may overlap freely.

mod engine;
mod filter;
pub mod loader;
mod pattern;

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use crate::error::{MatcherError, Result};
use crate::tokens::{Attr, Document, Span, TokenAttributes};
use crate::vocab::Vocab;

use engine::Walker;
use filter::{FirstFilter, keep_longest};

pub use filter::MatchFilter;
pub use loader::{PatternFormat, PatternSet, load_pattern_set, parse_pattern_set};
pub use pattern::{Pattern, PatternStep, Predicate, Quantifier, Value};

/// Default number of walker states allowed per (pattern, start) attempt.
pub const DEFAULT_STEP_BUDGET: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Walker states allowed while trying one pattern at one start position
    /// before giving up with [`MatcherError::MatchBudgetExceeded`].
    pub step_budget: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            step_budget: DEFAULT_STEP_BUDGET,
        }
    }
}

/// A matched span: the hash of the pattern name and a half-open token range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Match {
    pub key: u64,
    pub start: usize,
    pub end: usize,
}

impl Match {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Match) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The matched tokens of `doc`.
    pub fn span<'d>(&self, doc: &'d Document) -> Option<Span<'d>> {
        doc.span(self.start, self.end)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    key: u64,
    patterns: Vec<Pattern>,
    filter: MatchFilter,
}

#[derive(Debug)]
pub struct Matcher {
    vocab: Arc<Vocab>,
    config: MatcherConfig,
    entries: Vec<Entry>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(Arc::new(Vocab::new()))
    }
}

impl Matcher {
    pub fn new(vocab: Arc<Vocab>) -> Self {
        Self::with_config(vocab, MatcherConfig::default())
    }

    pub fn with_config(vocab: Arc<Vocab>, config: MatcherConfig) -> Self {
        Self {
            vocab,
            config,
            entries: Vec::new(),
        }
    }

    pub fn vocab(&self) -> &Arc<Vocab> {
        &self.vocab
    }

    pub fn config(&self) -> MatcherConfig {
        self.config
    }

    /// Register alternative `patterns` under `name`, keeping all matches.
    pub fn add(&mut self, name: &str, patterns: Vec<Pattern>) -> Result<()> {
        self.add_with_filter(name, patterns, MatchFilter::All)
    }

    /// Register alternative `patterns` under `name` with an overlap filter.
    ///
    /// Names are unique: registering a name twice fails with
    /// [`MatcherError::DuplicateName`]. Call [`Matcher::remove`] first to
    /// replace a name's patterns.
    pub fn add_with_filter(
        &mut self,
        name: &str,
        patterns: Vec<Pattern>,
        filter: MatchFilter,
    ) -> Result<()> {
        if self.contains(name) {
            return Err(MatcherError::DuplicateName(name.to_string()));
        }
        if patterns.is_empty() {
            return Err(MatcherError::InvalidPattern(format!(
                "no patterns given for {name:?}"
            )));
        }
        if patterns.iter().any(Pattern::is_empty) {
            return Err(MatcherError::EmptyPattern(name.to_string()));
        }

        let key = self.vocab.strings().add(name);
        debug!(
            "Registered {} pattern(s) under {:?} (filter {})",
            patterns.len(),
            name,
            filter
        );
        self.entries.push(Entry {
            name: name.to_string(),
            key,
            patterns,
            filter,
        });
        Ok(())
    }

    /// Remove `name` and its patterns. Returns whether it was registered.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        self.entries.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Name a match key belongs to.
    pub fn label(&self, key: u64) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.name.as_str())
    }

    /// All matches in `doc`.
    pub fn matches(&self, doc: &Document) -> Result<Vec<Match>> {
        self.matches_tokens(doc.tokens())
    }

    /// All matches over any token representation.
    pub fn matches_tokens<T: TokenAttributes>(&self, tokens: &[T]) -> Result<Vec<Match>> {
        self.iter(tokens).collect()
    }

    /// Lazily enumerate matches. Each call starts a fresh walk.
    ///
    /// Names filtered with [`MatchFilter::Longest`] are resolved for the
    /// whole document the first time the walk reaches them.
    pub fn iter<'m, 'd, T: TokenAttributes>(&'m self, tokens: &'d [T]) -> MatchIter<'m, 'd, T> {
        MatchIter {
            matcher: self,
            tokens,
            walker: Walker::new(tokens, self.config.step_budget),
            start: 0,
            pending: VecDeque::new(),
            first_filters: self.entries.iter().map(|_| FirstFilter::default()).collect(),
            longest: vec![None; self.entries.len()],
            validated: false,
            done: false,
        }
    }

    /// Every attribute the registered patterns read must be exposed by every
    /// token.
    fn validate<T: TokenAttributes>(&self, tokens: &[T]) -> Result<()> {
        let attrs: BTreeSet<Attr> = self
            .entries
            .iter()
            .flat_map(|entry| entry.patterns.iter())
            .flat_map(Pattern::attrs)
            .collect();

        for attr in attrs {
            if tokens.iter().any(|token| token.attribute(attr).is_none()) {
                return Err(MatcherError::UnknownAttribute(attr));
            }
        }
        Ok(())
    }
}

/// Lazy, ordered enumeration of matches over one token sequence.
///
/// Yields `Err` at most once, after which it is exhausted.
pub struct MatchIter<'m, 'd, T> {
    matcher: &'m Matcher,
    tokens: &'d [T],
    walker: Walker<'d, T>,
    start: usize,
    pending: VecDeque<Match>,
    first_filters: Vec<FirstFilter>,
    longest: Vec<Option<VecDeque<Match>>>,
    validated: bool,
    done: bool,
}

impl<T: TokenAttributes> MatchIter<'_, '_, T> {
    /// Distinct spans of `entry` at `start`, in alternative order.
    fn spans_at(&mut self, entry: &Entry, start: usize) -> Result<Vec<Match>> {
        let mut found: Vec<Match> = Vec::new();
        for pattern in &entry.patterns {
            if let Some(end) = self.walker.match_at(pattern.steps(), start)?
                && end > start
                && !found.iter().any(|m| m.end == end)
            {
                found.push(Match {
                    key: entry.key,
                    start,
                    end,
                });
            }
        }
        Ok(found)
    }

    fn fill(&mut self, start: usize) -> Result<()> {
        let matcher = self.matcher;
        for (index, entry) in matcher.entries.iter().enumerate() {
            match entry.filter {
                MatchFilter::All => {
                    let found = self.spans_at(entry, start)?;
                    self.pending.extend(found);
                }
                MatchFilter::First => {
                    for m in self.spans_at(entry, start)? {
                        if self.first_filters[index].admit(&m) {
                            self.pending.push_back(m);
                        }
                    }
                }
                MatchFilter::Longest => {
                    if self.longest[index].is_none() {
                        let mut all = Vec::new();
                        for s in 0..self.tokens.len() {
                            all.extend(self.spans_at(entry, s)?);
                        }
                        self.longest[index] = Some(keep_longest(all).into());
                    }
                    if let Some(queue) = self.longest[index].as_mut() {
                        while queue.front().is_some_and(|m| m.start == start) {
                            if let Some(m) = queue.pop_front() {
                                self.pending.push_back(m);
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl<T: TokenAttributes> Iterator for MatchIter<'_, '_, T> {
    type Item = Result<Match>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(m) = self.pending.pop_front() {
                return Some(Ok(m));
            }
            if self.done {
                return None;
            }
            if !self.validated {
                self.validated = true;
                if let Err(err) = self.matcher.validate(self.tokens) {
                    self.done = true;
                    return Some(Err(err));
                }
            }
            if self.start >= self.tokens.len() {
                self.done = true;
                return None;
            }

            let start = self.start;
            self.start += 1;
            if let Err(err) = self.fill(start) {
                self.pending.clear();
                self.done = true;
                return Some(Err(err));
            }
        }
    }
}
