//! Backtracking walker over `(step, cursor)` states.
//!
//! A pattern is tried at one start position at a time. Each state is a step
//! index and a document cursor; a step consumes zero or more tokens depending
//! on its quantifier and hands the new cursor to the next step. Reaching the
//! end of the steps accepts the span `[start, cursor)`.
//!
//! Exploration order decides which span wins at a given start:
//! - `?` tries consuming the token before skipping it
//! - `+` and `*` consume greedily, then give back one token at a time
//! - `!` never consumes
//!
//! Recursion depth is bounded by the pattern length. Every visited state
//! costs one unit of the step budget, which is refilled for each attempt.

use log::warn;

use crate::error::{MatcherError, Result};
use crate::tokens::TokenAttributes;

use super::pattern::{PatternStep, Quantifier};

pub(super) struct Walker<'d, T> {
    tokens: &'d [T],
    spent: usize,
    budget: usize,
}

impl<'d, T: TokenAttributes> Walker<'d, T> {
    pub(super) fn new(tokens: &'d [T], budget: usize) -> Self {
        Self {
            tokens,
            spent: 0,
            budget,
        }
    }

    /// End of the first accepted span for `steps` starting at `start`.
    pub(super) fn match_at(
        &mut self,
        steps: &[PatternStep],
        start: usize,
    ) -> Result<Option<usize>> {
        self.spent = 0;
        self.walk(steps, 0, start)
    }

    fn walk(
        &mut self,
        steps: &[PatternStep],
        index: usize,
        cursor: usize,
    ) -> Result<Option<usize>> {
        self.tick()?;

        let Some(step) = steps.get(index) else {
            return Ok(Some(cursor));
        };

        match step.quantifier() {
            Quantifier::One => {
                if self.satisfies(step, cursor)? {
                    self.walk(steps, index + 1, cursor + 1)
                } else {
                    Ok(None)
                }
            }
            Quantifier::ZeroOrOne => {
                if self.satisfies(step, cursor)?
                    && let Some(end) = self.walk(steps, index + 1, cursor + 1)?
                {
                    return Ok(Some(end));
                }
                self.walk(steps, index + 1, cursor)
            }
            Quantifier::OneOrMore | Quantifier::ZeroOrMore => {
                let min = usize::from(step.quantifier() == Quantifier::OneOrMore);
                let mut run = 0;
                while self.satisfies(step, cursor + run)? {
                    run += 1;
                    self.tick()?;
                }
                if run < min {
                    return Ok(None);
                }
                for taken in (min..=run).rev() {
                    if let Some(end) = self.walk(steps, index + 1, cursor + taken)? {
                        return Ok(Some(end));
                    }
                }
                Ok(None)
            }
            Quantifier::Zero => {
                if self.satisfies(step, cursor)? {
                    Ok(None)
                } else {
                    self.walk(steps, index + 1, cursor)
                }
            }
        }
    }

    /// Positions past the last token satisfy nothing.
    fn satisfies(&self, step: &PatternStep, cursor: usize) -> Result<bool> {
        match self.tokens.get(cursor) {
            Some(token) => step.matches(token),
            None => Ok(false),
        }
    }

    fn tick(&mut self) -> Result<()> {
        self.spent += 1;
        if self.spent > self.budget {
            warn!(
                "Match step budget of {} exhausted in one attempt on a {}-token document",
                self.budget,
                self.tokens.len()
            );
            return Err(MatcherError::MatchBudgetExceeded {
                budget: self.budget,
            });
        }
        Ok(())
    }
}
