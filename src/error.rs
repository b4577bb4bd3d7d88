//! Error type shared by pattern parsing, registration, and matching.

use thiserror::Error;

use crate::tokens::Attr;

/// Errors reported by the matcher and the document model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatcherError {
    #[error("a pattern named {0:?} is already registered")]
    DuplicateName(String),

    #[error("pattern {0:?} has no steps")]
    EmptyPattern(String),

    #[error("unknown token attribute {0:?}")]
    UnknownAttributeName(String),

    #[error("token does not expose attribute {0}{hint}", hint = .0.requirement_hint())]
    UnknownAttribute(Attr),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("match step budget of {budget} exceeded")]
    MatchBudgetExceeded { budget: usize },
}

impl MatcherError {
    /// True for both flavours of unknown-attribute failure: a key that is not
    /// an attribute at all, and an attribute the document cannot provide.
    pub fn is_unknown_attribute(&self) -> bool {
        matches!(
            self,
            MatcherError::UnknownAttribute(_) | MatcherError::UnknownAttributeName(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;
