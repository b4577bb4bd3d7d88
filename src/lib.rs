pub mod cli;
pub mod error;
pub mod explain;
pub mod matcher;
pub mod report;
pub mod tokens;
pub mod vocab;


pub use error::{MatcherError, Result};
pub use explain::explain;
pub use matcher::{
    Match, MatchFilter, Matcher, MatcherConfig, Pattern, PatternFormat, PatternSet, PatternStep,
    Predicate, Quantifier, Value, load_pattern_set, parse_pattern_set,
};
pub use tokens::{
    Attr, AttrValue, Document, Entity, Span, Token, TokenAttributes, load_document,
    load_documents, tokenize,
};
pub use vocab::{Lexeme, StringStore, Vocab};
