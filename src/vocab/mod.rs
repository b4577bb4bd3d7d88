//! Vocabulary shared across documents and matchers.
//!
//! Holds the [`StringStore`] and hands out [`Lexeme`]s: the
//! context-independent view of a word. Share it as `Arc<Vocab>`; interning
//! takes an internal lock and matching never writes to it.

mod strings;

use serde::Serialize;

use crate::tokens::{LexicalFlags, prefix, suffix, word_shape};

pub use strings::StringStore;

#[derive(Debug, Default)]
pub struct Vocab {
    strings: StringStore,
}

impl Vocab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strings(&self) -> &StringStore {
        &self.strings
    }

    /// Intern `text` and return its lexeme.
    pub fn lexeme(&self, text: &str) -> Lexeme {
        let orth = self.strings.add(text);
        let lower = text.to_lowercase();
        let flags = LexicalFlags::of(text);
        Lexeme {
            orth,
            text: text.to_string(),
            lower_orth: self.strings.add(&lower),
            lower,
            shape: word_shape(text),
            prefix: prefix(text),
            suffix: suffix(text),
            is_alpha: flags.is_alpha,
            is_digit: flags.is_digit,
            is_punct: flags.is_punct,
            is_lower: flags.is_lower,
            is_upper: flags.is_upper,
            is_title: flags.is_title,
            like_num: flags.like_num,
            is_stop: flags.is_stop,
        }
    }
}

/// An entry in the vocabulary: a word type without context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexeme {
    pub orth: u64,
    pub text: String,
    pub lower_orth: u64,
    pub lower: String,
    pub shape: String,
    pub prefix: String,
    pub suffix: String,
    pub is_alpha: bool,
    pub is_digit: bool,
    pub is_punct: bool,
    pub is_lower: bool,
    pub is_upper: bool,
    pub is_title: bool,
    pub like_num: bool,
    pub is_stop: bool,
}

impl Lexeme {
    /// Attribute name/value pairs, in declaration order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        let value = serde_json::to_value(self).unwrap_or_default();
        let Some(object) = value.as_object() else {
            return Vec::new();
        };
        object
            .iter()
            .map(|(name, value)| {
                let rendered = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), rendered)
            })
            .collect()
    }
}
