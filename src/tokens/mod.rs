//! Token and document model.
//!
//! This module defines:
//! - The closed attribute set ([`Attr`]) that patterns can test, and the
//!   annotation layer ([`Annotation`]) each pipeline-assigned attribute needs
//! - The [`TokenAttributes`] capability trait the matcher reads tokens through
//! - [`Token`], [`Document`], [`Span`] and [`Entity`]

mod lexical;
pub mod loader;
pub mod tokenize;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{MatcherError, Result};

pub use lexical::{LexicalFlags, is_stop, like_num, prefix, suffix, word_shape};
pub use loader::{load_document, load_documents};
pub use tokenize::tokenize;

/// Token attribute that a pattern step can test.
///
/// Parsed from the upper-case keys used in pattern files (`"LEMMA"`,
/// `"IS_DIGIT"`, ...). `ORTH` is accepted as an alias of `TEXT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
pub enum Attr {
    #[strum(to_string = "TEXT", serialize = "ORTH")]
    Text,
    #[strum(serialize = "LOWER")]
    Lower,
    #[strum(serialize = "SHAPE")]
    Shape,
    #[strum(serialize = "LEMMA")]
    Lemma,
    #[strum(serialize = "POS")]
    Pos,
    #[strum(serialize = "TAG")]
    Tag,
    #[strum(serialize = "DEP")]
    Dep,
    #[strum(serialize = "ENT_TYPE")]
    EntType,
    #[strum(serialize = "IS_ALPHA")]
    IsAlpha,
    #[strum(serialize = "IS_DIGIT")]
    IsDigit,
    #[strum(serialize = "IS_PUNCT")]
    IsPunct,
    #[strum(serialize = "IS_SPACE")]
    IsSpace,
    #[strum(serialize = "IS_LOWER")]
    IsLower,
    #[strum(serialize = "IS_UPPER")]
    IsUpper,
    #[strum(serialize = "IS_TITLE")]
    IsTitle,
    #[strum(serialize = "IS_STOP")]
    IsStop,
    #[strum(serialize = "LIKE_NUM")]
    LikeNum,
}

impl Attr {
    /// The annotation layer an external pipeline must supply for this
    /// attribute, or `None` for lexical attributes computed from the text.
    pub fn annotation(self) -> Option<Annotation> {
        match self {
            Attr::Lemma => Some(Annotation::Lemmas),
            Attr::Pos | Attr::Tag => Some(Annotation::Tags),
            Attr::Dep => Some(Annotation::Dependencies),
            Attr::EntType => Some(Annotation::Entities),
            _ => None,
        }
    }

    /// Whether values of this attribute are booleans rather than strings.
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            Attr::IsAlpha
                | Attr::IsDigit
                | Attr::IsPunct
                | Attr::IsSpace
                | Attr::IsLower
                | Attr::IsUpper
                | Attr::IsTitle
                | Attr::IsStop
                | Attr::LikeNum
        )
    }

    pub(crate) fn requirement_hint(self) -> String {
        match self.annotation() {
            Some(annotation) => format!(" (requires {annotation} annotation)"),
            None => String::new(),
        }
    }
}

/// Annotation layers supplied by an external pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Annotation {
    Tags,
    Lemmas,
    Dependencies,
    Entities,
}

/// Borrowed attribute value read from a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue<'a> {
    Str(&'a str),
    Bool(bool),
}

impl fmt::Display for AttrValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => write!(f, "{s}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Capability set the matcher needs from a token.
///
/// Returns `None` when this token representation does not expose `attr`,
/// which the matcher reports as an unknown attribute.
pub trait TokenAttributes {
    fn attribute(&self, attr: Attr) -> Option<AttrValue<'_>>;
}

/// One annotated lexical unit of a document.
///
/// Lexical attributes are derived from `text` when the token is built;
/// `lemma`, `pos`, `tag`, `dep`, `head` and `ent_type` come from an external
/// pipeline and are `None` when it did not run.
#[derive(Debug, Clone, PartialEq, Builder, Serialize)]
#[builder(build_fn(skip))]
pub struct Token {
    /// Position within the owning document.
    #[builder(setter(skip))]
    pub i: usize,
    #[builder(setter(into))]
    pub text: String,
    /// Whitespace following the token in the source text.
    #[builder(setter(into), default)]
    pub whitespace: String,
    #[builder(setter(skip))]
    pub lower: String,
    #[builder(setter(skip))]
    pub shape: String,
    #[builder(setter(skip))]
    #[serde(skip)]
    pub flags: LexicalFlags,
    #[builder(setter(into, strip_option), default)]
    pub lemma: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub pos: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub tag: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub dep: Option<String>,
    /// Index of the syntactic head within the document.
    #[builder(setter(strip_option), default)]
    pub head: Option<usize>,
    #[builder(setter(into, strip_option), default)]
    pub ent_type: Option<String>,
}

impl TokenBuilder {
    pub fn build(&self) -> std::result::Result<Token, String> {
        let text = self.text.clone().ok_or("Missing field: text")?;
        let mut token = Token::new(text);
        token.whitespace = self.whitespace.clone().unwrap_or_default();
        token.lemma = self.lemma.clone().flatten();
        token.pos = self.pos.clone().flatten();
        token.tag = self.tag.clone().flatten();
        token.dep = self.dep.clone().flatten();
        token.head = self.head.flatten();
        token.ent_type = self.ent_type.clone().flatten();
        Ok(token)
    }
}

impl Token {
    /// Create an unannotated token; lexical attributes are computed from `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            i: 0,
            lower: text.to_lowercase(),
            shape: word_shape(&text),
            flags: LexicalFlags::of(&text),
            text,
            whitespace: String::new(),
            lemma: None,
            pos: None,
            tag: None,
            dep: None,
            head: None,
            ent_type: None,
        }
    }

    pub fn builder() -> TokenBuilder {
        TokenBuilder::default()
    }

    pub fn is_digit(&self) -> bool {
        self.flags.is_digit
    }

    pub fn like_num(&self) -> bool {
        self.flags.like_num
    }

    /// Text followed by its trailing whitespace.
    pub fn text_with_ws(&self) -> String {
        format!("{}{}", self.text, self.whitespace)
    }
}

impl TokenAttributes for Token {
    fn attribute(&self, attr: Attr) -> Option<AttrValue<'_>> {
        let value = match attr {
            Attr::Text => AttrValue::Str(&self.text),
            Attr::Lower => AttrValue::Str(&self.lower),
            Attr::Shape => AttrValue::Str(&self.shape),
            Attr::Lemma => AttrValue::Str(self.lemma.as_deref()?),
            Attr::Pos => AttrValue::Str(self.pos.as_deref()?),
            Attr::Tag => AttrValue::Str(self.tag.as_deref()?),
            Attr::Dep => AttrValue::Str(self.dep.as_deref()?),
            // Tokens outside any entity carry an empty type once entities
            // were annotated at all, so `ent_type` is only `None` without
            // the layer.
            Attr::EntType => AttrValue::Str(self.ent_type.as_deref()?),
            Attr::IsAlpha => AttrValue::Bool(self.flags.is_alpha),
            Attr::IsDigit => AttrValue::Bool(self.flags.is_digit),
            Attr::IsPunct => AttrValue::Bool(self.flags.is_punct),
            Attr::IsSpace => AttrValue::Bool(self.flags.is_space),
            Attr::IsLower => AttrValue::Bool(self.flags.is_lower),
            Attr::IsUpper => AttrValue::Bool(self.flags.is_upper),
            Attr::IsTitle => AttrValue::Bool(self.flags.is_title),
            Attr::IsStop => AttrValue::Bool(self.flags.is_stop),
            Attr::LikeNum => AttrValue::Bool(self.flags.like_num),
        };
        Some(value)
    }
}

/// A labelled entity span supplied by an external pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

/// Ordered sequence of tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    tokens: Vec<Token>,
    ents: Vec<Entity>,
}

impl Document {
    /// Build a document, assigning token positions and checking that heads
    /// and entity spans point inside it.
    pub fn new(tokens: Vec<Token>, ents: Vec<Entity>) -> Result<Self> {
        let mut tokens = tokens;
        for (i, token) in tokens.iter_mut().enumerate() {
            token.i = i;
        }

        let len = tokens.len();
        if let Some(token) = tokens.iter().find(|t| t.head.is_some_and(|h| h >= len)) {
            return Err(MatcherError::InvalidDocument(format!(
                "head of token {} ({:?}) is out of bounds",
                token.i, token.text
            )));
        }
        for ent in &ents {
            if ent.start >= ent.end || ent.end > len {
                return Err(MatcherError::InvalidDocument(format!(
                    "entity {} [{}, {}) is empty or out of bounds",
                    ent.label, ent.start, ent.end
                )));
            }
        }

        Ok(Self { tokens, ents })
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        Self::new(tokens, Vec::new())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Full text, reassembled from tokens and their trailing whitespace.
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::text_with_ws).collect()
    }

    /// Half-open slice `[start, end)`; `None` when out of bounds or reversed.
    pub fn span(&self, start: usize, end: usize) -> Option<Span<'_>> {
        (start <= end && end <= self.tokens.len()).then_some(Span {
            doc: self,
            start,
            end,
            label: None,
        })
    }

    /// Entity spans with their labels.
    pub fn ents(&self) -> Vec<Span<'_>> {
        self.ents
            .iter()
            .map(|ent| Span {
                doc: self,
                start: ent.start,
                end: ent.end,
                label: Some(ent.label.as_str()),
            })
            .collect()
    }

    /// Whether every token carries the given annotation layer.
    pub fn has_annotation(&self, annotation: Annotation) -> bool {
        !self.tokens.is_empty()
            && self.tokens.iter().all(|t| match annotation {
                Annotation::Tags => t.pos.is_some(),
                Annotation::Lemmas => t.lemma.is_some(),
                Annotation::Dependencies => t.dep.is_some(),
                Annotation::Entities => t.ent_type.is_some(),
            })
    }

    /// Annotation layers carried by every token, in declaration order.
    pub fn annotations(&self) -> Vec<Annotation> {
        Annotation::iter()
            .filter(|annotation| self.has_annotation(*annotation))
            .collect()
    }
}

impl std::ops::Index<usize> for Document {
    type Output = Token;

    fn index(&self, i: usize) -> &Token {
        &self.tokens[i]
    }
}

/// Contiguous half-open range of tokens in a document.
#[derive(Debug, Clone, Copy)]
pub struct Span<'d> {
    doc: &'d Document,
    pub start: usize,
    pub end: usize,
    pub label: Option<&'d str>,
}

impl<'d> Span<'d> {
    pub fn tokens(&self) -> &'d [Token] {
        &self.doc.tokens[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Span text without the trailing whitespace of its last token.
    pub fn text(&self) -> String {
        let tokens = self.tokens();
        let mut text = String::new();
        for (n, token) in tokens.iter().enumerate() {
            text.push_str(&token.text);
            if n + 1 < tokens.len() {
                text.push_str(&token.whitespace);
            }
        }
        text
    }
}
