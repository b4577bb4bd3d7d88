//! Loading of documents annotated by an external pipeline.
//!
//! The JSON format is one object per document:
//!
//! ```json
//! {
//!   "tokens": [
//!     {"text": "she", "lemma": "she", "pos": "PRON", "dep": "nsubj", "head": 1},
//!     {"text": "ate", "lemma": "eat", "pos": "VERB", "dep": "ROOT", "head": 1}
//!   ],
//!   "ents": [{"start": 0, "end": 1, "label": "PERSON"}]
//! }
//! ```
//!
//! A document with only a `text` field is run through the blank tokenizer.
//! Missing `whitespace` defaults to a single space between tokens.

use anyhow::{Context, Result, anyhow};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::{Document, Entity, Token, tokenize};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    tokens: Option<Vec<RawToken>>,
    #[serde(default)]
    ents: Option<Vec<Entity>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawToken {
    text: String,
    #[serde(default)]
    whitespace: Option<String>,
    #[serde(default)]
    lemma: Option<String>,
    #[serde(default)]
    pos: Option<String>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    dep: Option<String>,
    #[serde(default)]
    head: Option<usize>,
    #[serde(default)]
    ent_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RawDocument>),
    One(RawDocument),
}

/// Parse a single JSON document.
pub fn parse_document(json: &str) -> Result<Document> {
    let raw: RawDocument = serde_json::from_str(json).context("Failed to parse document JSON")?;
    build_document(raw)
}

/// Load a single document from a JSON file.
pub fn load_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    parse_document(&content).with_context(|| format!("Invalid document {}", path.display()))
}

/// Load one document or an array of documents from a JSON file.
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read documents {}", path.display()))?;
    let raw: OneOrMany = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse documents JSON {}", path.display()))?;

    let raws = match raw {
        OneOrMany::Many(docs) => docs,
        OneOrMany::One(doc) => vec![doc],
    };

    let docs = raws
        .into_iter()
        .enumerate()
        .map(|(n, raw)| {
            build_document(raw)
                .with_context(|| format!("Invalid document #{} in {}", n, path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("Loaded {} document(s) from {}", docs.len(), path.display());
    Ok(docs)
}

fn build_document(raw: RawDocument) -> Result<Document> {
    let Some(raw_tokens) = raw.tokens else {
        let text = raw
            .text
            .ok_or_else(|| anyhow!("Document needs either \"tokens\" or \"text\""))?;
        if raw.ents.is_some() {
            return Err(anyhow!("Entity spans need explicit \"tokens\" to refer to"));
        }
        return Ok(tokenize(&text));
    };

    let count = raw_tokens.len();
    let mut tokens: Vec<Token> = raw_tokens
        .into_iter()
        .enumerate()
        .map(|(n, raw)| {
            let mut token = Token::new(raw.text);
            token.whitespace = raw
                .whitespace
                .unwrap_or_else(|| if n + 1 < count { " " } else { "" }.to_string());
            token.lemma = raw.lemma;
            token.pos = raw.pos;
            token.tag = raw.tag;
            token.dep = raw.dep;
            token.head = raw.head;
            token.ent_type = raw.ent_type;
            token
        })
        .collect();

    // An explicit "ents" list, even an empty one, marks the entity layer.
    let recognized = raw.ents.is_some();
    let ents = raw.ents.unwrap_or_default();
    if recognized && tokens.iter().all(|t| t.ent_type.is_none()) {
        for token in &mut tokens {
            token.ent_type = Some(String::new());
        }
        for ent in &ents {
            let width = ent.end.saturating_sub(ent.start);
            for token in tokens.iter_mut().skip(ent.start).take(width) {
                token.ent_type = Some(ent.label.clone());
            }
        }
    }

    Ok(Document::new(tokens, ents)?)
}
