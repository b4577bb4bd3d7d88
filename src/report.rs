//! Plain-text and JSON rendering of match results.

use serde::Serialize;

use crate::explain::explain;
use crate::matcher::{Match, Matcher};
use crate::tokens::{Annotation, Document};

/// Banner introducing a section of output.
///
/// Level 1 is framed by long rules, level 2 by short ones, level 3 is a
/// plain `text:` line. Any other level renders like level 3.
pub fn section_header(text: &str, level: u8) -> String {
    match level {
        1 => format!("\n{rule}{text:^30}{rule}\n\n", rule = "-".repeat(23)),
        2 => format!("\n---{text:^30}---\n\n"),
        _ => format!("\n{text}:\n"),
    }
}

/// Match count followed by the text of each matched span, one per line.
pub fn format_matches(matches: &[Match], doc: &Document) -> String {
    let mut out = format!("Total Matches Found: {}\n", matches.len());
    for m in matches {
        if let Some(span) = m.span(doc) {
            out.push_str(&span.text());
            out.push('\n');
        }
    }
    out
}

/// A match resolved against its matcher and document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledMatch {
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl LabeledMatch {
    pub fn resolve(m: &Match, matcher: &Matcher, doc: &Document) -> Self {
        let label = matcher
            .label(m.key)
            .map(str::to_string)
            .or_else(|| matcher.vocab().strings().get(m.key))
            .unwrap_or_else(|| m.key.to_string());
        Self {
            label,
            start: m.start,
            end: m.end,
            text: m.span(doc).map(|span| span.text()).unwrap_or_default(),
        }
    }
}

/// Matches found in one document, as written in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub text: String,
    pub annotations: Vec<Annotation>,
    pub matches: Vec<LabeledMatch>,
}

impl DocumentReport {
    pub fn new(matches: &[Match], matcher: &Matcher, doc: &Document) -> Self {
        Self {
            text: doc.text(),
            annotations: doc.annotations(),
            matches: matches
                .iter()
                .map(|m| LabeledMatch::resolve(m, matcher, doc))
                .collect(),
        }
    }
}

/// One row per token: text, POS and dependency labels with their
/// descriptions, then the head token. Followed by the entities, if any.
pub fn token_table(doc: &Document) -> String {
    let mut out = String::new();
    for token in doc.tokens() {
        let pos = token.pos.as_deref().unwrap_or("");
        let dep = token.dep.as_deref().unwrap_or("");
        let head = token
            .head
            .and_then(|head| doc.get(head))
            .map(|head| head.text.as_str())
            .unwrap_or("");
        out.push_str(&format!(
            "{:<12}{:<10} ({:<12}) {:<10} ({:<12}) {}\n",
            token.text,
            pos,
            explain(pos).unwrap_or(""),
            dep,
            explain(dep).unwrap_or(""),
            head
        ));
    }

    let ents = doc.ents();
    if !ents.is_empty() {
        out.push('\n');
        for ent in ents {
            let label = ent.label.unwrap_or("");
            out.push_str(&format!(
                "{} {} ({})\n",
                ent.text(),
                label,
                explain(label).unwrap_or("")
            ));
        }
    }
    out
}
