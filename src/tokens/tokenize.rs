//! Blank tokenizer.
//!
//! Splits raw text on whitespace, then peels prefix punctuation, suffix
//! punctuation and English clitics off each chunk, and finally splits
//! hyphenated words. Only lexical attributes are set; the resulting document
//! carries no tags, lemmas, dependencies or entities.
//!
//! Pipeline: text → whitespace chunks → prefix/suffix peeling → infix split

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Document, Token};

/// A non-whitespace chunk followed by the whitespace after it.
static CHUNK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S+)(\s*)").expect("Invalid regex pattern"));

/// Single-letter abbreviations such as "U.S." or "e.g.".
static LETTER_ABBREVIATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z]\.){2,}$").expect("Invalid regex pattern"));

const PREFIX_CHARS: &[char] = &[
    '"', '\'', '(', '[', '{', '<', '$', '£', '€', '¥', '¿', '¡', '“', '‘', '«', '`', '#',
];

const SUFFIX_CHARS: &[char] = &[
    '.', ',', '!', '?', ';', ':', ')', ']', '}', '>', '"', '\'', '%', '”', '’', '»', '…',
];

const CLITICS: &[&str] = &["n't", "'s", "'m", "'re", "'ve", "'ll", "'d", "’s", "n’t"];

const ABBREVIATIONS: &[&str] = &[
    "Co.", "Corp.", "Dr.", "Inc.", "Jr.", "Ltd.", "Mr.", "Mrs.", "Ms.", "Prof.", "Sr.", "St.",
    "etc.", "vs.", "approx.",
];

/// Tokenize raw text into an unannotated document.
pub fn tokenize(text: &str) -> Document {
    let mut tokens = Vec::new();

    for caps in CHUNK.captures_iter(text) {
        let (Some(chunk), Some(space)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let pieces = split_chunk(chunk.as_str());
        let last = pieces.len().saturating_sub(1);
        for (n, piece) in pieces.into_iter().enumerate() {
            let mut token = Token::new(piece);
            if n == last {
                token.whitespace = space.as_str().to_string();
            }
            tokens.push(token);
        }
    }

    // Positions are assigned in order and no heads or entities exist, so
    // construction cannot fail.
    Document::from_tokens(tokens).unwrap_or_default()
}

/// Split one whitespace-free chunk into token strings.
fn split_chunk(chunk: &str) -> Vec<&str> {
    let mut prefixes = Vec::new();
    let mut suffixes = Vec::new();
    let mut rest = chunk;

    loop {
        if let Some(c) = rest.chars().next()
            && PREFIX_CHARS.contains(&c)
            && rest.len() > c.len_utf8()
        {
            prefixes.push(&rest[..c.len_utf8()]);
            rest = &rest[c.len_utf8()..];
            continue;
        }

        if let Some(stripped) = rest.strip_suffix("...")
            && !stripped.is_empty()
        {
            suffixes.push("...");
            rest = stripped;
            continue;
        }

        if let Some(clitic_len) = trailing_clitic(rest) {
            let at = rest.len() - clitic_len;
            suffixes.push(&rest[at..]);
            rest = &rest[..at];
            continue;
        }

        if let Some(c) = rest.chars().next_back()
            && SUFFIX_CHARS.contains(&c)
            && rest.len() > c.len_utf8()
            && !(c == '.' && is_abbreviation(rest))
        {
            let at = rest.len() - c.len_utf8();
            suffixes.push(&rest[at..]);
            rest = &rest[..at];
            continue;
        }

        break;
    }

    let mut pieces = prefixes;
    pieces.extend(split_infixes(rest));
    pieces.extend(suffixes.into_iter().rev());
    pieces
}

/// Byte length of a clitic at the end of `text`, if the clitic is preceded
/// by at least one other character.
fn trailing_clitic(text: &str) -> Option<usize> {
    CLITICS.iter().find_map(|clitic| {
        let at = text.len().checked_sub(clitic.len())?;
        (at > 0 && text.is_char_boundary(at) && text[at..].eq_ignore_ascii_case(clitic))
            .then_some(clitic.len())
    })
}

fn is_abbreviation(text: &str) -> bool {
    ABBREVIATIONS.contains(&text) || LETTER_ABBREVIATION.is_match(text)
}

/// Split on hyphens that join two letters: "system-wide" → "system", "-", "wide".
fn split_infixes(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut pieces = Vec::new();
    let mut start = 0;

    for (n, &(at, c)) in chars.iter().enumerate() {
        let joins_letters = c == '-'
            && n > 0
            && n + 1 < chars.len()
            && chars[n - 1].1.is_alphabetic()
            && chars[n + 1].1.is_alphabetic();
        if joins_letters {
            pieces.push(&text[start..at]);
            pieces.push(&text[at..at + 1]);
            start = at + 1;
        }
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}
