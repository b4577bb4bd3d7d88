//! Context-independent lexical attributes.
//!
//! These only depend on the surface text of a word, so they are computed the
//! same way for tokens of a document and for vocabulary lexemes.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// English number words recognised by [`like_num`].
static NUMBER_WORDS: &[&str] = &[
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
    "twenty",
    "thirty",
    "forty",
    "fifty",
    "sixty",
    "seventy",
    "eighty",
    "ninety",
    "hundred",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "gajillion",
    "bazillion",
];

static ORDINAL_WORDS: &[&str] = &[
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
    "twentieth",
    "thirtieth",
    "fortieth",
    "fiftieth",
    "sixtieth",
    "seventieth",
    "eightieth",
    "ninetieth",
    "hundredth",
    "thousandth",
    "millionth",
    "billionth",
    "trillionth",
];

/// Common English function words.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
        "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor",
        "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
        "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
        "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
        "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
        "n't", "'s", "'m", "'re", "'ve", "'ll", "'d",
    ]
    .into_iter()
    .collect()
});

/// Lexical flags of a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexicalFlags {
    pub is_alpha: bool,
    pub is_digit: bool,
    pub is_punct: bool,
    pub is_space: bool,
    pub is_lower: bool,
    pub is_upper: bool,
    pub is_title: bool,
    pub like_num: bool,
    pub is_stop: bool,
}

impl LexicalFlags {
    pub fn of(text: &str) -> Self {
        let non_empty = !text.is_empty();
        let has_cased = text.chars().any(char::is_alphabetic);
        Self {
            is_alpha: non_empty && text.chars().all(char::is_alphabetic),
            is_digit: non_empty && text.chars().all(|c| c.is_ascii_digit()),
            is_punct: non_empty && text.chars().all(is_punct_char),
            is_space: non_empty && text.chars().all(char::is_whitespace),
            is_lower: has_cased && !text.chars().any(char::is_uppercase),
            is_upper: has_cased && !text.chars().any(char::is_lowercase),
            is_title: is_title(text),
            like_num: like_num(text),
            is_stop: is_stop(text),
        }
    }
}

fn is_punct_char(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '“' | '”' | '‘' | '’' | '«' | '»' | '…' | '–' | '—' | '¿' | '¡' | '·'
        )
}

fn is_title(text: &str) -> bool {
    let mut chars = text.chars().filter(|c| c.is_alphabetic());
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(char::is_lowercase),
        _ => false,
    }
}

/// Whether the text resembles a number: digits with `,`/`.` separators,
/// a simple fraction, or an English number word.
pub fn like_num(text: &str) -> bool {
    let text = text.trim_start_matches(['+', '-', '±', '~']);
    if text.is_empty() {
        return false;
    }

    let digits: String = text.chars().filter(|c| *c != ',' && *c != '.').collect();
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    if let Some((num, denom)) = text.split_once('/')
        && !num.is_empty()
        && !denom.is_empty()
        && num.chars().all(|c| c.is_ascii_digit())
        && denom.chars().all(|c| c.is_ascii_digit())
    {
        return true;
    }

    let lower = text.to_lowercase();
    if NUMBER_WORDS.contains(&lower.as_str()) || ORDINAL_WORDS.contains(&lower.as_str()) {
        return true;
    }

    // 1st, 2nd, 23rd, 4th
    if let Some(prefix) = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| lower.strip_suffix(suffix))
    {
        return !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit());
    }

    false
}

pub fn is_stop(text: &str) -> bool {
    STOP_WORDS.contains(text.to_lowercase().as_str())
}

/// Orthographic shape: letters become `X`/`x`, digits `d`, other characters
/// are kept. Runs of the same class are cut after four characters.
pub fn word_shape(text: &str) -> String {
    let mut shape = String::with_capacity(text.len());
    let mut last: Option<char> = None;
    let mut run = 0usize;

    for c in text.chars() {
        let class = if c.is_alphabetic() {
            if c.is_uppercase() { 'X' } else { 'x' }
        } else if c.is_numeric() {
            'd'
        } else {
            c
        };

        if Some(class) == last {
            run += 1;
        } else {
            run = 0;
            last = Some(class);
        }

        if run < 4 {
            shape.push(class);
        }
    }

    shape
}

/// First character of the text.
pub fn prefix(text: &str) -> String {
    text.chars().take(1).collect()
}

/// Last three characters of the text.
pub fn suffix(text: &str) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(3)).collect()
}
