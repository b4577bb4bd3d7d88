//! Descriptions of tag, dependency and entity labels.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const GLOSSARY: &[(&str, &str)] = &[
    // Universal POS tags
    ("ADJ", "adjective"),
    ("ADP", "adposition"),
    ("ADV", "adverb"),
    ("AUX", "auxiliary"),
    ("CONJ", "conjunction"),
    ("CCONJ", "coordinating conjunction"),
    ("DET", "determiner"),
    ("INTJ", "interjection"),
    ("NOUN", "noun"),
    ("NUM", "numeral"),
    ("PART", "particle"),
    ("PRON", "pronoun"),
    ("PROPN", "proper noun"),
    ("PUNCT", "punctuation"),
    ("SCONJ", "subordinating conjunction"),
    ("SYM", "symbol"),
    ("VERB", "verb"),
    ("X", "other"),
    ("EOL", "end of line"),
    ("SPACE", "space"),
    // Dependency labels
    ("acl", "clausal modifier of noun (adjectival clause)"),
    ("acomp", "adjectival complement"),
    ("advcl", "adverbial clause modifier"),
    ("advmod", "adverbial modifier"),
    ("agent", "agent"),
    ("amod", "adjectival modifier"),
    ("appos", "appositional modifier"),
    ("attr", "attribute"),
    ("aux", "auxiliary"),
    ("auxpass", "auxiliary (passive)"),
    ("case", "case marking"),
    ("cc", "coordinating conjunction"),
    ("ccomp", "clausal complement"),
    ("compound", "compound"),
    ("conj", "conjunct"),
    ("csubj", "clausal subject"),
    ("csubjpass", "clausal subject (passive)"),
    ("dative", "dative"),
    ("dep", "unclassified dependent"),
    ("det", "determiner"),
    ("dobj", "direct object"),
    ("expl", "expletive"),
    ("intj", "interjection"),
    ("mark", "marker"),
    ("meta", "meta modifier"),
    ("neg", "negation modifier"),
    ("nmod", "modifier of nominal"),
    ("npadvmod", "noun phrase as adverbial modifier"),
    ("nsubj", "nominal subject"),
    ("nsubjpass", "nominal subject (passive)"),
    ("nummod", "numeric modifier"),
    ("oprd", "object predicate"),
    ("parataxis", "parataxis"),
    ("pcomp", "complement of preposition"),
    ("pobj", "object of preposition"),
    ("poss", "possession modifier"),
    ("preconj", "pre-correlative conjunction"),
    ("predet", "pre-determiner"),
    ("prep", "prepositional modifier"),
    ("prt", "particle"),
    ("punct", "punctuation"),
    ("quantmod", "modifier of quantifier"),
    ("relcl", "relative clause modifier"),
    ("ROOT", "root"),
    ("xcomp", "open clausal complement"),
    // Entity labels
    ("PERSON", "People, including fictional"),
    ("NORP", "Nationalities or religious or political groups"),
    ("FAC", "Buildings, airports, highways, bridges, etc."),
    ("ORG", "Companies, agencies, institutions, etc."),
    ("GPE", "Countries, cities, states"),
    ("LOC", "Non-GPE locations, mountain ranges, bodies of water"),
    ("PRODUCT", "Objects, vehicles, foods, etc. (not services)"),
    ("EVENT", "Named hurricanes, battles, wars, sports events, etc."),
    ("WORK_OF_ART", "Titles of books, songs, etc."),
    ("LAW", "Named documents made into laws."),
    ("LANGUAGE", "Any named language"),
    ("DATE", "Absolute or relative dates or periods"),
    ("TIME", "Times smaller than a day"),
    ("PERCENT", "Percentage, including \"%\""),
    ("MONEY", "Monetary values, including unit"),
    ("QUANTITY", "Measurements, as of weight or distance"),
    ("ORDINAL", "\"first\", \"second\", etc."),
    ("CARDINAL", "Numerals that do not fall under another type"),
];

static LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| GLOSSARY.iter().copied().collect());

/// Short description of a POS tag, dependency label or entity label.
///
/// Lookup is exact first, then case-insensitive, so both `"ROOT"` and
/// `"root"` resolve.
pub fn explain(label: &str) -> Option<&'static str> {
    if let Some(description) = LOOKUP.get(label) {
        return Some(description);
    }
    GLOSSARY
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(label))
        .map(|(_, description)| *description)
}
