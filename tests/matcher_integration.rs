use lexmatch::tokens::loader::parse_document;
use lexmatch::{
    Attr, AttrValue, Document, Match, MatchFilter, Matcher, MatcherError, Pattern, PatternStep,
    Quantifier, TokenAttributes, load_pattern_set, tokenize,
};
use std::io::Write;
use tempfile::Builder;

/// Tagged document from `(text, lemma, pos)` triples, single-spaced.
fn tagged(words: &[(&str, &str, &str)]) -> Document {
    let tokens: Vec<String> = words
        .iter()
        .map(|(text, lemma, pos)| {
            format!(r#"{{"text": {text:?}, "lemma": {lemma:?}, "pos": {pos:?}}}"#)
        })
        .collect();
    parse_document(&format!(r#"{{"tokens": [{}]}}"#, tokens.join(", "))).unwrap()
}

fn texts(matches: &[Match], doc: &Document) -> Vec<String> {
    matches
        .iter()
        .map(|m| m.span(doc).unwrap().text())
        .collect()
}

fn features_doc() -> Document {
    tagged(&[
        ("Features", "feature", "NOUN"),
        ("of", "of", "ADP"),
        ("the", "the", "DET"),
        ("app", "app", "NOUN"),
        ("include", "include", "VERB"),
        ("a", "a", "DET"),
        ("beautiful", "beautiful", "ADJ"),
        ("design", "design", "NOUN"),
        ("and", "and", "CCONJ"),
        ("smart", "smart", "ADJ"),
        ("search", "search", "NOUN"),
        ("engine", "engine", "NOUN"),
    ])
}

fn adj_noun_pattern() -> Pattern {
    Pattern::from_json(r#"[{"POS": "ADJ"}, {"POS": "NOUN"}, {"POS": "NOUN", "OP": "?"}]"#).unwrap()
}

#[test]
fn test_iphone_x_single_two_token_match() {
    let doc = tokenize("Upcoming iPhone X release date leaked as Apple reveals pre-orders");
    let mut matcher = Matcher::default();
    matcher
        .add(
            "IPHONE_PATTERN",
            vec![Pattern::from_json(r#"[{"TEXT": "iPhone"}, {"TEXT": "X"}]"#).unwrap()],
        )
        .unwrap();

    let matches = matcher.matches(&doc).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].len(), 2);
    assert_eq!(texts(&matches, &doc), vec!["iPhone X"]);
    assert_eq!(matcher.label(matches[0].key), Some("IPHONE_PATTERN"));
}

#[test]
fn test_optional_determiner() {
    let doc = tagged(&[
        ("I", "I", "PRON"),
        ("bought", "buy", "VERB"),
        ("a", "a", "DET"),
        ("smartphone", "smartphone", "NOUN"),
        ("Now", "now", "ADV"),
        ("I", "I", "PRON"),
        ("'m", "be", "AUX"),
        ("buying", "buy", "VERB"),
        ("apps", "app", "NOUN"),
    ]);
    let mut matcher = Matcher::default();
    matcher
        .add(
            "BUYING_PATTERN",
            vec![
                Pattern::from_json(
                    r#"[{"LEMMA": "buy"}, {"POS": "DET", "OP": "?"}, {"POS": "NOUN"}]"#,
                )
                .unwrap(),
            ],
        )
        .unwrap();

    let matches = matcher.matches(&doc).unwrap();
    assert_eq!(texts(&matches, &doc), vec!["bought a smartphone", "buying apps"]);
}

#[test]
fn test_adjective_noun_with_optional_second_noun() {
    let doc = features_doc();
    let mut matcher = Matcher::default();
    matcher.add("ADJ_NOUN_PATTERN", vec![adj_noun_pattern()]).unwrap();

    let matches = matcher.matches(&doc).unwrap();
    assert_eq!(
        texts(&matches, &doc),
        vec!["beautiful design", "smart search engine"]
    );
    assert_eq!(matches[1].len(), 3);
}

#[test]
fn test_overlapping_matches_across_names() {
    let doc = features_doc();
    let mut matcher = Matcher::default();
    matcher.add("ADJ_NOUN_PATTERN", vec![adj_noun_pattern()]).unwrap();
    matcher
        .add(
            "COMPOUND",
            vec![
                Pattern::new(vec![
                    PatternStep::attr(Attr::Pos, "NOUN"),
                    PatternStep::attr(Attr::Pos, "NOUN"),
                ])
                .unwrap(),
            ],
        )
        .unwrap();

    let matches = matcher.matches(&doc).unwrap();
    let labelled: Vec<(&str, String)> = matches
        .iter()
        .map(|m| (matcher.label(m.key).unwrap(), m.span(&doc).unwrap().text()))
        .collect();
    assert_eq!(
        labelled,
        vec![
            ("ADJ_NOUN_PATTERN", "beautiful design".to_string()),
            ("ADJ_NOUN_PATTERN", "smart search engine".to_string()),
            ("COMPOUND", "search engine".to_string()),
        ]
    );
    assert!(matches[1].overlaps(&matches[2]));
}

#[test]
fn test_matches_are_in_bounds_and_satisfy_their_steps() {
    let doc = features_doc();
    let pattern = adj_noun_pattern();
    let mut matcher = Matcher::default();
    matcher.add("ADJ_NOUN_PATTERN", vec![pattern.clone()]).unwrap();

    for m in matcher.matches(&doc).unwrap() {
        assert!(m.start < m.end && m.end <= doc.len());
        assert!(pattern.steps()[0].matches(&doc[m.start]).unwrap());
        assert!(pattern.steps()[1].matches(&doc[m.start + 1]).unwrap());
    }
}

#[test]
fn test_matching_is_idempotent() {
    let doc = features_doc();
    let mut matcher = Matcher::default();
    matcher.add("ADJ_NOUN_PATTERN", vec![adj_noun_pattern()]).unwrap();
    assert_eq!(matcher.matches(&doc).unwrap(), matcher.matches(&doc).unwrap());
}

#[test]
fn test_missing_annotation_layer_is_an_error() {
    let doc = tokenize("Features of the app include a beautiful design");
    let mut matcher = Matcher::default();
    matcher.add("ADJ_NOUN_PATTERN", vec![adj_noun_pattern()]).unwrap();

    let err = matcher.matches(&doc).unwrap_err();
    assert_eq!(err, MatcherError::UnknownAttribute(Attr::Pos));
    assert!(err.is_unknown_attribute());
}

#[test]
fn test_ios_versions_with_is_digit() {
    let doc = tokenize(
        "After making the iOS update you won't notice a radical system-wide redesign: \
         nothing like the aesthetic upheaval we got with iOS 7. Most of iOS 11's furniture \
         remains the same as in iOS 10.",
    );
    let mut matcher = Matcher::default();
    matcher
        .add(
            "IOS_PATTERN",
            vec![Pattern::from_json(r#"[{"TEXT": "iOS"}, {"IS_DIGIT": true}]"#).unwrap()],
        )
        .unwrap();

    let matches = matcher.matches(&doc).unwrap();
    assert_eq!(texts(&matches, &doc), vec!["iOS 7", "iOS 11", "iOS 10"]);
}

#[test]
fn test_number_followed_by_percent_sign() {
    let doc = tokenize("In 1990, more than 60% of people in East Asia were in extreme poverty.");
    let mut matcher = Matcher::default();
    matcher
        .add(
            "PERCENTAGE",
            vec![Pattern::from_json(r#"[{"LIKE_NUM": true}, {"TEXT": "%"}]"#).unwrap()],
        )
        .unwrap();

    let matches = matcher.matches(&doc).unwrap();
    assert_eq!(texts(&matches, &doc), vec!["60%"]);
}

#[test]
fn test_negation_and_filters() {
    let doc = tagged(&[
        ("very", "very", "ADV"),
        ("big", "big", "ADJ"),
        ("red", "red", "ADJ"),
        ("cars", "car", "NOUN"),
    ]);
    let not_noun_run = || {
        vec![
            Pattern::new(vec![
                PatternStep::attr(Attr::Pos, "NOUN").op(Quantifier::Zero),
                PatternStep::any().op(Quantifier::OneOrMore),
            ])
            .unwrap(),
        ]
    };

    let mut all = Matcher::default();
    all.add("RUN", not_noun_run()).unwrap();
    let found: Vec<(usize, usize)> = all
        .matches(&doc)
        .unwrap()
        .iter()
        .map(|m| (m.start, m.end))
        .collect();
    assert_eq!(found, vec![(0, 4), (1, 4), (2, 4)]);

    let mut longest = Matcher::default();
    longest
        .add_with_filter("RUN", not_noun_run(), MatchFilter::Longest)
        .unwrap();
    assert_eq!(texts(&longest.matches(&doc).unwrap(), &doc), vec!["very big red cars"]);
}

#[test]
fn test_pattern_file_registration() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{
            "BUYING_PATTERN": [
                [{{"LEMMA": "buy"}}, {{"POS": "DET", "OP": "?"}}, {{"POS": "NOUN"}}]
            ],
            "APPS": {{"patterns": [[{{"LOWER": "apps"}}]], "greedy": "FIRST"}}
        }}"#
    )
    .unwrap();

    let set = load_pattern_set(file.path()).unwrap();
    let mut matcher = Matcher::default();
    set.register(&mut matcher).unwrap();
    assert_eq!(
        matcher.names().collect::<Vec<_>>(),
        vec!["BUYING_PATTERN", "APPS"]
    );

    let doc = tagged(&[("buying", "buy", "VERB"), ("apps", "app", "NOUN")]);
    let matches = matcher.matches(&doc).unwrap();
    assert_eq!(texts(&matches, &doc), vec!["buying apps", "apps"]);
}

/// Tokens from some other pipeline, exposing only text and a coarse tag.
struct Tagged<'a> {
    text: &'a str,
    tag: &'a str,
}

impl TokenAttributes for Tagged<'_> {
    fn attribute(&self, attr: Attr) -> Option<AttrValue<'_>> {
        match attr {
            Attr::Text => Some(AttrValue::Str(self.text)),
            Attr::Tag => Some(AttrValue::Str(self.tag)),
            _ => None,
        }
    }
}

#[test]
fn test_custom_token_representation() {
    let tokens = [
        Tagged { text: "the", tag: "DT" },
        Tagged { text: "quick", tag: "JJ" },
        Tagged { text: "fox", tag: "NN" },
    ];
    let mut matcher = Matcher::default();
    let noun_phrase =
        Pattern::from_json(r#"[{"TAG": "DT"}, {"TAG": "JJ", "OP": "*"}, {"TAG": "NN"}]"#).unwrap();
    matcher.add("NP", vec![noun_phrase]).unwrap();

    let matches = matcher.matches_tokens(&tokens).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!((matches[0].start, matches[0].end), (0, 3));

    matcher
        .add(
            "LOWER",
            vec![Pattern::from_json(r#"[{"LOWER": "fox"}]"#).unwrap()],
        )
        .unwrap();
    assert_eq!(
        matcher.matches_tokens(&tokens),
        Err(MatcherError::UnknownAttribute(Attr::Lower))
    );
}

#[test]
fn test_large_plain_document_under_default_budget() {
    let doc = tokenize(&"the quick brown fox jumps over the lazy dog ".repeat(30_000));
    assert_eq!(doc.len(), 270_000);
    let mut matcher = Matcher::default();
    for word in ["the", "fox", "lazy", "dog"] {
        let pattern = Pattern::new(vec![PatternStep::attr(Attr::Text, word)]).unwrap();
        matcher.add(&word.to_uppercase(), vec![pattern]).unwrap();
    }

    let matches = matcher.matches(&doc).unwrap();
    assert_eq!(matches.len(), 150_000);
    assert_eq!(matches.iter().filter(|m| matcher.label(m.key) == Some("THE")).count(), 60_000);
}

#[test]
fn test_entity_pattern_on_document_without_entities() {
    let doc =
        parse_document(r#"{"tokens": [{"text": "she"}, {"text": "ate"}], "ents": []}"#).unwrap();
    let mut matcher = Matcher::default();
    matcher
        .add("ORG", vec![Pattern::from_json(r#"[{"ENT_TYPE": "ORG"}]"#).unwrap()])
        .unwrap();
    assert_eq!(matcher.matches(&doc), Ok(vec![]));

    let not_org = Pattern::from_json(r#"[{"ENT_TYPE": {"NOT_IN": ["ORG"]}}]"#).unwrap();
    matcher.add("NOT_ORG", vec![not_org]).unwrap();
    assert_eq!(matcher.matches(&doc).unwrap().len(), 2);
}
