//! Pattern types: steps, predicates and quantifiers.
//!
//! Patterns can be built in code or parsed from the dict-per-token format
//! used in pattern files:
//!
//! ```json
//! [{"LEMMA": "buy"}, {"POS": "DET", "OP": "?"}, {"POS": {"IN": ["NOUN", "PROPN"]}}]
//! ```

use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{MatcherError, Result};
use crate::tokens::{Attr, AttrValue, TokenAttributes};

/// Value a predicate compares a token attribute against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Str(String),
}

impl Value {
    fn equals(&self, actual: AttrValue<'_>) -> bool {
        match (self, actual) {
            (Value::Str(expected), AttrValue::Str(actual)) => expected == actual,
            (Value::Bool(expected), AttrValue::Bool(actual)) => *expected == actual,
            _ => false,
        }
    }

    fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Condition on a single attribute of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Equals(Value),
    In(Vec<Value>),
    NotIn(Vec<Value>),
}

impl Predicate {
    pub fn test(&self, actual: AttrValue<'_>) -> bool {
        match self {
            Predicate::Equals(expected) => expected.equals(actual),
            Predicate::In(values) => values.iter().any(|v| v.equals(actual)),
            Predicate::NotIn(values) => !values.iter().any(|v| v.equals(actual)),
        }
    }

    fn values(&self) -> &[Value] {
        match self {
            Predicate::Equals(value) => std::slice::from_ref(value),
            Predicate::In(values) | Predicate::NotIn(values) => values,
        }
    }
}

/// How many consecutive tokens a step may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantifier {
    /// Exactly one token (the default).
    #[default]
    One,
    /// `?`
    ZeroOrOne,
    /// `+`
    OneOrMore,
    /// `*`
    ZeroOrMore,
    /// `!`: the token at the cursor must not satisfy the step. Consumes nothing.
    Zero,
}

impl FromStr for Quantifier {
    type Err = MatcherError;

    fn from_str(op: &str) -> Result<Self> {
        match op {
            "1" => Ok(Quantifier::One),
            "?" => Ok(Quantifier::ZeroOrOne),
            "+" => Ok(Quantifier::OneOrMore),
            "*" => Ok(Quantifier::ZeroOrMore),
            "!" => Ok(Quantifier::Zero),
            other => Err(MatcherError::InvalidPattern(format!(
                "unknown OP {other:?}, expected one of \"!\", \"?\", \"+\", \"*\", \"1\""
            ))),
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Quantifier::One => "1",
            Quantifier::ZeroOrOne => "?",
            Quantifier::OneOrMore => "+",
            Quantifier::ZeroOrMore => "*",
            Quantifier::Zero => "!",
        };
        f.write_str(op)
    }
}

/// One element of a pattern: attribute predicates plus a quantifier.
///
/// A step without predicates matches any token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternStep {
    predicates: Vec<(Attr, Predicate)>,
    quantifier: Quantifier,
}

impl PatternStep {
    /// A step matching any single token.
    pub fn any() -> Self {
        Self::default()
    }

    /// A step requiring `attr` to equal `value`.
    pub fn attr(attr: Attr, value: impl Into<Value>) -> Self {
        Self::any().and(attr, value)
    }

    /// Add an equality predicate.
    pub fn and(self, attr: Attr, value: impl Into<Value>) -> Self {
        self.with_predicate(attr, Predicate::Equals(value.into()))
    }

    /// Add an arbitrary predicate.
    pub fn with_predicate(mut self, attr: Attr, predicate: Predicate) -> Self {
        self.predicates.push((attr, predicate));
        self
    }

    pub fn op(mut self, quantifier: Quantifier) -> Self {
        self.quantifier = quantifier;
        self
    }

    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    pub fn predicates(&self) -> &[(Attr, Predicate)] {
        &self.predicates
    }

    /// Whether `token` satisfies every predicate of this step.
    pub fn matches<T: TokenAttributes>(&self, token: &T) -> Result<bool> {
        for (attr, predicate) in &self.predicates {
            let actual = token
                .attribute(*attr)
                .ok_or(MatcherError::UnknownAttribute(*attr))?;
            if !predicate.test(actual) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn validate(&self) -> Result<()> {
        for (attr, predicate) in &self.predicates {
            if let Some(value) = predicate.values().iter().find(|v| v.is_bool() != attr.is_flag()) {
                let expected = if attr.is_flag() { "a boolean" } else { "a string" };
                return Err(MatcherError::InvalidPattern(format!(
                    "{attr} expects {expected}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Ordered sequence of steps, registered under a name in a matcher.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    steps: Vec<PatternStep>,
}

impl Pattern {
    /// Build a pattern, checking that predicate values have the type their
    /// attribute expects.
    pub fn new(steps: Vec<PatternStep>) -> Result<Self> {
        for step in &steps {
            step.validate()?;
        }
        Ok(Self { steps })
    }

    /// Parse a pattern from its JSON list-of-dicts form.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: JsonValue =
            serde_json::from_str(json).map_err(|e| MatcherError::InvalidPattern(e.to_string()))?;
        Self::from_value(value)
    }

    /// Build a pattern from an already parsed list of step objects.
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let raw: Vec<RawStep> =
            serde_json::from_value(value).map_err(|e| MatcherError::InvalidPattern(e.to_string()))?;
        let steps = raw
            .into_iter()
            .map(PatternStep::try_from)
            .collect::<Result<Vec<_>>>()?;
        Pattern::new(steps)
    }

    pub fn steps(&self) -> &[PatternStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Attributes referenced by any step.
    pub fn attrs(&self) -> impl Iterator<Item = Attr> + '_ {
        self.steps
            .iter()
            .flat_map(|step| step.predicates.iter().map(|(attr, _)| *attr))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Scalar(Value),
    Set(BTreeMap<String, Vec<Value>>),
}

type RawStep = BTreeMap<String, RawValue>;

impl TryFrom<RawStep> for PatternStep {
    type Error = MatcherError;

    fn try_from(raw: RawStep) -> Result<Self> {
        let mut step = PatternStep::any();

        for (key, value) in raw {
            if key == "OP" {
                step.quantifier = match value {
                    RawValue::Scalar(Value::Str(op)) => op.parse()?,
                    _ => {
                        return Err(MatcherError::InvalidPattern(
                            "OP must be a string".to_string(),
                        ));
                    }
                };
                continue;
            }

            let attr = Attr::from_str(&key)
                .map_err(|_| MatcherError::UnknownAttributeName(key.clone()))?;
            let predicate = match value {
                RawValue::Scalar(value) => Predicate::Equals(value),
                RawValue::Set(set) => set_predicate(&key, set)?,
            };
            step.predicates.push((attr, predicate));
        }

        step.validate()?;
        Ok(step)
    }
}

fn set_predicate(key: &str, set: BTreeMap<String, Vec<Value>>) -> Result<Predicate> {
    let mut entries = set.into_iter();
    match (entries.next(), entries.next()) {
        (Some((op, values)), None) if op == "IN" => Ok(Predicate::In(values)),
        (Some((op, values)), None) if op == "NOT_IN" => Ok(Predicate::NotIn(values)),
        _ => Err(MatcherError::InvalidPattern(format!(
            "{key} expects a value or a single IN / NOT_IN list"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Token;

    #[test]
    fn test_parse_quantifiers() {
        assert_eq!("?".parse::<Quantifier>().unwrap(), Quantifier::ZeroOrOne);
        assert_eq!("!".parse::<Quantifier>().unwrap(), Quantifier::Zero);
        assert_eq!("+".parse::<Quantifier>().unwrap(), Quantifier::OneOrMore);
        assert_eq!("*".parse::<Quantifier>().unwrap(), Quantifier::ZeroOrMore);
        assert_eq!("1".parse::<Quantifier>().unwrap(), Quantifier::One);
        assert!("{2}".parse::<Quantifier>().is_err());
    }

    #[test]
    fn test_parse_pattern_from_json() {
        let pattern =
            Pattern::from_json(r#"[{"LEMMA": "buy"}, {"POS": "DET", "OP": "?"}, {"POS": "NOUN"}]"#)
                .unwrap();
        assert_eq!(pattern.len(), 3);
        assert_eq!(pattern.steps()[1].quantifier(), Quantifier::ZeroOrOne);
        assert_eq!(
            pattern.steps()[0].predicates(),
            &[(Attr::Lemma, Predicate::Equals(Value::from("buy")))]
        );
        assert_eq!(
            pattern,
            Pattern::new(vec![
                PatternStep::attr(Attr::Lemma, "buy"),
                PatternStep::attr(Attr::Pos, "DET").op(Quantifier::ZeroOrOne),
                PatternStep::attr(Attr::Pos, "NOUN"),
            ])
            .unwrap()
        );
    }

    #[test]
    fn test_parse_boolean_and_set_predicates() {
        let pattern = Pattern::from_json(
            r#"[
                {"TEXT": "iOS"},
                {"IS_DIGIT": true},
                {"POS": {"IN": ["NOUN", "PROPN"]}},
                {"LOWER": {"NOT_IN": ["a"]}}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            pattern.steps()[1].predicates(),
            &[(Attr::IsDigit, Predicate::Equals(Value::Bool(true)))]
        );
        assert_eq!(
            pattern.steps()[2].predicates(),
            &[(
                Attr::Pos,
                Predicate::In(vec![Value::from("NOUN"), Value::from("PROPN")])
            )]
        );
        assert!(matches!(
            pattern.steps()[3].predicates()[0].1,
            Predicate::NotIn(_)
        ));
    }

    #[test]
    fn test_unknown_attribute_name() {
        let err = Pattern::from_json(r#"[{"COLOUR": "red"}]"#).unwrap_err();
        assert_eq!(err, MatcherError::UnknownAttributeName("COLOUR".to_string()));

        let quoted = Pattern::from_json(r#"[{"TEXT": "a"}, {"COL\"OUR": "red"}]"#).unwrap_err();
        assert_eq!(quoted, MatcherError::UnknownAttributeName("COL\"OUR".to_string()));
    }

    #[test]
    fn test_from_value_rejects_non_list_shapes() {
        let pattern = Pattern::from_value(serde_json::json!([{"ORTH": "iPhone"}])).unwrap();
        assert_eq!(pattern.steps()[0].predicates()[0].0, Attr::Text);
        assert!(matches!(
            Pattern::from_value(serde_json::json!({"TEXT": "a"})),
            Err(MatcherError::InvalidPattern(_))
        ));
        assert!(matches!(
            Pattern::from_value(serde_json::json!(["TEXT"])),
            Err(MatcherError::InvalidPattern(_))
        ));
        assert!(matches!(
            Pattern::from_json("[{"),
            Err(MatcherError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_type_mismatch_rejected() {
        assert!(matches!(
            Pattern::from_json(r#"[{"IS_DIGIT": "yes"}]"#),
            Err(MatcherError::InvalidPattern(_))
        ));
        assert!(matches!(
            Pattern::new(vec![PatternStep::attr(Attr::Text, true)]),
            Err(MatcherError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_bad_op_rejected() {
        assert!(matches!(
            Pattern::from_json(r#"[{"POS": "NOUN", "OP": "{2}"}]"#),
            Err(MatcherError::InvalidPattern(_))
        ));
        assert!(matches!(
            Pattern::from_json(r#"[{"POS": {"BETWEEN": ["A"]}}]"#),
            Err(MatcherError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_step_matches_token() {
        let token = Token::builder()
            .text("Apps")
            .pos("NOUN")
            .build()
            .unwrap();
        let step = PatternStep::attr(Attr::Pos, "NOUN").and(Attr::Lower, "apps");
        assert!(step.matches(&token).unwrap());
        assert!(!PatternStep::attr(Attr::Text, "apps").matches(&token).unwrap());
        assert!(PatternStep::any().matches(&token).unwrap());
        assert_eq!(
            PatternStep::attr(Attr::Lemma, "app").matches(&token),
            Err(MatcherError::UnknownAttribute(Attr::Lemma))
        );
    }

    #[test]
    fn test_predicate_sets() {
        let in_set = Predicate::In(vec![Value::from("NOUN"), Value::from("PROPN")]);
        assert!(in_set.test(AttrValue::Str("PROPN")));
        assert!(!in_set.test(AttrValue::Str("VERB")));
        let not_in = Predicate::NotIn(vec![Value::from("DET")]);
        assert!(not_in.test(AttrValue::Str("NOUN")));
        assert!(!not_in.test(AttrValue::Str("DET")));
        assert!(!Predicate::Equals(Value::Bool(true)).test(AttrValue::Str("true")));
    }
}
