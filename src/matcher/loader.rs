//! Pattern set files.
//!
//! A pattern set maps names to lists of alternative patterns, in JSON or
//! YAML (chosen by file extension). A name maps either directly to its
//! patterns or to an object that also selects an overlap filter:
//!
//! ```yaml
//! IPHONE_PATTERN:
//!   - [{TEXT: iPhone}, {TEXT: X}]
//! ADJ_NOUN_PATTERN:
//!   greedy: LONGEST
//!   patterns:
//!     - [{POS: ADJ}, {POS: NOUN}, {POS: NOUN, OP: "?"}]
//! ```
//!
//! Names are registered in file order.

use anyhow::{Context, Result, anyhow};
use log::debug;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

use super::{MatchFilter, Matcher, Pattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFormat {
    Json,
    Yaml,
}

impl PatternFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => PatternFormat::Yaml,
            _ => PatternFormat::Json,
        }
    }
}

/// Named pattern lists, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternSet {
    entries: Vec<PatternSetEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternSetEntry {
    pub name: String,
    pub patterns: Vec<Pattern>,
    pub filter: MatchFilter,
}

impl PatternSet {
    pub fn entries(&self) -> &[PatternSetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register every entry with `matcher`, stopping at the first failure.
    pub fn register(&self, matcher: &mut Matcher) -> Result<()> {
        for entry in &self.entries {
            matcher
                .add_with_filter(&entry.name, entry.patterns.clone(), entry.filter)
                .with_context(|| format!("Failed to register {:?}", entry.name))?;
        }
        Ok(())
    }
}

/// Parse a pattern set from a string.
pub fn parse_pattern_set(content: &str, format: PatternFormat) -> Result<PatternSet> {
    let root: JsonValue = match format {
        PatternFormat::Json => {
            serde_json::from_str(content).context("Failed to parse pattern JSON")?
        }
        PatternFormat::Yaml => {
            serde_yaml::from_str(content).context("Failed to parse pattern YAML")?
        }
    };

    let JsonValue::Object(map) = root else {
        return Err(anyhow!("Pattern set must map names to patterns"));
    };

    let mut entries = Vec::with_capacity(map.len());
    for (name, value) in map {
        let (patterns, filter) = match value {
            JsonValue::Array(list) => (parse_patterns(list, &name)?, MatchFilter::All),
            JsonValue::Object(mut detail) => {
                let patterns = detail
                    .remove("patterns")
                    .ok_or_else(|| anyhow!("{name:?} is missing \"patterns\""))?;
                let filter = match detail.remove("greedy") {
                    Some(greedy) => serde_json::from_value(greedy)
                        .with_context(|| format!("Invalid greedy filter for {name:?}"))?,
                    None => MatchFilter::All,
                };
                if let Some(key) = detail.keys().next() {
                    return Err(anyhow!("Unexpected key {key:?} for {name:?}"));
                }
                let JsonValue::Array(list) = patterns else {
                    return Err(anyhow!("\"patterns\" of {name:?} must be a list"));
                };
                (parse_patterns(list, &name)?, filter)
            }
            _ => return Err(anyhow!("{name:?} must map to a list of patterns")),
        };
        entries.push(PatternSetEntry {
            name,
            patterns,
            filter,
        });
    }

    Ok(PatternSet { entries })
}

fn parse_patterns(list: Vec<JsonValue>, name: &str) -> Result<Vec<Pattern>> {
    list.into_iter()
        .enumerate()
        .map(|(n, value)| {
            Pattern::from_value(value)
                .with_context(|| format!("Invalid pattern #{n} for {name:?}"))
        })
        .collect()
}

/// Load a pattern set from a JSON or YAML file.
pub fn load_pattern_set(path: &Path) -> Result<PatternSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pattern file {}", path.display()))?;
    let set = parse_pattern_set(&content, PatternFormat::from_path(path))
        .with_context(|| format!("Invalid pattern file {}", path.display()))?;
    debug!(
        "Loaded {} pattern name(s) from {}",
        set.len(),
        path.display()
    );
    Ok(set)
}
