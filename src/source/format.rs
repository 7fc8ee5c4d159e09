use std::path::Path;

use crate::error::Result;
use crate::types::{Rule, RuleSet};

/// Comment prefix in the plain-text list
const COMMENT_PREFIX: &str = "//";

/// Rule list file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// JSON array of label arrays: `[["com"],["*","uk"]]`
    Json,
    /// Plain-text Public Suffix List: one dotted rule per line
    Text,
}

impl ListFormat {
    /// Detect format from file extension
    pub fn detect(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(ListFormat::Json),
            "dat" | "txt" => Some(ListFormat::Text),
            _ => None,
        }
    }

    /// Decode a rule list in this format
    pub fn parse(&self, text: &str) -> Result<RuleSet> {
        match self {
            ListFormat::Json => parse_json(text),
            ListFormat::Text => Ok(parse_text(text)),
        }
    }
}

/// Parse the plain-text Public Suffix List.
///
/// Blank lines and `//` comments are skipped. Only the first
/// whitespace-delimited token of a line is the rule.
pub fn parse_text(text: &str) -> RuleSet {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .filter_map(|line| line.split_whitespace().next())
        .map(Rule::parse)
        .collect()
}

/// Decode a JSON array-of-arrays rule list
pub fn parse_json(text: &str) -> Result<RuleSet> {
    Ok(serde_json::from_str(text)?)
}

/// Encode a rule list as JSON, one rule per line
pub fn to_json(rules: &RuleSet) -> Result<String> {
    let mut out = String::from("[\n");
    for (i, rule) in rules.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push_str(&serde_json::to_string(rule)?);
    }
    out.push_str("\n]\n");
    Ok(out)
}
